// src/lib.rs

//! Filesystem change events as a self-delimiting wire format.
//!
//! - [`codec`]: the `<len><marker><payload>` encoding and its decoder.
//! - [`flags`]: the creation-option and event flag families.
//! - [`event`]: event records (`path`, `id`, `flags`).
//! - [`path`]: descriptor-backed handles that survive renames.
//! - [`pipeline`]: raw tuples in, encoded records out.

pub mod cli;
pub mod codec;
pub mod config;
pub mod errors;
pub mod event;
pub mod flags;
pub mod logging;
pub mod path;
pub mod pipeline;
pub mod types;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use crate::cli::{CliArgs, Command, FlagsAction};
use crate::codec::{MapWriter, NetstringReader};
use crate::config::{ConfigFile, load_or_default};
use crate::event::Event;
use crate::flags::parse_raw_bits;
use crate::path::PathHandle;
use crate::pipeline::{EventSink, EventSource, PumpSummary, TextTupleSource, pump};
use crate::types::FlagKind;

/// High-level entry point used by `main.rs`.
///
/// Loads the configuration, then runs the selected subcommand against
/// stdin/stdout (or the given file).
pub fn run(args: CliArgs) -> Result<()> {
    let cfg = load_or_default(args.config.as_deref())?;
    debug!(?cfg, "effective configuration");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Flags { family, action } => run_flags(family, &action, &mut out)?,
        Command::Decode { file, events } => {
            let input = open_input(file.as_deref())?;
            let count = decode_stream(input, &mut out, &cfg, events)?;
            info!(units = count, "decode finished");
        }
        Command::Replay { file } => {
            let input = open_input(file.as_deref())?;
            replay(input, &mut out, &cfg)?;
        }
        Command::Resolve { path, refresh } => resolve(&path, refresh, &mut out)?,
    }

    out.flush()?;
    Ok(())
}

/// `flags` subcommand.
pub fn run_flags(family: FlagKind, action: &FlagsAction, out: &mut impl Write) -> Result<()> {
    match action {
        FlagsAction::Format { bits } => {
            let bits = parse_raw_bits(bits)?;
            writeln!(out, "{}", family.format_bits(bits))?;
        }
        FlagsAction::Parse { text } => {
            let bits = family.parse_text(text)?;
            writeln!(out, "{bits} (0x{bits:08x})")?;
        }
        FlagsAction::Encode { bits } => {
            let bits = parse_raw_bits(bits)?;
            out.write_all(&family.encode_bits(bits))?;
            writeln!(out)?;
        }
        FlagsAction::List => {
            for (name, bit) in family.table() {
                writeln!(out, "0x{bit:08x}\t{name}")?;
            }
        }
    }
    Ok(())
}

/// Print every unit read from `input`, one per line.
///
/// With `as_events`, units are read back as event records and written in the
/// same `id<TAB>flags<TAB>path` form that [`replay`] accepts. Flags are
/// written as raw hex bits so unnamed bits survive the round trip. A record
/// whose path contains a newline has no such form and stops the decode.
pub fn decode_stream(
    input: impl BufRead,
    out: &mut impl Write,
    cfg: &ConfigFile,
    as_events: bool,
) -> Result<usize> {
    let mut reader = NetstringReader::with_decoder(input, cfg.decoder());
    let mut count = 0;
    loop {
        let start = reader.offset();
        let Some(value) = reader.read_value().with_context(|| {
            format!("decoding unit #{} at byte offset {start}", count + 1)
        })?
        else {
            break;
        };
        if as_events {
            let event = Event::from_value(&value).with_context(|| {
                format!("unit #{} at byte offset {start} is not an event record", count + 1)
            })?;
            if event.path.contains('\n') {
                bail!(
                    "event #{} has a path containing a newline ({:?}); it cannot be written as a tuple line",
                    count + 1,
                    event.path
                );
            }
            writeln!(
                out,
                "{}\t0x{:08x}\t{}",
                event.id.raw(),
                event.flags.bits(),
                event.path
            )?;
        } else {
            writeln!(out, "{value}")?;
        }
        count += 1;
    }
    Ok(count)
}

/// Encode tuple lines from `input` as event records on `out`.
pub fn replay(input: impl BufRead, out: impl Write, cfg: &ConfigFile) -> Result<PumpSummary> {
    let mut source = TextTupleSource::new(input);
    let mut sink = EventSink::new(out, cfg.output.separator);
    let summary = pump(&mut source, &mut sink)?;
    if let Some(latest) = source.latest_id() {
        debug!(%latest, lines = source.line_no(), "replay source exhausted");
    }
    Ok(summary)
}

/// Open a [`PathHandle`] on `path` and describe it.
pub fn resolve(path: &Path, refresh: bool, out: &mut impl Write) -> Result<()> {
    let mut handle = PathHandle::open(path)?;
    if refresh {
        handle.refresh()?;
    }

    writeln!(out, "path: {}", handle.current_path().display())?;
    writeln!(out, "components: {:?}", handle.path_components())?;
    writeln!(out, "directory: {}", handle.is_directory())?;
    writeln!(out, "exists: {}", handle.exists())?;

    let path_text = handle.current_path().to_string_lossy().into_owned();
    let mut map = MapWriter::new();
    map.entry("path", path_text.as_str())
        .entry("directory", &handle.is_directory())
        .entry("exists", &handle.exists());
    let wire = map.finish();
    out.write_all(b"wire: ")?;
    out.write_all(&wire)?;
    writeln!(out)?;

    Ok(())
}

fn open_input(file: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match file {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}
