// tests/cli_commands.rs

use std::io::Cursor;

use clap::Parser;
use fswire::cli::{CliArgs, Command, FlagsAction, LogLevel};
use fswire::codec::{Encode, decode_exact};
use fswire::event::Event;
use fswire::logging::resolve_level;
use fswire::types::{FlagKind, Separator};
use fswire::{decode_stream, replay, resolve, run_flags};
use fswire_test_utils::builders::{ConfigFileBuilder, TupleInputBuilder};
use fswire_test_utils::fixtures::NestedTree;

fn flags_output(family: FlagKind, action: FlagsAction) -> String {
    let mut out = Vec::new();
    run_flags(family, &action, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_cli_parses_subcommands() {
    let args = CliArgs::try_parse_from(["fswire", "flags", "event", "format", "0x100"]).unwrap();
    match args.command {
        Command::Flags {
            family: FlagKind::Event,
            action: FlagsAction::Format { bits },
        } => assert_eq!(bits, "0x100"),
        other => panic!("unexpected command {other:?}"),
    }

    let args = CliArgs::try_parse_from([
        "fswire",
        "replay",
        "events.tsv",
        "--log-level",
        "debug",
        "--config",
        "custom.toml",
    ])
    .unwrap();
    assert!(matches!(args.command, Command::Replay { file: Some(_) }));
    assert!(matches!(args.log_level, Some(LogLevel::Debug)));
    assert_eq!(args.config.as_deref(), Some(std::path::Path::new("custom.toml")));

    assert!(CliArgs::try_parse_from(["fswire", "flags", "bogus", "list"]).is_err());
}

#[test]
fn test_flags_subcommand_actions() {
    assert_eq!(
        flags_output(
            FlagKind::Event,
            FlagsAction::Format {
                bits: "65792".into()
            }
        ),
        "[ItemCreated,ItemIsFile]\n"
    );
    assert_eq!(
        flags_output(
            FlagKind::Create,
            FlagsAction::Parse {
                text: "[NoDefer,WatchRoot]".into()
            }
        ),
        "6 (0x00000006)\n"
    );
    assert_eq!(
        flags_output(
            FlagKind::Event,
            FlagsAction::Encode {
                bits: "0".into()
            }
        ),
        "19{5,cflag1#05,named0[\n"
    );

    let listing = flags_output(FlagKind::Create, FlagsAction::List);
    assert_eq!(listing.lines().count(), 7);
    assert!(listing.starts_with("0x00000001\tUseCFTypes\n"));
}

#[test]
fn test_flags_subcommand_rejects_bad_input() {
    let mut out = Vec::new();
    assert!(
        run_flags(
            FlagKind::Event,
            &FlagsAction::Format {
                bits: "lots".into()
            },
            &mut out
        )
        .is_err()
    );
    assert!(
        run_flags(
            FlagKind::Event,
            &FlagsAction::Parse {
                text: "ItemCreated".into()
            },
            &mut out
        )
        .is_err()
    );
}

#[test]
fn test_replay_then_decode_events_round_trips_tuples() {
    let cfg = ConfigFileBuilder::new()
        .with_separator(Separator::Newline)
        .build();
    let input = TupleInputBuilder::new()
        .event(1, "0x100", "/a")
        .event(2, "[ItemRemoved,ItemIsFile]", "/b")
        .build();

    let mut wire = Vec::new();
    let summary = replay(Cursor::new(input), &mut wire, &cfg).unwrap();
    assert_eq!(summary.events, 2);
    assert_eq!(wire.iter().filter(|&&b| b == b'\n').count(), 2);

    let mut text = Vec::new();
    let count = decode_stream(Cursor::new(wire), &mut text, &cfg, true).unwrap();
    assert_eq!(count, 2);
    assert_eq!(
        String::from_utf8(text).unwrap(),
        "1\t0x00000100\t/a\n2\t0x00010200\t/b\n"
    );
}

#[test]
fn test_decoded_events_replay_with_unnamed_bits_intact() {
    let cfg = ConfigFileBuilder::new().build();
    let original = Event::new("/tmp/a", 7, 0x8000_0100);

    let mut text = Vec::new();
    decode_stream(Cursor::new(original.encode()), &mut text, &cfg, true).unwrap();
    assert_eq!(String::from_utf8(text.clone()).unwrap(), "7\t0x80000100\t/tmp/a\n");

    let mut wire = Vec::new();
    let summary = replay(Cursor::new(text), &mut wire, &cfg).unwrap();
    assert_eq!(summary.events, 1);

    let replayed = Event::from_value(&decode_exact(&wire).unwrap()).unwrap();
    assert_eq!(replayed, original);
    assert_eq!(replayed.flags.bits(), 0x8000_0100);
}

#[test]
fn test_decoded_events_keep_trailing_carriage_return_in_path() {
    let cfg = ConfigFileBuilder::new().build();
    let original = Event::new("/tmp/odd\r", 9, 0x100);

    let mut text = Vec::new();
    decode_stream(Cursor::new(original.encode()), &mut text, &cfg, true).unwrap();

    let mut wire = Vec::new();
    replay(Cursor::new(text), &mut wire, &cfg).unwrap();
    assert_eq!(Event::from_value(&decode_exact(&wire).unwrap()).unwrap(), original);
}

#[test]
fn test_decode_events_rejects_path_with_newline() {
    let cfg = ConfigFileBuilder::new().build();
    let mut wire = Event::new("/tmp/ok", 1, 0).encode();
    wire.extend(Event::new("/tmp/two\nlines", 2, 0).encode());

    let mut text = Vec::new();
    let err = decode_stream(Cursor::new(wire), &mut text, &cfg, true).unwrap_err();
    assert!(err.to_string().contains("newline"));
    assert_eq!(String::from_utf8(text).unwrap(), "1\t0x00000000\t/tmp/ok\n");
}

#[test]
fn test_decode_error_names_byte_offset() {
    let cfg = ConfigFileBuilder::new().build();
    let mut text = Vec::new();
    let err = decode_stream(Cursor::new(b"1,a3?abc".to_vec()), &mut text, &cfg, false)
        .unwrap_err();
    assert!(format!("{err:#}").contains("unit #2 at byte offset 3"));
    assert_eq!(String::from_utf8(text).unwrap(), "\"a\"\n");
}

#[test]
fn test_decode_prints_values() {
    let cfg = ConfigFileBuilder::new().build();
    let wire = Event::new("/a", 3, 0x10).encode();

    let mut text = Vec::new();
    decode_stream(Cursor::new(wire), &mut text, &cfg, false).unwrap();
    assert_eq!(
        String::from_utf8(text).unwrap(),
        "{\"path\": \"/a\", \"id\": 3, \"flags\": {\"cflag\": 16, \"named\": [\"HistoryDone\"]}}\n"
    );
}

#[test]
fn test_decode_respects_configured_limit() {
    let cfg = ConfigFileBuilder::new().with_max_unit_len(3).build();
    let mut text = Vec::new();
    assert!(decode_stream(Cursor::new(b"10,abcdefghij".to_vec()), &mut text, &cfg, false).is_err());
}

#[test]
fn test_resolve_reports_handle() {
    let tree = NestedTree::new();
    let mut out = Vec::new();
    resolve(&tree.inner(), true, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains(&format!("path: {}\n", tree.inner().display())));
    assert!(text.contains("directory: true\n"));
    assert!(text.contains("exists: true\n"));

    let wire_line = text
        .lines()
        .find_map(|line| line.strip_prefix("wire: "))
        .unwrap();
    let value = decode_exact(wire_line.as_bytes()).unwrap();
    assert_eq!(
        value.get("path").and_then(|v| v.as_text()),
        tree.inner().to_str()
    );
}

#[test]
fn test_resolve_missing_path_fails() {
    let tree = NestedTree::new();
    let mut out = Vec::new();
    assert!(resolve(&tree.root().join("gone"), false, &mut out).is_err());
    assert!(out.is_empty());
}

#[test]
fn test_log_level_priority() {
    assert_eq!(
        resolve_level(Some(LogLevel::Warn), Some("trace")),
        tracing::Level::WARN
    );
    assert_eq!(resolve_level(None, Some(" DEBUG ")), tracing::Level::DEBUG);
    assert_eq!(resolve_level(None, Some("warning")), tracing::Level::WARN);
    assert_eq!(resolve_level(None, Some("loud")), tracing::Level::INFO);
    assert_eq!(resolve_level(None, None), tracing::Level::INFO);
}
