// src/pipeline/source.rs

use std::io::BufRead;

use crate::errors::{FswireError, Result};
use crate::event::{Event, EventId};
use crate::flags::{EventFlags, parse_raw_bits};

/// One notification exactly as the OS hands it over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub path: String,
    pub id: u64,
    pub flags: u32,
}

impl RawEvent {
    pub fn new(path: impl Into<String>, id: u64, flags: u32) -> Self {
        Self {
            path: path.into(),
            id,
            flags,
        }
    }
}

impl From<RawEvent> for Event {
    fn from(raw: RawEvent) -> Self {
        Event::new(raw.path, raw.id, raw.flags)
    }
}

/// Anything that yields raw notifications.
///
/// The OS registration and callback plumbing live behind this trait; the
/// pipeline only pulls tuples from it.
pub trait EventSource {
    /// Next tuple, `None` when the source is exhausted.
    fn next_event(&mut self) -> Option<Result<RawEvent>>;

    /// Highest id the source has observed, if it tracks one.
    fn latest_id(&self) -> Option<EventId> {
        None
    }
}

impl<I> EventSource for I
where
    I: Iterator<Item = RawEvent>,
{
    fn next_event(&mut self) -> Option<Result<RawEvent>> {
        self.next().map(Ok)
    }
}

/// Reads tuples written one per line as `<id>\t<flags>\t<path>`.
///
/// `flags` is decimal, `0x` hex, or the bracketed name list. Blank lines and
/// lines starting with `#` are skipped. Everything after the second tab is
/// the path, tabs included.
///
/// Only `\n` ends a line; a `\r` before it stays part of the path. A path
/// containing `\n` cannot be written in this form. Lines that are not valid
/// UTF-8 come back as `MalformedTuple` so the pump can skip them.
#[derive(Debug)]
pub struct TextTupleSource<R> {
    reader: R,
    line_no: usize,
    latest: Option<EventId>,
    buf: Vec<u8>,
}

impl<R: BufRead> TextTupleSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            latest: None,
            buf: Vec::new(),
        }
    }

    /// 1-based number of the last line read.
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> EventSource for TextTupleSource<R> {
    fn next_event(&mut self) -> Option<Result<RawEvent>> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(err) => return Some(Err(err.into())),
            }
            self.line_no += 1;

            let bytes = self.buf.strip_suffix(b"\n").unwrap_or(&self.buf[..]);
            let line = match std::str::from_utf8(bytes) {
                Ok(line) => line,
                Err(err) => {
                    return Some(Err(FswireError::MalformedTuple {
                        line: self.line_no,
                        reason: format!("line is not valid UTF-8: {err}"),
                    }));
                }
            };
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let parsed = parse_tuple_line(line, self.line_no);
            if let Ok(raw) = &parsed {
                let id = EventId::new(raw.id);
                self.latest = Some(self.latest.map_or(id, |latest| latest.max(id)));
            }
            return Some(parsed);
        }
    }

    fn latest_id(&self) -> Option<EventId> {
        self.latest
    }
}

/// Parse one `<id>\t<flags>\t<path>` line.
pub fn parse_tuple_line(line: &str, line_no: usize) -> Result<RawEvent> {
    let malformed = |reason: String| FswireError::MalformedTuple {
        line: line_no,
        reason,
    };

    let mut fields = line.splitn(3, '\t');
    let (Some(id), Some(flags), Some(path)) = (fields.next(), fields.next(), fields.next()) else {
        return Err(malformed(
            "expected three tab-separated fields: id, flags, path".to_string(),
        ));
    };

    let id = id
        .trim()
        .parse::<u64>()
        .map_err(|err| malformed(format!("invalid event id {id:?}: {err}")))?;
    let flags = parse_flag_field(flags.trim()).map_err(|err| malformed(err.to_string()))?;

    Ok(RawEvent::new(path, id, flags))
}

fn parse_flag_field(field: &str) -> Result<u32> {
    if field.starts_with('[') {
        EventFlags::parse(field).map(|flags| flags.bits())
    } else {
        parse_raw_bits(field)
    }
}
