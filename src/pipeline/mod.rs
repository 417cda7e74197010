// src/pipeline/mod.rs

//! Raw notifications in, encoded event records out.
//!
//! ```text
//! EventSource ──RawEvent──▶ Event ──encode──▶ EventSink<W: Write>
//! ```
//!
//! The source stands in for the OS change service; the sink for whatever
//! consumes the wire stream.

pub mod sink;
pub mod source;

pub use sink::EventSink;
pub use source::{EventSource, RawEvent, TextTupleSource, parse_tuple_line};

use std::io::Write;

use tracing::{debug, info, warn};

use crate::errors::{FswireError, Result};
use crate::event::{Event, EventId};

/// What a [`pump`] run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpSummary {
    /// Events encoded and written.
    pub events: usize,
    /// Malformed tuples skipped.
    pub skipped: usize,
    /// Written events that asked the consumer to rescan.
    pub rescans: usize,
    /// Highest id written.
    pub last_id: Option<EventId>,
}

/// Drain `source` into `sink` until the source is exhausted.
///
/// Malformed tuples are logged and skipped; I/O failures on either side stop
/// the pump and are returned. The sink is flushed before returning.
pub fn pump<S, W>(source: &mut S, sink: &mut EventSink<W>) -> Result<PumpSummary>
where
    S: EventSource + ?Sized,
    W: Write,
{
    let mut summary = PumpSummary::default();

    while let Some(next) = source.next_event() {
        let raw = match next {
            Ok(raw) => raw,
            Err(err @ FswireError::MalformedTuple { .. }) => {
                warn!(error = %err, "skipping malformed event tuple");
                summary.skipped += 1;
                continue;
            }
            Err(err) => return Err(err),
        };

        let event = Event::from(raw);
        debug!(path = %event.path, id = %event.id, flags = %event.flags, "encoding event");
        sink.write(&event)?;

        summary.events += 1;
        if event.flags.needs_rescan() {
            summary.rescans += 1;
        }
        summary.last_id = Some(summary.last_id.map_or(event.id, |last| last.max(event.id)));
    }

    sink.flush()?;
    info!(
        events = summary.events,
        skipped = summary.skipped,
        rescans = summary.rescans,
        "event pump finished"
    );
    Ok(summary)
}
