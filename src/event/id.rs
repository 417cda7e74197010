// src/event/id.rs

use std::fmt;

use crate::codec::Encode;

/// Position in an OS change stream.
///
/// Ids from one stream increase monotonically, so comparing two of them
/// orders the events; comparing ids from different streams means nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(u64);

impl EventId {
    /// Sentinel meaning "start from the current moment" when passed as a
    /// starting point. It is not a real position and sorts after every id.
    pub const NOW: EventId = EventId(u64::MAX);

    pub const fn new(raw: u64) -> Self {
        EventId(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    pub const fn is_now(self) -> bool {
        self.0 == u64::MAX
    }

    /// The system-wide counter value right now.
    #[cfg(target_os = "macos")]
    pub fn current() -> Self {
        // SAFETY: takes no arguments and only reads the global counter.
        EventId(unsafe { fsevent_sys::FSEventsGetCurrentEventId() })
    }
}

impl From<u64> for EventId {
    fn from(raw: u64) -> Self {
        EventId(raw)
    }
}

impl From<EventId> for u64 {
    fn from(id: EventId) -> Self {
        id.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_now() {
            f.write_str("now")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Encode for EventId {
    fn encode_into(&self, out: &mut Vec<u8>) {
        self.0.encode_into(out)
    }
}
