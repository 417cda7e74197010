// src/flags/create.rs

//! Stream creation options (`kFSEventStreamCreateFlag*`).

#![allow(non_upper_case_globals)]

use bitflags::bitflags;

use super::impl_flag_family;
use crate::types::FlagKind;

bitflags! {
    /// Options that shape how a change stream delivers events.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct CreateFlags: u32 {
        /// Callback receives CF types instead of raw C strings.
        const UseCFTypes = 0x0000_0001;
        /// An event arriving after a quiet period is delivered immediately
        /// instead of waiting out the latency window.
        const NoDefer = 0x0000_0002;
        /// Report changes to the watched path itself and its ancestors
        /// (`RootChanged` events).
        const WatchRoot = 0x0000_0004;
        /// Drop events caused by the current process.
        const IgnoreSelf = 0x0000_0008;
        /// Per-file events rather than per-directory.
        const FileEvents = 0x0000_0010;
        /// Tag events caused by the current process with `OwnEvent`.
        const MarkSelf = 0x0000_0020;
        /// Deliver per-event dictionaries with extended metadata.
        const UseExtendedData = 0x0000_0040;
    }
}

impl_flag_family!(CreateFlags, FlagKind::Create);

impl CreateFlags {
    /// Options a rename-aware, file-granular listener registers with.
    pub const fn defaults() -> Self {
        Self::UseCFTypes
            .union(Self::WatchRoot)
            .union(Self::FileEvents)
            .union(Self::MarkSelf)
    }
}
