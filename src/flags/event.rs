// src/flags/event.rs

//! Per-event notification flags (`kFSEventStreamEventFlag*`).

#![allow(non_upper_case_globals)]

use bitflags::bitflags;

use super::impl_flag_family;
use crate::types::FlagKind;

bitflags! {
    /// What happened to the path an event refers to.
    ///
    /// The first group are stream-level signals (dropped events, wrapped
    /// ids, mounts); the `Item*` group describes the changed item and is
    /// only populated when the stream was created with `FileEvents`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct EventFlags: u32 {
        /// Rescan the directory and everything below it.
        const MustScanSubDirs = 0x0000_0001;
        const UserDropped = 0x0000_0002;
        const KernelDropped = 0x0000_0004;
        /// The 64-bit id counter wrapped; earlier ids are no longer valid.
        const EventIDsWrapped = 0x0000_0008;
        /// Sentinel closing the historical replay; its path is meaningless.
        const HistoryDone = 0x0000_0010;
        /// The watched path or one of its ancestors changed. Id is zero.
        const RootChanged = 0x0000_0020;
        const Mount = 0x0000_0040;
        const Unmount = 0x0000_0080;
        const ItemCreated = 0x0000_0100;
        const ItemRemoved = 0x0000_0200;
        const InodeMetaMod = 0x0000_0400;
        const ItemRenamed = 0x0000_0800;
        const ItemModified = 0x0000_1000;
        const ItemFinderInfoMod = 0x0000_2000;
        const ItemChangeOwner = 0x0000_4000;
        const ItemXattrMod = 0x0000_8000;
        const ItemIsFile = 0x0001_0000;
        const ItemIsDir = 0x0002_0000;
        const ItemIsSymlink = 0x0004_0000;
        /// Caused by the current process (requires `MarkSelf`).
        const OwnEvent = 0x0008_0000;
        const ItemIsHardlink = 0x0010_0000;
        /// The item was the last hard link to its inode.
        const ItemIsLastHardlink = 0x0020_0000;
        const ItemCloned = 0x0040_0000;
    }
}

impl_flag_family!(EventFlags, FlagKind::Event);

impl EventFlags {
    /// Stream-level signals telling the consumer its view may be stale.
    pub const RESCAN: Self = Self::MustScanSubDirs
        .union(Self::UserDropped)
        .union(Self::KernelDropped)
        .union(Self::RootChanged);

    /// True if the consumer should rescan instead of trusting the event.
    pub fn needs_rescan(&self) -> bool {
        self.intersects(Self::RESCAN)
    }
}
