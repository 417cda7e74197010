// src/flags/mod.rs

//! Named bit sets for the two FSEvents flag families.
//!
//! Each family is a `bitflags` type whose constant declaration order is the
//! bit→name table order. That order decides how names appear in the textual
//! form (`[ItemCreated,ItemIsFile]`) and in the wire form's `named` array.
//!
//! Raw bits are always kept verbatim (`from_bits_retain`): bits outside the
//! table survive in the numeric form and are simply left out of the names.

pub mod create;
pub mod event;

pub use create::CreateFlags;
pub use event::EventFlags;

use bitflags::Flags;
use tracing::debug;

use crate::codec::{Encode, MapWriter};
use crate::errors::{FswireError, Result};
use crate::types::FlagKind;

/// Map key holding the raw numeric bits in the wire form.
pub const RAW_KEY: &str = "cflag";
/// Map key holding the array of matched names in the wire form.
pub const NAMES_KEY: &str = "named";

/// Shared behaviour of the flag families.
pub trait FlagFamily: Flags<Bits = u32> + Copy {
    const KIND: FlagKind;

    /// Names of the known flags set in `self`, in table order.
    fn names(&self) -> Vec<&'static str> {
        let bits = self.bits();
        Self::FLAGS
            .iter()
            .filter(|flag| {
                let flag_bits = flag.value().bits();
                flag_bits != 0 && bits & flag_bits == flag_bits
            })
            .map(|flag| flag.name())
            .collect()
    }

    /// Bits that no table entry names.
    fn unknown_bits(&self) -> u32 {
        self.bits() & !Self::all().bits()
    }

    /// `"[Name1,Name2]"`; an empty set is `"[]"`.
    fn to_text(&self) -> String {
        format!("[{}]", self.names().join(","))
    }

    /// Parse the bracketed textual form.
    ///
    /// Input not wrapped in `[` … `]` is rejected. Names missing from the
    /// table are skipped, so text written by a newer table still parses.
    fn from_text(text: &str) -> Result<Self> {
        let inner = text
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| FswireError::MalformedFlagText(text.to_string()))?;

        let mut bits = 0u32;
        if !inner.is_empty() {
            for name in inner.split(',') {
                match Self::FLAGS.iter().find(|flag| flag.name() == name) {
                    Some(flag) => bits |= flag.value().bits(),
                    None => debug!(family = %Self::KIND, name, "ignoring unknown flag name"),
                }
            }
        }
        Ok(Self::from_bits_retain(bits))
    }

    /// Wire form: `{"cflag": <bits>, "named": [<names>...]}`.
    fn encode_flags(&self, out: &mut Vec<u8>) {
        let mut map = MapWriter::new();
        map.entry(RAW_KEY, &self.bits());
        map.entry(NAMES_KEY, &self.names());
        map.finish_into(out);
    }
}

/// Parse raw bits written as decimal or `0x`-prefixed hex.
pub fn parse_raw_bits(text: &str) -> Result<u32> {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => text.parse::<u32>(),
    };
    parsed.map_err(|err| FswireError::InvalidArgument(format!("invalid flag bits {text:?}: {err}")))
}

/// Every name in a family's table, in table order.
pub fn table<F: FlagFamily>() -> impl Iterator<Item = (&'static str, u32)> {
    F::FLAGS.iter().map(|flag| (flag.name(), flag.value().bits()))
}

impl FlagKind {
    /// Textual form of `bits` interpreted in this family.
    pub fn format_bits(self, bits: u32) -> String {
        match self {
            FlagKind::Create => CreateFlags::from_raw(bits).to_text(),
            FlagKind::Event => EventFlags::from_raw(bits).to_text(),
        }
    }

    /// Parse textual form in this family, returning the raw bits.
    pub fn parse_text(self, text: &str) -> Result<u32> {
        match self {
            FlagKind::Create => CreateFlags::from_text(text).map(|f| f.bits()),
            FlagKind::Event => EventFlags::from_text(text).map(|f| f.bits()),
        }
    }

    /// Wire form of `bits` interpreted in this family.
    pub fn encode_bits(self, bits: u32) -> Vec<u8> {
        match self {
            FlagKind::Create => CreateFlags::from_raw(bits).encode(),
            FlagKind::Event => EventFlags::from_raw(bits).encode(),
        }
    }

    /// The family's `(name, bit)` table.
    pub fn table(self) -> Vec<(&'static str, u32)> {
        match self {
            FlagKind::Create => table::<CreateFlags>().collect(),
            FlagKind::Event => table::<EventFlags>().collect(),
        }
    }
}

/// Implements `Display`, `FromStr` and `Encode` for a flag family in terms of
/// [`FlagFamily`].
macro_rules! impl_flag_family {
    ($ty:ty, $kind:expr) => {
        impl $crate::flags::FlagFamily for $ty {
            const KIND: $crate::types::FlagKind = $kind;
        }

        impl $ty {
            /// Wrap raw bits from the OS. Never fails; unknown bits are kept.
            pub fn from_raw(bits: u32) -> Self {
                Self::from_bits_retain(bits)
            }

            /// Textual form, e.g. `"[ItemCreated,ItemIsFile]"`.
            pub fn format(&self) -> String {
                $crate::flags::FlagFamily::to_text(self)
            }

            /// Parse the textual form; see [`FlagFamily::from_text`].
            pub fn parse(text: &str) -> $crate::errors::Result<Self> {
                <Self as $crate::flags::FlagFamily>::from_text(text)
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&$crate::flags::FlagFamily::to_text(self))
            }
        }

        impl std::str::FromStr for $ty {
            type Err = $crate::errors::FswireError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                <Self as $crate::flags::FlagFamily>::from_text(s)
            }
        }

        impl $crate::codec::Encode for $ty {
            fn encode_into(&self, out: &mut Vec<u8>) {
                $crate::flags::FlagFamily::encode_flags(self, out)
            }
        }
    };
}

pub(crate) use impl_flag_family;
