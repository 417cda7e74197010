use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Deserialize;

/// Which flag table a bit set is read against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum FlagKind {
    /// Stream creation options.
    Create,
    /// Per-event notification flags.
    Event,
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FlagKind::Create => "create",
            FlagKind::Event => "event",
        })
    }
}

impl FromStr for FlagKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "create" => Ok(FlagKind::Create),
            "event" => Ok(FlagKind::Event),
            other => Err(format!(
                "invalid flag family: {other} (expected \"create\" or \"event\")"
            )),
        }
    }
}

/// What the sink writes after each top-level unit.
///
/// Units are self-delimiting, so `None` is the default; `Newline` makes
/// output easier to read in a terminal and still decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    None,
    Newline,
}

impl Default for Separator {
    fn default() -> Self {
        Separator::None
    }
}

impl Separator {
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            Separator::None => b"",
            Separator::Newline => b"\n",
        }
    }
}

impl FromStr for Separator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Separator::None),
            "newline" => Ok(Separator::Newline),
            other => Err(format!(
                "invalid separator: {other} (expected \"none\" or \"newline\")"
            )),
        }
    }
}
