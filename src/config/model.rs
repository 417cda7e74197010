// src/config/model.rs

use serde::Deserialize;

use crate::codec::{DEFAULT_MAX_UNIT_LEN, Decoder};
use crate::types::Separator;

/// Configuration exactly as read from TOML, before validation.
///
/// ```toml
/// [output]
/// separator = "newline"
///
/// [decode]
/// max_unit_len = 1048576
/// ```
///
/// Every section is optional and has a default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub output: OutputSection,

    #[serde(default)]
    pub decode: DecodeSection,
}

/// Validated configuration. Build it with `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub output: OutputSection,
    pub decode: DecodeSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(output: OutputSection, decode: DecodeSection) -> Self {
        Self { output, decode }
    }

    /// Decoder honouring `[decode]` limits.
    pub fn decoder(&self) -> Decoder {
        Decoder::new().with_max_unit_len(self.decode.max_unit_len)
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(OutputSection::default(), DecodeSection::default())
    }
}

/// `[output]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Written after every top-level unit: `"none"` (default) or `"newline"`.
    #[serde(default)]
    pub separator: Separator,
}

/// `[decode]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecodeSection {
    /// Largest payload length the decoder accepts, in bytes.
    #[serde(default = "default_max_unit_len")]
    pub max_unit_len: usize,
}

fn default_max_unit_len() -> usize {
    DEFAULT_MAX_UNIT_LEN
}

impl Default for DecodeSection {
    fn default() -> Self {
        Self {
            max_unit_len: default_max_unit_len(),
        }
    }
}
