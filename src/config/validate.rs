// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{FswireError, Result};

/// Upper bound for `[decode].max_unit_len` (1 GiB).
pub const MAX_UNIT_LEN_CEILING: usize = 1 << 30;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = FswireError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.output, raw.decode))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    // `[output].separator` is an enum and already checked by serde.
    validate_decode_section(cfg)?;
    Ok(())
}

fn validate_decode_section(cfg: &RawConfigFile) -> Result<()> {
    let max = cfg.decode.max_unit_len;
    if max == 0 {
        return Err(FswireError::ConfigError(
            "[decode].max_unit_len must be >= 1 (got 0)".to_string(),
        ));
    }
    if max > MAX_UNIT_LEN_CEILING {
        return Err(FswireError::ConfigError(format!(
            "[decode].max_unit_len must be <= {MAX_UNIT_LEN_CEILING} (got {max})"
        )));
    }
    Ok(())
}
