// src/errors.rs

//! Crate-wide error type and result alias.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::codec::DecodeError;

#[derive(Error, Debug)]
pub enum FswireError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Resource unreachable: {}", .0.display())]
    ResourceUnreachable(PathBuf),

    #[error("{op} failed: {source}")]
    Os {
        op: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("Malformed flag text: {0:?} (expected \"[Name,...]\")")]
    MalformedFlagText(String),

    #[error("Descriptor already released")]
    Released,

    #[error("Malformed event tuple on line {line}: {reason}")]
    MalformedTuple { line: usize, reason: String },

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FswireError {
    /// Wrap the calling thread's last OS error for the named operation.
    pub(crate) fn last_os(op: &'static str) -> Self {
        FswireError::Os {
            op,
            source: io::Error::last_os_error(),
        }
    }

    /// Native error code carried by an `Os` failure, if any.
    pub fn os_code(&self) -> Option<i32> {
        match self {
            FswireError::Os { source, .. } => source.raw_os_error(),
            FswireError::IoError(err) => err.raw_os_error(),
            _ => None,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, FswireError>;
