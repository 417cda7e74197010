// src/codec/decode.rs

//! Parsing wire units back into [`Value`] trees.

use thiserror::Error;

use super::{Marker, Value};

/// Largest payload length accepted unless configured otherwise (16 MiB).
pub const DEFAULT_MAX_UNIT_LEN: usize = 16 * 1024 * 1024;

/// Containers nested deeper than this are rejected.
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    #[error("expected a decimal length at offset {offset}")]
    MissingLength { offset: usize },

    #[error("declared length at offset {offset} exceeds the limit of {max} bytes")]
    LengthTooLarge { offset: usize, max: usize },

    #[error("unknown marker {found:?} at offset {offset}")]
    UnknownMarker { found: char, offset: usize },

    #[error("invalid {kind} payload at offset {offset}: {reason}")]
    InvalidPayload {
        kind: &'static str,
        offset: usize,
        reason: String,
    },

    #[error("map at offset {offset} has a key without a value")]
    OddMap { offset: usize },

    #[error("containers nested deeper than {max} levels")]
    TooDeep { max: usize },

    #[error("{count} trailing bytes after the unit")]
    TrailingBytes { count: usize },

    #[error("unexpected structure: {0}")]
    UnexpectedShape(String),
}

/// Configurable decoder. [`decode`] and [`decode_exact`] use the defaults.
#[derive(Debug, Clone, Copy)]
pub struct Decoder {
    max_unit_len: usize,
    max_depth: usize,
}

impl Default for Decoder {
    fn default() -> Self {
        Self {
            max_unit_len: DEFAULT_MAX_UNIT_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_unit_len(mut self, max_unit_len: usize) -> Self {
        self.max_unit_len = max_unit_len;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_unit_len(&self) -> usize {
        self.max_unit_len
    }

    /// Decode the first unit of `input`, returning it and the number of
    /// bytes it occupied.
    pub fn decode(&self, input: &[u8]) -> Result<(Value, usize), DecodeError> {
        self.decode_at(input, 0, 0)
    }

    /// Decode `input` as exactly one unit.
    pub fn decode_exact(&self, input: &[u8]) -> Result<Value, DecodeError> {
        let (value, used) = self.decode(input)?;
        if used != input.len() {
            return Err(DecodeError::TrailingBytes {
                count: input.len() - used,
            });
        }
        Ok(value)
    }

    fn decode_at(
        &self,
        input: &[u8],
        offset: usize,
        depth: usize,
    ) -> Result<(Value, usize), DecodeError> {
        let (len, marker, header) = self.parse_header(input, offset)?;
        let end = header + len;
        if input.len() < end {
            return Err(DecodeError::UnexpectedEof {
                offset: offset + input.len(),
            });
        }
        let value = self.decode_payload_at(marker, &input[header..end], offset + header, depth)?;
        Ok((value, end))
    }

    /// Parse `<digits><marker>`, returning `(payload_len, marker, header_len)`.
    fn parse_header(&self, input: &[u8], offset: usize) -> Result<(usize, Marker, usize), DecodeError> {
        let digits = input.iter().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 {
            return Err(if input.is_empty() {
                DecodeError::UnexpectedEof { offset }
            } else {
                DecodeError::MissingLength { offset }
            });
        }

        let mut len: usize = 0;
        for &b in &input[..digits] {
            len = len
                .checked_mul(10)
                .and_then(|n| n.checked_add(usize::from(b - b'0')))
                .filter(|n| *n <= self.max_unit_len)
                .ok_or(DecodeError::LengthTooLarge {
                    offset,
                    max: self.max_unit_len,
                })?;
        }

        let Some(&byte) = input.get(digits) else {
            return Err(DecodeError::UnexpectedEof {
                offset: offset + digits,
            });
        };
        let marker = Marker::from_byte(byte).ok_or(DecodeError::UnknownMarker {
            found: char::from(byte),
            offset: offset + digits,
        })?;

        Ok((len, marker, digits + 1))
    }

    /// Interpret an already delimited payload. Used by the stream reader,
    /// which reads the header itself.
    pub(crate) fn decode_payload(
        &self,
        marker: Marker,
        payload: &[u8],
        offset: usize,
    ) -> Result<Value, DecodeError> {
        self.decode_payload_at(marker, payload, offset, 0)
    }

    fn decode_payload_at(
        &self,
        marker: Marker,
        payload: &[u8],
        offset: usize,
        depth: usize,
    ) -> Result<Value, DecodeError> {
        match marker {
            Marker::Text => String::from_utf8(payload.to_vec())
                .map(Value::Text)
                .map_err(|err| DecodeError::InvalidPayload {
                    kind: "text",
                    offset,
                    reason: err.to_string(),
                }),
            Marker::Integer => parse_integer(payload)
                .map(Value::Integer)
                .ok_or_else(|| DecodeError::InvalidPayload {
                    kind: "integer",
                    offset,
                    reason: format!("{:?} is not a decimal integer", String::from_utf8_lossy(payload)),
                }),
            Marker::Bool => match payload {
                b"true" => Ok(Value::Bool(true)),
                b"false" => Ok(Value::Bool(false)),
                other => Err(DecodeError::InvalidPayload {
                    kind: "boolean",
                    offset,
                    reason: format!("{:?} is neither true nor false", String::from_utf8_lossy(other)),
                }),
            },
            Marker::Array => Ok(Value::Array(self.decode_sequence(payload, offset, depth)?)),
            Marker::Map => {
                let units = self.decode_sequence(payload, offset, depth)?;
                if units.len() % 2 != 0 {
                    return Err(DecodeError::OddMap { offset });
                }
                let mut entries = Vec::with_capacity(units.len() / 2);
                let mut units = units.into_iter();
                while let (Some(key), Some(value)) = (units.next(), units.next()) {
                    entries.push((key, value));
                }
                Ok(Value::Map(entries))
            }
        }
    }

    fn decode_sequence(
        &self,
        payload: &[u8],
        offset: usize,
        depth: usize,
    ) -> Result<Vec<Value>, DecodeError> {
        if depth >= self.max_depth {
            return Err(DecodeError::TooDeep {
                max: self.max_depth,
            });
        }
        let mut items = Vec::new();
        let mut pos = 0;
        while pos < payload.len() {
            let (item, used) = self.decode_at(&payload[pos..], offset + pos, depth + 1)?;
            items.push(item);
            pos += used;
        }
        Ok(items)
    }
}

fn parse_integer(payload: &[u8]) -> Option<i128> {
    let digits = payload.strip_prefix(b"-").unwrap_or(payload);
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(payload).ok()?.parse().ok()
}

/// Decode the first unit of `input` with default limits.
pub fn decode(input: &[u8]) -> Result<(Value, usize), DecodeError> {
    Decoder::default().decode(input)
}

/// Decode `input` as exactly one unit with default limits.
pub fn decode_exact(input: &[u8]) -> Result<Value, DecodeError> {
    Decoder::default().decode_exact(input)
}
