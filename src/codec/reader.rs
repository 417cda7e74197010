// src/codec/reader.rs

//! Incremental decoding of a stream of top-level units.

use std::io::{BufRead, Read};

use tracing::trace;

use super::{DecodeError, Decoder, Marker, Value};
use crate::errors::Result;

/// Reads consecutive units from a byte stream.
///
/// ASCII whitespace between top-level units is skipped, so output written
/// with a newline separator reads back the same as unseparated output.
/// After the first error the iterator is fused.
#[derive(Debug)]
pub struct NetstringReader<R> {
    inner: R,
    decoder: Decoder,
    offset: usize,
    failed: bool,
}

impl<R: BufRead> NetstringReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_decoder(inner, Decoder::default())
    }

    pub fn with_decoder(inner: R, decoder: Decoder) -> Self {
        Self {
            inner,
            decoder,
            offset: 0,
            failed: false,
        }
    }

    /// Bytes consumed from the underlying stream so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Read the next unit, or `None` on a clean end of stream.
    pub fn read_value(&mut self) -> Result<Option<Value>> {
        if !self.skip_whitespace()? {
            return Ok(None);
        }

        let start = self.offset;
        let mut len: usize = 0;
        let mut digits = 0usize;
        let marker = loop {
            let byte = self
                .next_byte()?
                .ok_or(DecodeError::UnexpectedEof { offset: self.offset })?;
            if byte.is_ascii_digit() {
                digits += 1;
                len = len
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(usize::from(byte - b'0')))
                    .filter(|n| *n <= self.decoder.max_unit_len())
                    .ok_or(DecodeError::LengthTooLarge {
                        offset: start,
                        max: self.decoder.max_unit_len(),
                    })?;
                continue;
            }
            if digits == 0 {
                return Err(DecodeError::MissingLength { offset: start }.into());
            }
            break Marker::from_byte(byte).ok_or(DecodeError::UnknownMarker {
                found: char::from(byte),
                offset: self.offset - 1,
            })?;
        };

        // Grows with the bytes that arrive, not with the declared length.
        let payload_offset = self.offset;
        let mut payload = Vec::new();
        let read = Read::take(&mut self.inner, len as u64).read_to_end(&mut payload)?;
        self.offset += read;
        if read < len {
            return Err(DecodeError::UnexpectedEof {
                offset: self.offset,
            }
            .into());
        }

        trace!(offset = start, len, ?marker, "read unit");
        let value = self.decoder.decode_payload(marker, &payload, payload_offset)?;
        Ok(Some(value))
    }

    /// Returns `false` if the stream ended while skipping.
    fn skip_whitespace(&mut self) -> Result<bool> {
        loop {
            let buf = self.inner.fill_buf()?;
            if buf.is_empty() {
                return Ok(false);
            }
            let n = buf.iter().take_while(|b| b.is_ascii_whitespace()).count();
            let exhausted = n == buf.len();
            self.inner.consume(n);
            self.offset += n;
            if !exhausted {
                return Ok(true);
            }
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        let buf = self.inner.fill_buf()?;
        let Some(&byte) = buf.first() else {
            return Ok(None);
        };
        self.inner.consume(1);
        self.offset += 1;
        Ok(Some(byte))
    }
}

impl<R: BufRead> Iterator for NetstringReader<R> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.read_value() {
            Ok(Some(value)) => Some(Ok(value)),
            Ok(None) => None,
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
