// src/pipeline/sink.rs

use std::io::Write;

use crate::codec::Encode;
use crate::errors::Result;
use crate::types::Separator;

/// Writes encoded units to any byte sink (file, pipe, socket).
#[derive(Debug)]
pub struct EventSink<W: Write> {
    writer: W,
    separator: Separator,
    buf: Vec<u8>,
    units: usize,
    bytes: usize,
}

impl<W: Write> EventSink<W> {
    pub fn new(writer: W, separator: Separator) -> Self {
        Self {
            writer,
            separator,
            buf: Vec::new(),
            units: 0,
            bytes: 0,
        }
    }

    /// Encode `unit` and write it, followed by the separator.
    pub fn write<T: Encode + ?Sized>(&mut self, unit: &T) -> Result<()> {
        self.buf.clear();
        unit.encode_into(&mut self.buf);
        self.buf.extend_from_slice(self.separator.as_bytes());
        self.writer.write_all(&self.buf)?;
        self.units += 1;
        self.bytes += self.buf.len();
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Units written so far.
    pub fn units(&self) -> usize {
        self.units
    }

    /// Bytes written so far, separators included.
    pub fn bytes(&self) -> usize {
        self.bytes
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
