// src/codec/encode.rs

//! Encoding of native values into wire units.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use super::Marker;

/// Append one unit (`<len><marker><payload>`) to `out`.
pub fn write_unit(out: &mut Vec<u8>, marker: Marker, payload: &[u8]) {
    out.extend_from_slice(payload.len().to_string().as_bytes());
    out.push(marker.as_byte());
    out.extend_from_slice(payload);
}

/// Types that have a wire representation.
///
/// Encoding is total: there is no I/O involved and every value of an
/// implementing type has exactly one encoding.
pub trait Encode {
    /// Append the encoding of `self` to `out`.
    fn encode_into(&self, out: &mut Vec<u8>);

    /// Encode `self` into a fresh buffer.
    fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_into(&mut out);
        out
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode_into(&self, out: &mut Vec<u8>) {
        (**self).encode_into(out)
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode_into(&self, out: &mut Vec<u8>) {
        (**self).encode_into(out)
    }
}

impl Encode for str {
    fn encode_into(&self, out: &mut Vec<u8>) {
        write_unit(out, Marker::Text, self.as_bytes());
    }
}

impl Encode for String {
    fn encode_into(&self, out: &mut Vec<u8>) {
        self.as_str().encode_into(out)
    }
}

impl Encode for bool {
    fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(if *self { b"4!true" } else { b"5!false" });
    }
}

macro_rules! impl_encode_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Encode for $ty {
                fn encode_into(&self, out: &mut Vec<u8>) {
                    write_unit(out, Marker::Integer, self.to_string().as_bytes());
                }
            }
        )*
    };
}

impl_encode_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl<T: Encode> Encode for [T] {
    fn encode_into(&self, out: &mut Vec<u8>) {
        let mut array = ArrayWriter::new();
        for item in self {
            array.push(item);
        }
        array.finish_into(out);
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode_into(&self, out: &mut Vec<u8>) {
        self.as_slice().encode_into(out)
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode_into(&self, out: &mut Vec<u8>) {
        self.as_slice().encode_into(out)
    }
}

impl<K: Encode, V: Encode> Encode for BTreeMap<K, V> {
    fn encode_into(&self, out: &mut Vec<u8>) {
        let mut map = MapWriter::new();
        for (key, value) in self {
            map.entry(key, value);
        }
        map.finish_into(out);
    }
}

impl<K: Encode, V: Encode, S: BuildHasher> Encode for HashMap<K, V, S> {
    fn encode_into(&self, out: &mut Vec<u8>) {
        let mut map = MapWriter::new();
        for (key, value) in self {
            map.entry(key, value);
        }
        map.finish_into(out);
    }
}

/// Builder for an array unit whose elements may have different types.
#[derive(Debug, Default, Clone)]
pub struct ArrayWriter {
    payload: Vec<u8>,
}

impl ArrayWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<T: Encode + ?Sized>(&mut self, item: &T) -> &mut Self {
        item.encode_into(&mut self.payload);
        self
    }

    pub fn finish_into(self, out: &mut Vec<u8>) {
        write_unit(out, Marker::Array, &self.payload);
    }

    pub fn finish(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.payload.len() + 8);
        self.finish_into(&mut out);
        out
    }
}

/// Builder for a map unit.
///
/// Entries are written in the order they are added; the format itself
/// attaches no meaning to entry order.
#[derive(Debug, Default, Clone)]
pub struct MapWriter {
    payload: Vec<u8>,
}

impl MapWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry<K, V>(&mut self, key: &K, value: &V) -> &mut Self
    where
        K: Encode + ?Sized,
        V: Encode + ?Sized,
    {
        key.encode_into(&mut self.payload);
        value.encode_into(&mut self.payload);
        self
    }

    pub fn finish_into(self, out: &mut Vec<u8>) {
        write_unit(out, Marker::Map, &self.payload);
    }

    pub fn finish(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.payload.len() + 8);
        self.finish_into(&mut out);
        out
    }
}
