// src/event/mod.rs

//! One delivered change notification and its wire form.

pub mod id;

pub use id::EventId;

use crate::codec::{DecodeError, Encode, MapWriter, Value};
use crate::flags::{EventFlags, FlagFamily, NAMES_KEY, RAW_KEY};

pub const PATH_KEY: &str = "path";
pub const ID_KEY: &str = "id";
pub const FLAGS_KEY: &str = "flags";

/// A change notification: which path, where in the stream, and what
/// happened.
///
/// `path` is whatever text the OS reported; it is not checked or resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Event {
    pub path: String,
    pub id: EventId,
    pub flags: EventFlags,
}

impl Event {
    /// Build a record from the raw `(path, id, flag bits)` payload.
    pub fn new(path: impl Into<String>, id: u64, flags: u32) -> Self {
        Self {
            path: path.into(),
            id: EventId::new(id),
            flags: EventFlags::from_raw(flags),
        }
    }

    pub fn to_value(&self) -> Value {
        let names = self.flags.names().into_iter().map(Value::from).collect();
        Value::Map(vec![
            (PATH_KEY.into(), self.path.clone().into()),
            (ID_KEY.into(), self.id.raw().into()),
            (
                FLAGS_KEY.into(),
                Value::Map(vec![
                    (RAW_KEY.into(), self.flags.bits().into()),
                    (NAMES_KEY.into(), Value::Array(names)),
                ]),
            ),
        ])
    }

    /// Rebuild a record from a decoded map.
    ///
    /// Only `flags.cflag` is read; the `named` array is derived data.
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let shape = |what: &str| DecodeError::UnexpectedShape(format!("event record {what}"));

        let path = value
            .get(PATH_KEY)
            .and_then(Value::as_text)
            .ok_or_else(|| shape("has no text `path`"))?;
        let id = value
            .get(ID_KEY)
            .and_then(Value::as_integer)
            .and_then(|n| u64::try_from(n).ok())
            .ok_or_else(|| shape("has no unsigned 64-bit `id`"))?;
        let bits = value
            .get(FLAGS_KEY)
            .and_then(|flags| flags.get(RAW_KEY))
            .and_then(Value::as_integer)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| shape("has no 32-bit `flags.cflag`"))?;

        Ok(Event::new(path, id, bits))
    }
}

impl Encode for Event {
    fn encode_into(&self, out: &mut Vec<u8>) {
        let mut map = MapWriter::new();
        map.entry(PATH_KEY, &self.path);
        map.entry(ID_KEY, &self.id);
        map.entry(FLAGS_KEY, &self.flags);
        map.finish_into(out);
    }
}
