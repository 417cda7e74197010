// src/codec/value.rs

//! Dynamic representation of a decoded (or hand-built) unit.

use std::fmt;

use super::Marker;
use super::encode::{ArrayWriter, Encode, MapWriter};

/// One wire unit as a tree.
///
/// Integers are held as `i128` so that every `i64` and `u64` fits. Maps keep
/// their entries in wire order; use [`Value::normalized`] before comparing
/// two maps that may have been built in different orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Value {
    Text(String),
    Integer(i128),
    Bool(bool),
    Array(Vec<Value>),
    Map(Vec<(Value, Value)>),
}

impl Value {
    pub fn marker(&self) -> Marker {
        match self {
            Value::Text(_) => Marker::Text,
            Value::Integer(_) => Marker::Integer,
            Value::Bool(_) => Marker::Bool,
            Value::Array(_) => Marker::Array,
            Value::Map(_) => Marker::Map,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a text key in a map. Returns `None` for non-maps.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map()?
            .iter()
            .find(|(k, _)| k.as_text() == Some(key))
            .map(|(_, v)| v)
    }

    /// Copy of `self` with every map's entries sorted, recursively.
    ///
    /// Two maps holding the same entries normalize to equal values no matter
    /// which order they were encoded in.
    pub fn normalized(&self) -> Value {
        match self {
            Value::Array(items) => Value::Array(items.iter().map(Value::normalized).collect()),
            Value::Map(entries) => {
                let mut entries: Vec<(Value, Value)> = entries
                    .iter()
                    .map(|(k, v)| (k.normalized(), v.normalized()))
                    .collect();
                entries.sort();
                Value::Map(entries)
            }
            other => other.clone(),
        }
    }
}

impl Encode for Value {
    fn encode_into(&self, out: &mut Vec<u8>) {
        match self {
            Value::Text(s) => s.encode_into(out),
            Value::Integer(n) => n.encode_into(out),
            Value::Bool(b) => b.encode_into(out),
            Value::Array(items) => {
                let mut array = ArrayWriter::new();
                for item in items {
                    array.push(item);
                }
                array.finish_into(out);
            }
            Value::Map(entries) => {
                let mut map = MapWriter::new();
                for (k, v) in entries {
                    map.entry(k, v);
                }
                map.finish_into(out);
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_value_from_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Integer(n as i128)
                }
            }
        )*
    };
}

impl_value_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<i128> for Value {
    fn from(n: i128) -> Self {
        Value::Integer(n)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s:?}"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}
