// src/codec/mod.rs

//! The length-prefixed wire format.
//!
//! Every unit is `<length><marker><payload>` where `length` is the decimal
//! byte length of `payload` and `marker` is one character naming the kind:
//!
//! | marker | kind    | payload                                  |
//! |--------|---------|------------------------------------------|
//! | `,`    | text    | raw UTF-8 bytes                          |
//! | `#`    | integer | ASCII decimal digits, optional `-`       |
//! | `!`    | boolean | `true` or `false`                        |
//! | `[`    | array   | concatenated element units               |
//! | `{`    | map     | concatenated key unit / value unit pairs |
//!
//! Encoding lives in [`encode`], the dynamic [`Value`] tree in [`value`], and
//! the inverse direction in [`decode`] (slices) and [`reader`] (streams).

pub mod decode;
pub mod encode;
pub mod reader;
pub mod value;

pub use decode::{DEFAULT_MAX_UNIT_LEN, DecodeError, Decoder, decode, decode_exact};
pub use encode::{ArrayWriter, Encode, MapWriter, write_unit};
pub use reader::NetstringReader;
pub use value::Value;

/// Kind marker that follows the length prefix of every unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Text,
    Integer,
    Bool,
    Array,
    Map,
}

impl Marker {
    pub const fn as_byte(self) -> u8 {
        match self {
            Marker::Text => b',',
            Marker::Integer => b'#',
            Marker::Bool => b'!',
            Marker::Array => b'[',
            Marker::Map => b'{',
        }
    }

    pub const fn from_byte(byte: u8) -> Option<Marker> {
        match byte {
            b',' => Some(Marker::Text),
            b'#' => Some(Marker::Integer),
            b'!' => Some(Marker::Bool),
            b'[' => Some(Marker::Array),
            b'{' => Some(Marker::Map),
            _ => None,
        }
    }
}
