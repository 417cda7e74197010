//! `proptest` strategies shared by the property tests.

use fswire::codec::Value;
use fswire::flags::{CreateFlags, EventFlags};
use proptest::prelude::*;

/// Text payloads, including the marker and digit characters.
pub fn text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9/._ -]{0,24}",
        "[,#!\\[\\]{}0-9:]{0,12}",
        any::<String>(),
    ]
}

pub fn leaf_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        text().prop_map(Value::Text),
        any::<i64>().prop_map(|n| Value::Integer(n as i128)),
        any::<u64>().prop_map(|n| Value::Integer(n as i128)),
        any::<bool>().prop_map(Value::Bool),
    ]
}

/// Nested values up to a few levels deep.
pub fn value() -> impl Strategy<Value = Value> {
    leaf_value().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((inner.clone(), inner), 0..5).prop_map(Value::Map),
        ]
    })
}

/// Any subset of the known event flags.
pub fn event_flags() -> impl Strategy<Value = EventFlags> {
    any::<u32>().prop_map(|bits| EventFlags::from_bits_truncate(bits))
}

/// Any subset of the known creation options.
pub fn create_flags() -> impl Strategy<Value = CreateFlags> {
    any::<u32>().prop_map(|bits| CreateFlags::from_bits_truncate(bits))
}
