//! Base-16 rendering of byte fields.
//!
//! Used through `#[serde(serialize_with = ...)]` on the message types, so the
//! hex form only applies where a message is serialized for display.

use serde::ser::{SerializeSeq, Serializer};

/// Serialize a byte field as a lowercase hex string.
pub fn bytes<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: AsRef<[u8]>,
    S: Serializer,
{
    serializer.serialize_str(&hex::encode(value.as_ref()))
}

/// Serialize a repeated byte field as a list of hex strings.
pub fn bytes_list<S: Serializer>(values: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(values.len()))?;
    for value in values {
        seq.serialize_element(&hex::encode(value))?;
    }
    seq.end()
}
