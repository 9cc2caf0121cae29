//! Typed values produced by coercing raw query text.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

/// A 12-byte document identifier, written as 24 hexadecimal characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    pub fn as_bytes(&self) -> &[u8; 12] {
        &self.0
    }
}

impl FromStr for ObjectId {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 12];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(ObjectId(bytes))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// A raw value coerced to the type its field declares.
///
/// Integers and doubles are kept distinct, mirroring the distinction the
/// storage layer makes between the two.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    ObjectId(ObjectId),
    Integer(i64),
    Double(f64),
    DateTime(NaiveDateTime),
    String(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::ObjectId(id) => write!(f, "{}", id),
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Double(n) => write!(f, "{}", n),
            FieldValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
            FieldValue::String(s) => f.write_str(s),
        }
    }
}
