//! Native value model for items and keys.
//!
//! Application code builds and receives [`Record`]s of [`Value`]s; the codec
//! converts them to and from the store's tagged wire representation.

use std::collections::HashMap;
use std::fmt;

/// A named mapping of attribute name to native value, representing an item
/// or a key.
pub type Record = HashMap<String, Value>;

/// An exact-precision numeric attribute, stored as decimal text.
///
/// The wire protocol carries numbers as arbitrary-precision decimal text,
/// so the text itself is the lossless representation; conversion to host
/// numeric types happens on demand. Equality is textual: `30` and `30.0`
/// are distinct values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Number(String);

impl Number {
    /// Creates a number from its decimal text form, kept verbatim.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the decimal text form.
    pub fn as_text(&self) -> &str {
        &self.0
    }

    /// Consumes the number, returning its decimal text form.
    pub fn into_text(self) -> String {
        self.0
    }

    /// Parses the number as an `i64`, if it fits.
    pub fn as_i64(&self) -> Option<i64> {
        self.0.parse().ok()
    }

    /// Parses the number as an `f64`, possibly losing precision.
    pub fn as_f64(&self) -> Option<f64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Self(value.to_string())
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<f64> for Number {
    // Display for f64 yields the shortest text that parses back to the
    // same value, so the round trip is exact.
    fn from(value: f64) -> Self {
        Self(value.to_string())
    }
}

/// A native value: the shape application code works with.
///
/// Every variant maps to exactly one wire tag. [`Value::Set`] members must
/// be homogeneous scalars (all strings, all numbers, or all binary) and
/// unique; the codec checks this at encode time and reports a malformed
/// set as an encoding error rather than coercing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// UTF-8 string
    String(String),

    /// Exact decimal number
    Number(Number),

    /// Binary blob
    Binary(Vec<u8>),

    /// Boolean
    Bool(bool),

    /// Explicit null
    Null,

    /// Ordered sequence of values
    List(Vec<Value>),

    /// Set of unique scalar values of one kind
    Set(Vec<Value>),

    /// Mapping from attribute name to value
    Map(HashMap<String, Value>),
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value.into())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::Binary(value)
    }
}
