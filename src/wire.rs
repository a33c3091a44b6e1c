//! Tagged wire value model.
//!
//! [`AttributeValue`] mirrors the store's attribute-value representation: a
//! struct of optional tag fields of which exactly one is populated in a
//! well-formed value. Malformed values (no tag, several tags) are
//! representable here on purpose so the codec can reject them instead of
//! guessing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named mapping of attribute name to wire value: an item or key as the
/// store's protocol sees it.
pub type WireRecord = HashMap<String, AttributeValue>;

/// A tagged wire value.
///
/// Serialization uses the protocol's tag names; binary payloads are
/// base64 text on the wire. Unknown tags are rejected at deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeValue {
    /// String
    #[serde(rename = "S", default, skip_serializing_if = "Option::is_none")]
    pub s: Option<String>,

    /// Number, as decimal text
    #[serde(rename = "N", default, skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,

    /// Binary
    #[serde(
        rename = "B",
        default,
        skip_serializing_if = "Option::is_none",
        with = "base64_bytes"
    )]
    pub b: Option<Vec<u8>>,

    /// String set
    #[serde(rename = "SS", default, skip_serializing_if = "Option::is_none")]
    pub ss: Option<Vec<String>>,

    /// Number set, as decimal text
    #[serde(rename = "NS", default, skip_serializing_if = "Option::is_none")]
    pub ns: Option<Vec<String>>,

    /// Binary set
    #[serde(
        rename = "BS",
        default,
        skip_serializing_if = "Option::is_none",
        with = "base64_bytes_list"
    )]
    pub bs: Option<Vec<Vec<u8>>>,

    /// List
    #[serde(rename = "L", default, skip_serializing_if = "Option::is_none")]
    pub l: Option<Vec<AttributeValue>>,

    /// Map
    #[serde(rename = "M", default, skip_serializing_if = "Option::is_none")]
    pub m: Option<HashMap<String, AttributeValue>>,

    /// Boolean
    #[serde(rename = "BOOL", default, skip_serializing_if = "Option::is_none")]
    pub bool: Option<bool>,

    /// Null marker
    #[serde(rename = "NULL", default, skip_serializing_if = "Option::is_none")]
    pub null: Option<bool>,
}

impl AttributeValue {
    /// Creates a string value
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            s: Some(value.into()),
            ..Default::default()
        }
    }

    /// Creates a number value from decimal text
    pub fn number(value: impl Into<String>) -> Self {
        Self {
            n: Some(value.into()),
            ..Default::default()
        }
    }

    /// Creates a binary value
    pub fn binary(value: Vec<u8>) -> Self {
        Self {
            b: Some(value),
            ..Default::default()
        }
    }

    /// Creates a string set value
    pub fn string_set(values: Vec<String>) -> Self {
        Self {
            ss: Some(values),
            ..Default::default()
        }
    }

    /// Creates a number set value from decimal text members
    pub fn number_set(values: Vec<String>) -> Self {
        Self {
            ns: Some(values),
            ..Default::default()
        }
    }

    /// Creates a binary set value
    pub fn binary_set(values: Vec<Vec<u8>>) -> Self {
        Self {
            bs: Some(values),
            ..Default::default()
        }
    }

    /// Creates a list value
    pub fn list(values: Vec<AttributeValue>) -> Self {
        Self {
            l: Some(values),
            ..Default::default()
        }
    }

    /// Creates a map value
    pub fn map(values: HashMap<String, AttributeValue>) -> Self {
        Self {
            m: Some(values),
            ..Default::default()
        }
    }

    /// Creates a boolean value
    pub fn boolean(value: bool) -> Self {
        Self {
            bool: Some(value),
            ..Default::default()
        }
    }

    /// Creates a null value
    pub fn null() -> Self {
        Self {
            null: Some(true),
            ..Default::default()
        }
    }

    /// Number of populated tag fields. A well-formed value has exactly one.
    pub fn tag_count(&self) -> usize {
        [
            self.s.is_some(),
            self.n.is_some(),
            self.b.is_some(),
            self.ss.is_some(),
            self.ns.is_some(),
            self.bs.is_some(),
            self.l.is_some(),
            self.m.is_some(),
            self.bool.is_some(),
            self.null.is_some(),
        ]
        .iter()
        .filter(|populated| **populated)
        .count()
    }
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match bytes {
            Some(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) => STANDARD
                .decode(text)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

mod base64_bytes_list {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(sets: &Option<Vec<Vec<u8>>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match sets {
            Some(sets) => {
                let encoded: Vec<String> =
                    sets.iter().map(|bytes| STANDARD.encode(bytes)).collect();
                serializer.collect_seq(encoded)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<Vec<u8>>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Vec<String>>::deserialize(deserializer)? {
            Some(encoded) => encoded
                .into_iter()
                .map(|text| STANDARD.decode(text).map_err(serde::de::Error::custom))
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            None => Ok(None),
        }
    }
}
