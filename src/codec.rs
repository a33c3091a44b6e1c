//! Conversion between native records and tagged wire records.
//!
//! The conversion is pure and recursive: inputs are taken by reference and
//! new structures are returned, so records shared across concurrent calls
//! are never mutated. `decode` is the exact inverse of `encode` over the
//! representable domain: `decode(encode(x)) == x`.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::value::{Number, Record, Value};
use crate::wire::{AttributeValue, WireRecord};

/// Encodes a native record into its wire form, entry by entry.
pub fn encode_record(record: &Record) -> Result<WireRecord> {
    record
        .iter()
        .map(|(name, value)| Ok((name.clone(), encode_value(value)?)))
        .collect()
}

/// Decodes a wire record into its native form, entry by entry.
pub fn decode_record(record: &WireRecord) -> Result<Record> {
    record
        .iter()
        .map(|(name, value)| Ok((name.clone(), decode_value(value)?)))
        .collect()
}

/// Encodes a single native value into exactly one tagged wire value.
///
/// Classification order is fixed: binary, boolean, null, number, string,
/// set, list, map. Sets are classified into the matching set tag and must
/// be non-empty, homogeneous, and free of duplicates; anything else is an
/// [`Error::Encoding`].
pub fn encode_value(value: &Value) -> Result<AttributeValue> {
    match value {
        Value::Binary(bytes) => Ok(AttributeValue::binary(bytes.clone())),
        Value::Bool(flag) => Ok(AttributeValue::boolean(*flag)),
        Value::Null => Ok(AttributeValue::null()),
        Value::Number(number) => Ok(AttributeValue::number(number.as_text())),
        Value::String(text) => Ok(AttributeValue::string(text.clone())),
        Value::Set(members) => encode_set(members),
        Value::List(items) => {
            let items = items.iter().map(encode_value).collect::<Result<Vec<_>>>()?;
            Ok(AttributeValue::list(items))
        }
        Value::Map(entries) => {
            let entries = entries
                .iter()
                .map(|(name, value)| Ok((name.clone(), encode_value(value)?)))
                .collect::<Result<HashMap<_, _>>>()?;
            Ok(AttributeValue::map(entries))
        }
    }
}

/// Decodes a single tagged wire value.
///
/// A well-formed wire value carries exactly one tag; zero or multiple
/// tags is an [`Error::Decoding`]. Dispatch is purely on the tag, with
/// recursion into list elements and map entries. Numbers keep their
/// decimal text verbatim.
pub fn decode_value(value: &AttributeValue) -> Result<Value> {
    match value.tag_count() {
        1 => {}
        0 => return Err(Error::Decoding("attribute value has no type tag".to_string())),
        n => {
            return Err(Error::Decoding(format!(
                "attribute value has {} type tags, expected exactly one",
                n
            )))
        }
    }

    if let Some(text) = &value.s {
        return Ok(Value::String(text.clone()));
    }
    if let Some(number) = &value.n {
        return Ok(Value::Number(Number::from_text(number.clone())));
    }
    if let Some(bytes) = &value.b {
        return Ok(Value::Binary(bytes.clone()));
    }
    if let Some(members) = &value.ss {
        return Ok(Value::Set(
            members.iter().cloned().map(Value::String).collect(),
        ));
    }
    if let Some(members) = &value.ns {
        return Ok(Value::Set(
            members
                .iter()
                .map(|text| Value::Number(Number::from_text(text.clone())))
                .collect(),
        ));
    }
    if let Some(members) = &value.bs {
        return Ok(Value::Set(
            members.iter().cloned().map(Value::Binary).collect(),
        ));
    }
    if let Some(items) = &value.l {
        return Ok(Value::List(
            items.iter().map(decode_value).collect::<Result<Vec<_>>>()?,
        ));
    }
    if let Some(entries) = &value.m {
        return Ok(Value::Map(
            entries
                .iter()
                .map(|(name, value)| Ok((name.clone(), decode_value(value)?)))
                .collect::<Result<HashMap<_, _>>>()?,
        ));
    }
    if let Some(flag) = value.bool {
        return Ok(Value::Bool(flag));
    }
    if value.null.is_some() {
        return Ok(Value::Null);
    }

    Err(Error::Decoding(
        "attribute value has an unrecognized type tag".to_string(),
    ))
}

fn encode_set(members: &[Value]) -> Result<AttributeValue> {
    let Some(first) = members.first() else {
        return Err(Error::Encoding("cannot encode an empty set".to_string()));
    };

    match first {
        Value::String(_) => {
            let mut out: Vec<String> = Vec::with_capacity(members.len());
            for member in members {
                let Value::String(text) = member else {
                    return Err(mixed_set_error("string", member));
                };
                if out.contains(text) {
                    return Err(Error::Encoding(format!(
                        "duplicate string set member {:?}",
                        text
                    )));
                }
                out.push(text.clone());
            }
            Ok(AttributeValue::string_set(out))
        }
        Value::Number(_) => {
            let mut out: Vec<String> = Vec::with_capacity(members.len());
            for member in members {
                let Value::Number(number) = member else {
                    return Err(mixed_set_error("number", member));
                };
                if out.iter().any(|text| text == number.as_text()) {
                    return Err(Error::Encoding(format!(
                        "duplicate number set member {}",
                        number
                    )));
                }
                out.push(number.as_text().to_string());
            }
            Ok(AttributeValue::number_set(out))
        }
        Value::Binary(_) => {
            let mut out: Vec<Vec<u8>> = Vec::with_capacity(members.len());
            for member in members {
                let Value::Binary(bytes) = member else {
                    return Err(mixed_set_error("binary", member));
                };
                if out.contains(bytes) {
                    return Err(Error::Encoding(
                        "duplicate binary set member".to_string(),
                    ));
                }
                out.push(bytes.clone());
            }
            Ok(AttributeValue::binary_set(out))
        }
        other => Err(Error::Encoding(format!(
            "set members must be strings, numbers, or binary, got {}",
            kind_name(other)
        ))),
    }
}

fn mixed_set_error(expected: &str, got: &Value) -> Error {
    Error::Encoding(format!(
        "set mixes {} and {} members",
        expected,
        kind_name(got)
    ))
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Binary(_) => "binary",
        Value::Bool(_) => "boolean",
        Value::Null => "null",
        Value::List(_) => "list",
        Value::Set(_) => "set",
        Value::Map(_) => "map",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(entries: Vec<(&str, Value)>) -> Record {
        entries
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }

    #[test]
    fn encodes_scalars_to_their_tags() {
        let native = record(vec![
            ("Name", Value::from("Alice")),
            ("Age", Value::from(30_i64)),
            ("Tags", Value::List(vec![Value::from("a"), Value::from("b")])),
        ]);

        let wire = encode_record(&native).unwrap();
        assert_eq!(wire["Name"], AttributeValue::string("Alice"));
        assert_eq!(wire["Age"], AttributeValue::number("30"));
        assert_eq!(
            wire["Tags"],
            AttributeValue::list(vec![
                AttributeValue::string("a"),
                AttributeValue::string("b"),
            ])
        );
    }

    #[test]
    fn empty_record_round_trips_to_empty_record() {
        let wire = encode_record(&Record::new()).unwrap();
        assert!(wire.is_empty());
        assert!(decode_record(&wire).unwrap().is_empty());
    }

    #[test]
    fn empty_containers_keep_their_tags() {
        let wire = encode_value(&Value::List(Vec::new())).unwrap();
        assert_eq!(wire, AttributeValue::list(Vec::new()));

        let wire = encode_value(&Value::Map(HashMap::new())).unwrap();
        assert_eq!(wire, AttributeValue::map(HashMap::new()));
    }

    #[test]
    fn round_trips_nested_values() {
        let mut profile = HashMap::new();
        profile.insert("City".to_string(), Value::from("Lisbon"));
        profile.insert(
            "Scores".to_string(),
            Value::List(vec![Value::from(1_i64), Value::from(2_i64), Value::Null]),
        );

        let native = record(vec![
            ("Id", Value::from("user-1")),
            ("Active", Value::from(true)),
            ("Avatar", Value::Binary(vec![0xde, 0xad])),
            ("Profile", Value::Map(profile)),
            (
                "Aliases",
                Value::Set(vec![Value::from("al"), Value::from("ali")]),
            ),
            (
                "Primes",
                Value::Set(vec![Value::from(2_i64), Value::from(3_i64)]),
            ),
            (
                "Digests",
                Value::Set(vec![
                    Value::Binary(vec![1, 2]),
                    Value::Binary(vec![3, 4]),
                ]),
            ),
        ]);

        let wire = encode_record(&native).unwrap();
        let decoded = decode_record(&wire).unwrap();
        assert_eq!(decoded, native);
    }

    #[test]
    fn number_text_survives_the_round_trip_exactly() {
        let native = record(vec![(
            "Pi",
            Value::Number(Number::from_text("3.14159265358979323846264338327950288")),
        )]);

        let wire = encode_record(&native).unwrap();
        assert_eq!(
            wire["Pi"],
            AttributeValue::number("3.14159265358979323846264338327950288")
        );
        assert_eq!(decode_record(&wire).unwrap(), native);
    }

    #[test]
    fn wire_shaped_map_encodes_as_plain_map() {
        // A native map that happens to look like a tagged wire value must
        // encode as an ordinary MAP, not be passed through as a tag.
        let mut shaped = HashMap::new();
        shaped.insert("S".to_string(), Value::from("Alice"));

        let wire = encode_value(&Value::Map(shaped.clone())).unwrap();
        assert!(wire.m.is_some());
        assert_eq!(decode_value(&wire).unwrap(), Value::Map(shaped));
    }

    #[test]
    fn empty_set_fails_encoding() {
        let err = encode_value(&Value::Set(Vec::new())).unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[test]
    fn mixed_set_fails_encoding() {
        let err =
            encode_value(&Value::Set(vec![Value::from("a"), Value::from(1_i64)])).unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
        assert!(err.to_string().contains("mixes"));
    }

    #[test]
    fn non_scalar_set_fails_encoding() {
        let err = encode_value(&Value::Set(vec![Value::List(Vec::new())])).unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[test]
    fn duplicate_set_member_fails_encoding() {
        let err =
            encode_value(&Value::Set(vec![Value::from("a"), Value::from("a")])).unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[test]
    fn untagged_wire_value_fails_decoding() {
        let err = decode_value(&AttributeValue::default()).unwrap_err();
        assert!(matches!(err, Error::Decoding(_)));
        assert!(err.to_string().contains("no type tag"));
    }

    #[test]
    fn multi_tagged_wire_value_fails_decoding() {
        let conflicted = AttributeValue {
            s: Some("a".to_string()),
            n: Some("1".to_string()),
            ..Default::default()
        };

        let err = decode_value(&conflicted).unwrap_err();
        assert!(matches!(err, Error::Decoding(_)));
    }

    #[test]
    fn malformed_nested_value_fails_decoding() {
        let wire = AttributeValue::list(vec![AttributeValue::default()]);
        assert!(decode_value(&wire).is_err());
    }

    #[test]
    fn encode_does_not_mutate_its_input() {
        let native = record(vec![("Id", Value::from("user-1"))]);
        let before = native.clone();
        let _ = encode_record(&native).unwrap();
        assert_eq!(native, before);
    }
}
