//! Interop with `serde` and `serde_json`.
//!
//! A [`Value`] serializes as the JSON-like data it models and deserializes
//! from any self-describing format. Conversion to and from
//! [`serde_json::Value`] is lossless except for non-finite floats, which JSON
//! cannot represent and which become `null`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::ser::{SerializeMap, SerializeSeq};

use super::{Mapping, Sequence, Value};

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(value) => Self::Bool(value),
            serde_json::Value::Number(number) => number
                .as_i64()
                .map(Self::Int)
                .or_else(|| number.as_f64().map(Self::Float))
                .unwrap_or(Self::Null),
            serde_json::Value::String(value) => Self::String(value),
            serde_json::Value::Array(elements) => {
                Self::Sequence(elements.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(entries) => Self::Mapping(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(value) => Self::Bool(value),
            Value::Int(value) => Self::from(value),
            Value::Float(value) => serde_json::Number::from_f64(value).map_or(Self::Null, Self::Number),
            Value::String(value) => Self::String(value),
            Value::Sequence(sequence) => {
                Self::Array(sequence.iter().cloned().map(Self::from).collect())
            }
            Value::Mapping(mapping) => Self::Object(
                mapping
                    .iter()
                    .map(|(key, value)| (key.to_owned(), Self::from(value.clone())))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::String(value) => serializer.serialize_str(value),
            Self::Sequence(sequence) => sequence.serialize(serializer),
            Self::Mapping(mapping) => mapping.serialize(serializer),
        }
    }
}

impl Serialize for Sequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            state.serialize_element(element)?;
        }
        state.end()
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            state.serialize_entry(key, value)?;
        }
        state.end()
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_from_json_keeps_int_and_float_apart() {
        let value = Value::from(serde_json::json!({ "int": 65, "float": 65.0 }));
        let mapping = value.as_mapping().unwrap();
        assert_eq!(mapping.get("int"), Some(&Value::Int(65)));
        assert_eq!(mapping.get("float"), Some(&Value::Float(65.0)));
    }

    #[rstest]
    fn test_from_json_preserves_key_order() {
        let value = Value::from(serde_json::json!({ "z": 1, "a": 2, "m": 3 }));
        let keys: Vec<&str> = value.as_mapping().unwrap().keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[rstest]
    fn test_non_finite_float_becomes_null() {
        assert_eq!(
            serde_json::Value::from(Value::Float(f64::NAN)),
            serde_json::Value::Null
        );
    }

    #[rstest]
    fn test_serialize_matches_json_text() {
        let value = crate::record! { "name" => "mark", "tags" => crate::sequence![1, 2] };
        let text = serde_json::to_string(&value).unwrap();
        assert_eq!(text, r#"{"name":"mark","tags":[1,2]}"#);
    }

    #[rstest]
    fn test_deserialize_from_text() {
        let value: Value = serde_json::from_str(r#"{"body":{"height":100}}"#).unwrap();
        assert_eq!(
            value,
            crate::record! { "body" => crate::record! { "height" => 100 } }
        );
    }
}
