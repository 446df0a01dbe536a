//! Generic key-value view of decoded entities.
//!
//! Consumers that want a format-agnostic representation (for re-export
//! to JSON or a scripting runtime) convert entities into a [`Mapping`]:
//! field name to primitive or nested mapping. The conversion is
//! structural and lossless for every serialized field, so
//! [`Mapped::from_mapping`] rebuilds an equal value.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Field name to value. Nested entities appear as nested mappings,
/// sequences as arrays.
pub type Mapping = serde_json::Map<String, Value>;

/// Failure converting between a typed entity and a [`Mapping`].
#[derive(Debug, Error)]
pub enum MappingError {
    /// serde rejected the value or the mapping's shape.
    #[error("mapping conversion failed: {0}")]
    Serde(#[from] serde_json::Error),
    /// The entity serialized to something other than a mapping.
    #[error("expected a mapping, found {found}")]
    NotAMapping {
        /// JSON kind that was produced instead.
        found: &'static str,
    },
}

/// Conversion to and from the generic key-value [`Mapping`].
pub trait Mapped: Serialize + DeserializeOwned {
    /// Structural conversion into a mapping.
    fn to_mapping(&self) -> Result<Mapping, MappingError> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(MappingError::NotAMapping {
                found: value_kind(&other),
            }),
        }
    }

    /// Rebuild the typed value from a mapping produced by
    /// [`to_mapping`](Mapped::to_mapping).
    fn from_mapping(mapping: Mapping) -> Result<Self, MappingError> {
        Ok(serde_json::from_value(Value::Object(mapping))?)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        tick: u32,
        label: String,
    }

    impl Mapped for Sample {}

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Scalar(u32);

    impl Mapped for Scalar {}

    #[test]
    fn struct_round_trips_through_mapping() {
        let sample = Sample {
            tick: 40,
            label: "gg".into(),
        };
        let mapping = sample.to_mapping().unwrap();
        assert_eq!(mapping.get("tick"), Some(&Value::from(40)));
        assert_eq!(Sample::from_mapping(mapping).unwrap(), sample);
    }

    #[test]
    fn non_mapping_value_is_reported() {
        let err = Scalar(3).to_mapping().unwrap_err();
        assert!(matches!(err, MappingError::NotAMapping { found: "number" }));
    }

    #[test]
    fn missing_field_is_a_serde_error() {
        let mut mapping = Mapping::new();
        mapping.insert("tick".into(), Value::from(1));
        assert!(matches!(
            Sample::from_mapping(mapping),
            Err(MappingError::Serde(_))
        ));
    }
}
