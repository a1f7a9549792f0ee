//! The JSON mapping seam
//!
//! Request bodies and response models go through this narrow trait so
//! the mapping engine stays swappable.

use crate::error::SerializationError;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub trait Serializer {
    fn serialize<T: Serialize>(&self, value: &T) -> Result<String, SerializationError>;

    fn deserialize<T: DeserializeOwned>(&self, data: &str) -> Result<T, SerializationError>;
}

/// serde_json-backed serializer, the default for generated clients
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn serialize<T: Serialize>(&self, value: &T) -> Result<String, SerializationError> {
        serde_json::to_string(value).map_err(Into::into)
    }

    fn deserialize<T: DeserializeOwned>(&self, data: &str) -> Result<T, SerializationError> {
        serde_json::from_str(data).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Greeting {
        message: String,
    }

    #[test]
    fn test_round_trip() {
        let serializer = JsonSerializer;
        let greeting = Greeting {
            message: "hello".to_string(),
        };
        let encoded = serializer.serialize(&greeting).unwrap();
        let decoded: Greeting = serializer.deserialize(&encoded).unwrap();
        assert_eq!(decoded, greeting);
    }

    #[test]
    fn test_invalid_json_reports_serialization_error() {
        let serializer = JsonSerializer;
        let result: Result<Greeting, _> = serializer.deserialize("not json");
        assert!(result.is_err());
    }
}
