//! Request DTOs for the cache gateway API
//!
//! Values travel as arbitrary JSON and are handed to the driver unchanged.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{CacheError, Result};

/// Maximum key length accepted by the gateway, in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Request body for `PUT /cache`
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: Any JSON value
/// - `ttl`: Optional TTL in seconds; zero or negative means no expiration
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    pub key: String,
    pub value: Value,
    #[serde(default)]
    pub ttl: Option<i64>,
}

impl SetRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        check_key(&self.key)
    }
}

/// Request body for `POST /batch/get`
#[derive(Debug, Clone, Deserialize)]
pub struct GetManyRequest {
    pub keys: Vec<String>,
    /// Returned for absent keys (null when omitted)
    #[serde(default)]
    pub default: Value,
}

impl GetManyRequest {
    pub fn validate(&self) -> Option<String> {
        self.keys.iter().find_map(|key| check_key(key))
    }
}

/// Request body for `PUT /batch`
///
/// `values` is kept as raw JSON so a non-object body reaches the gateway
/// and is rejected as an invalid argument rather than a parse failure.
#[derive(Debug, Clone, Deserialize)]
pub struct SetManyRequest {
    pub values: Value,
    #[serde(default)]
    pub ttl: Option<i64>,
}

impl SetManyRequest {
    /// Returns the key/value mapping, rejecting anything that is not a JSON object.
    pub fn into_entries(self) -> Result<Map<String, Value>> {
        match self.values {
            Value::Object(entries) => {
                if let Some(message) = entries.keys().find_map(|key| check_key(key)) {
                    return Err(CacheError::InvalidArgument(message));
                }
                Ok(entries)
            }
            other => Err(CacheError::InvalidArgument(format!(
                "Values must be a key/value mapping, got {}",
                json_type(&other)
            ))),
        }
    }
}

/// Request body for `POST /batch/delete`
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteManyRequest {
    pub keys: Vec<String>,
}

impl DeleteManyRequest {
    pub fn validate(&self) -> Option<String> {
        self.keys.iter().find_map(|key| check_key(key))
    }
}

fn check_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_request_deserialize() {
        let json = r#"{"key": "test", "value": {"n": 1}}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "test");
        assert_eq!(req.value["n"], 1);
        assert!(req.ttl.is_none());
    }

    #[test]
    fn test_set_request_negative_ttl() {
        let json = r#"{"key": "test", "value": "hello", "ttl": -1}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.ttl, Some(-1));
    }

    #[test]
    fn test_validate_keys() {
        let req = SetRequest {
            key: "".to_string(),
            value: Value::Null,
            ttl: None,
        };
        assert!(req.validate().is_some());

        let req = DeleteManyRequest {
            keys: vec!["ok".to_string(), "x".repeat(MAX_KEY_LENGTH + 1)],
        };
        assert!(req.validate().is_some());

        let req = GetManyRequest {
            keys: vec!["a".to_string()],
            default: Value::Null,
        };
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_set_many_accepts_object() {
        let req: SetManyRequest =
            serde_json::from_str(r#"{"values": {"a": 1, "b": [2]}, "ttl": 30}"#).unwrap();
        let entries = req.into_entries().unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_set_many_rejects_sequence() {
        let req: SetManyRequest = serde_json::from_str(r#"{"values": [1, 2, 3]}"#).unwrap();
        let err = req.into_entries().unwrap_err();
        assert!(matches!(err, CacheError::InvalidArgument(_)));
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_set_many_rejects_empty_key() {
        let req: SetManyRequest = serde_json::from_str(r#"{"values": {"": 1}}"#).unwrap();
        assert!(matches!(req.into_entries(), Err(CacheError::InvalidArgument(_))));
    }
}
