//! JSON packer backed by serde_json.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::Packer;
use crate::error::{CacheError, Result};

/// Human-readable packer; stored values can be inspected with any Redis client.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPacker;

impl Packer for JsonPacker {
    fn pack<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| CacheError::Encode(e.to_string()))
    }

    fn unpack<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        serde_json::from_slice(bytes).map_err(|e| CacheError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Profile {
        id: u64,
        name: String,
    }

    #[test]
    fn test_json_struct_value() {
        let packer = JsonPacker;
        let profile = Profile {
            id: 7,
            name: "ada".to_string(),
        };

        let bytes = packer.pack(&profile).unwrap();
        assert_eq!(bytes, br#"{"id":7,"name":"ada"}"#.to_vec());
        assert_eq!(packer.unpack::<Profile>(&bytes).unwrap(), profile);
    }

    #[test]
    fn test_json_malformed_input_is_decode_error() {
        let result = JsonPacker.unpack::<Profile>(b"{not json");
        assert!(matches!(result, Err(CacheError::Decode(_))));
    }

    #[test]
    fn test_json_type_mismatch_is_decode_error() {
        let bytes = JsonPacker.pack("a string").unwrap();
        let result = JsonPacker.unpack::<u64>(&bytes);
        assert!(matches!(result, Err(CacheError::Decode(_))));
    }

    #[test]
    fn test_json_unencodable_value() {
        let mut map = std::collections::HashMap::new();
        map.insert(vec![1u8], 1u8);
        let result = JsonPacker.pack(&map);
        assert!(matches!(result, Err(CacheError::Encode(_))));
    }
}
