//! MessagePack packer backed by rmp-serde.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::Packer;
use crate::error::{CacheError, Result};

/// Compact binary packer. Structs are written as maps with field names so
/// readers tolerate added or reordered fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackPacker;

impl Packer for MsgPackPacker {
    fn pack<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        rmp_serde::to_vec_named(value).map_err(|e| CacheError::Encode(e.to_string()))
    }

    fn unpack<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        rmp_serde::from_slice(bytes).map_err(|e| CacheError::Decode(e.to_string()))
    }
}
