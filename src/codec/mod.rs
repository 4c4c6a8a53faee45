//! Codec Module
//!
//! Value packers converting application values to stored bytes and back.
//! One packer instance serves every key; packers hold no per-entry state.

mod json;
mod msgpack;

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CacheError, Result};

pub use json::JsonPacker;
pub use msgpack::MsgPackPacker;

// == Packer ==
/// Encode/decode strategy plugged into the driver.
///
/// `unpack` must fail with [`CacheError::Decode`] on malformed input and never
/// fall back to a default value.
pub trait Packer: Send + Sync {
    /// Serializes a value into its stored representation.
    fn pack<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>>;

    /// Reconstructs a value from its stored representation.
    fn unpack<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T>;
}

// == Codec Kind ==
/// Codec selector used by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecKind {
    Json,
    MsgPack,
}

impl FromStr for CodecKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(CodecKind::Json),
            "msgpack" | "messagepack" => Ok(CodecKind::MsgPack),
            other => Err(CacheError::InvalidArgument(format!(
                "Unknown codec '{}', expected 'json' or 'msgpack'",
                other
            ))),
        }
    }
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecKind::Json => f.write_str("json"),
            CodecKind::MsgPack => f.write_str("msgpack"),
        }
    }
}

// == Any Packer ==
/// Packer chosen at runtime from configuration.
#[derive(Debug, Clone, Copy)]
pub enum AnyPacker {
    Json(JsonPacker),
    MsgPack(MsgPackPacker),
}

impl AnyPacker {
    pub fn new(kind: CodecKind) -> Self {
        match kind {
            CodecKind::Json => AnyPacker::Json(JsonPacker),
            CodecKind::MsgPack => AnyPacker::MsgPack(MsgPackPacker),
        }
    }

    pub fn kind(&self) -> CodecKind {
        match self {
            AnyPacker::Json(_) => CodecKind::Json,
            AnyPacker::MsgPack(_) => CodecKind::MsgPack,
        }
    }
}

impl Packer for AnyPacker {
    fn pack<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        match self {
            AnyPacker::Json(p) => p.pack(value),
            AnyPacker::MsgPack(p) => p.pack(value),
        }
    }

    fn unpack<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        match self {
            AnyPacker::Json(p) => p.unpack(bytes),
            AnyPacker::MsgPack(p) => p.unpack(bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_kind_parse() {
        assert_eq!("json".parse::<CodecKind>().unwrap(), CodecKind::Json);
        assert_eq!(" MsgPack ".parse::<CodecKind>().unwrap(), CodecKind::MsgPack);
        assert!(matches!(
            "php".parse::<CodecKind>(),
            Err(CacheError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_any_packer_dispatch() {
        for kind in [CodecKind::Json, CodecKind::MsgPack] {
            let packer = AnyPacker::new(kind);
            assert_eq!(packer.kind(), kind);

            let bytes = packer.pack(&vec![1u32, 2, 3]).unwrap();
            let back: Vec<u32> = packer.unpack(&bytes).unwrap();
            assert_eq!(back, vec![1, 2, 3]);
        }
    }

    #[test]
    fn test_packers_disagree_on_bytes() {
        let json = AnyPacker::new(CodecKind::Json).pack("hello").unwrap();
        let msgpack = AnyPacker::new(CodecKind::MsgPack).pack("hello").unwrap();
        assert_eq!(json, b"\"hello\"".to_vec());
        assert_ne!(json, msgpack);
    }
}
