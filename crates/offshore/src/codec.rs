// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Serialization of the whole store mapping to and from a byte blob

use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// The in-memory mapping mirrored to disk
///
/// Ordered so that encoding the same mapping always yields the same bytes.
pub type StoreMap = BTreeMap<String, Value>;

/// Errors from encoding or decoding a mapping
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to encode store: {0}")]
    Encode(String),
    #[error("failed to decode store: {0}")]
    Decode(String),
}

/// Converts a full mapping to bytes and back
pub trait Codec {
    fn encode(&self, map: &StoreMap) -> Result<Vec<u8>, CodecError>;

    fn decode(&self, bytes: &[u8]) -> Result<StoreMap, CodecError>;
}

/// JSON codec (the default)
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indented output, easier to inspect by hand
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Codec for JsonCodec {
    fn encode(&self, map: &StoreMap) -> Result<Vec<u8>, CodecError> {
        let result = if self.pretty {
            serde_json::to_vec_pretty(map)
        } else {
            serde_json::to_vec(map)
        };
        result.map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<StoreMap, CodecError> {
        // An empty file is a truncated write, not an empty store
        if bytes.is_empty() {
            return Err(CodecError::Decode("empty blob".to_string()));
        }
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
