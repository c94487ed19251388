// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

fn sample() -> StoreMap {
    let mut map = StoreMap::new();
    map.insert("count".to_string(), json!(3));
    map.insert(
        "nested".to_string(),
        json!({ "list": [1, 2, { "deep": true }], "name": "otter" }),
    );
    map
}

#[test]
fn json_preserves_nested_values() {
    let codec = JsonCodec::new();
    let bytes = codec.encode(&sample()).unwrap();
    assert_eq!(codec.decode(&bytes).unwrap(), sample());
}

#[test]
fn json_encoding_is_deterministic() {
    let codec = JsonCodec::new();
    let mut reversed = StoreMap::new();
    for (k, v) in sample().into_iter().rev() {
        reversed.insert(k, v);
    }
    assert_eq!(codec.encode(&sample()).unwrap(), codec.encode(&reversed).unwrap());
}

#[test]
fn pretty_output_decodes_with_plain_codec() {
    let bytes = JsonCodec::pretty().encode(&sample()).unwrap();
    assert!(bytes.contains(&b'\n'));
    assert_eq!(JsonCodec::new().decode(&bytes).unwrap(), sample());
}

#[test]
fn empty_map_encodes_to_empty_object() {
    let bytes = JsonCodec::new().encode(&StoreMap::new()).unwrap();
    assert_eq!(bytes, b"{}");
}

#[test]
fn empty_blob_is_a_decode_error() {
    let result = JsonCodec::new().decode(b"");
    assert!(matches!(result, Err(CodecError::Decode(_))));
}

#[test]
fn garbage_is_a_decode_error() {
    let result = JsonCodec::new().decode(b"{not json");
    assert!(matches!(result, Err(CodecError::Decode(_))));
}

#[test]
fn non_object_is_a_decode_error() {
    let result = JsonCodec::new().decode(b"[1, 2, 3]");
    assert!(matches!(result, Err(CodecError::Decode(_))));
}
