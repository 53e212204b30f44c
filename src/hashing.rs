//! Build Fingerprints - SHA-256 over canonical JSON
//!
//! Two hosts linked against the same ImageMagick build produce the same
//! fingerprint regardless of field order in a captured snapshot.

use serde::Serialize;
use std::collections::BTreeMap;
use serde_json::{to_string, Value};
use sha2::{Digest, Sha256};

use crate::info::BuildInfo;

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

/// Convert to canonical JSON (sorted keys, no whitespace)
///
/// Keys are re-sorted even though the default `Map` is ordered, so the
/// output stays stable if `preserve_order` is ever enabled.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    to_string(&sorted(serde_json::to_value(value)?))
}

fn sorted(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let entries: BTreeMap<String, Value> =
                map.into_iter().map(|(k, v)| (k, sorted(v))).collect();
            Value::Object(entries.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sorted).collect()),
        other => other,
    }
}

pub fn fingerprint(info: &BuildInfo) -> Result<String, serde_json::Error> {
    let canonical = canonical_json(info)?;
    Ok(sha256_hex(canonical.as_bytes()))
}
