//! Request Fingerprint
//!
//! Deterministic cache key for an operation and its parameters. Object keys
//! are sorted before hashing, so logically equal payloads map to the same
//! key whatever order their fields were built in.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::ResilienceResult;

/// Separates the operation name from the canonical payload in the hash input
const SEPARATOR: &[u8] = b"\x1f";

/// `"{operation}:{sha256 hex}"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Derive the fingerprint of `payload` for `operation`
    pub fn derive<P>(operation: &str, payload: &P) -> ResilienceResult<Self>
    where
        P: Serialize + ?Sized,
    {
        let value = serde_json::to_value(payload)?;
        let canonical = canonical_json(&value)?;
        let digest = platform::crypto::sha256_parts(&[
            operation.as_bytes(),
            SEPARATOR,
            canonical.as_bytes(),
        ]);
        Ok(Self(format!(
            "{}:{}",
            operation,
            platform::crypto::to_hex(&digest)
        )))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Serialize `value` with object keys in sorted order at every depth.
///
/// Arrays keep their order; callers sort sequences that are logically sets.
pub fn canonical_json(value: &Value) -> ResilienceResult<String> {
    let mut out = String::new();
    write_canonical(value, &mut out)?;
    Ok(out)
}

fn write_canonical(value: &Value, out: &mut String) -> ResilienceResult<()> {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&serde_json::to_string(key)?);
                out.push(':');
                write_canonical(item, out)?;
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out)?;
            }
            out.push(']');
        }
        scalar => out.push_str(&serde_json::to_string(scalar)?),
    }
    Ok(())
}
