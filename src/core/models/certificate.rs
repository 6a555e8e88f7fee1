use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::core::errors::{CertdeckError, Result};

/// One certificate entity as exposed by the backend collection endpoint.
///
/// `common_name` is the primary key within a collection snapshot: the
/// backend guarantees it is unique per snapshot, and every selection,
/// focus, and delete operation addresses records by it. Decoding is
/// strict on field presence and types: a payload that does not match
/// this shape is a fetch failure, never a partially-filled record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub common_name: String,
    pub issuer: String,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub version: u32,
    pub serial_number: String,
    pub signature_algorithm: String,
    /// PEM-encoded public key material, treated as an opaque string.
    pub public_key: String,
}

/// Validate a common name before it is placed in a URL path segment.
///
/// Rejects anything that could escape the `/certificates/{name}` path:
/// empty strings, whitespace, path separators, and `..`.
pub fn validate_common_name(common_name: &str) -> Result<()> {
    let reject = |detail: &str| {
        Err(CertdeckError::InvalidCommonName {
            common_name: common_name.to_string(),
            detail: detail.to_string(),
        })
    };

    if common_name.is_empty() {
        return reject("must not be empty");
    }
    if common_name.chars().any(char::is_whitespace) {
        return reject("must not contain whitespace");
    }
    if common_name.contains('/') || common_name.contains('\\') {
        return reject("must not contain path separators");
    }
    if common_name.contains("..") {
        return reject("must not contain '..'");
    }
    if common_name.chars().any(char::is_control) {
        return reject("must not contain control characters");
    }
    Ok(())
}
