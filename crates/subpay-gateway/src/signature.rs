//! Callback Checksum Verification
//!
//! The gateway signs asynchronous callbacks with an `X-VERIFY` header:
//! `sha256(body + path + salt_key)` in hex, followed by `###` and the
//! salt index.

use sha2::{Digest, Sha256};

/// Compute the expected `X-VERIFY` value for a callback body.
pub fn compute(body: &str, path: &str, salt_key: &str, salt_index: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body.as_bytes());
    hasher.update(path.as_bytes());
    hasher.update(salt_key.as_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("{digest}###{salt_index}")
}

/// Verify a received `X-VERIFY` header against the callback body.
pub fn verify(header: &str, body: &str, path: &str, salt_key: &str, salt_index: &str) -> bool {
    header == compute(body, path, salt_key, salt_index)
}
