#![deny(unsafe_code)]

use std::path::Path;

use sha2::Digest;

use crate::error::StandardsError;

pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    hex::encode(digest)
}

/// Digest of a file's raw bytes, used to tag a report with its source export.
pub fn sha256_file(path: &Path) -> Result<String, StandardsError> {
    let bytes = std::fs::read(path).map_err(|err| StandardsError::io(path, err))?;
    Ok(sha256_hex(&bytes))
}
