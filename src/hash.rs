// src/hash.rs

//! Content hashing for payload integrity
//!
//! Payloads carry a SHA-256 content hash computed during harvesting. The
//! manifest records it verbatim so the bootstrapper can verify extracted
//! payloads against what was packaged.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Hex length of a SHA-256 digest
const SHA256_HEX_LEN: usize = 64;

#[derive(Debug, Error, PartialEq)]
pub enum HashParseError {
    #[error("expected {SHA256_HEX_LEN} hex characters, found {0}")]
    InvalidLength(usize),

    #[error("invalid hex encoding: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// A SHA-256 content hash, stored as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    /// Hash a byte slice.
    pub fn sha256(data: &[u8]) -> Self {
        Self(hex::encode(Sha256::digest(data)))
    }

    /// Parse an already-computed digest from its hex form.
    pub fn from_hex(hex_digest: &str) -> Result<Self, HashParseError> {
        if hex_digest.len() != SHA256_HEX_LEN {
            return Err(HashParseError::InvalidLength(hex_digest.len()));
        }
        hex::decode(hex_digest)?;
        Ok(Self(hex_digest.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ContentHash {
    type Err = HashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_of_empty_input_matches_known_digest() {
        let hash = ContentHash::sha256(b"");
        assert_eq!(
            hash.as_str(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn from_hex_normalizes_case() {
        let upper = "E3B0C44298FC1C149AFBF4C8996FB92427AE41E4649B934CA495991B7852B855";
        let hash = ContentHash::from_hex(upper).unwrap();
        assert_eq!(hash, ContentHash::sha256(b""));
    }

    #[test]
    fn from_hex_rejects_bad_input() {
        assert_eq!(
            ContentHash::from_hex("abcd"),
            Err(HashParseError::InvalidLength(4))
        );
        assert!(matches!(
            ContentHash::from_hex(&"zz".repeat(32)),
            Err(HashParseError::InvalidHex(_))
        ));
    }
}
