// src/containers/manifest.rs

//! The payload/container manifest
//!
//! Ordered record of every payload binding, consumed by the downstream
//! cabinet/content writer and embedded in the bootstrapper for
//! self-description. Entry order follows payload declaration order, so the
//! serialized manifest is byte-identical across runs of the same input.

use crate::hash::ContentHash;
use serde::{Deserialize, Serialize};

/// How a payload travels inside its container.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Packaging {
    Embedded,
}

/// One payload binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Payload id
    pub payload: String,
    /// In-package relative path
    pub name: String,
    pub packaging: Packaging,
    /// Owning container id
    pub container: String,
    pub size: u64,
    pub hash: ContentHash,
}

/// The committed output artifact of container assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize for downstream packaging.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packaging_serializes_lowercase() {
        let json = serde_json::to_string(&Packaging::Embedded).unwrap();
        assert_eq!(json, "\"embedded\"");
        assert_eq!(Packaging::Embedded.to_string(), "embedded");
    }

    #[test]
    fn manifest_round_trips_through_json() {
        let manifest = Manifest {
            entries: vec![ManifestEntry {
                payload: "a0".into(),
                name: "first.msi".into(),
                packaging: Packaging::Embedded,
                container: "AttachedContainer".into(),
                size: 1024,
                hash: ContentHash::sha256(b"first.msi"),
            }],
        };

        let json = manifest.to_json().unwrap();
        let parsed: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, manifest);
    }
}
