// src/symbols/container.rs

//! Delivery containers and harvested payloads

use crate::diagnostics::SourceLocation;
use crate::hash::ContentHash;

/// How a container is distributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ContainerKind {
    /// Embedded in the bootstrapper executable; at most one per build.
    Attached,
    /// A sibling file shipped alongside the bootstrapper.
    Detached,
}

/// A declared delivery container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub id: String,
    pub kind: ContainerKind,
    pub location: Option<SourceLocation>,
}

/// A harvested distributable file, bound to exactly one container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub id: String,
    /// In-package relative path
    pub name: String,
    /// Harvest-time source path
    pub source: String,
    pub size: u64,
    pub hash: ContentHash,
    /// Explicit container reference; `None` binds to the attached container.
    pub container: Option<String>,
    pub location: Option<SourceLocation>,
}
