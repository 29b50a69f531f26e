// src/symbols/mod.rs

//! Resolved symbol table consumed by the binder
//!
//! The front end and linker (external collaborators) produce this table; the
//! binder treats it as read-only for the whole pass except for the single
//! identity commit on components that requested a generated guid.
//!
//! Symbol kinds:
//!
//! | Symbol | Role |
//! |--------|------|
//! | `Directory` | install-time location node, forms a forest of root tokens |
//! | `Component` | smallest installable unit, carries the serviced identity |
//! | `FileSymbol` | file owned by a component |
//! | `RegistrySymbol` | registry value, possible component key path |
//! | `Container` | delivery container, attached or detached |
//! | `Payload` | harvested distributable bound to exactly one container |

mod component;
mod container;
mod registry;

pub use component::{Component, ComponentGuid, KeyPathKind};
pub use container::{Container, ContainerKind, Payload};
pub use registry::{RegistryRoot, RegistrySymbol};

use crate::diagnostics::SourceLocation;

/// An install-time directory node.
///
/// A directory without a parent is a root token (`TARGETDIR`,
/// `ProgramFilesFolder`, ...) and its name is the token spelled canonically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    pub id: String,
    /// Parent directory id; `None` marks a root token.
    pub parent: Option<String>,
    /// Name segment (the root token itself for parentless directories).
    pub name: String,
    /// Identity-generation seed override for this subtree.
    pub guid_seed: Option<String>,
    pub location: Option<SourceLocation>,
}

/// A file owned by a component. Read-only input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSymbol {
    pub id: String,
    /// Owning component id
    pub component: String,
    /// Declared name, possibly in `short|long` form
    pub name: String,
    /// Version string; `None` or empty means unversioned
    pub version: Option<String>,
    /// Harvest-time source path
    pub source: String,
    pub location: Option<SourceLocation>,
}

impl FileSymbol {
    /// Whether the file carries a non-empty version.
    pub fn is_versioned(&self) -> bool {
        self.version.as_deref().is_some_and(|v| !v.is_empty())
    }
}

/// The resolved symbol table for one build. Declaration order is preserved
/// and drives every deterministic ordering downstream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    pub directories: Vec<Directory>,
    pub components: Vec<Component>,
    pub files: Vec<FileSymbol>,
    pub registry_values: Vec<RegistrySymbol>,
    pub containers: Vec<Container>,
    pub payloads: Vec<Payload>,
}
