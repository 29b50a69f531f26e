// src/lib.rs

//! Bindery
//!
//! Identity-and-packaging binder for installer build pipelines: takes a
//! resolved, symbol-level description of an installable product and produces
//! stable, collision-checked component identities plus a validated
//! payload-to-container manifest for the bootstrapper.
//!
//! # Architecture
//!
//! - Symbol table in, manifest out: the front end and linker resolve
//!   symbols upstream; final binary serialization happens downstream
//! - Deterministic identity: generated guids are name-based hashes of
//!   canonical install-time locations, identical across runs and platforms
//! - Whole-pass commit: a structural validation error anywhere withholds
//!   every pending identity, so committed guids are never partially valid
//! - Diagnostics, not exceptions: every violation is a sink record; the
//!   surrounding build driver decides whether the build fails

pub mod bind;
pub mod containers;
pub mod diagnostics;
pub mod hash;
pub mod identity;
pub mod names;
pub mod symbols;

pub use bind::{BindOptions, BindOutput, Binder};
pub use containers::{ContainerError, Manifest, ManifestEntry, Packaging, assign_payloads};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity, SourceLocation};
pub use hash::{ContentHash, HashParseError};
pub use identity::{
    DirectoryResolveError, DirectoryResolver, RegistryKeyFormat, ResolvedDirectoryPath,
    finalize_component_guids,
};
pub use names::{InstallerNames, NameCanonicalizer};
pub use symbols::{
    Component, ComponentGuid, Container, ContainerKind, Directory, FileSymbol, KeyPathKind,
    Payload, RegistryRoot, RegistrySymbol, SymbolTable,
};
