// src/bind.rs

//! Per-build binder driver
//!
//! Ties the two independent halves together: identity finalization writes
//! committed guids back into the symbol table, container assignment produces
//! the manifest. They share only the diagnostics sink. The binder never
//! aborts on validation findings; the surrounding build driver owns the
//! fail-the-build policy.

use crate::containers::{self, Manifest};
use crate::diagnostics::Diagnostics;
use crate::identity::{self, RegistryKeyFormat};
use crate::names::{InstallerNames, NameCanonicalizer};
use crate::symbols::SymbolTable;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Options fixed per binder instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindOptions {
    pub registry_key_format: RegistryKeyFormat,
}

/// Result of one binder invocation.
#[derive(Debug)]
pub struct BindOutput {
    /// `None` when the container phase failed structurally.
    pub manifest: Option<Manifest>,
    pub diagnostics: Diagnostics,
}

/// Runs the identity and container phases over one resolved symbol table.
pub struct Binder {
    options: BindOptions,
    names: Box<dyn NameCanonicalizer>,
}

impl Binder {
    pub fn new(options: BindOptions) -> Self {
        Self {
            options,
            names: Box::new(InstallerNames),
        }
    }

    /// Substitute the file-name canonicalization policy.
    pub fn with_names(options: BindOptions, names: Box<dyn NameCanonicalizer>) -> Self {
        Self { options, names }
    }

    /// One pass: finalize identities, then bind payloads.
    pub fn bind(&self, table: &mut SymbolTable) -> BindOutput {
        let mut diagnostics = Diagnostics::new();

        info!(
            components = table.components.len(),
            payloads = table.payloads.len(),
            "binding symbol table"
        );

        identity::finalize_component_guids(
            table,
            self.options.registry_key_format,
            self.names.as_ref(),
            &mut diagnostics,
        );

        let manifest =
            containers::assign_payloads(&table.containers, &table.payloads, &mut diagnostics)
                .ok();

        BindOutput {
            manifest,
            diagnostics,
        }
    }
}

impl Default for Binder {
    fn default() -> Self {
        Self::new(BindOptions::default())
    }
}
