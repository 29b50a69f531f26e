// src/identity/generator.rs

//! Canonical-input derivation and structural validation for generated guids
//!
//! A component asking for a generated guid must anchor it to something that
//! survives servicing: its key file's canonical install path or its key
//! registry value. Derivation and validation share those canonical inputs,
//! so they live together. Violations fall in two classes:
//!
//! - eligibility errors leave only the offending component unresolved;
//! - structural errors poison the whole pass, because a partially-committed
//!   identity set must never reach the installed product. The caller gates
//!   the commit step on [`GuidGenerator::structural_errors`].

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::identity::RegistryKeyFormat;
use crate::identity::directories::{DirectoryResolver, PATH_SEPARATOR};
use crate::names::NameCanonicalizer;
use crate::symbols::{Component, FileSymbol, KeyPathKind, RegistrySymbol};
use std::collections::HashMap;
use tracing::debug;

/// Special-folder prefixes that the installer redirects at install time.
/// A key file under one of them cannot anchor a stable identity. Policy
/// data: ordered, matched case-sensitively, audited as a table.
const NON_CANONICAL_PREFIXES: &[&str] = &[
    "PersonalFolder\\my pictures",
    "ProgramFilesFolder\\common files",
    "ProgramMenuFolder\\startup",
    "TARGETDIR",
    "StartMenuFolder\\programs",
    "WindowsFolder\\fonts",
];

/// Derives canonical identity inputs for one pass. Indexes over the
/// immutable symbol snapshot are built once at construction.
pub struct GuidGenerator<'a> {
    files_by_component: HashMap<&'a str, Vec<&'a FileSymbol>>,
    registry_by_id: HashMap<&'a str, &'a RegistrySymbol>,
    names: &'a dyn NameCanonicalizer,
    registry_key_format: RegistryKeyFormat,
    structural_errors: usize,
}

impl<'a> GuidGenerator<'a> {
    pub fn new(
        files: &'a [FileSymbol],
        registry_values: &'a [RegistrySymbol],
        names: &'a dyn NameCanonicalizer,
        registry_key_format: RegistryKeyFormat,
    ) -> Self {
        let mut files_by_component: HashMap<&str, Vec<&FileSymbol>> = HashMap::new();
        for file in files {
            files_by_component
                .entry(file.component.as_str())
                .or_default()
                .push(file);
        }

        let mut registry_by_id = HashMap::with_capacity(registry_values.len());
        for registry in registry_values {
            registry_by_id.entry(registry.id.as_str()).or_insert(registry);
        }

        Self {
            files_by_component,
            registry_by_id,
            names,
            registry_key_format,
            structural_errors: 0,
        }
    }

    /// Structural validation errors recorded so far in this pass.
    pub fn structural_errors(&self) -> usize {
        self.structural_errors
    }

    /// Derive the canonical identity input for a component, recording any
    /// violations. Returns `None` when the component is ineligible; a
    /// returned input may still be withheld from commit by the pass gate.
    pub fn derive(
        &mut self,
        component: &Component,
        resolver: &mut DirectoryResolver,
        diagnostics: &mut Diagnostics,
    ) -> Option<String> {
        let key_path = component.key_path.as_deref().filter(|k| !k.is_empty());

        let Some(key_path) = key_path else {
            diagnostics.error(
                DiagnosticKind::IneligibleKeyPath {
                    component: component.id.clone(),
                },
                component.location.clone(),
            );
            return None;
        };

        if component.key_path_kind == KeyPathKind::OdbcDataSource {
            diagnostics.error(
                DiagnosticKind::IneligibleKeyPath {
                    component: component.id.clone(),
                },
                component.location.clone(),
            );
            return None;
        }

        if component.key_path_kind == KeyPathKind::Registry {
            self.derive_from_registry(component, key_path, diagnostics)
        } else {
            self.derive_from_key_file(component, key_path, resolver, diagnostics)
        }
    }

    fn derive_from_registry(
        &mut self,
        component: &Component,
        key_path: &str,
        diagnostics: &mut Diagnostics,
    ) -> Option<String> {
        let Some(registry) = self.registry_by_id.get(key_path) else {
            diagnostics.error(
                DiagnosticKind::UnresolvedKeyPathReference {
                    component: component.id.clone(),
                    key_path: key_path.to_string(),
                },
                component.location.clone(),
            );
            return None;
        };

        let bitness = if component.win64 { "64" } else { "" };
        let root = match self.registry_key_format {
            RegistryKeyFormat::LegacyNumeric => registry.root.numeric().to_string(),
            RegistryKeyFormat::SymbolicName => registry.root.symbolic().to_string(),
        };
        let input = format!(
            "{bitness}{root}{sep}{key}{sep}{name}",
            sep = PATH_SEPARATOR,
            key = registry.key,
            name = registry.value_name,
        )
        .to_lowercase();

        debug!(component = %component.id, %input, "derived registry-keyed identity input");
        Some(input)
    }

    fn derive_from_key_file(
        &mut self,
        component: &Component,
        key_path: &str,
        resolver: &mut DirectoryResolver,
        diagnostics: &mut Diagnostics,
    ) -> Option<String> {
        // Detached copy of the index entry (references only), so validation
        // below can count structural errors on `self` while iterating.
        let files: Vec<&'a FileSymbol> = self
            .files_by_component
            .get(component.id.as_str())
            .cloned()
            .unwrap_or_default();
        let multi_file = files.len() > 1;

        let mut key_file_seen = false;
        let mut input = None;

        // Validation covers every file the component owns, not only the key
        // file; a single build reports every violation.
        for file in &files {
            if file.id == key_path {
                key_file_seen = true;

                match resolver.resolve(&component.directory) {
                    Ok(directory) => {
                        let file_name =
                            self.names.canonical_file_name(&file.name).to_lowercase();
                        let path =
                            format!("{}{}{}", directory.path, PATH_SEPARATOR, file_name);

                        if NON_CANONICAL_PREFIXES
                            .iter()
                            .any(|prefix| path.starts_with(prefix))
                        {
                            self.structural_errors += 1;
                            diagnostics.error(
                                DiagnosticKind::NonCanonicalKeyFilePath {
                                    component: component.id.clone(),
                                    path: path.clone(),
                                },
                                component.location.clone(),
                            );
                        }

                        debug!(component = %component.id, input = %path, "derived file-keyed identity input");
                        input = Some(path);
                    }
                    Err(err) => {
                        self.structural_errors += 1;
                        diagnostics.error(
                            DiagnosticKind::UnresolvableDirectory {
                                component: component.id.clone(),
                                directory: component.directory.clone(),
                                reason: err.to_string(),
                            },
                            component.location.clone(),
                        );
                    }
                }

                // A multi-file component is serviced by its key file's
                // version; an unversioned key file cannot govern that.
                if multi_file && !file.is_versioned() {
                    self.structural_errors += 1;
                    diagnostics.error(
                        DiagnosticKind::UnversionedKeyFile {
                            component: component.id.clone(),
                            key_file: file.id.clone(),
                        },
                        component.location.clone(),
                    );
                }
            } else if multi_file && file.is_versioned() {
                self.structural_errors += 1;
                diagnostics.error(
                    DiagnosticKind::VersionedNonKeyFile {
                        component: component.id.clone(),
                        file: file.id.clone(),
                    },
                    component.location.clone(),
                );
            }
        }

        if !key_file_seen {
            diagnostics.error(
                DiagnosticKind::UnresolvedKeyPathReference {
                    component: component.id.clone(),
                    key_path: key_path.to_string(),
                },
                component.location.clone(),
            );
        }

        input
    }
}
