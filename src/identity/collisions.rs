// src/identity/collisions.rs

//! Duplicate-identity classification after generation
//!
//! Components may deliberately share one guid when mutually exclusive install
//! conditions pick exactly one of them per machine; that pattern varies a
//! component's content by environment while preserving its servicing
//! identity. The check here is lenient: it verifies every member *has* a
//! condition, not that the conditions actually exclude each other. Proving
//! exclusivity would need a condition-language solver; absence of any
//! condition is the defect we can detect cheaply.

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::identity::directories::{DirectoryResolver, PATH_SEPARATOR};
use crate::symbols::{Component, ComponentGuid, FileSymbol, KeyPathKind, RegistrySymbol};
use std::collections::HashMap;
use tracing::debug;

/// Group finalized guids case-insensitively and report every colliding
/// member: a warning when all members carry conditions, an error otherwise.
pub fn detect_collisions(
    components: &[Component],
    files: &[FileSymbol],
    registry_values: &[RegistrySymbol],
    resolver: &mut DirectoryResolver,
    diagnostics: &mut Diagnostics,
) {
    let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
    // First-detection order keeps reporting deterministic.
    let mut colliding: Vec<String> = Vec::new();

    for (index, component) in components.iter().enumerate() {
        if let ComponentGuid::Assigned(guid) = &component.guid {
            let key = guid.to_lowercase();
            let members = groups.entry(key.clone()).or_default();
            members.push(index);
            if members.len() == 2 {
                colliding.push(key);
            }
        }
    }

    if colliding.is_empty() {
        return;
    }
    debug!(groups = colliding.len(), "classifying guid collisions");

    // Anchor indexes are only worth building once a collision exists.
    let anchors = AnchorIndex::new(files, registry_values);

    for key in colliding {
        let Some(members) = groups.get(&key) else {
            continue;
        };
        let all_conditioned = members
            .iter()
            .all(|&index| components[index].has_condition());

        for &index in members {
            let component = &components[index];
            let Some(guid) = component.guid.assigned() else {
                continue;
            };
            let (anchor_kind, anchor) = anchors.describe(component, resolver);

            if all_conditioned {
                diagnostics.warning(
                    DiagnosticKind::ConditionedDuplicateGuid {
                        component: component.id.clone(),
                        guid: guid.to_string(),
                        anchor_kind: anchor_kind.to_string(),
                        anchor,
                    },
                    component.location.clone(),
                );
            } else {
                diagnostics.error(
                    DiagnosticKind::DuplicateGuid {
                        component: component.id.clone(),
                        guid: guid.to_string(),
                        anchor_kind: anchor_kind.to_string(),
                        anchor,
                    },
                    component.location.clone(),
                );
            }
        }
    }
}

/// Lookup tables for the human-readable anchor attached to each collision
/// report, memoized through the shared directory resolver.
struct AnchorIndex<'a> {
    files_by_id: HashMap<&'a str, &'a FileSymbol>,
    registry_by_id: HashMap<&'a str, &'a RegistrySymbol>,
}

impl<'a> AnchorIndex<'a> {
    fn new(files: &'a [FileSymbol], registry_values: &'a [RegistrySymbol]) -> Self {
        Self {
            files_by_id: files.iter().map(|f| (f.id.as_str(), f)).collect(),
            registry_by_id: registry_values.iter().map(|r| (r.id.as_str(), r)).collect(),
        }
    }

    /// `(anchor kind, anchor text)` identifying where a colliding component
    /// is keyed, so an author can tell the duplicates apart.
    fn describe(
        &self,
        component: &Component,
        resolver: &mut DirectoryResolver,
    ) -> (&'static str, String) {
        let key_path = component.key_path.as_deref().unwrap_or_default();
        match component.key_path_kind {
            KeyPathKind::File => {
                let anchor = self
                    .files_by_id
                    .get(key_path)
                    .map(|file| file.source.clone())
                    .unwrap_or_else(|| key_path.to_string());
                ("source path", anchor)
            }
            KeyPathKind::Registry => {
                let anchor = self
                    .registry_by_id
                    .get(key_path)
                    .map(|registry| {
                        format!(
                            "{}{}{}",
                            registry.key, PATH_SEPARATOR, registry.value_name
                        )
                    })
                    .unwrap_or_else(|| key_path.to_string());
                ("registry path", anchor)
            }
            KeyPathKind::Directory | KeyPathKind::OdbcDataSource => {
                let anchor = resolver
                    .resolve(&component.directory)
                    .map(|resolved| resolved.path)
                    .unwrap_or_else(|_| component.directory.clone());
                ("directory", anchor)
            }
        }
    }
}
