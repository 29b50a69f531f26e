// src/identity/mod.rs

//! Component identity finalization
//!
//! Runs once per build over the resolved symbol table: derive a canonical
//! input for every component requesting a generated guid, validate the
//! structural rules that make derivation sound, commit the pending guids
//! only if the whole pass stayed clean, then classify any duplicate
//! identities. Committing is an all-or-nothing decision for the pass; a
//! partially trustworthy identity set is worse than none, and withholding
//! the commit while validation runs to completion gives authors every
//! violation in a single build.

pub mod collisions;
pub mod directories;
pub mod generator;
pub mod guid;

pub use directories::{DirectoryResolveError, DirectoryResolver, ResolvedDirectoryPath};
pub use generator::GuidGenerator;
pub use guid::{COMPONENT_GUID_NAMESPACE, create_guid};

use crate::diagnostics::Diagnostics;
use crate::names::NameCanonicalizer;
use crate::symbols::{ComponentGuid, SymbolTable};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// How registry roots are spelled in identity input.
///
/// Two epochs exist and both must be preserved byte-for-byte: identities of
/// shipped products were hashed from one of them, and re-encoding would
/// silently re-identify every registry-keyed component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistryKeyFormat {
    /// Historic numeric root encoding (`2\software\...`).
    LegacyNumeric,
    /// Current symbolic encoding (`localmachine\software\...`).
    #[default]
    SymbolicName,
}

/// Finalize component identities for one build pass.
///
/// Components whose guid is not the generation placeholder pass through
/// unchanged; collision detection still covers them.
pub fn finalize_component_guids(
    table: &mut SymbolTable,
    registry_key_format: RegistryKeyFormat,
    names: &dyn NameCanonicalizer,
    diagnostics: &mut Diagnostics,
) {
    let SymbolTable {
        directories,
        components,
        files,
        registry_values,
        ..
    } = table;

    let mut resolver = DirectoryResolver::new(directories);
    let mut generator = GuidGenerator::new(files, registry_values, names, registry_key_format);

    let mut pending: Vec<(usize, String)> = Vec::new();
    for (index, component) in components.iter().enumerate() {
        if !component.guid.is_generate() {
            continue;
        }
        if let Some(input) = generator.derive(component, &mut resolver, diagnostics) {
            pending.push((index, input));
        }
    }

    if generator.structural_errors() == 0 {
        info!(committed = pending.len(), "committing generated component guids");
        for (index, input) in pending {
            let guid = create_guid(&COMPONENT_GUID_NAMESPACE, &input);
            debug!(component = %components[index].id, %guid, "assigned generated guid");
            components[index].guid = ComponentGuid::Assigned(guid);
        }
    } else {
        info!(
            withheld = pending.len(),
            errors = generator.structural_errors(),
            "withholding generated guids after validation errors"
        );
    }

    collisions::detect_collisions(components, files, registry_values, &mut resolver, diagnostics);
}
