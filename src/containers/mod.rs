// src/containers/mod.rs

//! Container-set validation and payload binding
//!
//! Validates the declared container set structurally, binds every harvested
//! payload to exactly one container, and emits the manifest. The structural
//! check runs before any payload is touched: a second attached container
//! makes the rest of the phase meaningless, so it aborts the phase rather
//! than accumulating per-payload noise. Per-payload binding problems stay
//! per-payload diagnostics.

pub mod manifest;

pub use manifest::{Manifest, ManifestEntry, Packaging};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::symbols::{Container, ContainerKind, Payload};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContainerError {
    #[error("multiple attached containers are not supported: {first} and {second} are both attached")]
    MultipleAttachedContainers { first: String, second: String },
}

/// Bind every payload to a container and emit the manifest.
///
/// Entry order follows payload declaration order. The returned error is also
/// recorded in the sink, so callers inspecting only diagnostics see it too.
pub fn assign_payloads(
    containers: &[Container],
    payloads: &[Payload],
    diagnostics: &mut Diagnostics,
) -> Result<Manifest, ContainerError> {
    let mut by_id: HashMap<&str, &Container> = HashMap::with_capacity(containers.len());
    let mut attached: Option<&Container> = None;

    for container in containers {
        if by_id.contains_key(container.id.as_str()) {
            diagnostics.error(
                DiagnosticKind::DuplicateContainer {
                    container: container.id.clone(),
                },
                container.location.clone(),
            );
            continue;
        }
        by_id.insert(container.id.as_str(), container);

        if container.kind == ContainerKind::Attached {
            if let Some(first) = attached {
                let error = ContainerError::MultipleAttachedContainers {
                    first: first.id.clone(),
                    second: container.id.clone(),
                };
                diagnostics.error(
                    DiagnosticKind::MultipleAttachedContainers {
                        first: first.id.clone(),
                        second: container.id.clone(),
                    },
                    container.location.clone(),
                );
                return Err(error);
            }
            attached = Some(container);
        }
    }

    let mut manifest = Manifest::default();
    for payload in payloads {
        let container = match &payload.container {
            Some(reference) => match by_id.get(reference.as_str()) {
                Some(container) => *container,
                None => {
                    diagnostics.error(
                        DiagnosticKind::UnknownPayloadContainer {
                            payload: payload.id.clone(),
                            container: reference.clone(),
                        },
                        payload.location.clone(),
                    );
                    continue;
                }
            },
            None => match attached {
                Some(container) => container,
                None => {
                    diagnostics.error(
                        DiagnosticKind::PayloadWithoutContainer {
                            payload: payload.id.clone(),
                        },
                        payload.location.clone(),
                    );
                    continue;
                }
            },
        };

        debug!(payload = %payload.id, container = %container.id, "bound payload");
        manifest.entries.push(ManifestEntry {
            payload: payload.id.clone(),
            name: payload.name.clone(),
            packaging: Packaging::Embedded,
            container: container.id.clone(),
            size: payload.size,
            hash: payload.hash.clone(),
        });
    }

    info!(
        containers = containers.len(),
        entries = manifest.len(),
        "container assignment complete"
    );
    Ok(manifest)
}
