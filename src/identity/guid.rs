// src/identity/guid.rs

//! Name-based guid derivation
//!
//! Component identities are name-based (v5) UUIDs over a fixed namespace, so
//! an unchanged canonical input yields the same guid on every run and every
//! platform. Rendered uppercase in braces, the form the installer tables
//! expect.

use uuid::{Uuid, uuid};

/// Namespace for generated component guids. Changing it would re-identify
/// every shipped component, so it is frozen.
pub const COMPONENT_GUID_NAMESPACE: Uuid = uuid!("3064e5c6-fb63-4fe9-ac49-e446a792efa5");

/// Derive a stable guid from a namespace and a canonical input string.
pub fn create_guid(namespace: &Uuid, input: &str) -> String {
    let id = Uuid::new_v5(namespace, input.as_bytes());
    format!("{{{}}}", id.hyphenated().to_string().to_uppercase())
}
