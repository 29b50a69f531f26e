// src/symbols/component.rs

//! Component symbols and their identity state

use crate::diagnostics::SourceLocation;

/// Identity state of a component.
///
/// The authoring language allows exactly three shapes: a concrete guid, the
/// `*` placeholder asking the binder to derive one, or nothing at all for
/// components the installer should not track. Modeling them as an enum keeps
/// any other sentinel unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentGuid {
    /// The `*` placeholder: derive a stable guid from the key path.
    Generate,
    /// No identity tracking; the component is never serviced.
    Unmanaged,
    /// A concrete guid, authored or committed by the binder.
    Assigned(String),
}

impl ComponentGuid {
    pub fn is_generate(&self) -> bool {
        matches!(self, Self::Generate)
    }

    /// The concrete guid, if one is assigned.
    pub fn assigned(&self) -> Option<&str> {
        match self {
            Self::Assigned(guid) => Some(guid),
            _ => None,
        }
    }
}

/// What kind of resource the component's key path names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyPathKind {
    /// The component directory itself is the key path.
    #[default]
    Directory,
    File,
    Registry,
    OdbcDataSource,
}

/// Smallest installable unit. Mutated at most once per pass, when the binder
/// commits a generated identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub id: String,
    pub guid: ComponentGuid,
    /// Id of the key file or registry value; `None` when the directory is
    /// the key path.
    pub key_path: Option<String>,
    pub key_path_kind: KeyPathKind,
    /// Owning directory id
    pub directory: String,
    /// 64-bit component; prefixes registry-keyed identity input
    pub win64: bool,
    /// Install condition expression, if any
    pub condition: Option<String>,
    pub location: Option<SourceLocation>,
}

impl Component {
    /// Whether the component carries a non-empty install condition.
    pub fn has_condition(&self) -> bool {
        self.condition.as_deref().is_some_and(|c| !c.is_empty())
    }
}
