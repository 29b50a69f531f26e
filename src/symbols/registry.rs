// src/symbols/registry.rs

//! Registry value symbols
//!
//! Registry roots carry two encodings for identity input: the legacy numeric
//! one and the current symbolic one. Both must stay byte-for-byte stable;
//! identities of already-shipped products were hashed from them.

use crate::diagnostics::SourceLocation;

/// Registry hive a value lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::AsRefStr, strum_macros::IntoStaticStr)]
pub enum RegistryRoot {
    /// Per-machine or per-user, decided at install time
    MachineUser,
    ClassesRoot,
    CurrentUser,
    LocalMachine,
    Users,
}

impl RegistryRoot {
    /// Legacy numeric encoding, as shipped by historic binders.
    pub fn numeric(&self) -> i32 {
        match self {
            Self::MachineUser => -1,
            Self::ClassesRoot => 0,
            Self::CurrentUser => 1,
            Self::LocalMachine => 2,
            Self::Users => 3,
        }
    }

    /// Current symbolic-name encoding.
    pub fn symbolic(&self) -> &'static str {
        <&'static str>::from(*self)
    }
}

/// A registry value, referenced by component key paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySymbol {
    pub id: String,
    pub root: RegistryRoot,
    /// Key path below the root
    pub key: String,
    /// Value name; empty addresses the key's default value
    pub value_name: String,
    pub location: Option<SourceLocation>,
}
