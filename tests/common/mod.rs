// tests/common/mod.rs

//! Shared builders for binder integration tests.

#![allow(dead_code)]

use bindery::{
    Component, ComponentGuid, Container, ContainerKind, ContentHash, Directory, FileSymbol,
    KeyPathKind, Payload, RegistryRoot, RegistrySymbol,
};

/// Initialize tracing once for a test binary; repeated calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn root(id: &str) -> Directory {
    Directory {
        id: id.into(),
        parent: None,
        name: id.into(),
        guid_seed: None,
        location: None,
    }
}

pub fn directory(id: &str, parent: &str, name: &str) -> Directory {
    Directory {
        id: id.into(),
        parent: Some(parent.into()),
        name: name.into(),
        guid_seed: None,
        location: None,
    }
}

pub fn seeded_directory(id: &str, parent: &str, name: &str, seed: &str) -> Directory {
    Directory {
        guid_seed: Some(seed.into()),
        ..directory(id, parent, name)
    }
}

/// Component with the generation placeholder, keyed to a file.
pub fn auto_component(id: &str, dir: &str, key_file: &str) -> Component {
    Component {
        id: id.into(),
        guid: ComponentGuid::Generate,
        key_path: Some(key_file.into()),
        key_path_kind: KeyPathKind::File,
        directory: dir.into(),
        win64: false,
        condition: None,
        location: None,
    }
}

/// Component with the generation placeholder, keyed to a registry value.
pub fn registry_component(id: &str, dir: &str, key_registry: &str) -> Component {
    Component {
        key_path_kind: KeyPathKind::Registry,
        ..auto_component(id, dir, key_registry)
    }
}

/// Component with a concrete, authored guid.
pub fn assigned_component(id: &str, dir: &str, guid: &str) -> Component {
    Component {
        id: id.into(),
        guid: ComponentGuid::Assigned(guid.into()),
        key_path: None,
        key_path_kind: KeyPathKind::Directory,
        directory: dir.into(),
        win64: false,
        condition: None,
        location: None,
    }
}

pub fn file(id: &str, component: &str, name: &str, version: Option<&str>) -> FileSymbol {
    FileSymbol {
        id: id.into(),
        component: component.into(),
        name: name.into(),
        version: version.map(Into::into),
        source: format!("build/{name}"),
        location: None,
    }
}

pub fn registry_value(id: &str, root: RegistryRoot, key: &str, value_name: &str) -> RegistrySymbol {
    RegistrySymbol {
        id: id.into(),
        root,
        key: key.into(),
        value_name: value_name.into(),
        location: None,
    }
}

pub fn container(id: &str, kind: ContainerKind) -> Container {
    Container {
        id: id.into(),
        kind,
        location: None,
    }
}

pub fn payload(id: &str, name: &str, container: Option<&str>) -> Payload {
    Payload {
        id: id.into(),
        name: name.into(),
        source: format!("harvest/{name}"),
        size: name.len() as u64,
        hash: ContentHash::sha256(name.as_bytes()),
        container: container.map(Into::into),
        location: None,
    }
}
