// src/identity/directories.rs

//! Canonical install-time directory paths
//!
//! Walks parent links up to a root token and assembles the canonical path
//! root-to-leaf with the installer's `\` separator. Root tokens keep their
//! canonical spelling; every other segment is lower-cased. A directory with
//! its own guid-generation seed resolves to exactly that seed, and its
//! descendants build on it, which is how seeds replace whole path prefixes.
//!
//! Results are memoized per resolver instance; a resolver lives for one
//! binder invocation and must not be shared across concurrent builds.

use crate::symbols::Directory;
use std::collections::HashMap;
use thiserror::Error;

/// Fixed separator between canonical path segments.
pub const PATH_SEPARATOR: char = '\\';

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryResolveError {
    #[error("directory {0} is not defined in the symbol table")]
    Unknown(String),

    #[error("directory {0} references undefined parent {1}")]
    UnknownParent(String, String),

    #[error("the parent chain of directory {0} contains a cycle")]
    Cycle(String),
}

/// Canonical path plus the effective guid-generation seed for a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDirectoryPath {
    pub path: String,
    /// Own seed, else the nearest ancestor's, else none.
    pub seed: Option<String>,
}

#[derive(Clone)]
struct DirectoryNode {
    parent: Option<String>,
    name: String,
    seed: Option<String>,
}

/// Resolves and memoizes canonical directory paths for one binder pass.
pub struct DirectoryResolver {
    nodes: HashMap<String, DirectoryNode>,
    cache: HashMap<String, ResolvedDirectoryPath>,
}

impl DirectoryResolver {
    /// Index the directory set. A repeated id keeps its first occurrence;
    /// duplicate-key reporting belongs to table import, not path resolution.
    pub fn new(directories: &[Directory]) -> Self {
        let mut nodes = HashMap::with_capacity(directories.len());
        for directory in directories {
            nodes
                .entry(directory.id.clone())
                .or_insert_with(|| DirectoryNode {
                    parent: directory.parent.clone(),
                    name: directory.name.clone(),
                    seed: directory.guid_seed.clone(),
                });
        }
        Self {
            nodes,
            cache: HashMap::new(),
        }
    }

    /// Canonical path and effective seed for `id`.
    pub fn resolve(&mut self, id: &str) -> Result<ResolvedDirectoryPath, DirectoryResolveError> {
        if let Some(hit) = self.cache.get(id) {
            return Ok(hit.clone());
        }

        // Walk up until a cached, seeded, or root node terminates the chain,
        // remembering each visited directory with its lowered name segment.
        let mut pending: Vec<(String, String)> = Vec::new();
        let mut cursor = id.to_string();
        let mut resolved = loop {
            if let Some(hit) = self.cache.get(&cursor) {
                break hit.clone();
            }
            if pending.iter().any(|(visited, _)| *visited == cursor) {
                return Err(DirectoryResolveError::Cycle(id.to_string()));
            }
            let node = match self.nodes.get(&cursor) {
                Some(node) => node.clone(),
                None if cursor == id => {
                    return Err(DirectoryResolveError::Unknown(cursor));
                }
                None => {
                    let child = pending
                        .last()
                        .map(|(visited, _)| visited.clone())
                        .unwrap_or_else(|| id.to_string());
                    return Err(DirectoryResolveError::UnknownParent(child, cursor));
                }
            };

            if let Some(seed) = node.seed {
                let terminal = ResolvedDirectoryPath {
                    path: seed.clone(),
                    seed: Some(seed),
                };
                self.cache.insert(cursor.clone(), terminal.clone());
                break terminal;
            }

            match node.parent {
                None => {
                    // Root token: keep the canonical spelling.
                    let terminal = ResolvedDirectoryPath {
                        path: node.name.clone(),
                        seed: None,
                    };
                    self.cache.insert(cursor.clone(), terminal.clone());
                    break terminal;
                }
                Some(parent) => {
                    pending.push((cursor.clone(), node.name.to_lowercase()));
                    cursor = parent;
                }
            }
        };

        // Unwind back down, caching every intermediate directory.
        while let Some((directory_id, segment)) = pending.pop() {
            let path = format!("{}{}{}", resolved.path, PATH_SEPARATOR, segment);
            resolved = ResolvedDirectoryPath {
                path,
                seed: resolved.seed.clone(),
            };
            self.cache.insert(directory_id, resolved.clone());
        }

        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir(id: &str, parent: Option<&str>, name: &str) -> Directory {
        Directory {
            id: id.into(),
            parent: parent.map(Into::into),
            name: name.into(),
            guid_seed: None,
            location: None,
        }
    }

    fn seeded(id: &str, parent: Option<&str>, name: &str, seed: &str) -> Directory {
        Directory {
            guid_seed: Some(seed.into()),
            ..dir(id, parent, name)
        }
    }

    #[test]
    fn concatenates_root_to_leaf_with_lowered_segments() {
        let mut resolver = DirectoryResolver::new(&[
            dir("ProgramFilesFolder", None, "ProgramFilesFolder"),
            dir("VendorDir", Some("ProgramFilesFolder"), "Vendor"),
            dir("AppDir", Some("VendorDir"), "My App"),
        ]);

        let resolved = resolver.resolve("AppDir").unwrap();
        assert_eq!(resolved.path, "ProgramFilesFolder\\vendor\\my app");
        assert_eq!(resolved.seed, None);
    }

    #[test]
    fn re_resolving_is_idempotent() {
        let mut resolver = DirectoryResolver::new(&[
            dir("TARGETDIR", None, "TARGETDIR"),
            dir("AppDir", Some("TARGETDIR"), "App"),
        ]);

        let first = resolver.resolve("AppDir").unwrap();
        let second = resolver.resolve("AppDir").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn seeds_replace_the_path_and_flow_to_descendants() {
        let mut resolver = DirectoryResolver::new(&[
            dir("TARGETDIR", None, "TARGETDIR"),
            seeded("SeededDir", Some("TARGETDIR"), "Seeded", "SEED-1234"),
            dir("ChildDir", Some("SeededDir"), "Child"),
        ]);

        let seeded = resolver.resolve("SeededDir").unwrap();
        assert_eq!(seeded.path, "SEED-1234");
        assert_eq!(seeded.seed.as_deref(), Some("SEED-1234"));

        let child = resolver.resolve("ChildDir").unwrap();
        assert_eq!(child.path, "SEED-1234\\child");
        assert_eq!(child.seed.as_deref(), Some("SEED-1234"));
    }

    #[test]
    fn duplicate_ids_keep_the_first_occurrence() {
        let mut resolver = DirectoryResolver::new(&[
            dir("TARGETDIR", None, "TARGETDIR"),
            dir("AppDir", Some("TARGETDIR"), "First"),
            dir("AppDir", Some("TARGETDIR"), "Second"),
        ]);

        let resolved = resolver.resolve("AppDir").unwrap();
        assert_eq!(resolved.path, "TARGETDIR\\first");
    }

    #[test]
    fn unknown_and_dangling_directories_are_typed_errors() {
        let mut resolver = DirectoryResolver::new(&[dir("AppDir", Some("MissingDir"), "App")]);

        assert_eq!(
            resolver.resolve("Nowhere"),
            Err(DirectoryResolveError::Unknown("Nowhere".into()))
        );
        assert_eq!(
            resolver.resolve("AppDir"),
            Err(DirectoryResolveError::UnknownParent(
                "AppDir".into(),
                "MissingDir".into()
            ))
        );
    }

    #[test]
    fn parent_cycles_are_detected() {
        let mut resolver = DirectoryResolver::new(&[
            dir("A", Some("B"), "a"),
            dir("B", Some("A"), "b"),
        ]);

        assert_eq!(
            resolver.resolve("A"),
            Err(DirectoryResolveError::Cycle("A".into()))
        );
    }
}
