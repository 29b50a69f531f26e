// src/names.rs

//! Installer file-name canonicalization
//!
//! Authoring tools may declare a file name in the installer's combined
//! `short|long` form. Identity generation needs the name the file actually
//! lands on disk with, so the canonicalizer picks the long form when both are
//! present. The trait seam lets a surrounding driver substitute its own
//! naming policy.

/// Converts a declared file name into its installer-canonical on-disk form.
pub trait NameCanonicalizer {
    fn canonical_file_name(&self, declared: &str) -> String;
}

/// Default policy: prefer the long name of a `short|long` pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallerNames;

impl NameCanonicalizer for InstallerNames {
    fn canonical_file_name(&self, declared: &str) -> String {
        match declared.split_once('|') {
            Some((_short, long)) => long.to_string(),
            None => declared.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_pass_through() {
        assert_eq!(
            InstallerNames.canonical_file_name("readme.txt"),
            "readme.txt"
        );
    }

    #[test]
    fn combined_names_resolve_to_the_long_form() {
        assert_eq!(
            InstallerNames.canonical_file_name("LONGFI~1.TXT|long file name.txt"),
            "long file name.txt"
        );
    }
}
