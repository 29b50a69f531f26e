// src/diagnostics.rs

//! Structured diagnostics sink for one binder pass
//!
//! Validation never aborts the binder: every violation becomes a record in
//! the [`Diagnostics`] sink and the surrounding build driver decides whether
//! accumulated errors fail the build. The sink tracks the error count for the
//! pass, which gates the identity commit step (see `identity`).

use std::fmt;
use thiserror::Error;

/// Authoring-source position attached to a diagnostic record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Authoring file the offending symbol came from
    pub file: String,
    /// Line within the file, when the front end recorded one
    pub line: Option<u32>,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line: None,
        }
    }

    pub fn with_line(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line: Some(line),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.file, line),
            None => write!(f, "{}", self.file),
        }
    }
}

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// Every message the binder can emit, with its contextual fields.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiagnosticKind {
    #[error(
        "component {component} requests a generated guid but has no key path that can anchor one"
    )]
    IneligibleKeyPath { component: String },

    #[error("component {component} key path {key_path} does not resolve to a symbol in the table")]
    UnresolvedKeyPathReference { component: String, key_path: String },

    #[error("component {component} install directory {directory} cannot be resolved: {reason}")]
    UnresolvableDirectory {
        component: String,
        directory: String,
        reason: String,
    },

    #[error(
        "component {component} key file resolves to {path}, which is redirected at install time and cannot anchor a stable identity"
    )]
    NonCanonicalKeyFilePath { component: String, path: String },

    #[error("component {component} owns multiple files but its key file {key_file} is unversioned")]
    UnversionedKeyFile { component: String, key_file: String },

    #[error(
        "component {component} owns multiple files and non-key file {file} is versioned; only the key file may carry a version"
    )]
    VersionedNonKeyFile { component: String, file: String },

    #[error("component {component} duplicates guid {guid} ({anchor_kind} {anchor}) without an install condition")]
    DuplicateGuid {
        component: String,
        guid: String,
        anchor_kind: String,
        anchor: String,
    },

    #[error(
        "component {component} shares guid {guid} ({anchor_kind} {anchor}); conditions on duplicated components must be mutually exclusive"
    )]
    ConditionedDuplicateGuid {
        component: String,
        guid: String,
        anchor_kind: String,
        anchor: String,
    },

    #[error("container {container} is declared more than once")]
    DuplicateContainer { container: String },

    #[error("multiple attached containers are not supported: {first} and {second} are both attached")]
    MultipleAttachedContainers { first: String, second: String },

    #[error("payload {payload} references unknown container {container}")]
    UnknownPayloadContainer { payload: String, container: String },

    #[error("payload {payload} has no container reference and no attached container is declared")]
    PayloadWithoutContainer { payload: String },
}

/// One collected record: severity, message kind, authoring location.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub location: Option<SourceLocation>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: {}: {}", location, self.severity, self.kind),
            None => write!(f, "{}: {}", self.severity, self.kind),
        }
    }
}

/// In-memory diagnostics sink for a single binder invocation.
#[derive(Debug, Default)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
    errors: usize,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error and mirror it to the log.
    pub fn error(&mut self, kind: DiagnosticKind, location: Option<SourceLocation>) {
        tracing::error!(message = %kind, location = ?location);
        self.errors += 1;
        self.records.push(Diagnostic {
            severity: Severity::Error,
            kind,
            location,
        });
    }

    /// Record a warning and mirror it to the log.
    pub fn warning(&mut self, kind: DiagnosticKind, location: Option<SourceLocation>) {
        tracing::warn!(message = %kind, location = ?location);
        self.records.push(Diagnostic {
            severity: Severity::Warning,
            kind,
            location,
        });
    }

    /// True once any error has been recorded in this pass.
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn warning_count(&self) -> usize {
        self.records.len() - self.errors
    }

    pub fn records(&self) -> &[Diagnostic] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_errors_and_warnings_separately() {
        let mut sink = Diagnostics::new();
        assert!(!sink.has_errors());

        sink.warning(
            DiagnosticKind::DuplicateContainer {
                container: "MediaA".into(),
            },
            None,
        );
        assert!(!sink.has_errors());
        assert_eq!(sink.warning_count(), 1);

        sink.error(
            DiagnosticKind::IneligibleKeyPath {
                component: "Comp1".into(),
            },
            Some(SourceLocation::with_line("product.src", 12)),
        );
        assert!(sink.has_errors());
        assert_eq!(sink.error_count(), 1);
        assert_eq!(sink.records().len(), 2);
    }

    #[test]
    fn display_includes_location_when_present() {
        let diagnostic = Diagnostic {
            severity: Severity::Error,
            kind: DiagnosticKind::PayloadWithoutContainer {
                payload: "payload.msi".into(),
            },
            location: Some(SourceLocation::with_line("bundle.src", 4)),
        };

        let rendered = diagnostic.to_string();
        assert!(rendered.starts_with("bundle.src:4: error: "));
        assert!(rendered.contains("payload.msi"));
    }
}
