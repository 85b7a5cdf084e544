//! Error types for manifest extraction and the `kir` binary.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A single failed schema constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted field path, e.g. `spec.containers[0].name`.
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Errors produced while extracting images from a single document.
///
/// Every variant is a deterministic function of the input bytes, so none of
/// them are worth retrying.
#[derive(Debug, Clone, Error)]
pub enum ExtractError {
    /// The bytes are not valid structured data or do not fit the decoded shape.
    #[error("error decoding document: {0}")]
    Decode(String),

    /// The document has no `kind` field.
    #[error("kind field not found in resource")]
    MissingKind,

    /// The kind is outside the recognized workload set.
    #[error("unsupported kind {0}")]
    UnsupportedKind(String),

    /// Schema unification found missing or conflicting fields.
    #[error("validation error: {}", join_violations(.0))]
    Validation(Vec<Violation>),

    /// Re-serializing an embedded `List` item failed.
    #[error("error marshaling item: {0}")]
    Marshal(String),

    /// The built-in schema catalogue could not be compiled.
    #[error("failed to compile schema: {0}")]
    Schema(String),
}

impl ExtractError {
    pub fn decode(err: impl fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }

    /// Short machine-friendly name of the error kind, used in log lines.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Decode(_) => "decode",
            Self::MissingKind => "missing-kind",
            Self::UnsupportedKind(_) => "unsupported-kind",
            Self::Validation(_) => "validation",
            Self::Marshal(_) => "marshal",
            Self::Schema(_) => "schema",
        }
    }
}

impl From<serde_yaml::Error> for ExtractError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised by the command-line wrapper around the extractor.
#[derive(Debug, Error)]
pub enum KirError {
    #[error("error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid path pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("error processing {}: {source}", path.display())]
    Extract {
        path: PathBuf,
        #[source]
        source: ExtractError,
    },
}

impl KirError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = ExtractError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_every_violation() {
        let err = ExtractError::Validation(vec![
            Violation::new("spec.containers[0].name", "field is required"),
            Violation::new("spec.replicas", "expected int, found string"),
        ]);
        assert_eq!(
            err.to_string(),
            "validation error: spec.containers[0].name: field is required; \
             spec.replicas: expected int, found string"
        );
    }

    #[test]
    fn test_unsupported_kind_names_kind() {
        let err = ExtractError::UnsupportedKind("Service".to_string());
        assert_eq!(err.to_string(), "unsupported kind Service");
        assert_eq!(err.kind_name(), "unsupported-kind");
    }

    #[test]
    fn test_root_violation_has_no_path_prefix() {
        let v = Violation::new("", "expected struct, found string");
        assert_eq!(v.to_string(), "expected struct, found string");
    }
}
