//! Error types for the conversion run.
//!
//! Every variant is terminal: nothing is retried and no partial report is
//! written once one of these is raised.

use crate::schema::Violation;

/// Coarse classification of a [`ConvertError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Read,
    Parse,
    Schema,
    Locate,
    Write,
    Internal,
}

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// A required path parameter is missing or blank
    #[error("invalid parameter: {name} must be a non-empty path")]
    InvalidParameter { name: &'static str },

    /// Input report or manifest could not be read
    #[error("read error: {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// Input report is not valid JSON
    #[error("parse error: {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    /// Input JSON does not have the npm audit report shape
    #[error("input is not a valid npm audit report ({} violation(s)): {}", .violations.len(), join(.violations))]
    Schema { violations: Vec<Violation> },

    /// Dependency name absent from the manifest (strict locations only)
    #[error("dependency {name} not found in {path}")]
    Locate { name: String, path: String },

    #[error("unknown audit severity '{0}'")]
    UnknownSeverity(String),

    #[error("failed to serialize issue report: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Output report could not be written
    #[error("write error: {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameter { .. } => ErrorKind::Config,
            Self::Read { .. } => ErrorKind::Read,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::Schema { .. } => ErrorKind::Schema,
            Self::Locate { .. } => ErrorKind::Locate,
            Self::Write { .. } => ErrorKind::Write,
            Self::UnknownSeverity(_) | Self::Serialize(_) => ErrorKind::Internal,
        }
    }
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
