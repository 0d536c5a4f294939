//! Error types for manifest rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// A YAML document that failed to parse.
#[derive(Error, Debug)]
#[error("document {document} is not valid YAML: {source}")]
pub struct ValidationError {
    /// Zero-based index of the offending document in the stream.
    pub document: usize,
    #[source]
    pub source: serde_yaml::Error,
}

/// Errors that can occur while rendering manifests.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to load provider values from {path:?}: {message}")]
    Load { path: PathBuf, message: String },

    #[error("Failed to read template {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Validation failed for {path:?}: {source}")]
    Validation {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Recipe {recipe} produced an invalid manifest: {source}")]
    Recipe {
        recipe: String,
        #[source]
        source: ValidationError,
    },

    #[error("Unknown provider: {0} (valid: aws,azure,gcp,proxmox)")]
    UnknownProvider(String),

    #[error("Unresolved placeholders in {path:?}: {}", .names.join(", "))]
    UnresolvedPlaceholders { path: PathBuf, names: Vec<String> },

    #[error("Invalid template pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl RenderError {
    /// True for errors caused by malformed rendered output.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RenderError::Validation { .. }
                | RenderError::Recipe { .. }
                | RenderError::UnresolvedPlaceholders { .. }
        )
    }
}
