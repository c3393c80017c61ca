//! Error types for fatal conditions.
//!
//! Convention violations found by `check` are not represented here; they are
//! plain messages in a [`StructureReport`](crate::StructureReport). These
//! variants cover the conditions that abandon a run: unreadable files,
//! unparseable sidecars during packaging, a missing data folder, and so on.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a `check` or `package` run.
#[derive(Debug, Error)]
pub enum DataError {
    /// The project has no data folder to scan.
    #[error("{dir}/ folder not found in the current project directory: {}", path.display())]
    DataDirMissing { dir: String, path: PathBuf },

    /// A requested investigation has no sidecar file.
    #[error("investigation '{name}' not found (no corresponding .yml file in {dir}/)")]
    InvestigationNotFound { name: String, dir: String },

    /// Sidecar parsing failed.
    #[error("failed to parse sidecar {}: {detail}", path.display())]
    SidecarParse { path: PathBuf, detail: String },

    /// Sidecar parsed but its root is not a mapping.
    #[error("expected a YAML mapping at the root of {}", path.display())]
    SidecarNotMapping { path: PathBuf },

    /// No sidecar parser is compiled into this build.
    #[error("YAML support is not available in this build (enable the `yaml` feature)")]
    ParserUnavailable,

    /// Reading a file (or its metadata) failed.
    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing an output file failed.
    #[error("failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A naming pattern failed to compile.
    #[error("invalid naming pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for defaultdata operations.
pub type DataResult<T> = Result<T, DataError>;

impl DataError {
    /// Wrap an I/O error raised while reading `path`.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }
}
