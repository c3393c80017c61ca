//! # defaultdata-cli: Command-Line Interface
//!
//! Provides the `defaultdata` binary.
//!
//! ## Subcommands
//!
//! - `defaultdata check [INVESTIGATION]`: lint the project layout.
//! - `defaultdata package [INVESTIGATION]`: write `datapackage.json`.
//!
//! Handlers return an exit code; all fatal conditions are propagated as
//! `anyhow` errors and mapped to a non-zero exit in `main`.

pub mod check;
pub mod package;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use defaultdata_core::{ProjectLayout, SidecarParser};

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Project root the command operates on.
    pub project_root: PathBuf,
    /// File and folder names of the project.
    pub layout: ProjectLayout,
    /// Sidecar parser, if one is compiled in.
    pub parser: Option<&'static dyn SidecarParser>,
}

impl CommandContext {
    /// Resolve the project root and load the layout configuration.
    ///
    /// A relative `config` path is resolved against the project root first
    /// and the current directory second.
    pub fn new(
        project_dir: Option<&Path>,
        config: Option<&Path>,
        parser: Option<&'static dyn SidecarParser>,
    ) -> Result<Self> {
        let project_root = match project_dir {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir().context("failed to determine current directory")?,
        };

        let layout = match config {
            Some(path) => {
                let resolved = resolve_path(path, &project_root);
                ProjectLayout::load(&resolved, parser).with_context(|| {
                    format!("failed to load configuration {}", resolved.display())
                })?
            }
            None => ProjectLayout::default(),
        };

        Ok(Self {
            project_root,
            layout,
            parser,
        })
    }
}

/// Resolve a path that may be relative to the project root.
///
/// Absolute paths are returned as-is. A relative path that exists under
/// `project_root` resolves there; otherwise it is left relative to the
/// current directory.
pub fn resolve_path(path: &Path, project_root: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let project_relative = project_root.join(path);
    if project_relative.exists() {
        project_relative
    } else {
        path.to_path_buf()
    }
}
