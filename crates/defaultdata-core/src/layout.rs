//! # Project Layout Configuration
//!
//! Names of the files and folders that make up an investigation project.
//! Every field has a default matching the standard convention, so an empty
//! (or absent) configuration file yields the standard layout.
//!
//! ```yaml
//! data_dir: data
//! readme: README.md
//! output_file: datapackage.json
//! ignored_files: [.gitignore, .DS_Store]
//! default_package_name: defaultdata-package
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};
use crate::parser::SidecarParser;

/// Default name of the data subfolder.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default name of the required readme.
pub const DEFAULT_README: &str = "README.md";

/// Default name of the package descriptor written by `package`.
pub const DEFAULT_OUTPUT_FILE: &str = "datapackage.json";

/// Package name used when the project directory has no usable base name.
pub const DEFAULT_PACKAGE_NAME: &str = "defaultdata-package";

/// File and folder names for an investigation project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectLayout {
    /// Data subfolder, relative to the project root.
    pub data_dir: String,
    /// Readme that must exist at the project root.
    pub readme: String,
    /// Package descriptor written at the project root.
    pub output_file: String,
    /// File names in the data folder that are never classified.
    pub ignored_files: Vec<String>,
    /// Fallback package name.
    pub default_package_name: String,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            readme: DEFAULT_README.to_string(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            ignored_files: vec![".gitignore".to_string(), ".DS_Store".to_string()],
            default_package_name: DEFAULT_PACKAGE_NAME.to_string(),
        }
    }
}

impl ProjectLayout {
    /// Load a layout from a configuration file.
    ///
    /// The file goes through the same parser as sidecars, so a build
    /// without YAML support cannot read configuration files.
    pub fn load(path: &Path, parser: Option<&dyn SidecarParser>) -> DataResult<Self> {
        let parser = parser.ok_or(DataError::ParserUnavailable)?;
        let value = parser.load(path)?;
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value).map_err(|e| DataError::SidecarParse {
            path: path.to_path_buf(),
            detail: format!("invalid layout configuration: {e}"),
        })
    }

    /// Absolute (or root-relative) path of the data folder.
    pub fn data_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.data_dir)
    }

    /// Path of the required readme.
    pub fn readme_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.readme)
    }

    /// Path of the package descriptor.
    pub fn output_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.output_file)
    }

    /// Whether `file_name` is skipped during classification.
    pub fn is_ignored(&self, file_name: &str) -> bool {
        self.ignored_files.iter().any(|f| f == file_name)
    }
}
