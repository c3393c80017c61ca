//! # Data Package Assembly
//!
//! Builds the `datapackage.json` descriptor for a project. Discovery is
//! sidecar-driven: every `<name>.yml` in the data folder becomes one
//! tabular data resource pointing at `data/<name>.tsv`, whether or not the
//! other files of the investigation exist.
//!
//! Per resource:
//! - `bytes` and `hash` come from the tidy file; a missing tidy file yields
//!   `0` and `""` with a warning.
//! - `schema.fields` comes from the sidecar; a sidecar that fails to load
//!   aborts the build, as does a missing sidecar parser.
//! - Format, dialect and license are fixed.
//! - `created` is captured once per build and shared by every resource.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::digest::file_digest;
use crate::error::{DataError, DataResult};
use crate::layout::ProjectLayout;
use crate::parser::SidecarParser;
use crate::schema::{load_schema, SidecarSchema};
use crate::temporal::Timestamp;

/// File extension that marks a sidecar.
pub const SIDECAR_EXTENSION: &str = ".yml";

/// File extension of a tidy table.
pub const TIDY_EXTENSION: &str = ".tsv";

/// CSV dialect shared by every tidy file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dialect {
    pub header: bool,
    pub header_rows: Vec<u32>,
    pub header_join: &'static str,
    pub comment_char: &'static str,
    pub delimiter: &'static str,
    pub line_terminator: &'static str,
    pub quote_char: &'static str,
    pub double_quote: bool,
    pub skip_initial_space: bool,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            header: true,
            header_rows: vec![1],
            header_join: " ",
            comment_char: "#",
            delimiter: "\t",
            line_terminator: "\r\n",
            quote_char: "\"",
            double_quote: true,
            skip_initial_space: false,
        }
    }
}

/// A license entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct License {
    pub name: &'static str,
    pub title: &'static str,
    pub path: &'static str,
}

impl License {
    /// Creative Commons CC0, applied to every resource.
    pub fn cc0() -> Self {
        Self {
            name: "CC0",
            title: "Creative Commons CC0",
            path: "https://creativecommons.org/publicdomain/zero/1.0/",
        }
    }
}

/// One tabular data resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceDescriptor {
    pub profile: &'static str,
    pub name: String,
    pub path: String,
    pub format: &'static str,
    pub mediatype: &'static str,
    pub encoding: &'static str,
    pub bytes: u64,
    pub hash: String,
    pub schema: SidecarSchema,
    pub dialect: Dialect,
    pub licenses: Vec<License>,
    pub created: Timestamp,
}

/// The package descriptor written to `datapackage.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageDescriptor {
    pub name: String,
    pub resources: Vec<ResourceDescriptor>,
    /// Resources packaged without a tidy file.
    #[serde(skip)]
    pub missing_tidy: Vec<String>,
}

/// Build the package descriptor for the project at `project_root`.
///
/// With `target` set only that investigation is packaged; it must have a
/// sidecar. The parser is only needed once a sidecar has to be loaded, so
/// layout problems are reported first.
pub fn build_package(
    project_root: &Path,
    target: Option<&str>,
    layout: &ProjectLayout,
    parser: Option<&dyn SidecarParser>,
    created: Timestamp,
) -> DataResult<PackageDescriptor> {
    let data_path = layout.data_path(project_root);
    if !data_path.is_dir() {
        return Err(DataError::DataDirMissing {
            dir: layout.data_dir.clone(),
            path: data_path,
        });
    }

    let mut investigations = discover_sidecars(&data_path)?;
    if let Some(name) = target {
        if !investigations.iter().any(|(inv, _)| inv == name) {
            return Err(DataError::InvestigationNotFound {
                name: name.to_string(),
                dir: layout.data_dir.clone(),
            });
        }
        investigations.retain(|(inv, _)| inv == name);
    }

    let mut package = PackageDescriptor {
        name: package_name(project_root, layout),
        resources: Vec::with_capacity(investigations.len()),
        missing_tidy: Vec::new(),
    };

    for (name, sidecar_path) in investigations {
        let tidy_name = format!("{name}{TIDY_EXTENSION}");
        let tidy_path = data_path.join(&tidy_name);

        let (bytes, hash) = if tidy_path.is_file() {
            let digest = file_digest(&tidy_path)?;
            (digest.bytes, digest.hash_field())
        } else {
            tracing::warn!(
                "TSV file '{}' not found. Using placeholder values.",
                tidy_path.display()
            );
            package.missing_tidy.push(name.clone());
            (0, String::new())
        };

        let loader = parser.ok_or(DataError::ParserUnavailable)?;
        let schema = load_schema(&sidecar_path, loader)?;

        tracing::info!(
            investigation = %name,
            fields = schema.fields.len(),
            bytes,
            "packaged resource"
        );

        package.resources.push(ResourceDescriptor {
            profile: "tabular-data-resource",
            path: format!("{}/{tidy_name}", layout.data_dir),
            name,
            format: "tsv",
            mediatype: "text/tab-separated-values",
            encoding: "utf-8",
            bytes,
            hash,
            schema,
            dialect: Dialect::default(),
            licenses: vec![License::cc0()],
            created,
        });
    }

    Ok(package)
}

/// Serialize `package` with 2-space indentation to the layout's output file.
///
/// Returns the path written.
pub fn write_package(
    project_root: &Path,
    package: &PackageDescriptor,
    layout: &ProjectLayout,
) -> DataResult<PathBuf> {
    let out_path = layout.output_path(project_root);
    let mut json = serde_json::to_string_pretty(package)?;
    json.push('\n');
    std::fs::write(&out_path, json).map_err(|source| DataError::FileWrite {
        path: out_path.clone(),
        source,
    })?;
    Ok(out_path)
}

/// Sidecar files in the data folder as `(investigation, path)`, by name.
fn discover_sidecars(data_path: &Path) -> DataResult<Vec<(String, PathBuf)>> {
    let mut found = Vec::new();
    for entry in std::fs::read_dir(data_path).map_err(|e| DataError::read(data_path, e))? {
        let entry = entry.map_err(|e| DataError::read(data_path, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if let Some(stem) = file_name.strip_suffix(SIDECAR_EXTENSION) {
            if !stem.is_empty() {
                found.push((stem.to_string(), path));
            }
        }
    }
    found.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(found)
}

/// Base name of the project directory, or the layout's fallback.
///
/// Symlinks are not resolved: a project reached through a link is named
/// after the link.
fn package_name(project_root: &Path, layout: &ProjectLayout) -> String {
    absolute_lexical(project_root)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| layout.default_package_name.clone())
}

/// Make `path` absolute and fold `.` and `..` components textually.
fn absolute_lexical(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
