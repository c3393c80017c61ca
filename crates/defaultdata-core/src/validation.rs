//! # Project Structure Validation
//!
//! Lints an investigation project against the layout convention.
//!
//! ## Rules
//!
//! 1. The project root contains a readme.
//! 2. The project root contains a data folder. Without one nothing else is
//!    checked.
//! 3. The data folder contains no subfolders.
//! 4. Every file in the data folder matches a naming pattern (ignored names
//!    excepted).
//! 5. A requested investigation exists; otherwise no investigation is checked.
//! 6. Each investigation has exactly one raw, tidy and sidecar file and at
//!    most one source file.
//! 7. The tidy file's header line is UTF-8 and tab-separated.
//! 8. The sidecar parses.
//!
//! Findings accumulate in a [`StructureReport`]. Only failures to list the
//! data folder itself are returned as errors.

use std::path::Path;

use crate::error::{DataError, DataResult};
use crate::inspect;
use crate::layout::ProjectLayout;
use crate::naming::{FileClassifier, FileRole, Investigation, InvestigationSet};
use crate::parser::SidecarParser;

/// Outcome of validating a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructureReport {
    /// Convention violations, in the order they were found.
    pub errors: Vec<String>,
    /// Investigations the per-investigation rules were applied to.
    pub checked: Vec<String>,
}

impl StructureReport {
    /// Whether no violation was found.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record a violation.
    pub fn add_error(&mut self, error: String) {
        self.errors.push(error);
    }

    fn extend_errors<I: IntoIterator<Item = String>>(&mut self, errors: I) {
        self.errors.extend(errors);
    }
}

/// A data-folder entry.
#[derive(Debug)]
struct DataEntry {
    name: String,
    is_dir: bool,
    is_file: bool,
}

/// Validate the project at `project_root`.
///
/// With `target` set, the per-investigation rules apply to that
/// investigation only. A `None` parser turns each sidecar check into a
/// capability-missing message.
pub fn validate_project(
    project_root: &Path,
    target: Option<&str>,
    layout: &ProjectLayout,
    parser: Option<&dyn SidecarParser>,
) -> DataResult<StructureReport> {
    let mut report = StructureReport::default();

    if !layout.readme_path(project_root).is_file() {
        report.add_error(format!(
            "Project root must contain a {} file.",
            layout.readme
        ));
    }

    let data_path = layout.data_path(project_root);
    if !data_path.is_dir() {
        report.add_error(format!(
            "Project must contain a {}/ folder.",
            layout.data_dir
        ));
        return Ok(report);
    }

    let entries = list_data_entries(&data_path)?;
    for entry in entries.iter().filter(|e| e.is_dir) {
        report.add_error(format!(
            "{}/ folder must only contain set-related files, but found subfolder: {}",
            layout.data_dir, entry.name
        ));
    }

    let classifier = FileClassifier::new()?;
    let set = InvestigationSet::group(
        entries
            .iter()
            .filter(|e| e.is_file && !layout.is_ignored(&e.name))
            .map(|e| classifier.classify(&e.name)),
    );
    report.extend_errors(
        set.unmatched
            .iter()
            .map(|f| format!("File '{f}' does not match any known naming pattern.")),
    );

    let working: Vec<(&String, &Investigation)> = match target {
        Some(name) => match set.investigations.get_key_value(name) {
            Some(found) => vec![found],
            None => {
                report.add_error(format!(
                    "Investigation '{name}' not found in {} folder.",
                    layout.data_dir
                ));
                Vec::new()
            }
        },
        None => set.investigations.iter().collect(),
    };

    for (name, investigation) in &working {
        report.extend_errors(check_file_counts(&classifier, name, investigation));
        report.checked.push((*name).clone());
    }

    for (_, investigation) in &working {
        if let Some(tidy) = investigation.tidy.first() {
            report.extend_errors(inspect::inspect_tidy(&data_path.join(tidy), tidy));
        }
        if let Some(sidecar) = investigation.sidecar.first() {
            report.extend_errors(inspect::inspect_sidecar(
                &data_path.join(sidecar),
                sidecar,
                parser,
            ));
        }
    }

    tracing::debug!(
        investigations = report.checked.len(),
        errors = report.errors.len(),
        "validated project structure"
    );

    Ok(report)
}

/// Rule 6: name shape and per-role file counts.
fn check_file_counts(
    classifier: &FileClassifier,
    name: &str,
    investigation: &Investigation,
) -> Vec<String> {
    let mut errors = Vec::new();

    if !classifier.is_valid_name(name) {
        errors.push(format!(
            "Investigation name '{name}' contains invalid characters. \
             Only alphanumeric and '_' are allowed."
        ));
    }

    for (role, label) in [
        (FileRole::Raw, "raw file"),
        (FileRole::Tidy, "tidy data file"),
        (FileRole::Sidecar, "sidecar file"),
    ] {
        let found = investigation.files(role).len();
        if found != 1 {
            errors.push(format!(
                "Investigation '{name}' must have exactly one {label}; found {found}."
            ));
        }
    }

    let sources = investigation.files(FileRole::Source).len();
    if sources > 1 {
        errors.push(format!(
            "Investigation '{name}' must have at most one source file; found {sources}."
        ));
    }

    errors
}

/// List the data folder, sorted by name.
fn list_data_entries(data_path: &Path) -> DataResult<Vec<DataEntry>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(data_path).map_err(|e| DataError::read(data_path, e))? {
        let entry = entry.map_err(|e| DataError::read(data_path, e))?;
        let path = entry.path();
        entries.push(DataEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: path.is_dir(),
            is_file: path.is_file(),
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(name: &str, inv: &Investigation) -> Vec<String> {
        check_file_counts(&FileClassifier::new().unwrap(), name, inv)
    }

    fn files(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn complete_investigation_has_no_count_errors() {
        let inv = Investigation {
            source: Vec::new(),
            raw: files(&["a-raw.csv"]),
            tidy: files(&["a.tsv"]),
            sidecar: files(&["a.yml"]),
        };
        assert!(counts("a", &inv).is_empty());

        let with_source = Investigation {
            source: files(&["a-source.R"]),
            ..inv
        };
        assert!(counts("a", &with_source).is_empty());
    }

    #[test]
    fn missing_tidy_reports_found_zero() {
        let inv = Investigation {
            raw: files(&["a-raw.csv"]),
            sidecar: files(&["a.yml"]),
            ..Default::default()
        };
        assert_eq!(
            counts("a", &inv),
            vec!["Investigation 'a' must have exactly one tidy data file; found 0."]
        );
    }

    #[test]
    fn duplicate_raw_and_source_report_counts() {
        let inv = Investigation {
            source: files(&["a-source.R", "a-source.py"]),
            raw: files(&["a-raw.csv", "a-raw.xlsx"]),
            tidy: files(&["a.tsv"]),
            sidecar: files(&["a.yml"]),
        };
        assert_eq!(
            counts("a", &inv),
            vec![
                "Investigation 'a' must have exactly one raw file; found 2.",
                "Investigation 'a' must have at most one source file; found 2.",
            ]
        );
    }

    #[test]
    fn invalid_name_is_reported() {
        let inv = Investigation {
            raw: files(&["x"]),
            tidy: files(&["x"]),
            sidecar: files(&["x"]),
            ..Default::default()
        };
        let errors = counts("bad-name", &inv);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("contains invalid characters"));
    }

    #[test]
    fn missing_data_folder_stops_early() {
        let dir = tempfile::tempdir().unwrap();
        let report =
            validate_project(dir.path(), None, &ProjectLayout::default(), None).unwrap();
        assert_eq!(
            report.errors,
            vec![
                "Project root must contain a README.md file.",
                "Project must contain a data/ folder.",
            ]
        );
        assert!(report.checked.is_empty());
    }

    #[test]
    fn entries_are_listed_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["c.txt", "a.txt", "b.txt"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        let names: Vec<String> = list_data_entries(dir.path())
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, ["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn report_validity_tracks_errors() {
        let mut report = StructureReport::default();
        assert!(report.is_valid());
        report.add_error("x".to_string());
        assert!(!report.is_valid());
    }
}
