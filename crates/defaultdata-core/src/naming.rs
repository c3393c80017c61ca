//! # File Naming Conventions
//!
//! Classifies data-folder file names into roles and groups them by
//! investigation.
//!
//! | Role      | Pattern              |
//! |-----------|----------------------|
//! | `source`  | `<inv>-source.<ext>` |
//! | `raw`     | `<inv>-raw.<ext>`    |
//! | `tidy`    | `<inv>.tsv`          |
//! | `sidecar` | `<inv>.yml`          |
//!
//! `<inv>` is `[A-Za-z0-9_]+`. Patterns are tried in the order above and
//! the first match wins.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::DataResult;

/// Pattern an investigation name must fully match.
pub const INVESTIGATION_NAME_PATTERN: &str = r"^[A-Za-z0-9_]+$";

/// Role a file plays within its investigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileRole {
    /// Optional provenance file (`<inv>-source.*`).
    Source,
    /// Unprocessed input (`<inv>-raw.*`).
    Raw,
    /// Tab-separated table (`<inv>.tsv`).
    Tidy,
    /// Field definitions (`<inv>.yml`).
    Sidecar,
}

impl FileRole {
    /// All roles, in matching order.
    pub const ALL: [FileRole; 4] = [Self::Source, Self::Raw, Self::Tidy, Self::Sidecar];

    /// Returns the role name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Raw => "raw",
            Self::Tidy => "tidy",
            Self::Sidecar => "sidecar",
        }
    }

    fn pattern(&self) -> &'static str {
        match self {
            Self::Source => r"^(?P<inv>[A-Za-z0-9_]+)-source\..+$",
            Self::Raw => r"^(?P<inv>[A-Za-z0-9_]+)-raw\..+$",
            Self::Tidy => r"^(?P<inv>[A-Za-z0-9_]+)\.tsv$",
            Self::Sidecar => r"^(?P<inv>[A-Za-z0-9_]+)\.yml$",
        }
    }
}

impl std::fmt::Display for FileRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file name with the outcome of classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedFile {
    /// The name matched a role pattern.
    Matched {
        file_name: String,
        role: FileRole,
        investigation: String,
    },
    /// The name matched no pattern.
    Unmatched { file_name: String },
}

impl ClassifiedFile {
    /// The classified file name.
    pub fn file_name(&self) -> &str {
        match self {
            Self::Matched { file_name, .. } | Self::Unmatched { file_name } => file_name,
        }
    }
}

/// Compiled naming patterns.
#[derive(Debug, Clone)]
pub struct FileClassifier {
    patterns: Vec<(FileRole, Regex)>,
    name_pattern: Regex,
}

impl FileClassifier {
    /// Compile the role patterns.
    pub fn new() -> DataResult<Self> {
        let patterns = FileRole::ALL
            .iter()
            .map(|role| Ok((*role, Regex::new(role.pattern())?)))
            .collect::<DataResult<Vec<_>>>()?;
        Ok(Self {
            patterns,
            name_pattern: Regex::new(INVESTIGATION_NAME_PATTERN)?,
        })
    }

    /// Classify a single file name.
    pub fn classify(&self, file_name: &str) -> ClassifiedFile {
        for (role, pattern) in &self.patterns {
            if let Some(caps) = pattern.captures(file_name) {
                return ClassifiedFile::Matched {
                    file_name: file_name.to_string(),
                    role: *role,
                    investigation: caps["inv"].to_string(),
                };
            }
        }
        ClassifiedFile::Unmatched {
            file_name: file_name.to_string(),
        }
    }

    /// Whether `name` is a well-formed investigation name.
    pub fn is_valid_name(&self, name: &str) -> bool {
        self.name_pattern.is_match(name)
    }
}

/// Files belonging to one investigation, by role, in encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Investigation {
    pub source: Vec<String>,
    pub raw: Vec<String>,
    pub tidy: Vec<String>,
    pub sidecar: Vec<String>,
}

impl Investigation {
    /// Files recorded for `role`.
    pub fn files(&self, role: FileRole) -> &[String] {
        match role {
            FileRole::Source => &self.source,
            FileRole::Raw => &self.raw,
            FileRole::Tidy => &self.tidy,
            FileRole::Sidecar => &self.sidecar,
        }
    }

    fn push(&mut self, role: FileRole, file_name: String) {
        match role {
            FileRole::Source => self.source.push(file_name),
            FileRole::Raw => self.raw.push(file_name),
            FileRole::Tidy => self.tidy.push(file_name),
            FileRole::Sidecar => self.sidecar.push(file_name),
        }
    }
}

/// Investigations keyed by name, plus the files that matched nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvestigationSet {
    pub investigations: BTreeMap<String, Investigation>,
    pub unmatched: Vec<String>,
}

impl InvestigationSet {
    /// Group classified files by investigation.
    ///
    /// Unmatched files never create an investigation entry.
    pub fn group<I>(files: I) -> Self
    where
        I: IntoIterator<Item = ClassifiedFile>,
    {
        let mut set = Self::default();
        for file in files {
            match file {
                ClassifiedFile::Matched {
                    file_name,
                    role,
                    investigation,
                } => set
                    .investigations
                    .entry(investigation)
                    .or_default()
                    .push(role, file_name),
                ClassifiedFile::Unmatched { file_name } => set.unmatched.push(file_name),
            }
        }
        set
    }

    /// Look up an investigation by name.
    pub fn get(&self, name: &str) -> Option<&Investigation> {
        self.investigations.get(name)
    }

    /// Number of investigations discovered.
    pub fn len(&self) -> usize {
        self.investigations.len()
    }

    /// Whether no investigation was discovered.
    pub fn is_empty(&self) -> bool {
        self.investigations.is_empty()
    }
}
