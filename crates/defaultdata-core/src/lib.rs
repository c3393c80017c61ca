//! # defaultdata-core: Investigation Dataset Conventions
//!
//! Library behind the `defaultdata` CLI. An investigation project is a folder
//! with a `README.md` and a flat `data/` folder holding, per investigation:
//!
//! - `<inv>-source.*`: optional provenance script or notes,
//! - `<inv>-raw.*`: the unprocessed input,
//! - `<inv>.tsv`: the tidy, tab-separated table,
//! - `<inv>.yml`: the sidecar declaring the tidy table's fields.
//!
//! Two operations are built on top of that layout:
//!
//! - [`validation::validate_project`] lints the layout and returns every
//!   convention violation as a message in a [`StructureReport`].
//! - [`package::build_package`] turns each sidecar into a tabular data
//!   resource (schema, size, digest) and assembles the `datapackage.json`
//!   descriptor.
//!
//! ## Crate Policy
//!
//! - Convention violations are data, not errors: they accumulate in the
//!   report and never abort a check.
//! - Conditions that make a run meaningless (missing data folder during
//!   packaging, unparseable sidecar, I/O failure) surface as [`DataError`].
//!   Nothing in this crate exits the process.
//! - The sidecar parser is an injected capability ([`SidecarParser`]), so a
//!   build without the `yaml` feature still runs and reports the gap.

pub mod digest;
pub mod error;
pub mod inspect;
pub mod layout;
pub mod naming;
pub mod package;
pub mod parser;
pub mod schema;
pub mod temporal;
pub mod validation;

pub use digest::{file_digest, DigestAlgorithm, FileDigest};
pub use error::{DataError, DataResult};
pub use layout::ProjectLayout;
pub use naming::{ClassifiedFile, FileClassifier, FileRole, Investigation, InvestigationSet};
pub use package::{build_package, write_package, PackageDescriptor, ResourceDescriptor};
pub use parser::{default_parser, SidecarParser};
pub use schema::{load_schema, FieldDefinition, SidecarSchema};
pub use temporal::Timestamp;
pub use validation::{validate_project, StructureReport};
