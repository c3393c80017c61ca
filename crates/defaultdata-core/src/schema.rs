//! # Sidecar Schema Loading
//!
//! A sidecar is a mapping from column name to that column's attributes:
//!
//! ```yaml
//! col_a:
//!   type: string
//! col_b:
//!   type: integer
//!   description: Count of observations
//! ```
//!
//! Each entry becomes a [`FieldDefinition`] whose `name` is the key,
//! followed by the entry's attributes in declaration order. An attribute
//! literally called `name` replaces the injected one: sidecar attributes
//! pass through untouched. Entries whose value is not a mapping are skipped
//! with a warning.

use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{DataError, DataResult};
use crate::parser::SidecarParser;

/// One field of a tidy table: `name` followed by the sidecar attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldDefinition(Map<String, Value>);

impl FieldDefinition {
    /// Build a field from a sidecar entry.
    ///
    /// `name` is set first, then every attribute is copied over it.
    pub fn new(name: &str, attributes: &Map<String, Value>) -> Self {
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::String(name.to_string()));
        for (key, value) in attributes {
            fields.insert(key.clone(), value.clone());
        }
        Self(fields)
    }

    /// The field's `name` attribute.
    ///
    /// Usually a string; a sidecar that overrides `name` may set any value.
    pub fn name(&self) -> Option<&Value> {
        self.0.get("name")
    }

    /// Look up an attribute.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// All attributes, `name` included, in output order.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// The `schema` block of a resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SidecarSchema {
    /// Field definitions in sidecar declaration order.
    pub fields: Vec<FieldDefinition>,
    /// Top-level keys skipped because their value is not a mapping.
    #[serde(skip)]
    pub skipped: Vec<String>,
}

/// Load the field definitions declared by the sidecar at `path`.
///
/// Fails if the sidecar cannot be read or parsed, or if its root is not a
/// mapping.
pub fn load_schema(path: &Path, parser: &dyn SidecarParser) -> DataResult<SidecarSchema> {
    let document = parser.load(path)?;
    schema_from_value(&document, path)
}

/// Build a schema from an already-parsed sidecar document.
pub fn schema_from_value(document: &Value, path: &Path) -> DataResult<SidecarSchema> {
    let root = document.as_object().ok_or_else(|| DataError::SidecarNotMapping {
        path: path.to_path_buf(),
    })?;

    let mut schema = SidecarSchema::default();
    for (field_name, definition) in root {
        match definition.as_object() {
            Some(attributes) => schema
                .fields
                .push(FieldDefinition::new(field_name, attributes)),
            None => {
                tracing::warn!(
                    sidecar = %path.display(),
                    "Field '{field_name}' is not a mapping; skipping."
                );
                schema.skipped.push(field_name.clone());
            }
        }
    }
    Ok(schema)
}
