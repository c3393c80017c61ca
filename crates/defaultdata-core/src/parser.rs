//! # Sidecar Parsing Capability
//!
//! Sidecars and layout configuration are YAML. Parsing is exposed through
//! the [`SidecarParser`] trait so callers receive it as a capability: the
//! CLI asks [`default_parser()`] once at startup and hands the result to
//! validation and packaging. Builds without the `yaml` feature get `None`
//! and report the missing capability instead of failing on first use.
//!
//! Parsed documents are converted to `serde_json::Value` so the schema
//! loader and package builder work on one value model. Mapping key order
//! is preserved.

use std::path::Path;

use serde_json::Value;

use crate::error::{DataError, DataResult};

/// A parser for structured sidecar documents.
pub trait SidecarParser: Send + Sync {
    /// Human-readable format name, used in messages.
    fn format_name(&self) -> &'static str;

    /// Parse a document into a JSON value.
    ///
    /// The error is a description of the syntax problem; callers attach
    /// the file path.
    fn parse_str(&self, content: &str) -> Result<Value, String>;

    /// Read and parse the file at `path`.
    fn load(&self, path: &Path) -> DataResult<Value> {
        let content = std::fs::read_to_string(path).map_err(|e| DataError::read(path, e))?;
        self.parse_str(&content).map_err(|detail| DataError::SidecarParse {
            path: path.to_path_buf(),
            detail,
        })
    }
}

impl std::fmt::Debug for dyn SidecarParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SidecarParser")
            .field(&self.format_name())
            .finish()
    }
}

/// The parser compiled into this build, if any.
pub fn default_parser() -> Option<&'static dyn SidecarParser> {
    #[cfg(feature = "yaml")]
    {
        Some(&yaml::YamlSidecarParser)
    }
    #[cfg(not(feature = "yaml"))]
    {
        None
    }
}

#[cfg(feature = "yaml")]
pub use yaml::YamlSidecarParser;

#[cfg(feature = "yaml")]
mod yaml {
    use serde_json::Value;

    use super::SidecarParser;

    /// YAML sidecar parser backed by `serde_yaml`.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct YamlSidecarParser;

    impl SidecarParser for YamlSidecarParser {
        fn format_name(&self) -> &'static str {
            "YAML"
        }

        fn parse_str(&self, content: &str) -> Result<Value, String> {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|e| e.to_string())?;
            Ok(yaml_to_json_value(yaml))
        }
    }

    /// Convert a serde_yaml::Value to a serde_json::Value.
    ///
    /// Scalar mapping keys are stringified and tags are stripped. Numbers
    /// keep their YAML kind, so `0.0` stays a float.
    pub(super) fn yaml_to_json_value(yaml: serde_yaml::Value) -> Value {
        match yaml {
            serde_yaml::Value::Null => Value::Null,
            serde_yaml::Value::Bool(b) => Value::Bool(b),
            serde_yaml::Value::Number(n) => number_to_json(&n),
            serde_yaml::Value::String(s) => Value::String(s),
            serde_yaml::Value::Sequence(seq) => {
                Value::Array(seq.into_iter().map(yaml_to_json_value).collect())
            }
            serde_yaml::Value::Mapping(map) => {
                let mut obj = serde_json::Map::new();
                for (k, v) in map {
                    obj.insert(key_to_string(k), yaml_to_json_value(v));
                }
                Value::Object(obj)
            }
            serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(tagged.value),
        }
    }

    fn number_to_json(n: &serde_yaml::Number) -> Value {
        if let Some(i) = n.as_i64() {
            return Value::from(i);
        }
        if let Some(u) = n.as_u64() {
            return Value::from(u);
        }
        // NaN and infinities have no JSON form.
        n.as_f64()
            .and_then(serde_json::Number::from_f64)
            .map_or(Value::Null, Value::Number)
    }

    fn key_to_string(key: serde_yaml::Value) -> String {
        match key {
            serde_yaml::Value::String(s) => s,
            serde_yaml::Value::Number(n) => n.to_string(),
            serde_yaml::Value::Bool(b) => b.to_string(),
            serde_yaml::Value::Null => "null".to_string(),
            serde_yaml::Value::Tagged(tagged) => key_to_string(tagged.value),
            other => format!("{other:?}"),
        }
    }
}
