//! Debug parameter presets stored in `jst.presets.json`.
//!
//! The file maps a template path (relative to the templates directory,
//! forward slashes) to an object of parameter/column name -> literal:
//!
//! ```json
//! {
//!     "procs/GetVehicle.sql.jinja": {
//!         "@vehicleId": 42,
//!         "@plate": "ABC-123",
//!         "@retired": null
//!     }
//! }
//! ```

use std::path::Path;

use indexmap::IndexMap;
use jinjasql_core::normalize_template_path;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, error::SourceContext};

/// Name of the presets file at the workspace root.
pub const PRESETS_FILE: &str = "jst.presets.json";

/// A literal preset value.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PresetValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl PresetValue {
    /// Render the value as a SQL literal.
    ///
    /// Strings are single-quoted with embedded quotes doubled, numbers are
    /// emitted bare, booleans become `1`/`0` and null becomes `NULL`.
    pub fn to_sql_literal(&self) -> String {
        match self {
            PresetValue::Null => "NULL".to_string(),
            PresetValue::Bool(true) => "1".to_string(),
            PresetValue::Bool(false) => "0".to_string(),
            PresetValue::Number(n) => n.to_string(),
            PresetValue::String(s) => format!("'{}'", s.replace('\'', "''")),
        }
    }
}

/// Preset values for one template, keyed by parameter/column name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PresetMap(IndexMap<String, PresetValue>);

impl PresetMap {
    /// Look up the preset for a parameter/column name.
    pub fn get(&self, name: &str) -> Option<&PresetValue> {
        self.0.get(name)
    }

    /// Add or replace a preset.
    pub fn insert(&mut self, name: impl Into<String>, value: PresetValue) {
        self.0.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PresetValue)> {
        self.0.iter()
    }
}

impl FromIterator<(String, PresetValue)> for PresetMap {
    fn from_iter<I: IntoIterator<Item = (String, PresetValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// All presets of a workspace, keyed by template path.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PresetStore(IndexMap<String, PresetMap>);

impl PresetStore {
    /// Load the presets file, or an empty store when it does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse presets with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let source_ctx = SourceContext::new(content, filename);
        serde_json::from_str(content).map_err(|e| source_ctx.presets_error(e))
    }

    /// Presets for a template path; backslashes in `template_path` are tolerated.
    pub fn get(&self, template_path: &str) -> Option<&PresetMap> {
        self.0.get(&normalize_template_path(template_path))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The example store written by `jst presets`.
    pub fn sample() -> Self {
        let example: PresetMap = [
            (
                "@stringParameter".to_string(),
                PresetValue::String("preset value".to_string()),
            ),
            (
                "@dateParameter".to_string(),
                PresetValue::String("2020-01-01T00:00:00".to_string()),
            ),
            (
                "@numberParameter".to_string(),
                PresetValue::Number(123.into()),
            ),
            ("@nullParameter".to_string(), PresetValue::Null),
        ]
        .into_iter()
        .collect();

        let mut templates = IndexMap::new();
        templates.insert(
            "path_relative_to_templates/use_forward_slashes/example.sql.jinja".to_string(),
            example,
        );
        Self(templates)
    }

    /// Serialize the store as pretty-printed JSON.
    pub fn to_json_string(&self) -> String {
        // Maps with string keys and plain literal values always serialize
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
