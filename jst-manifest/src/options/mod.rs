//! Transpiler options stored in `jst.toml`.

mod file;
mod parse;

use std::path::PathBuf;

pub use file::JstToml;
use serde::{Deserialize, Serialize};

/// Name of the options file at the workspace root.
pub const OPTIONS_FILE: &str = "jst.toml";

/// Root of `jst.toml`.
///
/// Every field has a default, so an empty file (or no file at all) is a
/// valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Options {
    /// Directory layout and discovery settings
    #[serde(default)]
    pub project: ProjectOptions,

    /// Session preamble switches
    #[serde(default)]
    pub session: SessionOptions,
}

/// Directory layout and discovery settings.
///
/// Paths are absolute or relative to the workspace root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectOptions {
    /// Directory containing the project's templates
    pub templates_dir: PathBuf,

    /// Directory receiving Create, Replace and None output
    pub transpiled_dir: PathBuf,

    /// Directory receiving Debug output
    pub debug_dir: PathBuf,

    /// Engine used by `jst/...` skeleton paths
    pub engine: String,

    /// File name prefixes skipped when transpiling the whole project
    pub skip_prefixes: Vec<String>,

    /// Extra catalog files merged over the built-in catalog
    pub catalogs: Vec<PathBuf>,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from("templates"),
            transpiled_dir: PathBuf::from("transpiled"),
            debug_dir: PathBuf::from("debug"),
            engine: "mssql".to_string(),
            skip_prefixes: vec!["ext".to_string(), "part".to_string()],
            catalogs: Vec::new(),
        }
    }
}

impl ProjectOptions {
    /// Whether a template file name is excluded from project runs.
    pub fn is_skipped(&self, file_name: &str) -> bool {
        self.skip_prefixes
            .iter()
            .any(|prefix| file_name.starts_with(prefix.as_str()))
    }
}

/// Session-level statements prefixed to composed output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionOptions {
    /// Explicitly enable ANSI nulls
    pub ansi_nulls: bool,

    /// Explicitly enable quoted identifiers
    pub quoted_id: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            ansi_nulls: true,
            quoted_id: true,
        }
    }
}

impl SessionOptions {
    /// Names of the enabled session flags, in alphabetical order.
    pub fn enabled(&self) -> Vec<&'static str> {
        let mut flags = Vec::new();
        if self.ansi_nulls {
            flags.push("ansi_nulls");
        }
        if self.quoted_id {
            flags.push("quoted_id");
        }
        flags
    }
}
