//! Options operation - update jst.toml from command-line flags.

use std::path::PathBuf;

use jinjasql_manifest::{JstToml, OPTIONS_FILE, Options, Result};

use crate::reports::OptionsReport;

/// Requested changes; `None` keeps the current value.
#[derive(Debug, Default)]
pub struct OptionChanges {
    pub templates_dir: Option<PathBuf>,
    pub transpiled_dir: Option<PathBuf>,
    pub debug_dir: Option<PathBuf>,
    pub engine: Option<String>,
    pub skip_prefixes: Option<Vec<String>>,
    pub catalogs: Option<Vec<PathBuf>>,
    pub ansi_nulls: Option<bool>,
    pub quoted_id: Option<bool>,
}

impl OptionChanges {
    pub fn is_empty(&self) -> bool {
        self.templates_dir.is_none()
            && self.transpiled_dir.is_none()
            && self.debug_dir.is_none()
            && self.engine.is_none()
            && self.skip_prefixes.is_none()
            && self.catalogs.is_none()
            && self.ansi_nulls.is_none()
            && self.quoted_id.is_none()
    }

    /// Apply the changes on top of `options`.
    pub fn apply(self, options: &Options) -> Options {
        let mut options = options.clone();
        let project = &mut options.project;
        if let Some(dir) = self.templates_dir {
            project.templates_dir = dir;
        }
        if let Some(dir) = self.transpiled_dir {
            project.transpiled_dir = dir;
        }
        if let Some(dir) = self.debug_dir {
            project.debug_dir = dir;
        }
        if let Some(engine) = self.engine {
            project.engine = engine;
        }
        if let Some(prefixes) = self.skip_prefixes {
            project.skip_prefixes = prefixes;
        }
        if let Some(catalogs) = self.catalogs {
            project.catalogs = catalogs;
        }
        if let Some(ansi_nulls) = self.ansi_nulls {
            options.session.ansi_nulls = ansi_nulls;
        }
        if let Some(quoted_id) = self.quoted_id {
            options.session.quoted_id = quoted_id;
        }
        options
    }
}

/// Execute the options operation.
///
/// Without changes the current options are reported as they are. Otherwise
/// the updated options are validated like a freshly read file and saved.
pub fn options(jst_toml: &mut JstToml, changes: OptionChanges) -> Result<OptionsReport> {
    if changes.is_empty() {
        return Ok(OptionsReport {
            path: jst_toml.path().to_path_buf(),
            saved: false,
            exists: jst_toml.exists(),
            options: jst_toml.options().clone(),
        });
    }

    let updated = changes.apply(jst_toml.options());
    let content = updated.to_toml_string()?;
    let updated = Options::from_str_with_filename(&content, OPTIONS_FILE)?;
    jst_toml.save(updated)?;

    Ok(OptionsReport {
        path: jst_toml.path().to_path_buf(),
        saved: true,
        exists: true,
        options: jst_toml.options().clone(),
    })
}
