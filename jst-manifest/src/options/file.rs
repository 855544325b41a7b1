use std::path::{Path, PathBuf};

use super::{OPTIONS_FILE, Options};
use crate::{Error, Result};

/// Represents the `jst.toml` file of a workspace.
///
/// A missing file is not an error: the workspace then runs on
/// [`Options::default`] until `jst options` writes one.
pub struct JstToml {
    path: PathBuf,
    content: Option<String>,
    options: Options,
}

impl JstToml {
    /// Open the options file of `workspace`, falling back to defaults.
    pub fn open(workspace: impl AsRef<Path>) -> Result<Self> {
        let path = workspace.as_ref().join(OPTIONS_FILE);
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no options file, using defaults");
            return Ok(Self {
                path,
                content: None,
                options: Options::default(),
            });
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let options = Options::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content: Some(content),
            options,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the options were read from disk.
    pub fn exists(&self) -> bool {
        self.content.is_some()
    }

    /// Get the parsed options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace the options and save them to disk.
    pub fn save(&mut self, options: Options) -> Result<()> {
        let content = options.to_toml_string()?;
        std::fs::write(&self.path, &content).map_err(|e| {
            Box::new(Error::Write {
                path: self.path.clone(),
                source: e,
            })
        })?;
        self.content = Some(content);
        self.options = options;
        Ok(())
    }
}
