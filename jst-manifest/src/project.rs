//! Workspace layout: directories, template discovery and output paths.

use std::path::{Path, PathBuf};

use jinjasql_core::strip_template_extension;

use crate::{Error, JstToml, Mode, Options, PRESETS_FILE, Result};

/// A workspace with its resolved options.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    options: Options,
}

impl Project {
    /// Open the workspace at `root`, reading `jst.toml` when present.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let jst_toml = JstToml::open(&root)?;
        Ok(Self::with_options(root, jst_toml.options().clone()))
    }

    /// Create a project from already loaded options.
    pub fn with_options(root: impl Into<PathBuf>, options: Options) -> Self {
        Self {
            root: root.into(),
            options,
        }
    }

    /// Get the workspace root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Absolute templates directory.
    pub fn templates_dir(&self) -> PathBuf {
        self.resolve(&self.options.project.templates_dir)
    }

    /// Directory receiving output for `mode`.
    pub fn output_dir(&self, mode: Mode) -> PathBuf {
        match mode {
            Mode::Debug => self.resolve(&self.options.project.debug_dir),
            _ => self.resolve(&self.options.project.transpiled_dir),
        }
    }

    /// Location of the presets file.
    pub fn presets_path(&self) -> PathBuf {
        self.root.join(PRESETS_FILE)
    }

    /// Extra catalog files, resolved against the workspace root.
    pub fn catalog_paths(&self) -> Vec<PathBuf> {
        self.options
            .project
            .catalogs
            .iter()
            .map(|path| self.resolve(path))
            .collect()
    }

    /// Path of `file` relative to the templates directory, with forward slashes.
    ///
    /// `file` is absolute or relative to the workspace root. Files outside the
    /// templates directory are rejected.
    pub fn template_path(&self, file: &Path) -> Result<String> {
        let templates_dir = self.templates_dir();
        let file = self.resolve(file);

        let direct = file
            .strip_prefix(&templates_dir)
            .ok()
            .map(Path::to_path_buf);
        let relative = match direct {
            Some(relative) => relative,
            None => {
                // Retry with canonical paths to see through `..` and symlinks
                let canonical = file
                    .canonicalize()
                    .ok()
                    .zip(templates_dir.canonicalize().ok());
                let within = canonical.and_then(|(file, dir)| {
                    file.strip_prefix(&dir).ok().map(Path::to_path_buf)
                });
                match within {
                    Some(relative) => relative,
                    None => {
                        return Err(Box::new(Error::OutsideTemplates {
                            path: file,
                            templates_dir,
                        }));
                    }
                }
            }
        };

        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        if segments.is_empty() {
            return Err(Box::new(Error::OutsideTemplates {
                path: file,
                templates_dir,
            }));
        }
        Ok(segments.join("/"))
    }

    /// Where the output for `template_path` is written in `mode`.
    ///
    /// The output mirrors the template's location with `.jinja` removed.
    pub fn output_path(&self, template_path: &str, mode: Mode) -> PathBuf {
        let mut path = self.output_dir(mode);
        for segment in strip_template_extension(template_path).split('/') {
            path.push(segment);
        }
        path
    }

    /// All templates taking part in a project run, sorted by path.
    ///
    /// Files whose name starts with one of the skip prefixes are partials
    /// meant to be included or extended, and are left out.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let templates_dir = self.templates_dir();
        let mut files = Vec::new();
        self.collect_templates(&templates_dir, &mut files)
            .map_err(|source| {
                Box::new(Error::Discovery {
                    path: templates_dir.clone(),
                    source,
                })
            })?;
        Ok(files)
    }

    fn collect_templates(&self, dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
        let mut entries = std::fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        entries.sort();

        for path in entries {
            if path.is_dir() {
                self.collect_templates(&path, files)?;
                continue;
            }

            let skipped = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| self.options.project.is_skipped(name));
            if skipped {
                tracing::debug!(file = %path.display(), "skipping partial template");
                continue;
            }

            files.push(path);
        }

        Ok(())
    }
}
