//! Where template sources come from.

use std::{
    collections::BTreeMap,
    io,
    path::{Path, PathBuf},
};

/// Resolves template names to their source text.
///
/// Names use forward slashes and are relative to the templates root.
pub trait TemplateSource: Send + Sync {
    /// Source of `name`, or `None` when no such template exists.
    fn load(&self, name: &str) -> io::Result<Option<String>>;
}

/// Templates read from a directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateSource for DirSource {
    fn load(&self, name: &str) -> io::Result<Option<String>> {
        let mut path = self.root.clone();
        for segment in name.split(['/', '\\']) {
            if segment == ".." {
                return Ok(None);
            }
            if !segment.is_empty() && segment != "." {
                path.push(segment);
            }
        }

        match std::fs::read_to_string(&path) {
            Ok(source) => Ok(Some(source)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }
}

/// Templates held in memory, mostly for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    templates: BTreeMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(name, source);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) {
        self.templates.insert(name.into(), source.into());
    }
}

impl TemplateSource for MemorySource {
    fn load(&self, name: &str) -> io::Result<Option<String>> {
        Ok(self.templates.get(name).cloned())
    }
}
