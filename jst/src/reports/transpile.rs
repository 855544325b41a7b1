//! Transpile command report data structures.

use std::path::PathBuf;

use jinjasql_manifest::Mode;

use super::output::{Output, Report};

/// Report data from a transpile run.
#[derive(Debug)]
pub struct TranspileReport {
    /// Output mode of the run.
    pub mode: Mode,
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// Output directory cleared before writing, if any.
    pub cleaned: Option<PathBuf>,
    /// Files written to disk.
    pub written: Vec<TranspiledFile>,
    /// Dry-run output.
    pub previews: Vec<PreviewFile>,
    /// Templates that could not be transpiled.
    pub failures: Vec<FailedFile>,
}

/// A template written to disk.
#[derive(Debug)]
pub struct TranspiledFile {
    /// Template path relative to the templates directory.
    pub template: String,
    /// Output file.
    pub output: PathBuf,
    /// Skeleton the output was composed into.
    pub skeleton: Option<String>,
}

/// A template in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    /// Template path relative to the templates directory.
    pub path: String,
    /// Transpiled SQL.
    pub content: String,
}

/// A template that failed.
#[derive(Debug)]
pub struct FailedFile {
    pub path: String,
    /// Rendered diagnostic.
    pub message: String,
}

impl TranspileReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Number of templates processed.
    pub fn total(&self) -> usize {
        self.written.len() + self.previews.len() + self.failures.len()
    }
}

impl Report for TranspileReport {
    fn render(&self, out: &mut dyn Output) {
        if let Some(dir) = &self.cleaned {
            out.key_value("Cleared", &dir.display().to_string());
        }

        if self.dry_run {
            for preview in &self.previews {
                out.divider(&preview.path);
                out.preformatted(&preview.content);
            }
            out.divider("Summary");
            out.preformatted(&format!(
                "{} templates would be transpiled ({})",
                self.previews.len(),
                self.mode
            ));
        } else if !self.written.is_empty() {
            out.section(&format!("Transpiled ({})", self.mode));
            for file in &self.written {
                let line = format!("{} -> {}", file.template, file.output.display());
                let line = match &file.skeleton {
                    Some(skeleton) => format!("{line} [{skeleton}]"),
                    None => line,
                };
                out.added_item(&line);
            }
        } else if self.failures.is_empty() {
            out.warning("no templates found");
        }

        if self.has_failures() {
            out.newline();
            out.section(&format!("Failed ({} of {})", self.failures.len(), self.total()));
            for failure in &self.failures {
                out.failed_item(&failure.path);
                out.preformatted(&failure.message);
            }
        }
    }
}
