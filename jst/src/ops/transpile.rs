//! Transpile operation - render templates and write the output.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use jinjasql_codegen::{Catalog, Settings, Transpiler};
use jinjasql_core::File;
use jinjasql_manifest::{Mode, PresetStore, Project};

use crate::reports::{FailedFile, PreviewFile, TranspileReport, TranspiledFile};

/// Options for the transpile operation.
pub struct TranspileOptions<'a> {
    /// Templates to transpile; the whole project when empty.
    pub paths: &'a [PathBuf],
    /// Output mode.
    pub mode: Mode,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// Whether a project run clears the output directory first.
    pub clean: bool,
}

/// Execute the transpile operation.
///
/// Every template is handled on its own: a failing template is recorded in
/// the report and the run carries on with the next one.
pub fn transpile(
    project: &Project,
    catalog: &Catalog,
    presets: &PresetStore,
    opts: TranspileOptions,
) -> Result<TranspileReport> {
    let project_run = opts.paths.is_empty();
    let files = if project_run {
        project
            .discover()
            .map_err(|e| eyre::eyre!("{:?}", miette::Report::new(*e)))?
    } else {
        opts.paths.to_vec()
    };

    let output_dir = project.output_dir(opts.mode);
    let cleaned = if project_run && opts.clean && !opts.dry_run {
        clear_dir(&output_dir)?
    } else {
        None
    };

    let settings = Settings::from_options(opts.mode, project.options());
    let transpiler = Transpiler::from_dir(catalog, project.templates_dir(), settings);

    let mut report = TranspileReport {
        mode: opts.mode,
        dry_run: opts.dry_run,
        cleaned,
        written: Vec::new(),
        previews: Vec::new(),
        failures: Vec::new(),
    };

    for file in &files {
        let template_path = match project.template_path(file) {
            Ok(path) => path,
            Err(e) => {
                report.failures.push(FailedFile {
                    path: file.display().to_string(),
                    message: format!("{:?}", miette::Report::new(*e)),
                });
                continue;
            }
        };

        let transpiled = match transpiler.transpile(&template_path, presets.get(&template_path)) {
            Ok(transpiled) => transpiled,
            Err(e) => {
                tracing::debug!(template = %template_path, error = %e, "transpile failed");
                report.failures.push(FailedFile {
                    path: template_path,
                    message: format!("{:?}", miette::Report::new(*e)),
                });
                continue;
            }
        };

        let skeleton = transpiled.skeleton.as_ref().map(ToString::to_string);
        if opts.dry_run {
            report.previews.push(PreviewFile {
                path: template_path,
                content: transpiled.text,
            });
            continue;
        }

        let output = project.output_path(&template_path, opts.mode);
        if let Err(e) = File::new(&output, transpiled.text).write() {
            tracing::debug!(output = %output.display(), error = %e, "write failed");
            report.failures.push(FailedFile {
                path: template_path,
                message: format!("Failed to write {}: {e:#}", output.display()),
            });
            continue;
        }
        tracing::info!(template = %template_path, output = %output.display(), "written");

        report.written.push(TranspiledFile {
            template: template_path,
            output,
            skeleton,
        });
    }

    Ok(report)
}

/// Remove `dir` and everything in it, returning it when something was removed.
fn clear_dir(dir: &Path) -> Result<Option<PathBuf>> {
    if !dir.exists() {
        return Ok(None);
    }
    std::fs::remove_dir_all(dir)
        .wrap_err_with(|| format!("Failed to clear {}", dir.display()))?;
    tracing::debug!(dir = %dir.display(), "cleared output directory");
    Ok(Some(dir.to_path_buf()))
}
