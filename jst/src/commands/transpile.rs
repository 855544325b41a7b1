use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use jinjasql_codegen::Catalog;
use jinjasql_manifest::{Mode, PresetStore, Project};

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct TranspileCommand {
    /// Templates to transpile; every template in the project when empty
    pub paths: Vec<PathBuf>,

    /// Output mode: create, replace, debug or none
    #[arg(short, long, default_value = "create")]
    pub mode: Mode,

    /// Workspace root containing jst.toml
    #[arg(short, long, default_value = ".")]
    pub workspace: PathBuf,

    /// Print the output instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Keep existing files in the output directory on project runs
    #[arg(long)]
    pub no_clean: bool,
}

impl TranspileCommand {
    pub fn run(&self) -> Result<()> {
        let project = Project::open(&self.workspace).unwrap_or_exit();
        let catalog =
            Catalog::with_extensions(project.catalog_paths().as_slice()).unwrap_or_exit();
        let presets = PresetStore::open(project.presets_path()).unwrap_or_exit();

        let report = ops::transpile(
            &project,
            &catalog,
            &presets,
            ops::transpile::TranspileOptions {
                paths: &self.paths,
                mode: self.mode,
                dry_run: self.dry_run,
                clean: !self.no_clean,
            },
        )?;

        report.render(&mut TerminalOutput::new());

        if report.has_failures() {
            eyre::bail!(
                "{} of {} templates failed",
                report.failures.len(),
                report.total()
            );
        }
        Ok(())
    }
}
