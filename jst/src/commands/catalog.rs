use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use jinjasql_codegen::Catalog;
use jinjasql_manifest::Project;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CatalogCommand {
    /// Workspace root containing jst.toml
    #[arg(short, long, default_value = ".")]
    pub workspace: PathBuf,

    /// Only list the built-in catalog, ignoring project catalog files
    #[arg(long)]
    pub builtin: bool,
}

impl CatalogCommand {
    pub fn run(&self) -> Result<()> {
        let project = Project::open(&self.workspace).unwrap_or_exit();
        let catalog = if self.builtin {
            Catalog::builtin().unwrap_or_exit()
        } else {
            Catalog::with_extensions(project.catalog_paths().as_slice()).unwrap_or_exit()
        };

        let report = ops::catalog(&catalog, &project.options().project.engine);
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
