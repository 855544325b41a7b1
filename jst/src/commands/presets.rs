use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use jinjasql_manifest::Project;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct PresetsCommand {
    /// Workspace root containing jst.toml
    #[arg(short, long, default_value = ".")]
    pub workspace: PathBuf,
}

impl PresetsCommand {
    pub fn run(&self) -> Result<()> {
        let project = Project::open(&self.workspace).unwrap_or_exit();

        let report = ops::presets(&project)?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
