use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use jinjasql_manifest::JstToml;

use super::UnwrapOrExit;
use crate::{
    ops::{self, options::OptionChanges},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct OptionsCommand {
    /// Workspace root containing jst.toml
    #[arg(short, long, default_value = ".")]
    pub workspace: PathBuf,

    /// Directory containing the templates
    #[arg(short, long)]
    pub templates_dir: Option<PathBuf>,

    /// Directory receiving create, replace and none output
    #[arg(short = 'p', long)]
    pub transpiled_dir: Option<PathBuf>,

    /// Directory receiving debug output
    #[arg(short, long)]
    pub debug_dir: Option<PathBuf>,

    /// Engine used by jst/... skeleton paths
    #[arg(short, long)]
    pub engine: Option<String>,

    /// Prefix SET ANSI_NULLS ON to composed scripts
    #[arg(short = 'n', long)]
    pub ansi_nulls: Option<bool>,

    /// Prefix SET QUOTED_IDENTIFIER ON to composed scripts
    #[arg(short, long)]
    pub quoted_id: Option<bool>,

    /// File name prefixes skipped on project runs (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    pub skip_prefixes: Option<Vec<String>>,

    /// Extra catalog files (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    pub catalogs: Option<Vec<PathBuf>>,
}

impl OptionsCommand {
    pub fn run(&self) -> Result<()> {
        let mut jst_toml = JstToml::open(&self.workspace).unwrap_or_exit();

        let changes = OptionChanges {
            templates_dir: self.templates_dir.clone(),
            transpiled_dir: self.transpiled_dir.clone(),
            debug_dir: self.debug_dir.clone(),
            engine: self.engine.clone(),
            skip_prefixes: self.skip_prefixes.clone(),
            catalogs: self.catalogs.clone(),
            ansi_nulls: self.ansi_nulls,
            quoted_id: self.quoted_id,
        };

        let report = ops::options(&mut jst_toml, changes).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
