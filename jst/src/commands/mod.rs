mod catalog;
mod completions;
mod options;
mod presets;
mod transpile;

use catalog::CatalogCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use options::OptionsCommand;
use presets::PresetsCommand;
use transpile::TranspileCommand;

/// Extension trait for exiting on diagnostics with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T, E> UnwrapOrExit<T> for std::result::Result<T, Box<E>>
where
    E: miette::Diagnostic + Send + Sync + 'static,
{
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "jst")]
#[command(version)]
#[command(about = "Transpile Jinja SQL templates into SQL scripts")]
pub(crate) struct Cli {
    /// Log more (-v for info, -vv for debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Transpile(cmd) => cmd.run(),
            Commands::Options(cmd) => cmd.run(),
            Commands::Presets(cmd) => cmd.run(),
            Commands::Catalog(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Transpile templates (the whole project when no paths are given)
    Transpile(TranspileCommand),

    /// Show or update jst.toml
    Options(OptionsCommand),

    /// Create a sample jst.presets.json
    Presets(PresetsCommand),

    /// List the skeletons available to templates
    Catalog(CatalogCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
