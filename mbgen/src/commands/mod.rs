mod check;
mod clean;
mod completions;
mod generate;
mod list;
mod preset;

use check::CheckCommand;
use clap::{ArgAction, Parser, Subcommand};
use clean::CleanCommand;
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use list::ListCommand;
use preset::PresetCommand;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for mbgen_manifest::Result<T> {
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
#[command(name = "mbgen")]
#[command(version)]
#[command(about = "Generate MyBatis artifacts from table schemas")]
pub(crate) struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Clean(cmd) => cmd.run(),
            Commands::List(cmd) => cmd.run(),
            Commands::Preset(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate model, mapper and mapping document for one or more tables
    Generate(GenerateCommand),

    /// Validate mbgen.toml, its presets and schema snapshots
    Check(CheckCommand),

    /// Delete expired archives from the staging directory
    Clean(CleanCommand),

    /// List tables, presets or connections
    List(ListCommand),

    /// Save or remove named generation presets
    Preset(PresetCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
