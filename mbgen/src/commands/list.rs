use std::path::PathBuf;

use clap::{Args, ValueEnum};
use eyre::Result;
use mbgen_manifest::MbgenToml;

use super::UnwrapOrExit;
use crate::{ops, reports::emit};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListTarget {
    Tables,
    Presets,
    Connections,
}

#[derive(Args)]
pub struct ListCommand {
    /// What to list
    #[arg(value_enum, default_value = "tables")]
    pub target: ListTarget,

    /// Path to mbgen.toml (defaults to ./mbgen.toml)
    #[arg(short, long, default_value = "mbgen.toml")]
    pub config: PathBuf,

    /// Connection whose tables to list (defaults to every connection)
    #[arg(short = 'C', long)]
    pub connection: Option<String>,

    /// Only show tables whose name contains this text
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let mbgen_toml = MbgenToml::open(&self.config).unwrap_or_exit();

        let report = match self.target {
            ListTarget::Tables => ops::list::tables(
                &mbgen_toml,
                self.connection.as_deref(),
                self.filter.as_deref(),
            )?,
            ListTarget::Presets => ops::list::presets(mbgen_toml.manifest()),
            ListTarget::Connections => ops::list::connections(mbgen_toml.manifest()),
        };

        emit(&report, self.json)
    }
}
