use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use mbgen_manifest::MbgenToml;

use super::UnwrapOrExit;
use crate::{ops, reports::emit};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to mbgen.toml (defaults to ./mbgen.toml)
    #[arg(short, long, default_value = "mbgen.toml")]
    pub config: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let mbgen_toml = MbgenToml::open(&self.config).unwrap_or_exit();
        let report = ops::check(&mbgen_toml);

        emit(&report, self.json)?;
        if report.has_errors() {
            std::process::exit(1);
        }
        Ok(())
    }
}
