use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use mbgen_manifest::MbgenToml;

use super::UnwrapOrExit;
use crate::{ops, reports::emit};

#[derive(Args)]
pub struct CleanCommand {
    /// Path to mbgen.toml (defaults to ./mbgen.toml)
    #[arg(short, long, default_value = "mbgen.toml")]
    pub config: PathBuf,

    /// Age in seconds after which archives are removed (overrides staging.ttl_secs)
    #[arg(long)]
    pub ttl: Option<u64>,

    /// Keep sweeping every staging.sweep_interval_secs until Enter is pressed
    #[arg(long, conflicts_with = "json")]
    pub watch: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CleanCommand {
    pub fn run(&self) -> Result<()> {
        let mbgen_toml = MbgenToml::open_or_default(&self.config).unwrap_or_exit();
        if self.watch {
            println!("Watching staging directory, press Enter to stop");
            return ops::clean::watch(&mbgen_toml, self.ttl, std::io::stdin().lock());
        }

        let report = ops::clean(&mbgen_toml, self.ttl);

        emit(&report, self.json)
    }
}
