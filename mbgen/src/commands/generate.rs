use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use mbgen_manifest::MbgenToml;

use super::UnwrapOrExit;
use crate::{ops, reports::emit};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to mbgen.toml (defaults to ./mbgen.toml)
    #[arg(short, long, default_value = "mbgen.toml")]
    pub config: PathBuf,

    /// Connection to read table schemas from
    #[arg(short = 'C', long)]
    pub connection: String,

    /// Preset to use instead of the [generator] options
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Tables to generate (comma separated or repeated)
    #[arg(short, long, required = true, value_delimiter = ',')]
    pub tables: Vec<String>,

    /// Output root (overrides output_root for single-table requests)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Write the artifacts without building a download archive
    #[arg(long)]
    pub no_archive: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let mbgen_toml = MbgenToml::open(&self.config).unwrap_or_exit();

        let report = ops::generate(
            &mbgen_toml,
            ops::generate::GenerateOptions {
                connection: &self.connection,
                preset: self.preset.as_deref(),
                tables: &self.tables,
                output_dir: self.output.as_deref(),
                dry_run: self.dry_run,
                archive: !self.no_archive,
            },
        )?;

        emit(&report, self.json)
    }
}
