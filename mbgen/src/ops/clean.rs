//! Clean operation - expiry sweeps of the staging directory.

use std::{io::BufRead, time::Duration};

use eyre::{Context, Result};
use mbgen_manifest::MbgenToml;
use mbgen_staging::StagingArea;

use crate::reports::CleanReport;

/// Execute the clean operation with the configured TTL or `ttl_override`.
pub fn clean(mbgen_toml: &MbgenToml, ttl_override: Option<u64>) -> CleanReport {
    let staging_config = &mbgen_toml.manifest().staging;
    let ttl_secs = ttl_override.unwrap_or(staging_config.ttl_secs);
    let staging = StagingArea::new(mbgen_toml.resolve(&staging_config.dir));

    let sweep = staging.sweep(Duration::from_secs(ttl_secs));
    CleanReport {
        staging_dir: staging.dir().to_path_buf(),
        ttl_secs,
        sweep,
    }
}

/// Run the background reaper until a line (or EOF) arrives on `stop`.
pub fn watch(
    mbgen_toml: &MbgenToml,
    ttl_override: Option<u64>,
    mut stop: impl BufRead,
) -> Result<()> {
    let staging_config = &mbgen_toml.manifest().staging;
    let ttl = Duration::from_secs(ttl_override.unwrap_or(staging_config.ttl_secs));
    let interval = Duration::from_secs(staging_config.sweep_interval_secs);
    let staging = StagingArea::new(mbgen_toml.resolve(&staging_config.dir));

    staging.sweep(ttl);
    let reaper = staging.start_reaper(interval, ttl);
    tracing::info!(
        dir = %staging.dir().display(),
        ?interval,
        ?ttl,
        "watching staging directory"
    );

    let mut line = String::new();
    stop.read_line(&mut line)
        .wrap_err("Failed to read from stdin")?;
    reaper.shutdown();
    Ok(())
}
