//! Clean command report data structures.

use std::path::PathBuf;

use mbgen_staging::SweepReport;
use serde::Serialize;

use super::output::{Output, Report};

/// Report data from one staging sweep.
#[derive(Debug, Serialize)]
pub struct CleanReport {
    pub staging_dir: PathBuf,
    pub ttl_secs: u64,
    pub sweep: SweepReport,
}

impl Report for CleanReport {
    fn render(&self, out: &mut dyn Output) {
        if self.sweep.errors > 0 {
            out.warning(&format!(
                "{} staging entries could not be removed",
                self.sweep.errors
            ));
        }

        if self.sweep.removed.is_empty() {
            out.preformatted(&format!(
                "No staged archives older than {}s in {}",
                self.ttl_secs,
                self.staging_dir.display()
            ));
            return;
        }

        out.section("Deleted");
        for path in &self.sweep.removed {
            let name = path.strip_prefix(&self.staging_dir).unwrap_or(path);
            out.removed_item(&name.display().to_string());
        }
        if !self.sweep.evicted_keys.is_empty() {
            out.newline();
            out.section("Evicted download keys");
            for key in &self.sweep.evicted_keys {
                out.list_item(key);
            }
        }
    }
}
