//! Check command report data structures.

use std::path::PathBuf;

use mbgen_core::Dialect;
use serde::Serialize;

use super::output::{Output, Report};

/// Report data from manifest validation.
#[derive(Debug, Default, Serialize)]
pub struct CheckReport {
    pub config_path: PathBuf,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Presets that passed validation.
    pub presets: Vec<String>,
    /// Connections whose snapshot loaded.
    pub connections: Vec<ConnectionSummary>,
}

#[derive(Debug, Serialize)]
pub struct ConnectionSummary {
    pub name: String,
    pub dialect: Dialect,
    pub snapshot: PathBuf,
    pub schema_id: String,
    pub tables: usize,
}

impl CheckReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }
        for warning in &self.warnings {
            out.warning(warning);
        }
        if self.has_errors() {
            return;
        }

        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();

        let count = self.connections.len();
        out.section(&format!(
            "{} connection{}",
            count,
            if count == 1 { "" } else { "s" }
        ));
        for connection in &self.connections {
            out.key_value_indented(
                &connection.name,
                &format!(
                    "{}, {} tables ({})",
                    connection.dialect,
                    connection.tables,
                    connection.snapshot.display()
                ),
            );
        }

        if !self.presets.is_empty() {
            out.newline();
            out.section("Presets");
            for preset in &self.presets {
                out.list_item(preset);
            }
        }
    }
}
