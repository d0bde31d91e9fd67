//! Check operation - manifest, preset and snapshot validation.

use mbgen_manifest::{MbgenToml, SchemaSource};

use super::open_connection;
use crate::reports::{CheckReport, ConnectionSummary};

/// Execute the check operation.
///
/// Problems are collected into the report rather than returned as errors.
pub fn check(mbgen_toml: &MbgenToml) -> CheckReport {
    let manifest = mbgen_toml.manifest();
    let mut report = CheckReport {
        config_path: mbgen_toml.path().to_path_buf(),
        ..Default::default()
    };

    if let Err(e) = manifest.generator.validate() {
        report.errors.push(format!("[generator]: {e}"));
    }
    for (name, options) in &manifest.presets {
        match options.validate() {
            Ok(()) => report.presets.push(name.clone()),
            Err(e) => report.errors.push(format!("preset '{name}': {e}")),
        }
    }

    if manifest.connections.is_empty() {
        report
            .warnings
            .push("no connections defined, nothing can be generated".to_string());
    }

    for name in manifest.connections.keys() {
        let connection = match open_connection(mbgen_toml, name) {
            Ok(connection) => connection,
            Err(e) => {
                report.errors.push(format!("connection '{name}': {e:#}"));
                continue;
            }
        };

        let declared = connection.profile.dialect;
        let actual = connection.source.dialect();
        if declared != actual {
            report.errors.push(format!(
                "connection '{name}' declares {declared} but its snapshot is {actual}"
            ));
        }

        let tables = match connection.source.table_names(None) {
            Ok(tables) => tables.len(),
            Err(e) => {
                report.errors.push(format!("connection '{name}': {e}"));
                continue;
            }
        };
        if tables == 0 {
            report
                .warnings
                .push(format!("connection '{name}' has no tables"));
        }

        report.connections.push(ConnectionSummary {
            name: name.clone(),
            dialect: declared,
            snapshot: connection.snapshot.clone(),
            schema_id: connection.schema_id().to_string(),
            tables,
        });
    }

    report
}
