//! List operations - tables, presets and connections.

use eyre::{Context, Result};
use mbgen_manifest::{Manifest, MbgenToml, SchemaSource};

use super::open_connection;
use crate::reports::{ConnectionInfo, ListReport, TableListing};

/// Tables of one connection, or of every connection when `connection` is `None`.
pub fn tables(
    mbgen_toml: &MbgenToml,
    connection: Option<&str>,
    filter: Option<&str>,
) -> Result<ListReport> {
    let names: Vec<&str> = match connection {
        Some(name) => vec![name],
        None => mbgen_toml
            .manifest()
            .connections
            .keys()
            .map(String::as_str)
            .collect(),
    };

    let mut listings = Vec::with_capacity(names.len());
    for name in names {
        let connection = open_connection(mbgen_toml, name)?;
        let tables = connection
            .source
            .table_names(filter)
            .wrap_err_with(|| format!("Failed to list tables of '{name}'"))?;
        listings.push(TableListing {
            connection: name.to_string(),
            tables,
        });
    }

    Ok(ListReport::Tables(listings))
}

pub fn presets(manifest: &Manifest) -> ListReport {
    ListReport::Presets(manifest.preset_names().map(str::to_string).collect())
}

pub fn connections(manifest: &Manifest) -> ListReport {
    ListReport::Connections(
        manifest
            .connections
            .iter()
            .map(|(name, profile)| ConnectionInfo {
                name: name.clone(),
                dialect: profile.dialect,
                snapshot: profile.snapshot.clone(),
                schema_id: profile.schema_id.clone().unwrap_or_else(|| name.clone()),
            })
            .collect(),
    )
}
