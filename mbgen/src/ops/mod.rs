//! Core operations.
//!
//! This module contains the business logic for mbgen commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod clean;
pub mod generate;
pub mod list;
pub mod preset;

pub use check::check;
pub use clean::clean;
pub use generate::generate;

use std::path::PathBuf;

use eyre::{Context, Result};
use mbgen_manifest::{ConnectionProfile, MbgenToml, TomlSchemaSource};

/// A connection from the manifest with its snapshot loaded.
pub(crate) struct Connection<'a> {
    pub name: &'a str,
    pub profile: &'a ConnectionProfile,
    pub snapshot: PathBuf,
    pub source: TomlSchemaSource,
}

impl Connection<'_> {
    /// Identifier used as the download key prefix.
    pub fn schema_id(&self) -> &str {
        self.profile.schema_id.as_deref().unwrap_or(self.name)
    }
}

pub(crate) fn open_connection<'a>(
    mbgen_toml: &'a MbgenToml,
    name: &'a str,
) -> Result<Connection<'a>> {
    let profile = mbgen_toml.manifest().connection(name)?;
    let snapshot = mbgen_toml.resolve(&profile.snapshot);
    let source = TomlSchemaSource::open(&snapshot)
        .wrap_err_with(|| format!("Failed to load schema snapshot for connection '{name}'"))?;

    Ok(Connection {
        name,
        profile,
        snapshot,
        source,
    })
}
