//! List command report data structures.

use std::path::PathBuf;

use mbgen_core::Dialect;
use serde::Serialize;

use super::output::{Output, Report};

#[derive(Debug, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "lowercase")]
pub enum ListReport {
    Tables(Vec<TableListing>),
    Presets(Vec<String>),
    Connections(Vec<ConnectionInfo>),
}

#[derive(Debug, Serialize)]
pub struct TableListing {
    pub connection: String,
    pub tables: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ConnectionInfo {
    pub name: String,
    pub dialect: Dialect,
    pub snapshot: PathBuf,
    pub schema_id: String,
}

impl Report for ListReport {
    fn render(&self, out: &mut dyn Output) {
        match self {
            ListReport::Tables(listings) => {
                if listings.is_empty() {
                    out.preformatted("No connections defined");
                }
                for (i, listing) in listings.iter().enumerate() {
                    if i > 0 {
                        out.newline();
                    }
                    out.section(&format!("Tables ({})", listing.connection));
                    if listing.tables.is_empty() {
                        out.list_item("(none)");
                    }
                    for table in &listing.tables {
                        out.list_item(table);
                    }
                }
            }
            ListReport::Presets(names) => {
                if names.is_empty() {
                    out.preformatted("No presets defined");
                    return;
                }
                out.section("Presets");
                for name in names {
                    out.list_item(name);
                }
            }
            ListReport::Connections(infos) => {
                if infos.is_empty() {
                    out.preformatted("No connections defined");
                    return;
                }
                out.section("Connections");
                for info in infos {
                    out.key_value_indented(
                        &info.name,
                        &format!("{} ({})", info.dialect, info.snapshot.display()),
                    );
                }
            }
        }
    }
}
