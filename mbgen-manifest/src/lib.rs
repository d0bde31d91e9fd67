// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Generation options, the mbgen.toml manifest and schema sources.

mod error;
mod manifest;
mod options;
mod schema;

pub use error::{Error, Result};
pub use manifest::{ConnectionProfile, Manifest, MbgenToml, StagingConfig};
pub use options::{ColumnOverride, GenerationOptions, OutputSubfolders, PackageNames};
pub use schema::{Column, SchemaError, SchemaSource, StaticSchemaSource, TableSchema, TomlSchemaSource};
