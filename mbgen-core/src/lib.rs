//! Core utilities and types for the mbgen generator.
//!
//! This crate provides the leaf building blocks used across the mbgen
//! workspace: identifier case conversion, dialect and artifact kinds, and
//! the file-writing primitives every rendered artifact goes through.

mod file;
mod naming;
mod types;

// File operations
pub use file::{FileRules, GeneratedFile, Overwrite, WriteError, WriteResult, write_file};
// Identifier conversion
pub use naming::{first_lower, first_upper, to_delimited_lower, to_lower_camel, to_upper_camel};
// Fundamental types
pub use types::{ArtifactKind, Dialect, ParseDialectError};
