//! Language-agnostic building blocks for mbgen artifact generation.
//!
//! # Module Organization
//!
//! - [`builder`] - Indented text building ([`CodeBuilder`](builder::CodeBuilder))
//! - [`mappers`] - SQL type to value type / I/O tag tables
//! - [`RenderContext`] - Per-table template input built from schema + options
//! - [`PathResolver`] - Output locations for each artifact kind

pub mod builder;
mod context;
mod imports;
pub mod mappers;
mod paths;

pub use context::{FALLBACK_KEY, KeyRef, RenderContext, RenderField};
pub use imports::{ImportSet, simple_name};
pub use mappers::{JavaTypeMapper, TypeMapper, normalize_type};
pub use paths::{PathResolver, package_dir, resolve};
