//! MyBatis artifact generation: model class, mapper interface and mapping
//! document for one table at a time.

mod error;
pub mod files;
mod generator;

pub use error::{GenerateError, Result};
pub use generator::{
    GeneratedArtifact, GenerationOutcome, Generator, PreviewFile, preview_artifacts,
    write_artifacts,
};
