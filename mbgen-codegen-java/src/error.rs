use std::path::PathBuf;

use mbgen_core::{Dialect, WriteError};
use mbgen_manifest::SchemaError;
use thiserror::Error;

/// Errors that abort one generation request.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("schema unavailable for table '{table}': {reason}")]
    SchemaUnavailable { table: String, reason: String },

    #[error("dialect {requested} is not supported by the schema source (supports {supported})")]
    UnsupportedDialect {
        requested: Dialect,
        supported: Dialect,
    },

    #[error("invalid generation options: {message}")]
    InvalidOptions { message: String },

    #[error("failed to write '{path}'")]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, GenerateError>;

impl GenerateError {
    pub(crate) fn from_schema(table: &str, err: SchemaError) -> Self {
        match err {
            SchemaError::Unavailable { table, reason } => Self::SchemaUnavailable { table, reason },
            SchemaError::UnsupportedDialect {
                requested,
                supported,
            } => Self::UnsupportedDialect {
                requested,
                supported,
            },
            other => Self::SchemaUnavailable {
                table: table.to_string(),
                reason: other.to_string(),
            },
        }
    }
}

impl From<WriteError> for GenerateError {
    fn from(err: WriteError) -> Self {
        Self::FileSystem {
            path: err.path,
            source: err.source,
        }
    }
}
