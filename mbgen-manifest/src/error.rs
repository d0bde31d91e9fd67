use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("create the file or pass another path with --config"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: mbgen_core::WriteError,
    },

    #[error("failed to parse {filename}")]
    #[diagnostic(code(mbgen::parse_error))]
    Parse {
        filename: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize configuration")]
    Serialize {
        #[source]
        source: toml::ser::Error,
    },

    #[error("unknown preset '{name}'")]
    #[diagnostic(code(mbgen::unknown_preset), help("available presets: {available}"))]
    UnknownPreset { name: String, available: String },

    #[error("unknown connection '{name}'")]
    #[diagnostic(
        code(mbgen::unknown_connection),
        help("available connections: {available}")
    )]
    UnknownConnection { name: String, available: String },

    #[error("{message}")]
    #[diagnostic(code(mbgen::validation_error))]
    Validation { message: String },
}

impl Error {
    /// Create a parse error from a toml error with source context
    pub fn parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            filename: filename.to_string(),
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Box<Self> {
        Box::new(Error::Validation {
            message: message.into(),
        })
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }

    pub(crate) fn unknown_preset<'a>(
        name: &str,
        available: impl Iterator<Item = &'a String>,
    ) -> Box<Self> {
        Box::new(Error::UnknownPreset {
            name: name.to_string(),
            available: join_or_none(available),
        })
    }

    pub(crate) fn unknown_connection<'a>(
        name: &str,
        available: impl Iterator<Item = &'a String>,
    ) -> Box<Self> {
        Box::new(Error::UnknownConnection {
            name: name.to_string(),
            available: join_or_none(available),
        })
    }
}

fn join_or_none<'a>(names: impl Iterator<Item = &'a String>) -> String {
    let names: Vec<&str> = names.map(String::as_str).collect();
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}
