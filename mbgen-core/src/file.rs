use std::{
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use thiserror::Error;

/// A filesystem failure while writing a generated file.
#[derive(Debug, Error)]
#[error("failed to write '{path}'")]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl WriteError {
    fn at(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the absolute file path under the given output root
    fn path(&self, root: &Path) -> PathBuf;

    /// Get the rules for writing this file
    fn rules(&self) -> FileRules;

    /// Render the file content
    fn render(&self) -> String;

    /// Write the file to disk.
    ///
    /// Content is rendered in memory first, so a failed write never leaves a
    /// truncated file behind.
    fn write(&self, root: &Path) -> Result<WriteResult, WriteError> {
        let path = self.path(root);

        match self.rules().overwrite {
            Overwrite::Always => {
                write_file(&path, &self.render())?;
                Ok(WriteResult::Written(path))
            }
            Overwrite::IfMissing => {
                if path.exists() {
                    Ok(WriteResult::Skipped(path))
                } else {
                    write_file(&path, &self.render())?;
                    Ok(WriteResult::Written(path))
                }
            }
        }
    }
}

/// Write `content` to `path`, creating missing parent directories.
///
/// The content goes to a temporary file in the target directory which is then
/// renamed over the destination.
pub fn write_file(path: &Path, content: &str) -> Result<(), WriteError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(WriteError::at(parent))?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(WriteError::at(path))?;
    tmp.write_all(content.as_bytes())
        .map_err(WriteError::at(path))?;
    tmp.persist(path).map_err(|e| WriteError {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

/// Result of a write operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written(PathBuf),
    /// File was skipped (already exists)
    Skipped(PathBuf),
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written(path) | WriteResult::Skipped(path) => path,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, WriteResult::Written(_))
    }
}

/// Rules that determine how a file should be written
#[derive(Debug, Clone, Copy)]
pub struct FileRules {
    pub overwrite: Overwrite,
}

impl FileRules {
    pub fn always_overwrite() -> Self {
        Self {
            overwrite: Overwrite::Always,
        }
    }

    pub fn if_missing() -> Self {
        Self {
            overwrite: Overwrite::IfMissing,
        }
    }
}

/// How to handle existing files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// Always overwrite (model and accessor sources)
    Always,
    /// Only create if file doesn't exist (hand-tuned mapping documents)
    IfMissing,
}

impl Default for FileRules {
    fn default() -> Self {
        Self::always_overwrite()
    }
}
