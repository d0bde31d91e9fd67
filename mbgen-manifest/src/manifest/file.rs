use std::path::{Path, PathBuf};

use mbgen_core::write_file;

use super::Manifest;
use crate::{Error, Result};

/// An mbgen.toml file with both raw content and parsed manifest.
pub struct MbgenToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl MbgenToml {
    /// Open and parse an mbgen.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;
        tracing::debug!(path = %path.display(), presets = manifest.presets.len(), "loaded manifest");

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    /// Open the file if it exists, otherwise start from defaults.
    pub fn open_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::open(path);
        }
        Ok(Self {
            path: path.to_path_buf(),
            content: String::new(),
            manifest: Manifest::default(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn manifest_mut(&mut self) -> &mut Manifest {
        &mut self.manifest
    }

    /// Resolve a path from the manifest relative to the manifest's folder.
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        if relative.is_absolute() {
            return relative.to_path_buf();
        }
        match self.path.parent() {
            Some(parent) => parent.join(relative),
            None => relative.to_path_buf(),
        }
    }

    /// Serialize the manifest and write it atomically.
    pub fn save(&mut self) -> Result<()> {
        let content = self.manifest.to_toml()?;
        write_file(&self.path, &content).map_err(|source| {
            Box::new(Error::Write {
                path: self.path.clone(),
                source,
            })
        })?;
        self.content = content;
        tracing::debug!(path = %self.path.display(), "saved manifest");
        Ok(())
    }
}
