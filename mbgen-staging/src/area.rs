use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::{
    archive::build_archive,
    error::{Result, StagingError},
    key::{download_key, request_folder_name},
    reaper::{ReaperHandle, SweepReport, sweep_once},
    registry::DownloadRegistry,
};

/// An archive waiting to be downloaded.
#[derive(Debug, Clone, Serialize)]
pub struct StagedArchive {
    pub download_key: String,
    pub archive_path: PathBuf,
    pub created_at: DateTime<Local>,
}

/// A staging directory together with the registry of its downloads.
///
/// Cloning shares the registry.
#[derive(Debug, Clone)]
pub struct StagingArea {
    dir: PathBuf,
    registry: Arc<DownloadRegistry>,
}

impl StagingArea {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            registry: Arc::new(DownloadRegistry::new()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn registry(&self) -> &Arc<DownloadRegistry> {
        &self.registry
    }

    /// Create a fresh `gen_*` working folder for a multi-table request.
    pub fn request_folder(&self) -> Result<PathBuf> {
        let folder = self.dir.join(request_folder_name(Local::now()));
        fs::create_dir_all(&folder).map_err(StagingError::fs(&folder))?;
        tracing::debug!(folder = %folder.display(), "request folder created");
        Ok(folder)
    }

    /// Archive `files` and register the archive under a new download key.
    ///
    /// `scope` is the table name, or `multi` for multi-table requests.
    pub fn stage(
        &self,
        files: &[PathBuf],
        base: &Path,
        hint: &str,
        schema_id: &str,
        scope: &str,
    ) -> Result<StagedArchive> {
        let archive_path = build_archive(files, base, hint, &self.dir)?;
        let created_at = Local::now();

        let key = loop {
            let key = download_key(schema_id, scope);
            if self.registry.register_if_absent(&key, &archive_path) {
                break key;
            }
            tracing::debug!(download_key = %key, "download key taken, drawing another");
        };
        tracing::info!(
            download_key = %key,
            archive = %archive_path.display(),
            "archive staged"
        );

        Ok(StagedArchive {
            download_key: key,
            archive_path,
            created_at,
        })
    }

    pub fn lookup(&self, key: &str) -> Option<PathBuf> {
        self.registry.lookup(key)
    }

    pub fn evict(&self, key: &str) -> Option<PathBuf> {
        self.registry.evict(key)
    }

    /// Run one expiry pass now.
    pub fn sweep(&self, ttl: Duration) -> SweepReport {
        sweep_once(&self.dir, ttl, &self.registry)
    }

    /// Start the background reaper. It runs until the handle is shut down or dropped.
    pub fn start_reaper(&self, interval: Duration, ttl: Duration) -> ReaperHandle {
        ReaperHandle::spawn(self.dir.clone(), Arc::clone(&self.registry), interval, ttl)
    }
}
