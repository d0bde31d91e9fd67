//! Periodic expiry of staged archives.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{
        Arc,
        mpsc::{self, RecvTimeoutError, Sender},
    },
    thread::JoinHandle,
    time::{Duration, SystemTime},
};

use serde::Serialize;

use crate::{
    key::{REQUEST_FOLDER_PREFIX, is_archive_name},
    registry::DownloadRegistry,
};

/// Outcome of one sweep over the staging directory.
#[derive(Debug, Default, Clone, Serialize)]
pub struct SweepReport {
    /// Archives and request folders deleted.
    pub removed: Vec<PathBuf>,
    pub evicted_keys: Vec<String>,
    /// Entries that could not be inspected or deleted.
    pub errors: usize,
}

impl SweepReport {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.evicted_keys.is_empty() && self.errors == 0
    }
}

/// Delete every `mgg_*.zip` archive and `gen_*` request folder in `dir`
/// older than `ttl`, evicting registry entries that point at removed archives.
///
/// Failures are counted and skipped. A missing directory is an empty sweep.
pub fn sweep_once(dir: &Path, ttl: Duration, registry: &DownloadRegistry) -> SweepReport {
    let mut report = SweepReport::default();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return report,
    };
    let now = SystemTime::now();

    for entry in entries {
        let Ok(entry) = entry else {
            report.errors += 1;
            continue;
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        let Ok(metadata) = entry.metadata() else {
            report.errors += 1;
            continue;
        };

        let is_archive = metadata.is_file() && is_archive_name(&name);
        let is_request_folder = metadata.is_dir() && name.starts_with(REQUEST_FOLDER_PREFIX);
        if !is_archive && !is_request_folder {
            continue;
        }

        let expired = metadata
            .modified()
            .ok()
            .and_then(|modified| now.duration_since(modified).ok())
            .is_some_and(|age| age > ttl);
        if !expired {
            continue;
        }

        let path = entry.path();
        let removed = if is_archive {
            fs::remove_file(&path)
        } else {
            fs::remove_dir_all(&path)
        };
        match removed {
            Ok(()) => {
                if is_archive {
                    report.evicted_keys.extend(registry.evict_path(&path));
                }
                tracing::debug!(path = %path.display(), "expired staging entry removed");
                report.removed.push(path);
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to remove staging entry");
                report.errors += 1;
            }
        }
    }

    if !report.is_empty() {
        tracing::info!(
            removed = report.removed.len(),
            evicted = report.evicted_keys.len(),
            errors = report.errors,
            "staging sweep finished"
        );
    }
    report
}

/// Handle to a running reaper thread.
///
/// `shutdown` stops and joins the thread. Dropping the handle does the same.
pub struct ReaperHandle {
    stop_tx: Option<Sender<()>>,
    join_handle: Option<JoinHandle<()>>,
}

impl ReaperHandle {
    pub(crate) fn spawn(
        dir: PathBuf,
        registry: Arc<DownloadRegistry>,
        interval: Duration,
        ttl: Duration,
    ) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let join_handle = std::thread::spawn(move || {
            tracing::debug!(dir = %dir.display(), ?interval, ?ttl, "reaper started");
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        sweep_once(&dir, ttl, &registry);
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            tracing::debug!("reaper stopped");
        });

        Self {
            stop_tx: Some(stop_tx),
            join_handle: Some(join_handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.join_handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Signal the thread and wait for the current sweep to finish.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.join_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ReaperHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use tempfile::TempDir;

    use super::*;

    fn age(path: &Path, by: Duration) {
        let file = File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() - by).unwrap();
    }

    #[test]
    fn test_sweep_missing_dir() {
        let dir = TempDir::new().unwrap();
        let report = sweep_once(
            &dir.path().join("absent"),
            Duration::from_secs(1),
            &DownloadRegistry::new(),
        );
        assert!(report.is_empty());
    }

    #[test]
    fn test_sweep_removes_only_expired_archives() {
        let dir = TempDir::new().unwrap();
        let old = dir.path().join("mgg_old_20240101_000000_abcd.zip");
        let fresh = dir.path().join("mgg_new_20240101_000000_efgh.zip");
        let unrelated = dir.path().join("notes.zip");
        for path in [&old, &fresh, &unrelated] {
            fs::write(path, b"zip").unwrap();
        }
        age(&old, Duration::from_secs(600));
        age(&unrelated, Duration::from_secs(600));

        let registry = DownloadRegistry::new();
        registry.register("local_user_aaaaaaaa", &old);
        registry.register("local_user_bbbbbbbb", &fresh);

        let report = sweep_once(dir.path(), Duration::from_secs(300), &registry);
        assert_eq!(report.removed, vec![old.clone()]);
        assert_eq!(report.evicted_keys, vec!["local_user_aaaaaaaa".to_string()]);
        assert_eq!(report.errors, 0);

        assert!(!old.exists());
        assert!(fresh.exists());
        assert!(unrelated.exists());
        assert_eq!(registry.lookup("local_user_bbbbbbbb"), Some(fresh));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_sweep_removes_expired_request_folders() {
        let dir = TempDir::new().unwrap();
        let folder = dir.path().join("gen_20240101_000000_abcdefgh");
        fs::create_dir_all(folder.join("src")).unwrap();
        fs::write(folder.join("src/User.java"), "class User {}").unwrap();
        let stray_dir = dir.path().join("mgg_dir.zip");
        fs::create_dir(&stray_dir).unwrap();
        for path in [&folder, &stray_dir] {
            File::open(path)
                .unwrap()
                .set_modified(SystemTime::now() - Duration::from_secs(600))
                .unwrap();
        }

        let report = sweep_once(dir.path(), Duration::from_secs(300), &DownloadRegistry::new());
        assert_eq!(report.removed, vec![folder.clone()]);
        assert!(!folder.exists());
        assert!(stray_dir.exists());
    }

    #[test]
    fn test_reaper_shutdown_is_prompt() {
        let dir = TempDir::new().unwrap();
        let handle = ReaperHandle::spawn(
            dir.path().to_path_buf(),
            Arc::new(DownloadRegistry::new()),
            Duration::from_secs(3600),
            Duration::from_secs(300),
        );
        assert!(handle.is_running());

        let started = std::time::Instant::now();
        handle.shutdown();
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
