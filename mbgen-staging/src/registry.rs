//! Download key to archive path mapping.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

/// Concurrency-safe map from download key to staged archive.
///
/// Every access goes through one `RwLock`. Lookups verify the archive still
/// exists and evict the entry when it does not.
#[derive(Debug, Default)]
pub struct DownloadRegistry {
    entries: RwLock<HashMap<String, PathBuf>>,
}

impl DownloadRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, PathBuf>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, PathBuf>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `path` under `key`, returning any path previously stored there.
    pub fn register(&self, key: impl Into<String>, path: impl Into<PathBuf>) -> Option<PathBuf> {
        let key = key.into();
        let path = path.into();
        tracing::debug!(%key, path = %path.display(), "download registered");
        self.write().insert(key, path)
    }

    /// Register `path` under `key` unless a live archive already holds it.
    ///
    /// The check and the insert happen under one write lock. An entry whose
    /// archive is gone counts as free.
    pub fn register_if_absent(&self, key: &str, path: impl Into<PathBuf>) -> bool {
        let mut entries = self.write();
        if entries.get(key).is_some_and(|current| current.exists()) {
            return false;
        }
        let path = path.into();
        tracing::debug!(%key, path = %path.display(), "download registered");
        entries.insert(key.to_string(), path);
        true
    }

    /// Archive path for `key`, or `None` if unknown or no longer on disk.
    pub fn lookup(&self, key: &str) -> Option<PathBuf> {
        let path = self.read().get(key).cloned()?;
        if path.exists() {
            return Some(path);
        }

        // Re-check under the write lock so a concurrent re-registration wins.
        let mut entries = self.write();
        if entries.get(key).is_some_and(|current| !current.exists()) {
            entries.remove(key);
            tracing::debug!(%key, "stale download evicted");
        }
        None
    }

    pub fn evict(&self, key: &str) -> Option<PathBuf> {
        self.write().remove(key)
    }

    /// Evict every key pointing at `path` and return those keys.
    pub fn evict_path(&self, path: &Path) -> Vec<String> {
        let mut entries = self.write();
        let keys: Vec<String> = entries
            .iter()
            .filter(|(_, p)| p.as_path() == path)
            .map(|(k, _)| k.clone())
            .collect();
        for key in &keys {
            entries.remove(key);
        }
        keys
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("mgg_a.zip");
        fs::write(&archive, b"zip").unwrap();

        let registry = DownloadRegistry::new();
        assert!(registry.register("k1", &archive).is_none());
        assert_eq!(registry.lookup("k1"), Some(archive));
        assert_eq!(registry.lookup("unknown"), None);
    }

    #[test]
    fn test_register_if_absent_keeps_live_entry() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("mgg_a.zip");
        let second = dir.path().join("mgg_b.zip");
        fs::write(&first, b"zip").unwrap();
        fs::write(&second, b"zip").unwrap();

        let registry = DownloadRegistry::new();
        assert!(registry.register_if_absent("k1", &first));
        assert!(!registry.register_if_absent("k1", &second));
        assert_eq!(registry.lookup("k1"), Some(first.clone()));

        fs::remove_file(&first).unwrap();
        assert!(registry.register_if_absent("k1", &second));
        assert_eq!(registry.lookup("k1"), Some(second));
    }

    #[test]
    fn test_stale_lookup_evicts() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("mgg_a.zip");
        fs::write(&archive, b"zip").unwrap();

        let registry = DownloadRegistry::new();
        registry.register("k1", &archive);
        fs::remove_file(&archive).unwrap();

        assert_eq!(registry.lookup("k1"), None);
        assert!(registry.is_empty());
        assert_eq!(registry.lookup("k1"), None);
    }

    #[test]
    fn test_evict() {
        let registry = DownloadRegistry::new();
        registry.register("k1", "a.zip");
        assert_eq!(registry.evict("k1"), Some(PathBuf::from("a.zip")));
        assert_eq!(registry.evict("k1"), None);
    }

    #[test]
    fn test_evict_path() {
        let registry = DownloadRegistry::new();
        registry.register("k1", "a.zip");
        registry.register("k2", "a.zip");
        registry.register("k3", "b.zip");

        let mut keys = registry.evict_path(Path::new("a.zip"));
        keys.sort();
        assert_eq!(keys, vec!["k1".to_string(), "k2".to_string()]);
        assert_eq!(registry.len(), 1);
    }
}
