//! Durable key-value storage for session state.
//!
//! The session persists a single key (the last-connected adapter id) so a
//! later process start can attempt automatic reconnection. Storage is an
//! injected seam: embedders bring their own (browser localStorage, mobile
//! keystore), tests use [`MemoryStorage`], the CLI uses [`FileStorage`].

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

/// String key-value storage. All methods are infallible reads/writes from
/// the caller's perspective; backends log and drop write failures.
pub trait KeyStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory storage. Lost on drop.
#[derive(Default)]
pub struct MemoryStorage {
    map: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self { Self::default() }
}

impl KeyStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.map.read().ok()?.get(key).cloned()
    }
    fn set(&self, key: &str, value: &str) {
        if let Ok(mut map) = self.map.write() {
            map.insert(key.into(), value.into());
        }
    }
    fn remove(&self, key: &str) {
        if let Ok(mut map) = self.map.write() {
            map.remove(key);
        }
    }
}

/// File-backed storage: one JSON object per app, rewritten on every set.
/// Lives under `$XRPLEND_ROOT` or the platform data-local dir.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn open(app: &str) -> std::io::Result<Self> {
        let root = std::env::var("XRPLEND_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."))
            });
        let dir = root.join(app);
        std::fs::create_dir_all(&dir)?;
        Ok(Self { path: dir.join("session.json") })
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> HashMap<String, String> {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    fn save(&self, map: &HashMap<String, String>) {
        match serde_json::to_string_pretty(map) {
            Ok(raw) => {
                if let Err(e) = std::fs::write(&self.path, raw) {
                    tracing::warn!("session storage write failed: {}", e);
                }
            }
            Err(e) => tracing::warn!("session storage encode failed: {}", e),
        }
    }
}

impl KeyStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.load().get(key).cloned()
    }
    fn set(&self, key: &str, value: &str) {
        let mut map = self.load();
        map.insert(key.into(), value.into());
        self.save(&map);
    }
    fn remove(&self, key: &str) {
        let mut map = self.load();
        if map.remove(key).is_some() {
            self.save(&map);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("wallet.adapter"), None);
        storage.set("wallet.adapter", "crossmark");
        assert_eq!(storage.get("wallet.adapter"), Some("crossmark".into()));
        storage.remove("wallet.adapter");
        assert_eq!(storage.get("wallet.adapter"), None);
    }

    #[test]
    fn file_storage_persists_across_reopen() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("session.json");

        let storage = FileStorage::at(&path);
        storage.set("wallet.adapter", "gem");
        drop(storage);

        let reopened = FileStorage::at(&path);
        assert_eq!(reopened.get("wallet.adapter"), Some("gem".into()));
        reopened.remove("wallet.adapter");
        assert_eq!(reopened.get("wallet.adapter"), None);
    }

    #[test]
    fn file_storage_tolerates_missing_file() {
        let dir = TempDir::new().expect("tempdir");
        let storage = FileStorage::at(dir.path().join("nope.json"));
        assert_eq!(storage.get("anything"), None);
        storage.remove("anything");
    }
}
