//! Session values with an expiry, kept in memory or on disk.
//!
//! The student flow carries the verified access code from code entry to
//! emotion submission through a [`SessionStore`].

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use vibecheck_common::{Result, VibeCheckError};

/// Key of the verified student access code.
pub const CODE_SESSION_KEY: &str = "codigo_avaliacao";

/// Key/value storage whose entries expire.
pub trait SessionStore: Send + Sync {
    /// Store `value` under `key` for `ttl`.
    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// The value under `key`, or `None` if absent or expired.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Remove `key`.
    fn clear(&self, key: &str) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SessionEntry {
    value: String,
    expires_at: DateTime<Utc>,
}

impl SessionEntry {
    fn new(value: &str, ttl: Duration) -> Self {
        Self {
            value: value.to_string(),
            expires_at: Utc::now() + ttl,
        }
    }

    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Process-local session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, SessionEntry>>,
}

impl MemorySessionStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.entries
            .lock()
            .insert(key.to_string(), SessionEntry::new(value, ttl));
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.is_live(Utc::now()) => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn clear(&self, key: &str) -> Result<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// Session store persisted as a JSON file, so values survive between
/// separate invocations of the command line tool.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    /// Store backed by the file at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, SessionEntry>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => {
                return Err(VibeCheckError::session_with_source(
                    format!("Failed to read session file {}", self.path.display()),
                    e,
                ))
            }
        };

        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            VibeCheckError::session_with_source(
                format!("Corrupt session file {}", self.path.display()),
                e,
            )
        })
    }

    fn save(&self, entries: &HashMap<String, SessionEntry>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content).map_err(|e| {
            VibeCheckError::session_with_source(
                format!("Failed to write session file {}", self.path.display()),
                e,
            )
        })
    }
}

impl SessionStore for FileSessionStore {
    #[instrument(skip(self, value))]
    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let _guard = self.lock.lock();
        let now = Utc::now();
        let mut entries = self.load()?;
        entries.retain(|_, entry| entry.is_live(now));
        entries.insert(key.to_string(), SessionEntry::new(value, ttl));
        self.save(&entries)?;
        debug!("Stored session value in {}", self.path.display());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self
            .load()?
            .remove(key)
            .filter(|entry| entry.is_live(Utc::now()))
            .map(|entry| entry.value))
    }

    #[instrument(skip(self))]
    fn clear(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemorySessionStore::new();
        store.set(CODE_SESSION_KEY, "ABC123", Duration::minutes(30)).unwrap();

        assert_eq!(store.get(CODE_SESSION_KEY).unwrap().as_deref(), Some("ABC123"));

        store.clear(CODE_SESSION_KEY).unwrap();
        assert_eq!(store.get(CODE_SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn test_memory_store_expiry() {
        let store = MemorySessionStore::new();
        store.set(CODE_SESSION_KEY, "ABC123", Duration::seconds(-1)).unwrap();

        assert_eq!(store.get(CODE_SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_between_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        FileSessionStore::new(&path)
            .set(CODE_SESSION_KEY, "XYZ", Duration::minutes(30))
            .unwrap();

        let reopened = FileSessionStore::new(&path);
        assert_eq!(reopened.get(CODE_SESSION_KEY).unwrap().as_deref(), Some("XYZ"));

        reopened.clear(CODE_SESSION_KEY).unwrap();
        assert_eq!(FileSessionStore::new(&path).get(CODE_SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("absent.json"));

        assert_eq!(store.get(CODE_SESSION_KEY).unwrap(), None);
        store.clear(CODE_SESSION_KEY).unwrap();
    }

    #[test]
    fn test_file_store_expired_entry() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        store.set(CODE_SESSION_KEY, "OLD", Duration::seconds(-5)).unwrap();

        assert_eq!(store.get(CODE_SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = FileSessionStore::new(&path).get(CODE_SESSION_KEY).unwrap_err();
        assert!(matches!(err, VibeCheckError::Session { .. }));
    }
}
