//! # Filesystem-backed session store
//!
//! [`FileStore`] persists session keys to a single JSON file on the local
//! filesystem. It is used on native platforms (desktop builds and the dev
//! shell) to retain the login across restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── session.json      # {"token": "...", "user": "...", ...}
//! ```
//!
//! The whole map is rewritten on every `set`/`remove`; the file holds a
//! handful of short strings, so this is not a throughput concern.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::SessionStore;

const SESSION_FILE: &str = "session.json";

/// Filesystem-backed SessionStore for native persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn file_path(&self) -> PathBuf {
        self.base.join(SESSION_FILE)
    }

    fn load(&self) -> HashMap<String, String> {
        std::fs::read_to_string(self.file_path())
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    fn save(&self, entries: &HashMap<String, String>) {
        let _ = std::fs::create_dir_all(&self.base);
        if let Ok(raw) = serde_json::to_string_pretty(entries) {
            let _ = std::fs::write(self.file_path(), raw);
        }
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.load().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.load();
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.load();
        if entries.remove(key).is_some() {
            self.save(&entries);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> FileStore {
        let base = std::env::temp_dir()
            .join("lingzhi-store-tests")
            .join(format!("{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&base);
        FileStore::new(base)
    }

    #[test]
    fn roundtrip_across_instances() {
        let store = temp_store("roundtrip");
        store.set("token", "abc");
        store.set("user", "{\"id\":1}");

        // A fresh instance over the same directory sees the data.
        let reopened = FileStore::new(store.base.clone());
        assert_eq!(reopened.get("token"), Some("abc".to_string()));
        assert_eq!(reopened.get("user"), Some("{\"id\":1}".to_string()));

        reopened.remove("token");
        assert_eq!(store.get("token"), None);
        assert_eq!(store.get("user"), Some("{\"id\":1}".to_string()));
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let store = temp_store("missing");
        assert_eq!(store.get("token"), None);
    }

    #[test]
    fn corrupt_file_degrades_to_empty() {
        let store = temp_store("corrupt");
        std::fs::create_dir_all(&store.base).unwrap();
        std::fs::write(store.file_path(), "not json").unwrap();

        assert_eq!(store.get("token"), None);
        // Writing over a corrupt file recovers it.
        store.set("token", "abc");
        assert_eq!(store.get("token"), Some("abc".to_string()));
    }
}
