use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::SessionStore;

/// In-memory SessionStore for testing and as a non-web fallback.
///
/// Clones share the same underlying map, so a clone handed to a session
/// manager observes writes made through the original.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("token"), None);

        store.set("token", "abc");
        assert_eq!(store.get("token"), Some("abc".to_string()));

        store.set("token", "def");
        assert_eq!(store.get("token"), Some("def".to_string()));

        store.remove("token");
        assert_eq!(store.get("token"), None);
        // removing again is a no-op
        store.remove("token");
    }

    #[test]
    fn clones_share_state() {
        let store = MemoryStore::new();
        let clone = store.clone();

        store.set("user", "{\"id\":1}");
        assert_eq!(clone.get("user"), Some("{\"id\":1}".to_string()));
    }
}
