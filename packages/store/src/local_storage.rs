//! # Browser `localStorage` store - web-side persistence
//!
//! [`LocalStorageStore`] is the [`SessionStore`] implementation used on the
//! **web platform**. It persists session keys directly into the browser's
//! `localStorage` via `web-sys`, namespaced with a `lingzhi.` prefix so the
//! app does not collide with other origins sharing a dev host.
//!
//! ## Error handling
//!
//! All trait methods silently swallow errors (returning `None` for reads,
//! doing nothing for writes). `localStorage` can be unavailable in private
//! browsing modes or blocked by storage policies; in that case the app
//! degrades to "no stored session" rather than crashing.

use crate::SessionStore;

const KEY_PREFIX: &str = "lingzhi.";

/// `localStorage`-backed SessionStore for the web platform.
#[derive(Clone, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    fn prefixed(key: &str) -> String {
        format!("{KEY_PREFIX}{key}")
    }
}

impl SessionStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(&Self::prefixed(key)).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(&Self::prefixed(key), value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(&Self::prefixed(key));
        }
    }
}
