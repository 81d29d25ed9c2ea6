//! Client-side persistent key/value storage for the Lingzhi app.
//!
//! The session (bearer token, cached user profile, validation timestamp) must
//! survive page reloads and app restarts. This crate hides the platform
//! behind the [`SessionStore`] trait:
//!
//! | Implementation | Platform | Backing |
//! |----------------|----------|---------|
//! | [`LocalStorageStore`] | Web (wasm, `web` feature) | browser `localStorage` |
//! | [`FileStore`] | Desktop / native | JSON file under `dirs::data_dir()` |
//! | [`MemoryStore`] | Tests, fallback | in-process `HashMap` |
//!
//! All implementations swallow I/O errors: a read that fails behaves like a
//! missing key, a write that fails is dropped. A broken storage medium
//! degrades to "not logged in" rather than crashing the UI.

mod memory;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

/// Synchronous string key/value storage for session state.
///
/// Synchronous on purpose: browser `localStorage` is a synchronous API, and
/// the native JSON-file store is small enough that blocking writes are fine.
pub trait SessionStore {
    /// Read a value, `None` if absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, overwriting any previous one.
    fn set(&self, key: &str, value: &str);

    /// Delete a key. Removing an absent key is a no-op.
    fn remove(&self, key: &str);
}

impl SessionStore for Box<dyn SessionStore> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// Create the storage backend appropriate for the current platform.
///
/// - **Web** (wasm + `web` feature): [`LocalStorageStore`]
/// - **Native**: [`FileStore`] under `<data_dir>/lingzhi/session.json`
/// - **wasm without `web`**: [`MemoryStore`] (state lost on reload)
pub fn platform_store() -> impl SessionStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        LocalStorageStore::new()
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        MemoryStore::new()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("lingzhi");
        FileStore::new(base)
    }
}

/// [`platform_store`] behind a box, for callers that need a nameable type.
pub fn boxed_platform_store() -> Box<dyn SessionStore> {
    Box::new(platform_store())
}
