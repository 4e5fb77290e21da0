//! localStorage wrapper.
//!
//! Thin layer over `web_sys::Storage` so the rest of the crate never
//! touches `window` directly. Storage failures (private browsing,
//! quota) degrade to "key absent" rather than erroring.

/// Browser localStorage access.
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// Read a stored string, `None` if the key is absent or storage is
    /// unavailable.
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// Store a value. Returns `false` when storage is unavailable.
    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    /// Remove a key. Removing an absent key is a successful no-op.
    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}
