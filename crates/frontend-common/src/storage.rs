//! Browser storage tiers backing the token vault

use jobdeck_core::{StorageTier, TokenVault};
use web_sys::Storage;

/// A `web_sys::Storage` handle (localStorage or sessionStorage) as a tier.
pub struct BrowserTier {
    storage: Storage,
}

impl BrowserTier {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

impl StorageTier for BrowserTier {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let _ = self.storage.set_item(key, value);
    }

    fn remove(&self, key: &str) {
        let _ = self.storage.remove_item(key);
    }
}

fn local_storage() -> Option<Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn session_storage() -> Option<Storage> {
    web_sys::window().and_then(|w| w.session_storage().ok().flatten())
}

/// The browser vault: localStorage is the durable tier, sessionStorage the
/// tab-scoped one. `None` when storage is unavailable (sandboxed frame,
/// storage disabled).
pub fn browser_vault() -> Option<TokenVault> {
    Some(TokenVault::new(
        Box::new(BrowserTier::new(local_storage()?)),
        Box::new(BrowserTier::new(session_storage()?)),
    ))
}
