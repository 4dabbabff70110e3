//! Places a session token can live.
//!
//! A browser context keeps the token in a cookie and in a local key-value
//! store. Both must be cleared together, otherwise a half-cleared session
//! looks authenticated to one reader and anonymous to the other.

use std::sync::{Arc, Mutex, PoisonError};

/// Name of the cookie / local-store key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// A single storage location for the session token.
pub trait TokenStore: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    fn load(&self) -> Option<String>;

    fn save(&self, token: &str);

    fn clear(&self);
}

/// In-process key-value store.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn load(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, token: &str) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Every location a token may reside in, in lookup order.
///
/// `load` returns the first token found; `save` and `clear` touch every
/// location.
#[derive(Clone, Default)]
pub struct TokenStores {
    stores: Vec<Arc<dyn TokenStore>>,
}

impl TokenStores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.stores.push(store);
        self
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

impl TokenStore for TokenStores {
    fn name(&self) -> &'static str {
        "all"
    }

    fn load(&self) -> Option<String> {
        self.stores.iter().find_map(|s| s.load())
    }

    fn save(&self, token: &str) {
        for store in &self.stores {
            store.save(token);
        }
    }

    fn clear(&self) {
        for store in &self.stores {
            store.clear();
            tracing::debug!(store = store.name(), "token cleared");
        }
    }
}
