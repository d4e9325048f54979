//! Credential Store
//!
//! A single named slot holding the bearer token, backed by browser
//! `localStorage` in the bundle and by memory elsewhere. The store is the
//! only writer of the slot; everything else reads through a [`TokenReader`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use super::error::StorageError;
use super::token::Token;

/// Name of the storage slot holding the token
pub const TOKEN_KEY: &str = "access_token";

/// Key/value persistence exposed by the hosting environment
pub trait StorageBackend: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local storage, used on the server and in tests
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.slots().remove(key);
        Ok(())
    }
}

/// `window.localStorage`, looked up on every call
#[cfg(feature = "hydrate")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
impl BrowserStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        window
            .local_storage()
            .map_err(|_| StorageError::Unavailable)?
            .ok_or(StorageError::Unavailable)
    }
}

#[cfg(feature = "hydrate")]
impl StorageBackend for BrowserStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Rejected(format!("{:?}", e)))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Rejected(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Rejected(format!("{:?}", e)))
    }
}

/// Owner of the token slot.
///
/// Every mutation advances the session epoch, which keys cached queries.
pub struct CredentialStore {
    backend: Arc<dyn StorageBackend>,
    epoch: AtomicU64,
}

impl CredentialStore {
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
            epoch: AtomicU64::new(0),
        }
    }

    /// Store backed by the environment's default storage
    pub fn platform() -> Self {
        #[cfg(feature = "hydrate")]
        {
            Self::new(BrowserStorage)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Self::new(MemoryStorage::new())
        }
    }

    pub fn get(&self) -> Option<Token> {
        read_token(self.backend.as_ref())
    }

    /// Replace the stored token.
    pub fn set(&self, token: Token) -> Result<(), StorageError> {
        self.backend.write(TOKEN_KEY, token.as_str())?;
        self.epoch.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        // Cached reads are invalidated even if the slot could not be removed.
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.backend.remove(TOKEN_KEY)
    }

    /// Number of mutations since the store was opened
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Read-only handle for the request layer and the session oracle
    pub fn reader(&self) -> TokenReader {
        TokenReader {
            backend: Arc::clone(&self.backend),
        }
    }
}

/// Read-only view of the token slot
#[derive(Clone)]
pub struct TokenReader {
    backend: Arc<dyn StorageBackend>,
}

impl TokenReader {
    pub fn get(&self) -> Option<Token> {
        read_token(self.backend.as_ref())
    }
}

fn read_token(backend: &dyn StorageBackend) -> Option<Token> {
    match backend.read(TOKEN_KEY) {
        Ok(value) => value.map(Token::from),
        Err(e) => {
            leptos::logging::warn!("Failed to read token from storage: {}", e);
            None
        }
    }
}
