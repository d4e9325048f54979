//! Session Oracle: "is a user authenticated right now?"

use super::store::TokenReader;

/// Authentication state derived from the token slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated,
}

/// Synchronous session predicate over the Credential Store.
///
/// Reads the slot on every call; holds no state of its own.
#[derive(Clone)]
pub struct SessionOracle {
    reader: TokenReader,
}

impl SessionOracle {
    pub fn new(reader: TokenReader) -> Self {
        Self { reader }
    }

    pub fn is_authenticated(&self) -> bool {
        self.reader.get().is_some_and(|token| !token.is_empty())
    }

    pub fn state(&self) -> SessionState {
        if self.is_authenticated() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::store::{CredentialStore, MemoryStorage, StorageBackend, TOKEN_KEY};
    use crate::core::session::token::Token;

    #[test]
    fn test_anonymous_without_token() {
        let store = CredentialStore::new(MemoryStorage::new());
        let oracle = SessionOracle::new(store.reader());

        assert!(!oracle.is_authenticated());
        assert_eq!(oracle.state(), SessionState::Anonymous);
    }

    #[test]
    fn test_tracks_store_mutations() {
        let store = CredentialStore::new(MemoryStorage::new());
        let oracle = SessionOracle::new(store.reader());

        store.set(Token::from("abc")).unwrap();
        assert!(oracle.is_authenticated());
        assert_eq!(oracle.state(), SessionState::Authenticated);

        store.clear().unwrap();
        assert!(!oracle.is_authenticated());
        assert!(store.get().is_none());
    }

    #[test]
    fn test_empty_token_is_not_a_session() {
        let storage = MemoryStorage::new();
        storage.write(TOKEN_KEY, "").unwrap();
        let store = CredentialStore::new(storage);
        let oracle = SessionOracle::new(store.reader());

        assert!(store.get().is_some());
        assert!(!oracle.is_authenticated());
    }

    #[test]
    fn test_whitespace_token_is_a_session() {
        let store = CredentialStore::new(MemoryStorage::new());
        let oracle = SessionOracle::new(store.reader());

        store.set(Token::from("   ")).unwrap();

        assert!(oracle.is_authenticated());
    }
}
