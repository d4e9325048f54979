//! Session and authentication state.
//!
//! Leaf-first: [`store`] holds the token, [`oracle`] answers whether a
//! session exists, [`client`] drives login/logout and session-scoped
//! queries, [`guard`] gates routes.

pub mod api;
pub mod cache;
pub mod client;
pub mod error;
pub mod guard;
pub mod oracle;
pub mod store;
pub mod token;

pub use api::{AuthApi, HttpApi};
pub use client::{AuthClient, CurrentUser};
pub use error::{ApiError, AuthError, StorageError};
pub use guard::{
    GuardOutcome, HOME_PATH, LOGIN_PATH, NavigationGuard, Proceed, RedirectTo, RouteAccess,
};
pub use oracle::{SessionOracle, SessionState};
pub use store::{CredentialStore, MemoryStorage, StorageBackend, TokenReader};
pub use token::Token;
