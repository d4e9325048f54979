//! Framework-independent domain logic: configuration, API wire types and
//! the session layer

pub mod config;
pub mod models;
pub mod session;
pub mod validation;

pub use config::ApiConfig;
pub use models::*;
