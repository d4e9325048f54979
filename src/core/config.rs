//! API endpoint configuration.
//!
//! The browser bundle reads the base URL baked in at build time
//! (`BINDAY_API_URL`). The server reads `API_URL` at runtime after
//! `dotenvy::dotenv()` and falls back to the build-time value.

/// Base URL used when nothing is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Version prefix shared by every API route
pub const API_PREFIX: &str = "/api/v1";

/// Remote API location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Scheme and host of the API, e.g. `https://api.example.com`
    pub base_url: String,

    /// Route prefix appended to `base_url`
    pub api_prefix: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_prefix: API_PREFIX.to_string(),
        }
    }

    /// Configuration compiled into the bundle.
    pub fn from_build_env() -> Self {
        Self::new(option_env!("BINDAY_API_URL").unwrap_or(DEFAULT_API_URL))
    }

    /// Load configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    #[cfg(feature = "ssr")]
    pub fn from_env() -> Self {
        match std::env::var("API_URL") {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::from_build_env(),
        }
    }

    /// Absolute URL of an API route, `path` starting with `/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.api_prefix, path)
    }

    pub fn login_url(&self) -> String {
        self.endpoint(LOGIN_PATH)
    }

    pub fn profile_url(&self) -> String {
        self.endpoint(PROFILE_PATH)
    }

    pub fn collections_url(&self) -> String {
        self.endpoint(COLLECTIONS_PATH)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

pub const LOGIN_PATH: &str = "/login/access-token";
pub const PROFILE_PATH: &str = "/users/me";
pub const COLLECTIONS_PATH: &str = "/collections/me";
