//! Error types for the session layer

use crate::core::models::ErrorBody;

/// Failure of the key/value slot holding the token
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("Storage is not available")]
    Unavailable,

    #[error("Storage rejected the operation: {0}")]
    Rejected(String),
}

/// Transport-level failure of an API call
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request rejected ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("Server error ({status}): {detail}")]
    Server { status: u16, detail: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 300;

impl ApiError {
    /// Build an error from a non-success status and its body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = detail_from_body(body);
        match status {
            400..=499 => ApiError::Rejected { status, detail },
            500..=599 => ApiError::Server { status, detail },
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, detail)),
        }
    }
}

fn detail_from_body(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.message();
    }
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        body.to_string()
    } else {
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }
}

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Incorrect email or password";
pub const NETWORK_FAILURE_MESSAGE: &str =
    "The request could not be completed. Please check your connection and try again.";
pub const UNAUTHENTICATED_MESSAGE: &str = "You need to log in first.";
pub const SESSION_REJECTED_MESSAGE: &str =
    "Your session is no longer valid. Please log in again.";

/// Authentication failures surfaced to the UI
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
    /// The server rejected the username/password pair
    #[error("Credentials rejected: {0}")]
    InvalidCredentials(String),

    /// The request did not complete or the server failed
    #[error("Request could not be completed: {0}")]
    NetworkFailure(String),

    /// A protected request was attempted without a session
    #[error("Not authenticated")]
    UnauthenticatedAccess,

    /// The server refused the stored token on a session-scoped request
    #[error("Session rejected: {0}")]
    SessionRejected(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Classify a failed login call.
    pub fn from_login_failure(err: ApiError) -> Self {
        match err {
            ApiError::Rejected {
                status: 400 | 401 | 403 | 422,
                detail,
            } => AuthError::InvalidCredentials(detail),
            other => AuthError::NetworkFailure(other.to_string()),
        }
    }

    /// Text shown to the user
    pub fn message(&self) -> String {
        match self {
            AuthError::InvalidCredentials(detail) if !detail.trim().is_empty() => detail.clone(),
            AuthError::InvalidCredentials(_) => INVALID_CREDENTIALS_MESSAGE.to_string(),
            AuthError::NetworkFailure(_) => NETWORK_FAILURE_MESSAGE.to_string(),
            AuthError::UnauthenticatedAccess => UNAUTHENTICATED_MESSAGE.to_string(),
            AuthError::SessionRejected(_) => SESSION_REJECTED_MESSAGE.to_string(),
            AuthError::Storage(_) => {
                "Your browser did not allow the session to be saved.".to_string()
            }
        }
    }

    pub fn is_invalid_credentials(&self) -> bool {
        matches!(self, AuthError::InvalidCredentials(_))
    }
}

/// Classification of a failed session-scoped query
impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Rejected {
                status: 401 | 403,
                detail,
            } => AuthError::SessionRejected(detail),
            other => AuthError::NetworkFailure(other.to_string()),
        }
    }
}
