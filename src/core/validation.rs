//! Login form field validation

/// Maximum length of email and password fields accepted by the API
pub const MAX_FIELD_LENGTH: usize = 255;

/// Field validation error
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Email field is empty
    EmailRequired,
    /// Email does not look like `local@domain.tld`
    InvalidEmail,
    /// Password field is empty
    PasswordRequired,
    /// Value exceeds the accepted length
    TooLong { max: usize, actual: usize },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmailRequired => write!(f, "Username is required"),
            ValidationError::InvalidEmail => write!(f, "Invalid email address"),
            ValidationError::PasswordRequired => write!(f, "Password is required"),
            ValidationError::TooLong { max, actual } => {
                write!(f, "Value is too long ({} chars, max {})", actual, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate the username field, which must be an email address.
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if trimmed.len() > MAX_FIELD_LENGTH {
        return Err(ValidationError::TooLong {
            max: MAX_FIELD_LENGTH,
            actual: trimmed.len(),
        });
    }
    if is_email(trimmed) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

pub fn validate_password(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    if value.len() > MAX_FIELD_LENGTH {
        return Err(ValidationError::TooLong {
            max: MAX_FIELD_LENGTH,
            actual: value.len(),
        });
    }
    Ok(())
}

/// `local@domain.tld` with `[A-Za-z0-9._%+-]` local part,
/// `[A-Za-z0-9.-]` domain and an alphabetic TLD of 2+ letters
fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
    let host_ok = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic());

    local_ok && host_ok && tld_ok
}
