//! Email Value Object
//!
//! A syntactically validated, lowercased email address. Actual ownership is
//! only proven through the activation flow.

use crate::error::{AuthError, AuthResult};
use serde::{Deserialize, Serialize};

/// Maximum total length (RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Maximum local-part length (RFC 5321)
const LOCAL_PART_MAX_LENGTH: usize = 64;

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Create a new email with validation
    ///
    /// Input is trimmed and lowercased before validation.
    pub fn new(email: impl Into<String>) -> AuthResult<Self> {
        let email = email.into().trim().to_lowercase();

        if email.is_empty() {
            return Err(AuthError::InvalidEmail("must not be empty".into()));
        }

        if email.len() > EMAIL_MAX_LENGTH {
            return Err(AuthError::InvalidEmail(format!(
                "must be at most {} characters",
                EMAIL_MAX_LENGTH
            )));
        }

        let Some((local, domain)) = split_once_exact(&email) else {
            return Err(AuthError::InvalidEmail(
                "must contain exactly one '@'".into(),
            ));
        };

        if local.is_empty() || local.len() > LOCAL_PART_MAX_LENGTH {
            return Err(AuthError::InvalidEmail("invalid local part".into()));
        }

        if !is_valid_domain(domain) {
            return Err(AuthError::InvalidEmail("invalid domain".into()));
        }

        Ok(Self(email))
    }

    /// Create from a database value (assumed already validated)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Split on '@', rejecting addresses with more or fewer than one
fn split_once_exact(email: &str) -> Option<(&str, &str)> {
    let mut parts = email.split('@');
    let local = parts.next()?;
    let domain = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((local, domain))
}

fn is_valid_domain(domain: &str) -> bool {
    if domain.is_empty() || !domain.contains('.') {
        return false;
    }

    if !domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return false;
    }

    // No leading or trailing separator
    !(domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-'))
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(Email::new("user@example.com").is_ok());
        assert!(Email::new("user.name@example.co.uk").is_ok());
        assert!(Email::new("user+tag@example.com").is_ok());
    }

    #[test]
    fn test_email_invalid() {
        assert!(Email::new("").is_err());
        assert!(Email::new("userexample.com").is_err());
        assert!(Email::new("user@").is_err());
        assert!(Email::new("@example.com").is_err());
        assert!(Email::new("user@@example.com").is_err());
        assert!(Email::new("user@example").is_err());
        assert!(Email::new("user@.example.com").is_err());
        assert!(Email::new("user@example.com-").is_err());
    }

    #[test]
    fn test_email_case_normalization() {
        let email = Email::new("User@Example.COM").unwrap();
        assert_eq!(email.as_str(), "user@example.com");
    }

    #[test]
    fn test_email_trims_whitespace() {
        let email = Email::new("  user@example.com  ").unwrap();
        assert_eq!(email.as_str(), "user@example.com");
    }
}
