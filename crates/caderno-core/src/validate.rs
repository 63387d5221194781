//! Local precondition checks applied before any remote call.
//!
//! Form input that fails these checks is rejected at the UI boundary and
//! never reaches the service.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Minimum accepted secret length.
pub const SECRET_MIN_LEN: usize = 6;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("e-mail pattern compiles"));

/// Why caller-supplied input was rejected locally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("e-mail address is not valid")]
    InvalidEmail,

    #[error("password must be at least {SECRET_MIN_LEN} characters")]
    SecretTooShort,
}

/// Rejects empty or whitespace-only required fields.
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

/// Checks the subject is a plausible e-mail address.
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    require("e-mail", value)?;
    if !EMAIL_RE.is_match(value) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Checks the secret meets the minimum length.
pub fn validate_secret(value: &str) -> Result<(), ValidationError> {
    require("password", value)?;
    if value.chars().count() < SECRET_MIN_LEN {
        return Err(ValidationError::SecretTooShort);
    }
    Ok(())
}

/// Validates a full credential pair, as the login and register forms do.
pub fn validate_credentials(subject: &str, secret: &str) -> Result<(), ValidationError> {
    validate_email(subject)?;
    validate_secret(secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_rejects_blank() {
        assert_eq!(
            require("title", "   "),
            Err(ValidationError::Required("title"))
        );
        assert!(require("title", "Krebs cycle").is_ok());
    }

    #[test]
    fn test_email_shapes() {
        assert!(validate_email("ana@school.edu").is_ok());
        assert_eq!(
            validate_email("not-an-email"),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_email("spaces in@mail.com"),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_email("missing@tld"),
            Err(ValidationError::InvalidEmail)
        );
    }

    #[test]
    fn test_secret_length() {
        assert!(validate_secret("123456").is_ok());
        assert_eq!(
            validate_secret("12345"),
            Err(ValidationError::SecretTooShort)
        );
    }

    #[test]
    fn test_credentials_short_circuit_on_email() {
        assert_eq!(
            validate_credentials("bad", "123456"),
            Err(ValidationError::InvalidEmail)
        );
        assert!(validate_credentials("a@b.com", "123456").is_ok());
    }
}
