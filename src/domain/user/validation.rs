//! Validation rules for user registration input

use thiserror::Error;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validation errors for user input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserValidationError {
    #[error("Email must not be empty")]
    EmptyEmail,

    #[error("Email '{0}' is not a valid address")]
    InvalidEmail(String),

    #[error("Name must not be empty")]
    EmptyName,

    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,
}

/// Validate an email address. Case-sensitive, minimal shape check only.
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(UserValidationError::InvalidEmail(email.to_string()));
    };

    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(UserValidationError::InvalidEmail(email.to_string()));
    }

    Ok(())
}

/// Validate a display name
pub fn validate_name(name: &str) -> Result<(), UserValidationError> {
    if name.trim().is_empty() {
        return Err(UserValidationError::EmptyName);
    }

    Ok(())
}

/// Validate a raw password before hashing
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooShort);
    }

    Ok(())
}
