use thiserror::Error;

/// Rejected registration input or identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("user id is not a UUID: {0}")]
    UserId(String),

    #[error("username must be {min} to {max} characters long, got {actual}")]
    UsernameLength { min: usize, max: usize, actual: usize },

    #[error("username may only contain letters, digits, '_' and '-'")]
    UsernameCharacters,

    #[error("email address is not valid: {0}")]
    Email(String),

    #[error("password must not be empty")]
    EmptyPassword,
}

/// Errors of the user registry operations.
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Invalid input: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
