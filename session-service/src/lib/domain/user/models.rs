use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::ValidationError;

/// A registered account. The email address is the login key and is unique
/// across the store; the username is only shown back to clients.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Account identifier, also the `sub` claim of every session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse the textual form produced by `Display`.
    pub fn from_string(s: &str) -> Result<Self, ValidationError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| ValidationError::UserId(e.to_string()))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name: 3 to 32 characters from `[A-Za-z0-9_-]` (Unicode letters
/// and digits included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const LENGTH: std::ops::RangeInclusive<usize> = 3..=32;

    pub fn new(username: String) -> Result<Self, ValidationError> {
        let actual = username.len();
        if !Self::LENGTH.contains(&actual) {
            return Err(ValidationError::UsernameLength {
                min: *Self::LENGTH.start(),
                max: *Self::LENGTH.end(),
                actual,
            });
        }

        let allowed = |c: char| c.is_alphanumeric() || c == '_' || c == '-';
        if !username.chars().all(allowed) {
            return Err(ValidationError::UsernameCharacters);
        }

        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address checked against RFC 5322 syntax. Only used on
/// registration; login looks the raw string up as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(email: String) -> Result<Self, ValidationError> {
        match email_address::EmailAddress::from_str(&email) {
            Ok(_) => Ok(Self(email)),
            Err(e) => Err(ValidationError::Email(e.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Input of `UserServicePort::register_user`. The password is still
/// plaintext here; the service hashes it before anything is stored.
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterUserCommand {
    pub fn new(username: Username, email: EmailAddress, password: String) -> Self {
        Self {
            username,
            email,
            password,
        }
    }
}
