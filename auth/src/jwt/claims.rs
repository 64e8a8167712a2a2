use std::collections::HashMap;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity facts carried by a session token.
///
/// `sub` and `email` are always present; services may attach further custom
/// fields through `extra`, which are flattened into the token payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClaimSet {
    /// Subject (user identifier)
    pub sub: String,

    /// Email address of the subject
    pub email: String,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl ClaimSet {
    /// Names owned by the codec or by the fixed fields above.
    pub const RESERVED: [&'static str; 4] = ["sub", "email", "iat", "exp"];

    /// Create a claim set for a user.
    ///
    /// # Arguments
    /// * `subject` - Unique user identifier
    /// * `email` - User email address
    pub fn new(subject: impl ToString, email: impl ToString) -> Self {
        Self {
            sub: subject.to_string(),
            email: email.to_string(),
            extra: HashMap::new(),
        }
    }

    /// Add a custom field.
    ///
    /// Reserved names and values that fail to serialize are ignored.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        let key = key.to_string();
        if Self::RESERVED.contains(&key.as_str()) {
            return self;
        }
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key, json_value);
        }
        self
    }
}

/// Full token payload: the claim set plus the timestamps the codec adds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenClaims {
    #[serde(flatten)]
    pub claims: ClaimSet,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl TokenClaims {
    pub fn subject(&self) -> &str {
        &self.claims.sub
    }

    pub fn email(&self) -> &str {
        &self.claims.email
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// A token is dead from its expiry second onwards.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
