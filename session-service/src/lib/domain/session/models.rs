use auth::TokenClaims;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::session::errors::SessionError;

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Identity established from an accepted token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub email: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl TryFrom<TokenClaims> for Principal {
    type Error = SessionError;

    /// Tokens whose subject is not a user id were not issued by this
    /// service and count as malformed.
    fn try_from(claims: TokenClaims) -> Result<Self, Self::Error> {
        let user_id =
            UserId::from_string(claims.subject()).map_err(|_| SessionError::Malformed)?;
        let issued_at = claims.issued_at().ok_or(SessionError::Malformed)?;
        let expires_at = claims.expires_at().ok_or(SessionError::Malformed)?;

        Ok(Self {
            user_id,
            email: claims.claims.email,
            issued_at,
            expires_at,
        })
    }
}
