use auth::AuthenticationError;
use auth::TokenError;
use thiserror::Error;

/// Errors of the session (login / logout / authorization) operations.
///
/// Unknown email and wrong password both surface as `InvalidCredentials`
/// so callers cannot tell which accounts exist.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token has been revoked")]
    Revoked,

    #[error("User store error: {0}")]
    UserStore(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SessionError {
    /// True for every reason a presented token is refused.
    pub fn is_token_rejection(&self) -> bool {
        matches!(
            self,
            SessionError::Malformed
                | SessionError::InvalidSignature
                | SessionError::Expired
                | SessionError::Revoked
        )
    }
}

impl From<AuthenticationError> for SessionError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => SessionError::InvalidCredentials,
            AuthenticationError::Revoked => SessionError::Revoked,
            AuthenticationError::TokenError(TokenError::Malformed(_)) => SessionError::Malformed,
            AuthenticationError::TokenError(TokenError::InvalidSignature) => {
                SessionError::InvalidSignature
            }
            AuthenticationError::TokenError(TokenError::Expired) => SessionError::Expired,
            AuthenticationError::TokenError(e) => SessionError::Internal(e.to_string()),
            AuthenticationError::PasswordError(e) => SessionError::Internal(e.to_string()),
            AuthenticationError::RevocationError(e) => SessionError::Internal(e.to_string()),
        }
    }
}
