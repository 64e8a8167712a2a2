use async_trait::async_trait;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::Principal;
use crate::domain::session::models::Session;

/// Port for session operations: credential login, logout and the single
/// acceptance check applied to every authenticated request.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Authenticate by email and password and issue a session token.
    ///
    /// Reads the user store only; nothing is written on success or failure.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `UserStore` - User store lookup failed
    /// * `Internal` - Hashing or signing failed
    async fn login(&self, email: &str, password: &str) -> Result<Session, SessionError>;

    /// Revoke a token. Idempotent; the token is not validated first.
    ///
    /// # Errors
    /// * `Internal` - Revocation store failed
    async fn logout(&self, token: &str) -> Result<(), SessionError>;

    /// Accept or reject a presented token.
    ///
    /// # Errors
    /// * `Malformed` - Not a token issued by this service
    /// * `InvalidSignature` - Tampered or signed with another secret
    /// * `Expired` - Past its time-to-live
    /// * `Revoked` - Logged out
    async fn authorize(&self, token: &str) -> Result<Principal, SessionError>;
}
