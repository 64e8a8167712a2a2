use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;

use crate::jwt::ClaimSet;
use crate::jwt::TokenClaims;
use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::revocation::RevocationError;
use crate::revocation::RevocationStore;

/// Authentication coordinator combining password verification, token
/// issuance and revocation.
///
/// The token codec and the revocation store stay independent components;
/// this type only composes them. [`is_authorized`](Self::is_authorized) is
/// the single acceptance check: it never accepts a token without consulting
/// both.
pub struct Authenticator<S: RevocationStore> {
    password_hasher: PasswordHasher,
    codec: TokenCodec,
    revocations: Arc<S>,
    /// Hash checked when the account does not exist, so that path costs
    /// the same as a wrong password.
    dummy_hash: String,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,
    /// Moment the token stops being accepted
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Token has been revoked")]
    Revoked,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),

    #[error("Revocation error: {0}")]
    RevocationError(#[from] RevocationError),
}

impl<S: RevocationStore> Authenticator<S> {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `password_hasher` - Hasher used for stored credentials
    /// * `codec` - Token codec holding the signing secret and TTL
    /// * `revocations` - Shared revocation store
    ///
    /// # Errors
    /// * `PasswordError` - Dummy hash could not be computed
    pub fn new(
        password_hasher: PasswordHasher,
        codec: TokenCodec,
        revocations: Arc<S>,
    ) -> Result<Self, PasswordError> {
        let dummy_hash = password_hasher.hash("dummy-password-for-unknown-accounts")?;

        Ok(Self {
            password_hasher,
            codec,
            revocations,
            dummy_hash,
        })
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn revocations(&self) -> &Arc<S> {
        &self.revocations
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a session token.
    ///
    /// Pass `None` as `stored_hash` when no account matched; the password is
    /// then checked against a dummy hash and the call fails with
    /// `InvalidCredentials`, exactly like a wrong password.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash, if the account exists
    /// * `claims` - Claims to encode in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown account or password mismatch
    /// * `PasswordError` - Stored hash is unreadable
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: Option<&str>,
        claims: &ClaimSet,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = match stored_hash {
            Some(hash) => self.password_hasher.verify(password, hash)?,
            None => {
                let _ = self.password_hasher.verify(password, &self.dummy_hash)?;
                false
            }
        };

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token(claims)?)
    }

    /// Issue a token without password verification.
    ///
    /// # Errors
    /// * `TokenError` - Token generation failed
    pub fn issue_token(&self, claims: &ClaimSet) -> Result<AuthenticationResult, TokenError> {
        let (access_token, token_claims) = self.codec.sign(claims)?;
        let expires_at = token_claims.expires_at().ok_or(TokenError::InvalidTtl)?;

        Ok(AuthenticationResult {
            access_token,
            expires_at,
        })
    }

    /// Revoke a token.
    ///
    /// The token is not validated first: revoking a foreign, expired or
    /// garbage token is harmless. A token this codec accepts keeps its entry
    /// until its own expiry. Any other token is kept until its claimed
    /// expiry, capped at one TTL from now; unreadable tokens get the cap.
    ///
    /// # Errors
    /// * `RevocationError` - Store could not record the revocation
    pub async fn logout(&self, token: &str) -> Result<(), AuthenticationError> {
        let verified = self.codec.verify(token).ok().and_then(|c| c.expires_at());
        let expires_at = match verified {
            Some(exp) => exp,
            None => {
                let horizon = self
                    .codec
                    .clock()
                    .now()
                    .checked_add_signed(self.codec.ttl())
                    .unwrap_or(DateTime::<Utc>::MAX_UTC);
                self.codec
                    .decode_unverified(token)
                    .ok()
                    .and_then(|claims| claims.expires_at())
                    .map_or(horizon, |exp| exp.min(horizon))
            }
        };

        self.revocations.revoke(token, expires_at).await?;
        Ok(())
    }

    /// Decide whether a token may be used.
    ///
    /// Signature and expiry are checked first, then the revocation store.
    ///
    /// # Errors
    /// * `TokenError` - Malformed, bad signature or expired
    /// * `Revoked` - Token was logged out
    /// * `RevocationError` - Store could not be consulted
    pub async fn is_authorized(&self, token: &str) -> Result<TokenClaims, AuthenticationError> {
        let claims = self.codec.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            e
        })?;

        if self.revocations.is_revoked(token).await? {
            tracing::debug!(subject = %claims.subject(), "Revoked token presented");
            return Err(AuthenticationError::Revoked);
        }

        Ok(claims)
    }
}
