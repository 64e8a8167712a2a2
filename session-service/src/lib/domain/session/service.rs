use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::ClaimSet;
use auth::RevocationStore;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::Principal;
use crate::domain::session::models::Session;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::models::User;
use crate::user::ports::UserRepository;

/// Domain service implementation for session operations.
///
/// Looks accounts up through the user repository and delegates credential
/// checks, token issuance and revocation to the shared [`Authenticator`].
pub struct SessionService<UR, RS>
where
    UR: UserRepository,
    RS: RevocationStore,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator<RS>>,
}

impl<UR, RS> SessionService<UR, RS>
where
    UR: UserRepository,
    RS: RevocationStore,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User lookup implementation
    /// * `authenticator` - Credential, token and revocation coordinator
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator<RS>>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn claims_for(user: &User) -> ClaimSet {
        ClaimSet::new(user.id, user.email.as_str())
    }
}

#[async_trait]
impl<UR, RS> SessionServicePort for SessionService<UR, RS>
where
    UR: UserRepository,
    RS: RevocationStore,
{
    async fn login(&self, email: &str, password: &str) -> Result<Session, SessionError> {
        let user = self
            .repository
            .find_by_email(email)
            .await
            .map_err(|e| SessionError::UserStore(e.to_string()))?;

        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
        let claims = match &user {
            Some(user) => Self::claims_for(user),
            None => ClaimSet::new("", email),
        };

        // Argon2 verification is CPU bound
        let authenticator = self.authenticator.clone();
        let password = password.to_string();
        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, stored_hash.as_deref(), &claims)
        })
        .await
        .map_err(|e| SessionError::Internal(format!("Authentication task failed: {}", e)))?;

        let authenticated = match result {
            Ok(authenticated) => authenticated,
            Err(e) => {
                tracing::debug!(error = %e, "Login rejected");
                return Err(e.into());
            }
        };

        // authenticate only succeeds when a stored hash was present
        let user = user.ok_or(SessionError::InvalidCredentials)?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(Session {
            user,
            token: authenticated.access_token,
            expires_at: authenticated.expires_at,
        })
    }

    async fn logout(&self, token: &str) -> Result<(), SessionError> {
        self.authenticator.logout(token).await?;
        tracing::info!("Session revoked");
        Ok(())
    }

    async fn authorize(&self, token: &str) -> Result<Principal, SessionError> {
        let claims = self.authenticator.is_authorized(token).await?;
        Principal::try_from(claims)
    }
}
