//! Revocation registry: tokens that must be rejected even though their
//! signature and expiry still check out.

pub mod memory;
pub mod sweeper;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use thiserror::Error;

pub use memory::InMemoryRevocationStore;
pub use sweeper::RevocationSweeper;

/// Error type for revocation store operations.
///
/// The in-memory store never fails; shared backends (e.g. a cache cluster
/// serving several processes) report outages through `Unavailable`.
#[derive(Debug, Clone, Error)]
pub enum RevocationError {
    #[error("Revocation store unavailable: {0}")]
    Unavailable(String),
}

/// Backing store for revoked tokens.
///
/// Every entry remembers when its token would have expired anyway, so
/// [`purge_expired`](RevocationStore::purge_expired) can bound memory without
/// ever forgetting a token that could still pass verification.
#[async_trait]
pub trait RevocationStore: Send + Sync + 'static {
    /// Mark `token` as revoked until `expires_at`.
    ///
    /// Idempotent: revoking an already revoked token succeeds and keeps the
    /// original entry.
    ///
    /// # Errors
    /// * `Unavailable` - Backend could not be reached
    async fn revoke(&self, token: &str, expires_at: DateTime<Utc>) -> Result<(), RevocationError>;

    /// Check whether `token` has been revoked.
    ///
    /// Must observe every `revoke` that returned before the call started.
    ///
    /// # Errors
    /// * `Unavailable` - Backend could not be reached
    async fn is_revoked(&self, token: &str) -> Result<bool, RevocationError>;

    /// Drop entries whose token expired at or before `now`.
    ///
    /// # Returns
    /// Number of entries removed
    ///
    /// # Errors
    /// * `Unavailable` - Backend could not be reached
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, RevocationError>;

    /// Number of tracked entries.
    async fn len(&self) -> Result<usize, RevocationError>;
}
