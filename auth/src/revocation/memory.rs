use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use tokio::sync::RwLock;

use super::RevocationError;
use super::RevocationStore;

/// Process-local revocation store.
///
/// Entries live only as long as the process; restarting forgets every
/// revocation. Cloning shares the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRevocationStore {
    /// Map of token -> expiry of that token
    entries: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn revoke(&self, token: &str, expires_at: DateTime<Utc>) -> Result<(), RevocationError> {
        let mut entries = self.entries.write().await;
        if !entries.contains_key(token) {
            entries.insert(token.to_string(), expires_at);
            tracing::debug!(
                tracked = entries.len(),
                expires_at = %expires_at,
                "Token revoked"
            );
        }
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, RevocationError> {
        Ok(self.entries.read().await.contains_key(token))
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, RevocationError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, expires_at| *expires_at > now);
        Ok(before - entries.len())
    }

    async fn len(&self) -> Result<usize, RevocationError> {
        Ok(self.entries.read().await.len())
    }
}
