//! Session token authentication library
//!
//! Provides reusable session infrastructure for services:
//! - Password hashing (Argon2id)
//! - Signed, time-bounded session tokens (HS256 JWT)
//! - Revocation registry with expiry-aware pruning
//! - Authentication coordination
//!
//! A token is accepted if and only if its signature verifies, it has not
//! reached its expiry, and it has not been revoked.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{ClaimSet, TokenCodec};
//! use chrono::Duration;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(15)).unwrap();
//! let token = codec.issue(&ClaimSet::new("user123", "a@x.com")).unwrap();
//! let decoded = codec.verify(&token).unwrap();
//! assert_eq!(decoded.subject(), "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use std::sync::Arc;
//!
//! use auth::{Authenticator, AuthenticationError, ClaimSet, InMemoryRevocationStore, PasswordHasher, TokenCodec};
//! use chrono::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24)).unwrap();
//! let auth = Authenticator::new(
//!     PasswordHasher::new(),
//!     codec,
//!     Arc::new(InMemoryRevocationStore::new()),
//! )
//! .unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let claims = ClaimSet::new("user123", "alice@example.com");
//! let result = auth.authenticate("password123", Some(&hash), &claims).unwrap();
//!
//! // Every request: single acceptance check
//! let decoded = auth.is_authorized(&result.access_token).await.unwrap();
//! assert_eq!(decoded.email(), "alice@example.com");
//!
//! // Logout: the token is dead from now on
//! auth.logout(&result.access_token).await.unwrap();
//! assert!(matches!(
//!     auth.is_authorized(&result.access_token).await,
//!     Err(AuthenticationError::Revoked)
//! ));
//! # }
//! ```

pub mod authenticator;
pub mod clock;
pub mod jwt;
pub mod password;
pub mod revocation;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use jwt::ClaimSet;
pub use jwt::TokenClaims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use revocation::InMemoryRevocationStore;
pub use revocation::RevocationError;
pub use revocation::RevocationStore;
pub use revocation::RevocationSweeper;
