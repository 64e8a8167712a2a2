use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::ClaimSet;
use super::claims::TokenClaims;
use super::errors::TokenError;
use crate::clock::Clock;
use crate::clock::SystemClock;

/// Signs claim sets into session tokens and validates them again.
///
/// Tokens are HS256 JWTs. The codec holds no mutable state: verification
/// only needs the secret and the clock, so one instance can be shared
/// freely between concurrent requests.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    /// Create a codec with a secret key and token time-to-live.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    /// * `ttl` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `MissingSecret` - Secret is empty
    /// * `InvalidTtl` - TTL is negative, or too large to add to the current time
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], ttl: Duration) -> Result<Self, TokenError> {
        Self::with_clock(secret, ttl, Arc::new(SystemClock))
    }

    /// Create a codec reading time from `clock`.
    pub fn with_clock(
        secret: &[u8],
        ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }
        if ttl < Duration::zero() || clock.now().checked_add_signed(ttl).is_none() {
            return Err(TokenError::InvalidTtl);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl,
            clock,
        })
    }

    /// Configured token time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Issue a signed token for `claims` expiring after the configured TTL.
    ///
    /// The output depends only on the claims, the secret and the current
    /// second, so two issues within the same second yield the same token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, claims: &ClaimSet) -> Result<String, TokenError> {
        self.sign(claims).map(|(token, _)| token)
    }

    /// Issue a token and also return the payload that was signed, so the
    /// caller can report `iat`/`exp` without decoding its own token.
    ///
    /// # Errors
    /// * `InvalidTtl` - Expiry falls outside the representable time range
    /// * `EncodingFailed` - Token encoding failed
    pub fn sign(&self, claims: &ClaimSet) -> Result<(String, TokenClaims), TokenError> {
        let now = self.clock.now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or(TokenError::InvalidTtl)?;
        let token_claims = TokenClaims {
            claims: claims.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(self.algorithm), &token_claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        Ok((token, token_claims))
    }

    /// Validate a token's signature and expiry and return its payload.
    ///
    /// The signature is checked first; expiry is only evaluated for tokens
    /// that were signed with this codec's secret.
    ///
    /// # Errors
    /// * `Malformed` - Not a structurally valid token
    /// * `InvalidSignature` - Signature mismatch (tampered or foreign secret)
    /// * `Expired` - Current time is at or past `exp`
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let token_claims = decode::<TokenClaims>(token, &self.decoding_key, &self.validation())
            .map_err(classify)?
            .claims;

        if token_claims.is_expired(self.clock.now().timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(token_claims)
    }

    /// Decode a token without validation (for inspection only).
    ///
    /// # Errors
    /// * `Malformed` - Token format is invalid
    ///
    /// # Security Warning
    /// This does NOT validate the token signature or expiry. Never trust
    /// claims from this method for authorization decisions.
    pub fn decode_unverified(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = self.validation();
        validation.insecure_disable_signature_validation();

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::Malformed(e.to_string()))
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked against the injected clock, with no leeway
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();
        validation
    }
}

fn classify(error: jsonwebtoken::errors::Error) -> TokenError {
    match error.kind() {
        ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidAlgorithmName => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed(error.to_string()),
    }
}
