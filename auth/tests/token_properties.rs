//! Property-based tests for session tokens and the revocation registry
//!
//! These tests verify:
//! - Tokens roundtrip their claim set before expiry
//! - Tokens signed with another secret are always rejected as bad signatures
//! - Expiry boundary is exact: valid before `iat + ttl`, expired from then on
//! - Arbitrary strings never verify and never panic
//! - Revocation is idempotent and never reports unrevoked tokens

use std::sync::Arc;

use auth::ClaimSet;
use auth::InMemoryRevocationStore;
use auth::ManualClock;
use auth::RevocationStore;
use auth::TokenCodec;
use auth::TokenError;
use chrono::DateTime;
use chrono::Duration;
use proptest::prelude::*;

const START: i64 = 1_700_000_000;

fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(DateTime::from_timestamp(START, 0).unwrap()))
}

// ============================================================================
// Strategies
// ============================================================================

fn arb_claim_set() -> impl Strategy<Value = ClaimSet> {
    (
        "[a-f0-9-]{1,36}",
        "[a-z0-9_.+-]+@[a-z0-9.-]+\\.[a-z]{2,4}",
        prop::collection::hash_map("[a-z]{5,12}", "[ -~]{0,20}", 0..4),
    )
        .prop_map(|(sub, email, extra)| {
            extra
                .into_iter()
                .fold(ClaimSet::new(sub, email), |claims, (k, v)| {
                    claims.with_extra(k, v)
                })
        })
}

fn arb_secret() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 32..64)
}

// ============================================================================
// Codec properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn verify_returns_issued_claims(
        claims in arb_claim_set(),
        secret in arb_secret(),
        ttl_secs in 1i64..86_400,
    ) {
        let codec = TokenCodec::with_clock(&secret, Duration::seconds(ttl_secs), clock()).unwrap();
        let token = codec.issue(&claims).unwrap();

        let decoded = codec.verify(&token).unwrap();
        prop_assert_eq!(decoded.claims, claims);
        prop_assert_eq!(decoded.iat, START);
        prop_assert_eq!(decoded.exp, START + ttl_secs);
    }

    #[test]
    fn other_secret_is_invalid_signature(
        claims in arb_claim_set(),
        secret1 in arb_secret(),
        secret2 in arb_secret(),
    ) {
        prop_assume!(secret1 != secret2);

        let issuer = TokenCodec::with_clock(&secret1, Duration::hours(1), clock()).unwrap();
        let verifier = TokenCodec::with_clock(&secret2, Duration::hours(1), clock()).unwrap();
        let token = issuer.issue(&claims).unwrap();

        prop_assert_eq!(verifier.verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn expiry_boundary_is_exact(
        ttl_secs in 0i64..10_000,
        elapsed in 0i64..20_000,
    ) {
        let clock = clock();
        let codec = TokenCodec::with_clock(
            b"property_secret_at_least_32_bytes!",
            Duration::seconds(ttl_secs),
            clock.clone(),
        )
        .unwrap();
        let token = codec.issue(&ClaimSet::new("user", "a@x.com")).unwrap();

        clock.advance(Duration::seconds(elapsed));
        let result = codec.verify(&token);

        if elapsed < ttl_secs {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result, Err(TokenError::Expired));
        }
    }

    #[test]
    fn arbitrary_strings_never_verify(input in "\\PC{0,200}") {
        let codec = TokenCodec::new(b"property_secret_at_least_32_bytes!", Duration::hours(1)).unwrap();
        let result = codec.verify(&input);
        prop_assert!(
            matches!(
                result,
                Err(TokenError::Malformed(_)) | Err(TokenError::InvalidSignature)
            ),
            "unexpected result {:?}",
            result
        );
    }

    #[test]
    fn flipped_signature_character_is_rejected(
        claims in arb_claim_set(),
        position in any::<prop::sample::Index>(),
    ) {
        let codec = TokenCodec::with_clock(
            b"property_secret_at_least_32_bytes!",
            Duration::hours(1),
            clock(),
        )
        .unwrap();
        let token = codec.issue(&claims).unwrap();

        let dot = token.rfind('.').unwrap();
        let signature = &token[dot + 1..];
        let i = position.index(signature.len());
        let original = signature.as_bytes()[i];
        let replacement = if original == b'A' { b'B' } else { b'A' };

        let mut tampered = token.clone().into_bytes();
        tampered[dot + 1 + i] = replacement;
        let tampered = String::from_utf8(tampered).unwrap();

        prop_assert!(codec.verify(&tampered).is_err());
    }
}

// ============================================================================
// Revocation properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn revoke_is_idempotent(token in "[A-Za-z0-9._-]{1,64}", times in 1usize..5) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        runtime.block_on(async {
            let store = InMemoryRevocationStore::new();
            let expires_at = DateTime::from_timestamp(START, 0).unwrap();

            for _ in 0..times {
                store.revoke(&token, expires_at).await.unwrap();
            }

            assert!(store.is_revoked(&token).await.unwrap());
            assert_eq!(store.len().await.unwrap(), 1);
        });
    }

    #[test]
    fn unrevoked_tokens_are_never_reported(
        revoked in prop::collection::hash_set("[a-z]{8}", 0..20),
        other in "[A-Z]{8}",
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        runtime.block_on(async {
            let store = InMemoryRevocationStore::new();
            let expires_at = DateTime::from_timestamp(START, 0).unwrap();

            for token in &revoked {
                store.revoke(token, expires_at).await.unwrap();
            }

            assert!(!store.is_revoked(&other).await.unwrap());
        });
    }
}
