use thiserror::Error;

/// Error type for token codec operations.
///
/// `Malformed`, `InvalidSignature` and `Expired` are terminal for the given
/// token: the holder has to authenticate again.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token signing secret is missing")]
    MissingSecret,

    #[error("Token time-to-live must not be negative")]
    InvalidTtl,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,
}
