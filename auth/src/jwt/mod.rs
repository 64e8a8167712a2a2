pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::ClaimSet;
pub use claims::TokenClaims;
pub use codec::TokenCodec;
pub use errors::TokenError;
