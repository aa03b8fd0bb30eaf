//! Signed session tokens: claims, issuance, verification.

pub mod claims;
pub mod issuer;
pub mod verifier;

pub use claims::SessionClaims;
pub use issuer::{SessionIssuer, SignedSession};
pub use verifier::{SessionVerifier, TokenError};
