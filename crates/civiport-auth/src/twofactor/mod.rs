//! Time-based one-time-password second factor and backup codes.

pub mod backup;
pub mod enrollment;
pub mod totp;

pub use enrollment::TotpEnrollment;
pub use totp::TotpVerifier;
