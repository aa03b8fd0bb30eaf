//! RFC 6238 time-based one-time-password verification.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use subtle::ConstantTimeEq;

use civiport_core::error::AppError;

type HmacSha1 = Hmac<Sha1>;

/// Verifies TOTP codes against a base32-encoded shared secret.
///
/// Codes are accepted within a tolerance of one time step on either side
/// of the current step, which covers clock drift between the server and
/// the authenticator device.
#[derive(Debug, Clone)]
pub struct TotpVerifier {
    /// Time step in seconds.
    step_seconds: u64,
    /// Number of code digits.
    digits: u32,
    /// Accepted steps of drift on either side.
    skew: i64,
}

impl TotpVerifier {
    /// Creates a verifier with the standard 30-second step, 6 digits, and
    /// a one-step tolerance window.
    pub fn new() -> Self {
        Self {
            step_seconds: 30,
            digits: 6,
            skew: 1,
        }
    }

    /// Verifies a code against the secret at the given instant.
    ///
    /// Returns `Ok(true)` on a match within the tolerance window,
    /// `Ok(false)` otherwise.
    pub fn verify_at(
        &self,
        secret_base32: &str,
        code: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let secret = base32::decode(
            base32::Alphabet::Rfc4648 { padding: false },
            secret_base32.trim(),
        )
        .ok_or_else(|| AppError::internal("Stored TOTP secret is not valid base32"))?;

        let step = (at.timestamp().max(0) as u64) / self.step_seconds;

        for offset in -self.skew..=self.skew {
            let counter = step as i64 + offset;
            if counter < 0 {
                continue;
            }
            let expected = self.hotp(&secret, counter as u64)?;
            if expected.as_bytes().ct_eq(code.trim().as_bytes()).into() {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Verifies a code against the secret at the current time.
    pub fn verify(&self, secret_base32: &str, code: &str) -> Result<bool, AppError> {
        self.verify_at(secret_base32, code, Utc::now())
    }

    /// RFC 4226 HOTP: HMAC-SHA1 over the big-endian counter, dynamic
    /// truncation, modulo 10^digits, zero-padded.
    fn hotp(&self, secret: &[u8], counter: u64) -> Result<String, AppError> {
        let mut mac = HmacSha1::new_from_slice(secret)
            .map_err(|e| AppError::internal(format!("Invalid TOTP secret length: {e}")))?;
        mac.update(&counter.to_be_bytes());
        let digest = mac.finalize().into_bytes();

        let offset = (digest[digest.len() - 1] & 0x0f) as usize;
        let binary = ((u32::from(digest[offset]) & 0x7f) << 24)
            | (u32::from(digest[offset + 1]) << 16)
            | (u32::from(digest[offset + 2]) << 8)
            | u32::from(digest[offset + 3]);

        let code = binary % 10u32.pow(self.digits);
        Ok(format!("{code:0width$}", width = self.digits as usize))
    }
}

impl Default for TotpVerifier {
    fn default() -> Self {
        Self::new()
    }
}
