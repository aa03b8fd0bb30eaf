//! Second-factor enrollment: secret and backup-code provisioning.

use rand::RngCore;

use super::backup;

/// Number of backup codes issued at enrollment.
const BACKUP_CODE_COUNT: usize = 10;

/// Material produced when an account enrolls a second factor.
///
/// `secret` and `backup_codes` are shown to the user once; the account row
/// stores the secret and the `backup_code_digests` only.
#[derive(Debug, Clone)]
pub struct TotpEnrollment {
    /// Base32-encoded shared secret for the authenticator app.
    pub secret: String,
    /// Plaintext backup codes, `XXXX-XXXX` form.
    pub backup_codes: Vec<String>,
    /// SHA-256 hex digests of the backup codes, ready to persist.
    pub backup_code_digests: Vec<String>,
}

impl TotpEnrollment {
    /// Generate a fresh secret (160 bits, per RFC 4226's recommendation
    /// for HMAC-SHA1) and a set of backup codes.
    pub fn generate() -> Self {
        let mut secret_bytes = [0u8; 20];
        rand::rng().fill_bytes(&mut secret_bytes);
        let secret = base32::encode(base32::Alphabet::Rfc4648 { padding: false }, &secret_bytes);

        let backup_codes = backup::generate_codes(BACKUP_CODE_COUNT);
        let backup_code_digests = backup_codes.iter().map(|c| backup::digest(c)).collect();

        Self {
            secret,
            backup_codes,
            backup_code_digests,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::twofactor::TotpVerifier;

    #[test]
    fn test_generated_secret_is_usable() {
        let enrollment = TotpEnrollment::generate();
        // The verifier must at least be able to decode the secret.
        let result = TotpVerifier::new().verify(&enrollment.secret, "000000");
        assert!(result.is_ok());
    }

    #[test]
    fn test_digests_match_codes() {
        let enrollment = TotpEnrollment::generate();
        assert_eq!(enrollment.backup_codes.len(), 10);
        for (code, stored) in enrollment
            .backup_codes
            .iter()
            .zip(&enrollment.backup_code_digests)
        {
            assert_eq!(&backup::digest(code), stored);
        }
    }
}
