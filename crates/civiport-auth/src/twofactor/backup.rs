//! Single-use backup codes for second-factor recovery.
//!
//! Codes are stored only as SHA-256 hex digests of their normalized form.
//! A successful match consumes the code: the caller persists the reduced
//! digest list, so replaying the same code fails.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Alphabet for generated codes. Excludes 0/O and 1/I to avoid
/// transcription mistakes.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Number of alphabet characters per generated code.
const CODE_LENGTH: usize = 8;

/// Normalize a user-supplied code: uppercase, with every non-alphanumeric
/// character stripped. `"abcd-efgh"` and `"ABCD EFGH"` hash identically.
pub fn normalize(code: &str) -> String {
    code.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// SHA-256 hex digest of the normalized code. This is the stored form.
pub fn digest(code: &str) -> String {
    hex::encode(Sha256::digest(normalize(code).as_bytes()))
}

/// Find the index of the stored digest matching the candidate code, using
/// a constant-time comparison per entry. Every entry is compared even
/// after a hit so the scan time does not depend on the match position.
pub fn find_match(stored_digests: &[String], candidate: &str) -> Option<usize> {
    let candidate_digest = digest(candidate);
    let mut found = None;

    for (index, stored) in stored_digests.iter().enumerate() {
        let matched: bool = stored
            .as_bytes()
            .ct_eq(candidate_digest.as_bytes())
            .into();
        if matched && found.is_none() {
            found = Some(index);
        }
    }

    found
}

/// Generate `count` fresh plaintext codes in `XXXX-XXXX` form. Shown to
/// the user exactly once; only digests are stored.
pub fn generate_codes(count: usize) -> Vec<String> {
    use rand::Rng;
    let mut rng = rand::rng();

    (0..count)
        .map(|_| {
            let chars: String = (0..CODE_LENGTH)
                .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
                .collect();
            format!("{}-{}", &chars[..4], &chars[4..])
        })
        .collect()
}
