//! Heuristic classification of stored field values.
//!
//! Encrypted and legacy-plaintext values share the same columns with no
//! stored flag, so the only way to tell them apart is structure. Ciphertext
//! here is always padded standard base64 of at least one AES block, which
//! gives the rules below. A plaintext that happens to satisfy all four rules
//! WILL be misclassified and routed into decryption — that is an accepted
//! property of the legacy-coexistence strategy, asserted by tests, and must
//! not be "fixed" by adding a schema discriminator.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Decide whether a stored string should be treated as ciphertext.
///
/// Rules, in order:
/// 1. empty, whitespace-only, or shorter than 16 characters — plaintext;
/// 2. contains a space — plaintext (base64 never does);
/// 3. length not a multiple of 4 — plaintext (padded base64 structural rule);
/// 4. otherwise ciphertext iff a standard base64 decode succeeds.
pub fn looks_encrypted(value: &str) -> bool {
    if value.trim().is_empty() || value.len() < 16 {
        return false;
    }
    if value.contains(' ') {
        return false;
    }
    if value.len() % 4 != 0 {
        return false;
    }
    BASE64.decode(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_values_are_plaintext() {
        assert!(!looks_encrypted(""));
        assert!(!looks_encrypted("   "));
        assert!(!looks_encrypted("0123456789")); // 10 chars, never decrypted
        assert!(!looks_encrypted("abc+def=")); // valid base64 but too short
    }

    #[test]
    fn spaces_mean_plaintext() {
        // 24 chars, %4 == 0, but the space disqualifies it
        assert!(!looks_encrypted("John Smithson Terwillige"));
        assert!(!looks_encrypted("AAAAAAAA AAAAAAAAAAAAAAA"));
    }

    #[test]
    fn length_must_be_multiple_of_four() {
        // 17 chars of base64 alphabet
        assert!(!looks_encrypted("abcdefghijklmnopq"));
    }

    #[test]
    fn non_base64_alphabet_is_plaintext() {
        // right shape, but '!' is not base64
        assert!(!looks_encrypted("abcdefghijklmno!"));
        // long phone-with-dashes: '-' is not in the standard alphabet
        assert!(!looks_encrypted("8-900-555-33-22-0000"));
    }

    #[test]
    fn real_ciphertext_shape_is_classified() {
        // base64 of two AES blocks
        assert!(looks_encrypted("qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqA="));
    }

    #[test]
    fn base64_looking_plaintext_misfires() {
        // 16 chars, space-free, %4 == 0, valid base64 — misclassified as
        // ciphertext by design.
        assert!(looks_encrypted("abcdefghijklmnop"));
    }
}
