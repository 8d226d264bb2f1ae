//! SHA256 hashing and leading-zero difficulty checks.

use sha2::{Digest, Sha256};

/// Length of a hex-encoded SHA256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Single SHA256 hash.
#[inline]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let hash = Sha256::digest(data);
    let mut result = [0u8; 32];
    result.copy_from_slice(&hash);
    result
}

/// Hex-encoded SHA256 of the UTF-8 bytes of `text`.
pub fn hash_hex(text: &str) -> String {
    hex::encode(sha256(text.as_bytes()))
}

/// Build the hash input for a nonce: the nickname followed by the decimal nonce.
pub fn candidate(nickname: &str, nonce: u64) -> String {
    format!("{nickname}{nonce}")
}

/// Check whether the first `num_zeros` characters of `digest` are all `'0'`.
///
/// A requirement of zero is met by any digest, including the empty string.
/// A digest shorter than `num_zeros` never meets it.
#[inline]
pub fn contains_leading_zeros(digest: &str, num_zeros: usize) -> bool {
    let bytes = digest.as_bytes();
    bytes.len() >= num_zeros && bytes[..num_zeros].iter().all(|&b| b == b'0')
}

/// Count the leading `'0'` characters of a hex digest.
pub fn count_leading_zero_digits(digest: &str) -> usize {
    digest.bytes().take_while(|&b| b == b'0').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256() {
        let hash = sha256(b"hello");
        let expected = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

        assert_eq!(hex::encode(hash), expected);
    }

    #[test]
    fn test_hash_hex_empty_string() {
        assert_eq!(
            hash_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_hash_hex_is_deterministic() {
        let first = hash_hex("test123");
        let second = hash_hex("test123");
        assert_eq!(first, second);
        assert_eq!(first.len(), DIGEST_HEX_LEN);
    }

    #[test]
    fn test_hash_hex_unicode() {
        // Multi-byte characters are hashed as their UTF-8 encoding
        let expected = hex::encode(sha256("hello世界".as_bytes()));
        assert_eq!(hash_hex("hello世界"), expected);
    }

    #[test]
    fn test_candidate() {
        assert_eq!(candidate("dewei", 0), "dewei0");
        assert_eq!(candidate("dewei", 108568), "dewei108568");
        assert_eq!(candidate("", 42), "42");
    }

    #[test]
    fn test_contains_leading_zeros() {
        assert!(contains_leading_zeros("0000abc", 4));
        assert!(contains_leading_zeros("000abc", 3));
        assert!(contains_leading_zeros("0abc", 1));

        assert!(!contains_leading_zeros("000abc", 4));
        assert!(!contains_leading_zeros("0abc", 2));
        assert!(!contains_leading_zeros("abc", 1));

        // Exact length
        assert!(contains_leading_zeros("0000", 4));
        assert!(!contains_leading_zeros("000", 4));
    }

    #[test]
    fn test_contains_leading_zeros_zero_requirement() {
        assert!(contains_leading_zeros("abc", 0));
        assert!(contains_leading_zeros("0abc", 0));
        assert!(contains_leading_zeros("", 0));
        assert!(!contains_leading_zeros("", 1));
    }

    #[test]
    fn test_known_winning_candidate() {
        let digest = hash_hex("dewei108568");
        assert_eq!(
            digest,
            "0000e0ce2f4aa27d958d74a004dde37b7b3ffb9e9de5f3753b07277d60862e9a"
        );
        assert!(contains_leading_zeros(&digest, 4));
        assert!(!contains_leading_zeros(&digest, 5));
    }

    #[test]
    fn test_count_leading_zero_digits() {
        assert_eq!(count_leading_zero_digits("000442c7"), 3);
        assert_eq!(count_leading_zero_digits("abc"), 0);
        assert_eq!(count_leading_zero_digits(""), 0);
        let all_zeros = "0".repeat(DIGEST_HEX_LEN);
        assert_eq!(count_leading_zero_digits(&all_zeros), DIGEST_HEX_LEN);
    }
}
