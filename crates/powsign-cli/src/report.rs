//! Outcome records printed by the commands.

use powsign_core::{KeyPair, PowSolution, Signature};
use serde::{Deserialize, Serialize};

/// Number of signature hex digits shown in plain-text output.
pub const SIGNATURE_PREVIEW_LEN: usize = 16;

/// Result of a nonce search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport {
    /// The winning input, `nickname+nonce`.
    pub candidate: String,
    /// The winning nonce.
    pub nonce: u64,
    /// Hex digest of the candidate.
    pub hash: String,
    /// Required leading zeros.
    pub num_zeros: usize,
    /// Elapsed time in milliseconds.
    pub elapsed_ms: f64,
    /// Hashes computed.
    pub hashes_computed: u64,
    /// Formatted hash rate.
    pub hash_rate: String,
}

impl SearchReport {
    pub fn new(solution: &PowSolution, num_zeros: usize) -> Self {
        SearchReport {
            candidate: solution.candidate.clone(),
            nonce: solution.nonce,
            hash: solution.hash.clone(),
            num_zeros,
            elapsed_ms: solution.stats.elapsed_ms,
            hashes_computed: solution.stats.hashes_computed,
            hash_rate: solution.stats.format_hash_rate(),
        }
    }

    /// Convert to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Result of signing and verifying a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignReport {
    /// The signed message.
    pub message: String,
    /// Full signature, hex encoded.
    pub signature: String,
    /// Modulus size of the signing key.
    pub key_bits: usize,
    /// Whether the signature verified under the public key.
    pub verified: bool,
}

impl SignReport {
    pub fn new(message: &str, signature: &Signature, keys: &KeyPair, verified: bool) -> Self {
        SignReport {
            message: message.to_string(),
            signature: signature.to_hex(),
            key_bits: keys.modulus_bits(),
            verified,
        }
    }

    /// Leading hex digits of the signature for display.
    pub fn signature_preview(&self) -> &str {
        let end = self.signature.len().min(SIGNATURE_PREVIEW_LEN);
        &self.signature[..end]
    }

    /// Plain-text lines for stdout.
    pub fn to_lines(&self) -> [String; 3] {
        [
            format!("Signature (hex): {}...", self.signature_preview()),
            format!("Message: {}", self.message),
            format!("Signature verified: {}", self.verified),
        ]
    }

    /// Convert to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Combined result of the `run` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub search: SearchReport,
    pub sign: SignReport,
}

impl RunReport {
    /// Convert to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
