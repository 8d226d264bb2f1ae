//! Error types for the search, key, signing and configuration layers.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Nonce search failures.
#[derive(Debug, Error)]
pub enum SearchError {
    /// No candidate met the requirement before the time budget ran out.
    #[error(
        "nonce not found after {}s for {nickname} to have {num_zeros} leading zeros ({hashes} hashes)",
        .budget.as_secs_f64()
    )]
    TimedOut {
        nickname: String,
        num_zeros: usize,
        budget: Duration,
        hashes: u64,
    },
    /// Every `u64` nonce was tried without a match.
    #[error("nonce space exhausted for {nickname}")]
    NonceSpaceExhausted { nickname: String },
}

/// Reasons an existing private key could not be used.
///
/// These never reach the caller of [`crate::KeyPairManager::get_or_create`];
/// any of them triggers regeneration.
#[derive(Debug, Error)]
pub enum KeyLoadError {
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not a PKCS#1 PEM private key: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: rsa::pkcs1::Error,
    },
    #[error("{} holds an inconsistent RSA key: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: rsa::Error,
    },
}

/// Fatal key pair errors.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("failed to generate a {bits}-bit RSA key: {source}")]
    Generate {
        bits: usize,
        #[source]
        source: rsa::Error,
    },
    #[error("failed to encode key for {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: rsa::pkcs1::Error,
    },
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write key file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Signing failures.
#[derive(Debug, Error)]
pub enum SignError {
    /// The key is too small to hold the encoded digest, or the primitive failed.
    #[error("RSA signing failed: {0}")]
    Rsa(#[from] rsa::Error),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    /// The winning candidate must fit on one line of the pipeline.
    #[error("nickname must be a single line: {0:?}")]
    MultilineNickname(String),
}
