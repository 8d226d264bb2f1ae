//! Core logic for the proof-of-work signer.
//!
//! This crate provides:
//! - SHA256 hex digests and leading-zero difficulty checks
//! - An exhaustive, time-bounded nonce search over `nickname ++ nonce`
//! - RSA key pair loading, generation and atomic PKCS#1 PEM persistence
//! - PKCS#1 v1.5 SHA256 signing and boolean verification
//! - Environment-driven configuration

pub mod config;
pub mod error;
pub mod hash;
pub mod keys;
pub mod search;
pub mod signing;

pub use config::Config;
pub use error::{ConfigError, KeyError, KeyLoadError, SearchError, SignError};
pub use hash::{candidate, contains_leading_zeros, hash_hex, sha256};
pub use keys::{KeyPair, KeyPairManager};
pub use search::{PowSearcher, PowSolution, SearchParams, SearchStats};
pub use signing::{sign, verify, Signature};
