//! Command-line front end for the proof-of-work signer.
//!
//! This crate provides:
//! - Argument parsing for the `search`, `quiz`, `sign` and `run` commands
//! - Message input from an argument or piped stdin
//! - Serializable reports of search and signing outcomes

pub mod cli;
pub mod commands;
pub mod input;
pub mod report;

pub use cli::{Cli, Commands};
pub use report::{RunReport, SearchReport, SignReport};
