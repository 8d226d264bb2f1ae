//! Command-line arguments.
//!
//! Every option is an override: anything left unset keeps the value read from
//! the environment (and `.env`).

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use powsign_core::config::check_nickname;
use powsign_core::{Config, ConfigError};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Search for a nonce and print `nickname+nonce` to stdout
    Search(SearchArgs),

    /// Search for 4 and then 5 leading zeros, reporting each result
    Quiz {
        /// Nickname used as the hash input prefix
        #[arg(short, long)]
        nickname: Option<String>,
    },

    /// Sign a message and verify the signature
    Sign(SignArgs),

    /// Search for a nonce, then sign and verify the winning input
    Run(SearchArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct SearchArgs {
    /// Nickname used as the hash input prefix
    #[arg(short, long)]
    pub nickname: Option<String>,

    /// Required number of leading zero hex digits
    #[arg(short = 'z', long)]
    pub num_zeros: Option<usize>,

    /// Search time budget in seconds
    #[arg(long, value_name = "SECONDS")]
    pub max_search_time: Option<u64>,

    /// Print a JSON report instead of plain text
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    /// Apply the overrides given on the command line.
    pub fn apply(&self, config: &mut Config) -> Result<(), ConfigError> {
        if let Some(nickname) = &self.nickname {
            check_nickname(nickname)?;
            config.nickname = nickname.clone();
        }
        if let Some(num_zeros) = self.num_zeros {
            config.num_zeros = num_zeros;
        }
        if let Some(secs) = self.max_search_time {
            config.max_search_time = Duration::from_secs(secs);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct SignArgs {
    /// The nickname+nonce string to sign. If not provided, reads from stdin.
    pub message: Option<String>,

    /// Print a JSON report instead of plain text
    #[arg(long)]
    pub json: bool,
}
