//! Proof-of-work nonce search.
//!
//! Candidates are `nickname ++ decimal(nonce)` with the nonce counting up from
//! zero. The first candidate whose hex SHA256 digest starts with the required
//! number of `'0'` digits wins. The search is single-threaded and ordered, so
//! the same inputs always produce the same winner.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::SearchError;
use crate::hash::{
    candidate, contains_leading_zeros, count_leading_zero_digits, hash_hex, DIGEST_HEX_LEN,
};

/// Default interval between progress log lines.
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_secs(60);

/// Search statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Total hashes computed.
    pub hashes_computed: u64,
    /// Elapsed time in milliseconds.
    pub elapsed_ms: f64,
    /// Hash rate (hashes per second).
    pub hash_rate: f64,
    /// Digest with the most leading zeros seen so far.
    pub best_hash: Option<String>,
    /// Number of leading zero digits in `best_hash`.
    pub best_leading_zeros: usize,
    /// Progress log lines emitted.
    pub progress_reports: u64,
}

impl SearchStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update hash rate based on elapsed time.
    pub fn update_hash_rate(&mut self) {
        if self.elapsed_ms > 0.0 {
            self.hash_rate = (self.hashes_computed as f64) / (self.elapsed_ms / 1000.0);
        }
    }

    /// Format hash rate for display.
    pub fn format_hash_rate(&self) -> String {
        if self.hash_rate >= 1_000_000_000.0 {
            format!("{:.2} GH/s", self.hash_rate / 1_000_000_000.0)
        } else if self.hash_rate >= 1_000_000.0 {
            format!("{:.2} MH/s", self.hash_rate / 1_000_000.0)
        } else if self.hash_rate >= 1_000.0 {
            format!("{:.2} KH/s", self.hash_rate / 1_000.0)
        } else {
            format!("{:.2} H/s", self.hash_rate)
        }
    }

    fn record(&mut self, digest: &str) {
        self.hashes_computed += 1;
        let zeros = count_leading_zero_digits(digest);
        if self.best_hash.is_none() || zeros > self.best_leading_zeros {
            self.best_hash = Some(digest.to_string());
            self.best_leading_zeros = zeros;
        }
    }

    fn finish(&mut self, elapsed: Duration) {
        self.elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        self.update_hash_rate();
    }
}

/// Parameters of a single search.
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Fixed prefix of every candidate.
    pub nickname: String,
    /// Required number of leading `'0'` hex digits.
    pub num_zeros: usize,
    /// Wall-clock budget for the whole search.
    pub time_budget: Duration,
    /// How often to log progress while searching.
    pub progress_interval: Duration,
}

impl SearchParams {
    /// Parameters with the default progress interval.
    pub fn new(nickname: impl Into<String>, num_zeros: usize, time_budget: Duration) -> Self {
        Self {
            nickname: nickname.into(),
            num_zeros,
            time_budget,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    /// Build search parameters from the process configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.nickname.clone(),
            config.num_zeros,
            config.max_search_time,
        )
    }

    /// Log progress every `interval` instead. A zero interval disables it.
    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }
}

/// A winning candidate.
#[derive(Debug, Clone)]
pub struct PowSolution {
    /// The winning input string, `nickname ++ nonce`.
    pub candidate: String,
    /// The winning nonce.
    pub nonce: u64,
    /// Hex digest of `candidate`.
    pub hash: String,
    /// Time spent searching.
    pub elapsed: Duration,
    /// Statistics gathered during the search.
    pub stats: SearchStats,
}

/// Exhaustive, ordered nonce searcher.
#[derive(Debug, Clone)]
pub struct PowSearcher {
    params: SearchParams,
}

impl PowSearcher {
    /// Create a searcher for `params`.
    pub fn new(params: SearchParams) -> Self {
        Self { params }
    }

    /// Run the search until a candidate wins or the time budget expires.
    ///
    /// The budget is checked after every hash, so the hash already in flight
    /// always completes. A requirement of zero wins on nonce 0.
    pub fn search(&self) -> Result<PowSolution, SearchError> {
        let SearchParams {
            nickname,
            num_zeros,
            time_budget,
            progress_interval,
        } = &self.params;

        info!(
            "Searching nonce for {} with {} leading hash zeros ...",
            nickname, num_zeros
        );
        if *num_zeros > DIGEST_HEX_LEN {
            warn!(
                "{} leading zeros exceeds the {}-digit digest; the search will run until timeout",
                num_zeros, DIGEST_HEX_LEN
            );
        }

        let start = Instant::now();
        let mut stats = SearchStats::new();
        let mut next_report = *progress_interval;

        for nonce in 0..=u64::MAX {
            let input = candidate(nickname, nonce);
            let digest = hash_hex(&input);
            stats.record(&digest);

            if contains_leading_zeros(&digest, *num_zeros) {
                let elapsed = start.elapsed();
                stats.finish(elapsed);

                info!("Time taken: {:.4} seconds", elapsed.as_secs_f64());
                info!("Found nonce: {}", nonce);
                info!("Hash value: {}", digest);

                return Ok(PowSolution {
                    candidate: input,
                    nonce,
                    hash: digest,
                    elapsed,
                    stats,
                });
            }

            let elapsed = start.elapsed();
            if elapsed > *time_budget {
                return Err(SearchError::TimedOut {
                    nickname: nickname.clone(),
                    num_zeros: *num_zeros,
                    budget: *time_budget,
                    hashes: stats.hashes_computed,
                });
            }

            if !progress_interval.is_zero() && elapsed >= next_report {
                info!(
                    "Duration: {} minutes, count of searches: {}",
                    elapsed.as_secs() / 60,
                    stats.hashes_computed
                );
                stats.progress_reports += 1;
                next_report += *progress_interval;
                if next_report <= elapsed {
                    next_report = elapsed + *progress_interval;
                }
            }
        }

        Err(SearchError::NonceSpaceExhausted {
            nickname: nickname.clone(),
        })
    }
}
