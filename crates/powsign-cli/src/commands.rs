//! Command implementations.
//!
//! The search stage writes only the winning input to stdout so it can be piped
//! into the signing stage; everything else goes to the log on stderr.

use std::io::{Read, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use powsign_core::config::check_nickname;
use powsign_core::{
    sign, verify, Config, KeyPair, KeyPairManager, PowSearcher, PowSolution, SearchParams,
};
use tracing::info;

use crate::cli::{Cli, Commands};
use crate::input::resolve_message;
use crate::report::{RunReport, SearchReport, SignReport};

/// Difficulties searched by the `quiz` command, in order.
pub const QUIZ_DIFFICULTIES: [usize; 2] = [4, 5];

/// How a command that completed without error ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The signature was produced but did not verify against the public key.
    VerificationFailed,
}

impl Outcome {
    fn from_verified(verified: bool) -> Self {
        if verified {
            Outcome::Success
        } else {
            Outcome::VerificationFailed
        }
    }

    /// Process exit status for this outcome.
    pub fn code(self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::VerificationFailed => 1,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.code())
    }
}

/// Dispatch a parsed command line against `config`.
///
/// `stdin` is only read by `sign` when no message argument is given. The message
/// is resolved before any key file is touched, so missing input never creates keys.
pub fn execute<R: Read>(
    cli: Cli,
    mut config: Config,
    stdin: R,
    out: &mut dyn Write,
) -> Result<Outcome> {
    match cli.command {
        Commands::Search(args) => {
            args.apply(&mut config)?;
            search(&config, args.json, out)?;
            Ok(Outcome::Success)
        }

        Commands::Quiz { nickname } => {
            if let Some(nickname) = nickname {
                check_nickname(&nickname)?;
                config.nickname = nickname;
            }
            quiz(&config, out)?;
            Ok(Outcome::Success)
        }

        Commands::Sign(args) => {
            let message = resolve_message(args.message, stdin)?;
            let report = sign_message(&config, &message, args.json, out)?;
            Ok(Outcome::from_verified(report.verified))
        }

        Commands::Run(args) => {
            args.apply(&mut config)?;
            let report = run(&config, args.json, out)?;
            Ok(Outcome::from_verified(report.sign.verified))
        }
    }
}

/// Run one search with the configured nickname, difficulty and budget.
pub fn find_nonce(config: &Config) -> Result<PowSolution> {
    let searcher = PowSearcher::new(SearchParams::from_config(config));
    let solution = searcher.search()?;
    info!(
        "Searched {} hashes at {}",
        solution.stats.hashes_computed,
        solution.stats.format_hash_rate()
    );
    Ok(solution)
}

/// `search`: print the winning candidate (or a JSON report).
pub fn search(config: &Config, json: bool, out: &mut dyn Write) -> Result<SearchReport> {
    let solution = find_nonce(config)?;
    let report = SearchReport::new(&solution, config.num_zeros);

    if json {
        writeln!(out, "{}", report.to_json()?)?;
    } else {
        writeln!(out, "{}", report.candidate)?;
    }
    out.flush()?;
    Ok(report)
}

/// `quiz`: search for each of [`QUIZ_DIFFICULTIES`] and report time, input and hash.
pub fn quiz(config: &Config, out: &mut dyn Write) -> Result<Vec<SearchReport>> {
    let mut reports = Vec::with_capacity(QUIZ_DIFFICULTIES.len());

    for num_zeros in QUIZ_DIFFICULTIES {
        let config = Config {
            num_zeros,
            ..config.clone()
        };
        let solution = find_nonce(&config)?;
        let report = SearchReport::new(&solution, num_zeros);

        let secs = report.elapsed_ms / 1000.0;
        writeln!(out, "{} leading zeros:", num_zeros)?;
        writeln!(out, "  Time taken: {:.4} seconds", secs)?;
        writeln!(out, "  Input: {}", report.candidate)?;
        writeln!(out, "  Hash: {}", report.hash)?;
        reports.push(report);
    }

    out.flush()?;
    Ok(reports)
}

/// Sign `message` with `keys` and check the signature with the public key.
pub fn sign_and_verify(keys: &KeyPair, message: &str) -> Result<SignReport> {
    let signature = sign(&keys.private, message).context("failed to sign message")?;
    let verified = verify(&keys.public, message, signature.as_bytes());
    info!("Signature verified: {}", verified);
    Ok(SignReport::new(message, &signature, keys, verified))
}

/// `sign`: load or create the key pair, sign `message`, verify it.
pub fn sign_message(
    config: &Config,
    message: &str,
    json: bool,
    out: &mut dyn Write,
) -> Result<SignReport> {
    info!("{0} Starting RSA sign and verify {0}", "#".repeat(20));
    let keys = KeyPairManager::from_config(config)
        .get_or_create()
        .context("failed to prepare key pair")?;
    let report = sign_and_verify(&keys, message)?;

    if json {
        writeln!(out, "{}", report.to_json()?)?;
    } else {
        for line in report.to_lines() {
            writeln!(out, "{}", line)?;
        }
    }
    out.flush()?;
    Ok(report)
}

/// `run`: search, then sign and verify the winning candidate.
pub fn run(config: &Config, json: bool, out: &mut dyn Write) -> Result<RunReport> {
    let solution = find_nonce(config)?;
    let search = SearchReport::new(&solution, config.num_zeros);
    let keys = KeyPairManager::from_config(config)
        .get_or_create()
        .context("failed to prepare key pair")?;
    let sign = sign_and_verify(&keys, &solution.candidate)?;
    let report = RunReport { search, sign };

    if json {
        writeln!(out, "{}", report.to_json()?)?;
    } else {
        writeln!(out, "Input: {}", report.search.candidate)?;
        writeln!(out, "Hash: {}", report.search.hash)?;
        for line in report.sign.to_lines() {
            writeln!(out, "{}", line)?;
        }
    }
    out.flush()?;
    Ok(report)
}
