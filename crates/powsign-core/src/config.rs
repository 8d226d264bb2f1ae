//! Process configuration.
//!
//! Built once at start-up from the environment and passed by reference to the
//! searcher and the key pair manager.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_NICKNAME: &str = "dewei";
pub const DEFAULT_NUM_ZEROS: usize = 4;
/// 10 minutes.
pub const DEFAULT_MAX_SEARCH_TIME: Duration = Duration::from_secs(600);
pub const DEFAULT_PRIVATE_KEY_FILE: &str = "private_key.pem";
pub const DEFAULT_PUBLIC_KEY_FILE: &str = "public_key.pem";
pub const DEFAULT_KEY_SIZE: usize = 2048;

/// Environment variable names.
pub mod env {
    pub const NICK_NAME: &str = "NICK_NAME";
    pub const NUM_ZEROS: &str = "NUM_ZEROS";
    pub const MAX_SEARCH_TIME: &str = "MAX_SEARCH_TIME";
    pub const PRIVATE_KEY_FILE: &str = "PRIVATE_KEY_FILE";
    pub const PUBLIC_KEY_FILE: &str = "PUBLIC_KEY_FILE";
    pub const KEY_SIZE: &str = "KEY_SIZE";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Prefix of every search candidate.
    pub nickname: String,
    /// Required number of leading zero hex digits.
    pub num_zeros: usize,
    /// Search time budget.
    pub max_search_time: Duration,
    /// Where the PKCS#1 PEM private key lives.
    pub private_key_file: PathBuf,
    /// Where the PKCS#1 PEM public key is written.
    pub public_key_file: PathBuf,
    /// Modulus size in bits for newly generated keys.
    pub key_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nickname: DEFAULT_NICKNAME.to_string(),
            num_zeros: DEFAULT_NUM_ZEROS,
            max_search_time: DEFAULT_MAX_SEARCH_TIME,
            private_key_file: PathBuf::from(DEFAULT_PRIVATE_KEY_FILE),
            public_key_file: PathBuf::from(DEFAULT_PUBLIC_KEY_FILE),
            key_size: DEFAULT_KEY_SIZE,
        }
    }
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`.
    ///
    /// Unset or empty variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Config::default();

        if let Some(nickname) = get(env::NICK_NAME) {
            check_nickname(&nickname)?;
            config.nickname = nickname;
        }
        if let Some(value) = get(env::NUM_ZEROS) {
            config.num_zeros = parse(env::NUM_ZEROS, &value)?;
        }
        if let Some(value) = get(env::MAX_SEARCH_TIME) {
            config.max_search_time = Duration::from_secs(parse(env::MAX_SEARCH_TIME, &value)?);
        }
        if let Some(path) = get(env::PRIVATE_KEY_FILE) {
            config.private_key_file = PathBuf::from(path);
        }
        if let Some(path) = get(env::PUBLIC_KEY_FILE) {
            config.public_key_file = PathBuf::from(path);
        }
        if let Some(value) = get(env::KEY_SIZE) {
            config.key_size = parse(env::KEY_SIZE, &value)?;
        }

        Ok(config)
    }
}

/// Reject nicknames containing line breaks.
pub fn check_nickname(nickname: &str) -> Result<(), ConfigError> {
    if nickname.contains(['\n', '\r']) {
        return Err(ConfigError::MultilineNickname(nickname.to_string()));
    }
    Ok(())
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.nickname, "dewei");
        assert_eq!(config.num_zeros, 4);
        assert_eq!(config.max_search_time, Duration::from_secs(600));
        assert_eq!(config.private_key_file, PathBuf::from("private_key.pem"));
        assert_eq!(config.public_key_file, PathBuf::from("public_key.pem"));
        assert_eq!(config.key_size, 2048);
    }

    #[test]
    fn test_overrides() {
        let vars = [
            ("NICK_NAME", "alice"),
            ("NUM_ZEROS", "5"),
            ("MAX_SEARCH_TIME", "30"),
            ("PRIVATE_KEY_FILE", "keys/priv.pem"),
            ("PUBLIC_KEY_FILE", "keys/pub.pem"),
            ("KEY_SIZE", " 1024 "),
        ];
        let config = Config::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.nickname, "alice");
        assert_eq!(config.num_zeros, 5);
        assert_eq!(config.max_search_time, Duration::from_secs(30));
        assert_eq!(config.private_key_file, PathBuf::from("keys/priv.pem"));
        assert_eq!(config.public_key_file, PathBuf::from("keys/pub.pem"));
        assert_eq!(config.key_size, 1024);
    }

    #[test]
    fn test_empty_values_keep_defaults() {
        let vars = [("PRIVATE_KEY_FILE", ""), ("KEY_SIZE", "  ")];
        let config = Config::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.private_key_file, PathBuf::from(DEFAULT_PRIVATE_KEY_FILE));
        assert_eq!(config.key_size, DEFAULT_KEY_SIZE);
    }

    #[test]
    fn test_invalid_number() {
        let vars = [("KEY_SIZE", "big")];
        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        match err {
            ConfigError::Invalid { key, value } => {
                assert_eq!(key, "KEY_SIZE");
                assert_eq!(value, "big");
            }
            other => panic!("unexpected error: {other}"),
        }

        let vars = [("NUM_ZEROS", "-1")];
        assert!(Config::from_lookup(lookup(&vars)).is_err());
    }

    #[test]
    fn test_multiline_nickname_rejected() {
        let vars = [("NICK_NAME", "dewei\nforged")];
        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::MultilineNickname(_)));

        assert!(check_nickname("dewei\r").is_err());
        assert!(check_nickname("dewei").is_ok());
    }
}
