//! RSA key pair lifecycle: load once, otherwise generate and persist.
//!
//! The private key is stored as a PKCS#1 PEM file. The public key is always
//! derived from the private key's modulus and public exponent; the public key
//! file is written for other consumers but never read back.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use rand::rngs::OsRng;
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey, EncodeRsaPublicKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{KeyError, KeyLoadError};

/// Private key files are readable by the owner only.
pub const PRIVATE_KEY_MODE: u32 = 0o600;
/// Public key files are world-readable.
pub const PUBLIC_KEY_MODE: u32 = 0o644;

/// A matched RSA private/public key pair.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyPair {
    pub private: RsaPrivateKey,
    pub public: RsaPublicKey,
}

impl KeyPair {
    /// Build a pair from a private key, deriving the public half.
    pub fn from_private(private: RsaPrivateKey) -> Self {
        let public = private.to_public_key();
        Self { private, public }
    }

    /// Bit length of the modulus.
    pub fn modulus_bits(&self) -> usize {
        self.public.n().bits()
    }

    /// Whether the public key belongs to the private key.
    pub fn matches(&self) -> bool {
        self.private.n() == self.public.n() && self.private.e() == self.public.e()
    }
}

/// Loads the key pair from disk, or generates and stores a new one.
#[derive(Debug, Clone)]
pub struct KeyPairManager {
    private_key_path: PathBuf,
    public_key_path: PathBuf,
    key_size: usize,
}

impl KeyPairManager {
    /// Create a manager for the given key file paths and generation size.
    pub fn new(
        private_key_path: impl Into<PathBuf>,
        public_key_path: impl Into<PathBuf>,
        key_size: usize,
    ) -> Self {
        Self {
            private_key_path: private_key_path.into(),
            public_key_path: public_key_path.into(),
            key_size,
        }
    }

    /// Create a manager from the configured key paths and size.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.private_key_file.clone(),
            config.public_key_file.clone(),
            config.key_size,
        )
    }

    /// Path of the PKCS#1 PEM private key.
    pub fn private_key_path(&self) -> &Path {
        &self.private_key_path
    }

    /// Path of the PKCS#1 PEM public key.
    pub fn public_key_path(&self) -> &Path {
        &self.public_key_path
    }

    /// Return the stored key pair, generating and persisting one if the
    /// private key file is missing or unusable.
    ///
    /// Only failures to store a new key are returned as errors.
    pub fn get_or_create(&self) -> Result<KeyPair, KeyError> {
        info!(
            "Attempting to load keys from {}",
            self.private_key_path.display()
        );

        match self.load() {
            Ok(pair) => {
                info!(
                    "Successfully loaded existing {}-bit key pair",
                    pair.modulus_bits()
                );
                Ok(pair)
            }
            Err(e) => {
                warn!("Could not load existing keys: {}", e);
                info!("Generating new {}-bit RSA key pair...", self.key_size);
                let pair = self.generate()?;
                self.persist(&pair)?;
                Ok(pair)
            }
        }
    }

    /// Read and validate the private key, deriving its public key.
    pub fn load(&self) -> Result<KeyPair, KeyLoadError> {
        let path = &self.private_key_path;
        let pem = fs::read_to_string(path).map_err(|source| KeyLoadError::Read {
            path: path.clone(),
            source,
        })?;

        let private = RsaPrivateKey::from_pkcs1_pem(&pem).map_err(|source| KeyLoadError::Parse {
            path: path.clone(),
            source,
        })?;
        private.validate().map_err(|source| KeyLoadError::Invalid {
            path: path.clone(),
            source,
        })?;

        Ok(KeyPair::from_private(private))
    }

    /// Generate a fresh key pair of the configured size.
    pub fn generate(&self) -> Result<KeyPair, KeyError> {
        let bits = self.key_size;
        let private = RsaPrivateKey::new(&mut OsRng, bits)
            .map_err(|source| KeyError::Generate { bits, source })?;
        Ok(KeyPair::from_private(private))
    }

    /// Write both keys as PKCS#1 PEM, private key first.
    pub fn persist(&self, pair: &KeyPair) -> Result<(), KeyError> {
        let private_path = &self.private_key_path;
        let private_pem = pair
            .private
            .to_pkcs1_pem(LineEnding::LF)
            .map_err(|source| encode_error(private_path, source))?;
        write_atomically(private_path, private_pem.as_bytes(), PRIVATE_KEY_MODE)?;
        info!("Saved private key to {}", self.private_key_path.display());

        let public_path = &self.public_key_path;
        let public_pem = pair
            .public
            .to_pkcs1_pem(LineEnding::LF)
            .map_err(|source| encode_error(public_path, source))?;
        write_atomically(public_path, public_pem.as_bytes(), PUBLIC_KEY_MODE)?;
        info!("Saved public key to {}", self.public_key_path.display());

        Ok(())
    }
}

fn encode_error(path: &Path, source: rsa::pkcs1::Error) -> KeyError {
    KeyError::Encode {
        path: path.to_path_buf(),
        source,
    }
}

/// Write `contents` to a temporary file beside `path` and rename it into place.
///
/// The temporary file is given `mode` before the rename, so the final file
/// never appears with other permissions.
fn write_atomically(path: &Path, contents: &[u8], mode: u32) -> Result<(), KeyError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|source| KeyError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let write_err = |source: io::Error| KeyError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(contents).map_err(write_err)?;
    set_mode(file.as_file(), mode).map_err(write_err)?;
    file.as_file().sync_all().map_err(write_err)?;
    file.persist(path).map_err(|e| write_err(e.error))?;

    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

#[cfg(unix)]
fn set_mode(file: &File, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_file: &File, _mode: u32) -> io::Result<()> {
    Ok(())
}
