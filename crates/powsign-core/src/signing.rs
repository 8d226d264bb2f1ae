//! RSASSA-PKCS1-v1_5 signatures over SHA256 digests.

use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

use crate::error::SignError;
use crate::hash::sha256;

/// Raw signature bytes. Its length equals the signing key's modulus size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature(Vec<u8>);

impl Signature {
    /// The raw signature bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Take ownership of the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Lowercase hex encoding of the signature.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Signature length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the signature has no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Signature {
    fn from(bytes: Vec<u8>) -> Self {
        Signature(bytes)
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Sign the SHA256 digest of `message`.
///
/// PKCS#1 v1.5 padding is deterministic: the same key and message always give
/// the same signature.
pub fn sign(private_key: &RsaPrivateKey, message: &str) -> Result<Signature, SignError> {
    let digest = sha256(message.as_bytes());
    let bytes = private_key.sign(Pkcs1v15Sign::new::<Sha256>(), &digest)?;
    Ok(Signature(bytes))
}

/// Check `signature` against `message` under `public_key`.
///
/// Any mismatch, including truncated or otherwise malformed bytes, is `false`.
pub fn verify(public_key: &RsaPublicKey, message: &str, signature: &[u8]) -> bool {
    let digest = sha256(message.as_bytes());
    public_key
        .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, signature)
        .is_ok()
}
