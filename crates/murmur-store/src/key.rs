//! Ed25519 identity keys.
//!
//! A connecting party is identified solely by its public key. The same key can
//! reach the store in several encodings, so [`PublicKey`] compares decoded key
//! material rather than the bytes it was parsed from.
//!
//! # Encodings
//!
//! - Raw 32-byte key material.
//! - SSH wire blob: `u32be len || "ssh-ed25519" || u32be len || key`.
//! - OpenSSH text: `ssh-ed25519 <base64 wire blob> [comment]`.
//!
//! [`PublicKey::to_wire`] is the canonical form.

use std::fmt;

use base64::{
    Engine,
    engine::general_purpose::{STANDARD, STANDARD_NO_PAD},
};
use ed25519_dalek::{PUBLIC_KEY_LENGTH, VerifyingKey};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use thiserror::Error;

/// SSH algorithm name for Ed25519 keys.
pub const ED25519_ALGORITHM: &str = "ssh-ed25519";

/// Length prefix size for SSH wire strings.
const LENGTH_PREFIX: usize = 4;

/// Errors produced while decoding a public key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// No bytes were supplied.
    #[error("empty key")]
    Empty,

    /// Raw key material has the wrong size.
    #[error("invalid key length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Required length in bytes.
        expected: usize,
        /// Length actually supplied.
        got: usize,
    },

    /// Key is not an Ed25519 key.
    #[error("unsupported key algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Wire blob ended inside a length-prefixed field.
    #[error("truncated key blob")]
    Truncated,

    /// Wire blob has bytes after the key material.
    #[error("trailing bytes after key blob")]
    TrailingBytes,

    /// OpenSSH text form is not valid base64 or UTF-8.
    #[error("invalid base64 in key text")]
    InvalidBase64,

    /// Key material does not decompress to a curve point.
    #[error("key is not a valid Ed25519 point")]
    InvalidPoint,
}

/// Decoded Ed25519 public key.
///
/// Equality is constant-time over the 32-byte key material, so two keys parsed
/// from different encodings compare equal.
#[derive(Clone, Copy)]
pub struct PublicKey(VerifyingKey);

impl PublicKey {
    /// Decode a key from any supported encoding.
    pub fn decode(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.is_empty() {
            return Err(KeyError::Empty);
        }

        if bytes.len() == PUBLIC_KEY_LENGTH {
            return Self::from_raw(bytes);
        }

        // Wire blobs start with a big-endian length, never with ASCII text
        if bytes.starts_with(b"ssh-") {
            let text = std::str::from_utf8(bytes).map_err(|_| KeyError::InvalidBase64)?;
            return Self::parse_openssh(text);
        }

        Self::from_wire(bytes)
    }

    /// Decode raw 32-byte key material.
    pub fn from_raw(material: &[u8]) -> Result<Self, KeyError> {
        let bytes: &[u8; PUBLIC_KEY_LENGTH] = material.try_into().map_err(|_| {
            KeyError::InvalidLength { expected: PUBLIC_KEY_LENGTH, got: material.len() }
        })?;

        VerifyingKey::from_bytes(bytes).map(Self).map_err(|_| KeyError::InvalidPoint)
    }

    /// Decode an SSH wire blob.
    pub fn from_wire(blob: &[u8]) -> Result<Self, KeyError> {
        let (algorithm, rest) = read_string(blob)?;
        if algorithm != ED25519_ALGORITHM.as_bytes() {
            return Err(KeyError::UnsupportedAlgorithm(
                String::from_utf8_lossy(algorithm).into_owned(),
            ));
        }

        let (material, rest) = read_string(rest)?;
        if !rest.is_empty() {
            return Err(KeyError::TrailingBytes);
        }

        Self::from_raw(material)
    }

    /// Parse an OpenSSH `authorized_keys` style line.
    ///
    /// Any comment after the base64 blob is ignored.
    pub fn parse_openssh(line: &str) -> Result<Self, KeyError> {
        let mut fields = line.split_whitespace();

        let algorithm = fields.next().ok_or(KeyError::Empty)?;
        if algorithm != ED25519_ALGORITHM {
            return Err(KeyError::UnsupportedAlgorithm(algorithm.to_string()));
        }

        let encoded = fields.next().ok_or(KeyError::Truncated)?;
        let blob = STANDARD.decode(encoded).map_err(|_| KeyError::InvalidBase64)?;

        Self::from_wire(&blob)
    }

    /// Canonical SSH wire encoding.
    pub fn to_wire(&self) -> Vec<u8> {
        let mut blob = Vec::with_capacity(
            LENGTH_PREFIX + ED25519_ALGORITHM.len() + LENGTH_PREFIX + PUBLIC_KEY_LENGTH,
        );
        write_string(&mut blob, ED25519_ALGORITHM.as_bytes());
        write_string(&mut blob, self.0.as_bytes());
        blob
    }

    /// OpenSSH text encoding without a comment.
    pub fn to_openssh(&self) -> String {
        format!("{ED25519_ALGORITHM} {}", STANDARD.encode(self.to_wire()))
    }

    /// OpenSSH-style `SHA256:` fingerprint of the wire encoding.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.to_wire());
        format!("SHA256:{}", STANDARD_NO_PAD.encode(digest))
    }

    /// Raw 32-byte key material.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        self.0.as_bytes()
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes()[..].ct_eq(&other.as_bytes()[..]).into()
    }
}

impl Eq for PublicKey {}

impl From<VerifyingKey> for PublicKey {
    fn from(key: VerifyingKey) -> Self {
        Self(key)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PublicKey").field(&self.fingerprint()).finish()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fingerprint())
    }
}

/// Split one length-prefixed SSH string off the front of `input`.
fn read_string(input: &[u8]) -> Result<(&[u8], &[u8]), KeyError> {
    let (len, rest) = input.split_first_chunk::<LENGTH_PREFIX>().ok_or(KeyError::Truncated)?;
    let len = u32::from_be_bytes(*len) as usize;
    if rest.len() < len {
        return Err(KeyError::Truncated);
    }
    Ok(rest.split_at(len))
}

fn write_string(out: &mut Vec<u8>, data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(data);
}
