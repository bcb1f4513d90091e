//! Deterministic key fixtures.
//!
//! Keys are derived from a one-byte seed so tests can name identities without
//! carrying key material around.

use ed25519_dalek::SigningKey;
use murmur_store::PublicKey;

/// Signing key whose secret is `[seed; 32]`.
pub fn signing_key(seed: u8) -> SigningKey {
    SigningKey::from_bytes(&[seed; 32])
}

/// Public half of [`signing_key`].
pub fn public_key(seed: u8) -> PublicKey {
    PublicKey::from(signing_key(seed).verifying_key())
}

/// SSH wire blob of [`public_key`], as a transport would present it.
pub fn wire_key(seed: u8) -> Vec<u8> {
    public_key(seed).to_wire()
}

/// Raw 32-byte material of [`public_key`].
pub fn raw_key(seed: u8) -> Vec<u8> {
    public_key(seed).as_bytes().to_vec()
}

/// OpenSSH text form of [`public_key`] with a comment.
pub fn openssh_key(seed: u8) -> String {
    format!("{} fixture-{seed}", public_key(seed).to_openssh())
}

/// 32 bytes that are not a valid Ed25519 point.
///
/// Stored as a user key this makes every later lookup fail closed.
pub fn malformed_key() -> Vec<u8> {
    let mut material = vec![0u8; 32];
    material[0] = 2;
    material
}
