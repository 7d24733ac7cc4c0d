//! HD Keyring Cryptography
//!
//! secp256k1 signing, public key recovery, address derivation and the
//! hash functions the keyring consumes.

pub mod signature;

pub use signature::{recover_address, sign_digest, sign_message, RecoverableSignature};

use k256::ecdsa::VerifyingKey;
use ripemd::Ripemd160;
use sha2::Sha256;
use sha3::{Digest, Keccak256};
use thiserror::Error;

/// Prefix prepended to personal messages before hashing (EIP-191, version 0x45)
pub const MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("Public key recovery failed: {0}")]
    Recovery(String),
}

pub type Result<T> = std::result::Result<T, CryptoError>;

/// Hash data with Keccak-256
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// RIPEMD-160 of SHA-256, as used for BIP-32 key fingerprints
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    Ripemd160::digest(sha).into()
}

/// Digest signed for a personal message.
///
/// `keccak256("\x19Ethereum Signed Message:\n" || len(message) || message)`,
/// where the length is written in decimal ASCII.
pub fn hash_message(message: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(MESSAGE_PREFIX.as_bytes());
    hasher.update(message.len().to_string().as_bytes());
    hasher.update(message);
    hasher.finalize().into()
}

/// Generate address from public key
///
/// The address is the last 20 bytes of the Keccak-256 hash of the
/// uncompressed public key (without the `0x04` tag), lowercase hex with a
/// `0x` prefix.
pub fn public_key_to_address(public_key: &VerifyingKey) -> String {
    let encoded = public_key.to_encoded_point(false);
    let hash = keccak256(&encoded.as_bytes()[1..]);
    format!("0x{}", hex::encode(&hash[12..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use k256::ecdsa::SigningKey;

    #[test]
    fn test_keccak256_empty() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_hash160_length() {
        let hash = hash160(b"hd keyring");
        assert_eq!(hash.len(), 20);
        assert_eq!(hash, hash160(b"hd keyring"));
    }

    #[test]
    fn test_hash_message_includes_length() {
        // Same bytes, different framing must not collide
        assert_ne!(hash_message(b"12"), hash_message(b"2"));
        assert_ne!(hash_message(b"hello"), keccak256(b"hello"));
    }

    #[test]
    fn test_address_generation() {
        let key_bytes =
            hex::decode("4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318")
                .unwrap();
        let signing_key = SigningKey::from_slice(&key_bytes).unwrap();

        let address = public_key_to_address(signing_key.verifying_key());

        assert_eq!(address, "0x2c7536e3605d9c16a7a3d7b1898e529396a65c23");
    }
}
