//! Keyring error types

use crate::mnemonic::MnemonicError;
use hdkey_crypto::CryptoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyringError {
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(#[from] MnemonicError),

    #[error("Unsupported serialization version: {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Unsupported keyring type: {0}")]
    UnsupportedKeyringType(String),

    #[error("Keyring id mismatch: snapshot has {expected}, derived {found}")]
    IdentityMismatch { expected: String, found: String },

    #[error("Address not managed by this keyring: {0}")]
    UnknownAddress(String),

    #[error("Invalid account count: {0} (must be at least 1)")]
    InvalidAccountCount(u32),

    #[error("Invalid derivation path: {0}")]
    InvalidPath(String),

    #[error("Key derivation failed: {0}")]
    Derivation(String),

    #[error("Address index space exhausted")]
    IndexExhausted,

    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<bip32::Error> for KeyringError {
    fn from(err: bip32::Error) -> Self {
        KeyringError::Derivation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, KeyringError>;
