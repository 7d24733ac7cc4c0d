//! HD Keyring
//!
//! Hierarchical-deterministic keyring for secp256k1 accounts:
//! - BIP-39 mnemonic validation and generation from injected entropy
//! - BIP-32 derivation under a configurable path template (default `m/44'/60'/0'/0`)
//! - Stable keyring id from the master key fingerprint
//! - Versioned snapshots that rebuild the keyring and its accounts
//! - Recoverable personal-message signatures for derived addresses

pub mod account;
pub mod config;
pub mod entropy;
pub mod error;
pub mod identity;
pub mod keyring;
pub mod mnemonic;
pub mod path;
pub mod seed;
pub mod snapshot;

pub use account::{AccountBook, AccountRecord};
pub use config::KeyringOptions;
pub use entropy::EntropySource;
pub use error::{KeyringError, Result};
pub use hdkey_crypto::{recover_address, RecoverableSignature};
pub use keyring::HdKeyring;
pub use mnemonic::{generate_mnemonic, validate_mnemonic, MnemonicError, MnemonicPhrase};
pub use path::{PathAllocator, PathTemplate, DEFAULT_PATH, MAX_ACCOUNTS};
pub use seed::RootKey;
pub use snapshot::{SerializedHdKeyring, KEYRING_TYPE, SERIALIZATION_VERSION};
