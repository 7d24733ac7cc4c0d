//! Keyring construction options
//!
//! Options can be built in code or loaded from TOML:
//!
//! ```toml
//! mnemonic = "abandon abandon ... about"
//! passphrase = ""
//! path = "m/44'/60'/0'/0"
//! strength = 256
//! ```

use crate::error::{KeyringError, Result};
use crate::mnemonic::DEFAULT_STRENGTH;
use crate::path::DEFAULT_PATH;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyringOptions {
    /// Existing phrase; a new one is generated when absent
    pub mnemonic: Option<String>,

    /// BIP-39 passphrase, empty when absent
    pub passphrase: Option<String>,

    /// Path template accounts are derived under
    pub path: Option<String>,

    /// Entropy bits for a generated phrase
    pub strength: Option<usize>,
}

impl KeyringOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mnemonic(mut self, mnemonic: impl Into<String>) -> Self {
        self.mnemonic = Some(mnemonic.into());
        self
    }

    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(passphrase.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_strength(mut self, strength: usize) -> Self {
        self.strength = Some(strength);
        self
    }

    /// Parse options from a TOML document
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| KeyringError::Config(e.to_string()))
    }

    pub fn passphrase_or_default(&self) -> &str {
        self.passphrase.as_deref().unwrap_or("")
    }

    pub fn path_or_default(&self) -> &str {
        self.path.as_deref().unwrap_or(DEFAULT_PATH)
    }

    pub fn strength_or_default(&self) -> usize {
        self.strength.unwrap_or(DEFAULT_STRENGTH)
    }
}

impl Drop for KeyringOptions {
    fn drop(&mut self) {
        self.mnemonic.zeroize();
        self.passphrase.zeroize();
    }
}

impl std::fmt::Debug for KeyringOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyringOptions")
            .field("mnemonic", &self.mnemonic.as_ref().map(|_| "<redacted>"))
            .field("passphrase", &self.passphrase.as_ref().map(|_| "<redacted>"))
            .field("path", &self.path)
            .field("strength", &self.strength)
            .finish()
    }
}
