//! Versioned keyring snapshot
//!
//! The snapshot carries everything needed to rebuild a keyring: the phrase,
//! the path template and how many accounts had been derived. The passphrase
//! is never stored.

use crate::error::{KeyringError, Result};
use crate::path::{DEFAULT_PATH, MAX_ACCOUNTS};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Current snapshot format version
pub const SERIALIZATION_VERSION: u32 = 1;

/// Keyring type tag written into snapshots
pub const KEYRING_TYPE: &str = "bip32";

fn default_keyring_type() -> String {
    KEYRING_TYPE.to_string()
}

fn default_path() -> String {
    DEFAULT_PATH.to_string()
}

/// Serialized keyring state. Treat as secret: it contains the seed phrase.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedHdKeyring {
    pub version: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub mnemonic: String,

    #[serde(default = "default_keyring_type")]
    pub keyring_type: String,

    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default)]
    pub address_index: u32,
}

impl SerializedHdKeyring {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reject snapshots this build cannot read
    pub fn check_format(&self) -> Result<()> {
        if self.version != SERIALIZATION_VERSION {
            return Err(KeyringError::UnsupportedVersion {
                found: self.version,
                expected: SERIALIZATION_VERSION,
            });
        }
        if self.keyring_type != KEYRING_TYPE {
            return Err(KeyringError::UnsupportedKeyringType(
                self.keyring_type.clone(),
            ));
        }
        if self.address_index > MAX_ACCOUNTS {
            return Err(KeyringError::IndexExhausted);
        }
        Ok(())
    }
}

impl Drop for SerializedHdKeyring {
    fn drop(&mut self) {
        self.mnemonic.zeroize();
    }
}

impl std::fmt::Debug for SerializedHdKeyring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerializedHdKeyring")
            .field("version", &self.version)
            .field("id", &self.id)
            .field("keyring_type", &self.keyring_type)
            .field("path", &self.path)
            .field("address_index", &self.address_index)
            .finish_non_exhaustive()
    }
}
