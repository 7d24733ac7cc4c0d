//! Seed and root key derivation

use crate::error::Result;
use crate::mnemonic::MnemonicPhrase;
use crate::path::PathTemplate;
use bip32::XPrv;

/// BIP-32 master key derived from a mnemonic and passphrase
#[derive(Clone)]
pub struct RootKey {
    master: XPrv,
}

impl RootKey {
    /// Derive the master key from a phrase. Same inputs, same bytes, always.
    pub fn derive(mnemonic: &MnemonicPhrase, passphrase: &str) -> Result<Self> {
        let seed = mnemonic.to_seed(passphrase)?;
        Self::from_seed(&seed[..])
    }

    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        Ok(Self {
            master: XPrv::new(seed)?,
        })
    }

    /// Compressed SEC1 public key of the master node
    pub fn public_key_bytes(&self) -> [u8; 33] {
        self.master.public_key().to_bytes()
    }

    /// Walk the template from the master node
    pub fn derive_template(&self, template: &PathTemplate) -> Result<XPrv> {
        let mut node = self.master.clone();
        for child in template.components() {
            node = node.derive_child(child)?;
        }
        Ok(node)
    }
}

impl std::fmt::Debug for RootKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RootKey")
            .field("public_key", &hex::encode(self.public_key_bytes()))
            .finish_non_exhaustive()
    }
}
