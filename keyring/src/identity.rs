//! Keyring identity

use crate::seed::RootKey;
use hdkey_crypto::hash160;

/// Stable keyring id: the BIP-32 fingerprint of the master public key,
/// `0x` followed by 8 hex digits.
///
/// Depends on nothing but the root key, so adding accounts never changes it.
pub fn compute_id(root: &RootKey) -> String {
    let hash = hash160(&root.public_key_bytes());
    format!("0x{}", hex::encode(&hash[..4]))
}
