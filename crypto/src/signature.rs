//! Recoverable secp256k1 signatures
//!
//! Signatures are 65 bytes: `r || s || v`, with `v` in {27, 28}.

use crate::{hash_message, public_key_to_address, CryptoError, Result};
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Offset added to the recovery id in the trailing `v` byte
const V_OFFSET: u8 = 27;

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RecoverableSignature {
    bytes: [u8; 65],
}

impl RecoverableSignature {
    fn from_parts(signature: &Signature, recovery_id: RecoveryId) -> Self {
        let mut bytes = [0u8; 65];
        bytes[..64].copy_from_slice(&signature.to_bytes());
        bytes[64] = recovery_id.to_byte() + V_OFFSET;
        Self { bytes }
    }

    /// Parse a 65-byte signature. `v` may be given as 0/1 or 27/28.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; 65] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidSignature(format!("expected 65 bytes, got {}", bytes.len()))
        })?;

        let v = raw[64];
        let recovery_id = if v >= V_OFFSET { v - V_OFFSET } else { v };
        if recovery_id > 1 {
            return Err(CryptoError::InvalidRecoveryId(v));
        }

        let mut normalized = raw;
        normalized[64] = recovery_id + V_OFFSET;
        Ok(Self { bytes: normalized })
    }

    pub fn r(&self) -> &[u8] {
        &self.bytes[..32]
    }

    pub fn s(&self) -> &[u8] {
        &self.bytes[32..64]
    }

    pub fn v(&self) -> u8 {
        self.bytes[64]
    }

    pub fn to_bytes(&self) -> [u8; 65] {
        self.bytes
    }

    /// Hex string with `0x` prefix
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.bytes))
    }

    fn recovery_id(&self) -> Result<RecoveryId> {
        let v = self.v();
        RecoveryId::from_byte(v - V_OFFSET).ok_or(CryptoError::InvalidRecoveryId(v))
    }

    fn signature(&self) -> Result<Signature> {
        Signature::from_slice(&self.bytes[..64])
            .map_err(|e| CryptoError::InvalidSignature(e.to_string()))
    }

    /// Recover the signer's public key from a 32-byte prehash
    pub fn recover_verifying_key(&self, digest: &[u8; 32]) -> Result<VerifyingKey> {
        VerifyingKey::recover_from_prehash(digest, &self.signature()?, self.recovery_id()?)
            .map_err(|e| CryptoError::Recovery(e.to_string()))
    }
}

impl fmt::Display for RecoverableSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for RecoverableSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecoverableSignature").field(&self.to_hex()).finish()
    }
}

impl FromStr for RecoverableSignature {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self> {
        let hex_str = s.strip_prefix("0x").unwrap_or(s);
        let bytes =
            hex::decode(hex_str).map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
        Self::from_slice(&bytes)
    }
}

impl From<RecoverableSignature> for String {
    fn from(signature: RecoverableSignature) -> Self {
        signature.to_hex()
    }
}

impl TryFrom<String> for RecoverableSignature {
    type Error = CryptoError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Sign a 32-byte digest
pub fn sign_digest(signing_key: &SigningKey, digest: &[u8; 32]) -> Result<RecoverableSignature> {
    let (signature, recovery_id) = signing_key
        .sign_prehash_recoverable(digest)
        .map_err(|e| CryptoError::Signing(e.to_string()))?;
    Ok(RecoverableSignature::from_parts(&signature, recovery_id))
}

/// Sign a personal message (see [`hash_message`])
pub fn sign_message(signing_key: &SigningKey, message: &[u8]) -> Result<RecoverableSignature> {
    sign_digest(signing_key, &hash_message(message))
}

/// Recover the address that signed `message`
pub fn recover_address(message: &[u8], signature: &RecoverableSignature) -> Result<String> {
    let verifying_key = signature.recover_verifying_key(&hash_message(message))?;
    Ok(public_key_to_address(&verifying_key))
}
