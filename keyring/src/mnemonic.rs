//! BIP-39 mnemonic support for the HD keyring
//!
//! Validation, generation from injected entropy, and conversion between
//! phrases, raw entropy and the 64-byte BIP-39 seed.

use crate::entropy::EntropySource;
use bip39::{Language, Mnemonic};
use thiserror::Error;
use zeroize::Zeroizing;

/// Word counts allowed by BIP-39
pub const VALID_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// Entropy strengths (in bits) matching [`VALID_WORD_COUNTS`]
pub const VALID_STRENGTHS: [usize; 5] = [128, 160, 192, 224, 256];

/// Strength used when generating a phrase without explicit configuration (24 words)
pub const DEFAULT_STRENGTH: usize = 256;

#[derive(Debug, Error)]
pub enum MnemonicError {
    #[error("Invalid mnemonic phrase: {0}")]
    InvalidMnemonic(String),

    #[error("Invalid word count: {0} (must be 12, 15, 18, 21, or 24)")]
    InvalidWordCount(usize),

    #[error("Invalid entropy strength: {0} bits (must be 128, 160, 192, 224, or 256)")]
    InvalidStrength(usize),

    #[error("Entropy source failure: {0}")]
    Entropy(String),
}

/// Validate a mnemonic phrase
///
/// Checks the word count first so short phrases get a precise error, then
/// wordlist membership and the checksum.
pub fn validate_mnemonic(phrase: &str) -> Result<(), MnemonicError> {
    parse(phrase).map(|_| ())
}

/// Generate a new phrase with `strength` bits of entropy.
///
/// # Example
/// ```
/// use hd_keyring::mnemonic::generate_mnemonic;
///
/// let phrase = generate_mnemonic(128, &mut rand::rngs::OsRng).unwrap();
/// assert_eq!(phrase.word_count(), 12);
/// ```
pub fn generate_mnemonic<E>(
    strength: usize,
    entropy: &mut E,
) -> Result<MnemonicPhrase, MnemonicError>
where
    E: EntropySource + ?Sized,
{
    if !VALID_STRENGTHS.contains(&strength) {
        return Err(MnemonicError::InvalidStrength(strength));
    }

    let mut bytes = Zeroizing::new(vec![0u8; strength / 8]);
    entropy.fill_entropy(&mut bytes)?;

    MnemonicPhrase::from_entropy(&bytes)
}

fn parse(phrase: &str) -> Result<Mnemonic, MnemonicError> {
    let word_count = phrase.split_whitespace().count();
    if !VALID_WORD_COUNTS.contains(&word_count) {
        return Err(MnemonicError::InvalidWordCount(word_count));
    }

    Mnemonic::parse_in(Language::English, phrase)
        .map_err(|e| MnemonicError::InvalidMnemonic(e.to_string()))
}

/// A validated mnemonic phrase
///
/// The phrase is kept in normalized form (lowercase, single spaces) and is
/// wiped from memory on drop.
#[derive(Clone)]
pub struct MnemonicPhrase {
    phrase: Zeroizing<String>,
}

impl MnemonicPhrase {
    /// Create from an existing phrase
    pub fn from_phrase(phrase: &str) -> Result<Self, MnemonicError> {
        let mnemonic = parse(phrase)?;
        Ok(Self {
            phrase: Zeroizing::new(mnemonic.to_string()),
        })
    }

    /// Encode raw entropy (16, 20, 24, 28 or 32 bytes) as a phrase
    pub fn from_entropy(entropy: &[u8]) -> Result<Self, MnemonicError> {
        let mnemonic = Mnemonic::from_entropy_in(Language::English, entropy)
            .map_err(|e| MnemonicError::InvalidMnemonic(e.to_string()))?;
        Ok(Self {
            phrase: Zeroizing::new(mnemonic.to_string()),
        })
    }

    /// Get the phrase as a string
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Get word count
    pub fn word_count(&self) -> usize {
        self.phrase.split_whitespace().count()
    }

    /// Decode back to the entropy the phrase encodes
    pub fn to_entropy(&self) -> Result<Zeroizing<Vec<u8>>, MnemonicError> {
        let mnemonic = parse(&self.phrase)?;
        Ok(Zeroizing::new(mnemonic.to_entropy()))
    }

    /// BIP-39 seed: PBKDF2-HMAC-SHA512, 2048 rounds, salt `"mnemonic" + passphrase`
    pub fn to_seed(&self, passphrase: &str) -> Result<Zeroizing<[u8; 64]>, MnemonicError> {
        let mnemonic = parse(&self.phrase)?;
        Ok(Zeroizing::new(mnemonic.to_seed(passphrase)))
    }
}

impl std::fmt::Debug for MnemonicPhrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MnemonicPhrase")
            .field("word_count", &self.word_count())
            .finish_non_exhaustive()
    }
}

impl PartialEq for MnemonicPhrase {
    fn eq(&self, other: &Self) -> bool {
        *self.phrase == *other.phrase
    }
}

impl Eq for MnemonicPhrase {}
