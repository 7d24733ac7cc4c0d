//! Secure randomness used for mnemonic generation

use crate::mnemonic::MnemonicError;
use rand::{CryptoRng, RngCore};

/// Source of entropy for new mnemonics.
///
/// Any cryptographically secure RNG qualifies. Production code passes
/// [`rand::rngs::OsRng`]; tests can pass a seeded generator to get
/// reproducible phrases.
pub trait EntropySource {
    fn fill_entropy(&mut self, dest: &mut [u8]) -> Result<(), MnemonicError>;
}

impl<R: RngCore + CryptoRng> EntropySource for R {
    fn fill_entropy(&mut self, dest: &mut [u8]) -> Result<(), MnemonicError> {
        self.try_fill_bytes(dest)
            .map_err(|e| MnemonicError::Entropy(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_os_entropy_fills_buffer() {
        let mut buf = [0u8; 32];
        OsRng.fill_entropy(&mut buf).unwrap();
        assert_ne!(buf, [0u8; 32]);
    }

    #[test]
    fn test_seeded_entropy_is_reproducible() {
        let mut a = [0u8; 16];
        let mut b = [0u8; 16];
        ChaCha20Rng::seed_from_u64(7).fill_entropy(&mut a).unwrap();
        ChaCha20Rng::seed_from_u64(7).fill_entropy(&mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_successive_draws_differ() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let mut a = [0u8; 16];
        let mut b = [0u8; 16];
        rng.fill_entropy(&mut a).unwrap();
        rng.fill_entropy(&mut b).unwrap();
        assert_ne!(a, b);
    }
}
