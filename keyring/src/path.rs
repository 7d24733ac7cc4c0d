//! Derivation path template and account index allocation

use crate::error::{KeyringError, Result};
use bip32::{ChildNumber, DerivationPath};
use std::fmt;
use std::str::FromStr;

/// BIP-44 external chain for the first Ethereum account
pub const DEFAULT_PATH: &str = "m/44'/60'/0'/0";

/// Largest non-hardened child index
const MAX_INDEX: u32 = ChildNumber::HARDENED_FLAG - 1;

/// Number of accounts a single template can hold
pub const MAX_ACCOUNTS: u32 = MAX_INDEX + 1;

/// The fixed prefix under which accounts are derived.
///
/// Account `i` lives at `<template>/i` (non-hardened).
#[derive(Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    path: DerivationPath,
}

impl PathTemplate {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let path = DerivationPath::from_str(trimmed)
            .map_err(|e| KeyringError::InvalidPath(format!("{}: {}", trimmed, e)))?;
        Ok(Self {
            raw: trimmed.to_string(),
            path,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn components(&self) -> impl Iterator<Item = ChildNumber> + '_ {
        self.path.iter()
    }

    /// Full path of the account at `index`
    pub fn account_path(&self, index: u32) -> String {
        format!("{}/{}", self.raw, index)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl fmt::Debug for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PathTemplate").field(&self.raw).finish()
    }
}

/// Hands out account indices: sequential, starting at 0, never reused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathAllocator {
    next: u32,
}

impl PathAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the current index and advance
    pub fn next_index(&mut self) -> Result<u32> {
        if self.next > MAX_INDEX {
            return Err(KeyringError::IndexExhausted);
        }
        let index = self.next;
        self.next += 1;
        Ok(index)
    }

    /// Number of indices handed out so far
    pub fn count(&self) -> u32 {
        self.next
    }

    /// Indices still available below the hardened range
    pub fn remaining(&self) -> u32 {
        MAX_ACCOUNTS.saturating_sub(self.next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template() {
        let template = PathTemplate::parse(DEFAULT_PATH).unwrap();
        assert_eq!(template.as_str(), DEFAULT_PATH);
        assert_eq!(template.components().count(), 4);
        assert_eq!(template.to_string(), DEFAULT_PATH);
    }

    #[test]
    fn test_template_components() {
        let template = PathTemplate::parse("m/44'/60'/0'/0").unwrap();
        let components: Vec<ChildNumber> = template.components().collect();

        assert!(components[0].is_hardened());
        assert_eq!(components[0].index(), 44);
        assert_eq!(components[1].index(), 60);
        assert!(!components[3].is_hardened());
    }

    #[test]
    fn test_account_path() {
        let template = PathTemplate::parse(DEFAULT_PATH).unwrap();
        assert_eq!(template.account_path(7), "m/44'/60'/0'/0/7");
    }

    #[test]
    fn test_invalid_template() {
        assert!(matches!(
            PathTemplate::parse("44'/60'"),
            Err(KeyringError::InvalidPath(_))
        ));
        assert!(matches!(
            PathTemplate::parse("m/abc"),
            Err(KeyringError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_allocator_is_sequential() {
        let mut allocator = PathAllocator::new();
        let indices: Vec<u32> = (0..5).map(|_| allocator.next_index().unwrap()).collect();

        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        assert_eq!(allocator.count(), 5);
    }

    #[test]
    fn test_allocator_exhaustion() {
        let mut allocator = PathAllocator { next: MAX_INDEX };
        assert_eq!(allocator.next_index().unwrap(), MAX_INDEX);
        assert!(matches!(
            allocator.next_index(),
            Err(KeyringError::IndexExhausted)
        ));
        assert_eq!(allocator.count(), MAX_INDEX + 1);
        assert_eq!(allocator.remaining(), 0);
    }

    #[test]
    fn test_allocator_remaining() {
        let mut allocator = PathAllocator::new();
        assert_eq!(allocator.remaining(), MAX_ACCOUNTS);

        allocator.next_index().unwrap();
        assert_eq!(allocator.remaining(), MAX_ACCOUNTS - 1);
    }
}
