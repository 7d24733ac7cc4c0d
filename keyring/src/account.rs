//! Account derivation and bookkeeping

use crate::error::{KeyringError, Result};
use crate::path::PathAllocator;
use bip32::{ChildNumber, XPrv};
use hdkey_crypto::public_key_to_address;
use k256::ecdsa::SigningKey;
use std::collections::HashMap;

/// A derived account: its index under the path template, its address and
/// the key that signs for it.
#[derive(Clone)]
pub struct AccountRecord {
    index: u32,
    address: String,
    signing_key: SigningKey,
}

impl AccountRecord {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }
}

impl std::fmt::Debug for AccountRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountRecord")
            .field("index", &self.index)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Derive the account at `index` below the template node
pub fn derive_account(account_root: &XPrv, index: u32) -> Result<AccountRecord> {
    let child_number = ChildNumber::new(index, false)?;
    let child = account_root.derive_child(child_number)?;
    let signing_key = child.private_key().clone();
    let address = public_key_to_address(signing_key.verifying_key());

    Ok(AccountRecord {
        index,
        address,
        signing_key,
    })
}

/// Every account derived so far, in insertion order, keyed by lowercase address
#[derive(Debug, Default)]
pub struct AccountBook {
    allocator: PathAllocator,
    order: Vec<String>,
    records: HashMap<String, AccountRecord>,
}

impl AccountBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive `count` new accounts and return their addresses.
    ///
    /// All-or-nothing: if any derivation fails, or `count` exceeds the
    /// indices left, the book is left untouched.
    pub fn add(&mut self, account_root: &XPrv, count: u32) -> Result<Vec<String>> {
        if count < 1 {
            return Err(KeyringError::InvalidAccountCount(count));
        }
        if count > self.allocator.remaining() {
            return Err(KeyringError::IndexExhausted);
        }

        let mut allocator = self.allocator;
        let mut derived = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let index = allocator.next_index()?;
            derived.push(derive_account(account_root, index)?);
        }

        self.allocator = allocator;
        let mut addresses = Vec::with_capacity(derived.len());
        for record in derived {
            let address = record.address.clone();
            if self.records.insert(address.clone(), record).is_some() {
                log::warn!("Address {} derived twice", address);
            }
            self.order.push(address.clone());
            addresses.push(address);
        }

        Ok(addresses)
    }

    pub fn get(&self, address: &str) -> Option<&AccountRecord> {
        self.records.get(&address.to_ascii_lowercase())
    }

    pub fn contains(&self, address: &str) -> bool {
        self.get(address).is_some()
    }

    /// Addresses in the order they were added
    pub fn addresses(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Number of indices consumed
    pub fn count(&self) -> u32 {
        self.allocator.count()
    }
}
