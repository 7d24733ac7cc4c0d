use crate::account::AccountBook;
use crate::config::KeyringOptions;
use crate::entropy::EntropySource;
use crate::error::{KeyringError, Result};
use crate::identity::compute_id;
use crate::mnemonic::{generate_mnemonic, MnemonicPhrase};
use crate::path::PathTemplate;
use crate::seed::RootKey;
use crate::snapshot::{SerializedHdKeyring, KEYRING_TYPE, SERIALIZATION_VERSION};
use bip32::XPrv;
use hdkey_crypto::{sign_message, RecoverableSignature};
use parking_lot::Mutex;
use rand::rngs::OsRng;

/// Hierarchical-deterministic keyring
///
/// Holds one mnemonic and derives secp256k1 accounts from it on demand.
/// Account state sits behind a mutex, so a keyring can be shared between
/// threads and concurrent additions never reuse or skip an index.
pub struct HdKeyring {
    id: String,
    mnemonic: MnemonicPhrase,
    path: PathTemplate,
    account_root: XPrv,
    accounts: Mutex<AccountBook>,
}

impl HdKeyring {
    /// Keyring type tag, as written into snapshots
    pub const TYPE: &'static str = KEYRING_TYPE;

    /// Create a keyring, generating a phrase from the OS RNG if none is given
    ///
    /// # Example
    /// ```
    /// use hd_keyring::{HdKeyring, KeyringOptions};
    ///
    /// let keyring = HdKeyring::new(KeyringOptions::new()).unwrap();
    /// let accounts = keyring.add_accounts_sync(2).unwrap();
    /// assert_eq!(accounts.len(), 2);
    /// ```
    pub fn new(options: KeyringOptions) -> Result<Self> {
        Self::with_entropy(options, &mut OsRng)
    }

    /// Create a keyring, drawing any generated phrase from `entropy`
    pub fn with_entropy<E>(options: KeyringOptions, entropy: &mut E) -> Result<Self>
    where
        E: EntropySource + ?Sized,
    {
        let path = PathTemplate::parse(options.path_or_default())?;

        let mnemonic = match options.mnemonic.as_deref() {
            Some(phrase) => MnemonicPhrase::from_phrase(phrase)?,
            None => {
                let strength = options.strength_or_default();
                log::debug!("Generating {}-bit mnemonic", strength);
                generate_mnemonic(strength, entropy)?
            }
        };

        Self::from_parts(mnemonic, options.passphrase_or_default(), path)
    }

    fn from_parts(mnemonic: MnemonicPhrase, passphrase: &str, path: PathTemplate) -> Result<Self> {
        let root = RootKey::derive(&mnemonic, passphrase)?;
        let id = compute_id(&root);
        let account_root = root.derive_template(&path)?;

        log::info!("Opened HD keyring {} (path {})", id, path);

        Ok(Self {
            id,
            mnemonic,
            path,
            account_root,
            accounts: Mutex::new(AccountBook::new()),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Path template accounts are derived under
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Snapshot of the keyring's persistent state
    pub fn serialize_sync(&self) -> SerializedHdKeyring {
        SerializedHdKeyring {
            version: SERIALIZATION_VERSION,
            id: Some(self.id.clone()),
            mnemonic: self.mnemonic.phrase().to_string(),
            keyring_type: KEYRING_TYPE.to_string(),
            path: self.path.as_str().to_string(),
            address_index: self.accounts.lock().count(),
        }
    }

    pub async fn serialize(&self) -> SerializedHdKeyring {
        self.serialize_sync()
    }

    /// Rebuild a keyring created without a passphrase
    pub fn deserialize(snapshot: &SerializedHdKeyring) -> Result<Self> {
        Self::deserialize_with_passphrase(snapshot, "")
    }

    /// Rebuild a keyring from a snapshot.
    ///
    /// The first `address_index` accounts are re-derived, so the account list
    /// matches the keyring the snapshot was taken from.
    pub fn deserialize_with_passphrase(
        snapshot: &SerializedHdKeyring,
        passphrase: &str,
    ) -> Result<Self> {
        snapshot.check_format()?;

        let mnemonic = MnemonicPhrase::from_phrase(&snapshot.mnemonic)?;
        let path = PathTemplate::parse(&snapshot.path)?;
        let keyring = Self::from_parts(mnemonic, passphrase, path)?;

        if let Some(expected) = &snapshot.id {
            if *expected != keyring.id {
                log::warn!(
                    "Snapshot id {} does not match derived id {}",
                    expected,
                    keyring.id
                );
                return Err(KeyringError::IdentityMismatch {
                    expected: expected.clone(),
                    found: keyring.id.clone(),
                });
            }
        }

        if snapshot.address_index > 0 {
            keyring.add_accounts_sync(snapshot.address_index)?;
        }

        Ok(keyring)
    }

    /// Derive `count` new accounts, returning their addresses in index order
    pub fn add_accounts_sync(&self, count: u32) -> Result<Vec<String>> {
        let mut accounts = self.accounts.lock();
        let added = accounts.add(&self.account_root, count)?;

        log::debug!(
            "Keyring {} derived {} account(s), {} total",
            self.id,
            added.len(),
            accounts.count()
        );
        Ok(added)
    }

    /// Derive one new account
    pub fn add_account_sync(&self) -> Result<String> {
        let mut added = self.add_accounts_sync(1)?;
        added.pop().ok_or(KeyringError::InvalidAccountCount(0))
    }

    pub async fn add_accounts(&self, count: u32) -> Result<Vec<String>> {
        self.add_accounts_sync(count)
    }

    /// All derived addresses, in the order they were added
    pub fn accounts(&self) -> Vec<String> {
        self.accounts.lock().addresses()
    }

    pub async fn get_accounts(&self) -> Vec<String> {
        self.accounts()
    }

    /// Whether `address` was derived by this keyring (case-insensitive)
    pub fn has_account(&self, address: &str) -> bool {
        self.accounts.lock().contains(address)
    }

    /// Number of accounts derived so far
    pub fn account_count(&self) -> u32 {
        self.accounts.lock().count()
    }

    /// Sign a personal message with the key behind `address`
    pub fn sign_message_sync(
        &self,
        address: &str,
        message: &[u8],
    ) -> Result<RecoverableSignature> {
        let accounts = self.accounts.lock();
        let record = accounts
            .get(address)
            .ok_or_else(|| KeyringError::UnknownAddress(address.to_string()))?;

        log::debug!(
            "Signing message for {} at {}",
            record.address(),
            self.path.account_path(record.index())
        );
        Ok(sign_message(record.signing_key(), message)?)
    }

    pub async fn sign_message(
        &self,
        address: &str,
        message: &[u8],
    ) -> Result<RecoverableSignature> {
        self.sign_message_sync(address, message)
    }
}

impl std::fmt::Debug for HdKeyring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HdKeyring")
            .field("id", &self.id)
            .field("path", &self.path)
            .field("accounts", &self.account_count())
            .finish_non_exhaustive()
    }
}
