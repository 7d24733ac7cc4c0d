use hd_keyring::*;
use std::collections::HashSet;
use std::sync::Arc;

const MNEMONIC: &str = "dream dinosaur poem cherry brief hand injury ice stuff steel bench vacant amazing bar uncover";

fn keyring() -> HdKeyring {
    HdKeyring::new(KeyringOptions::new().with_mnemonic(MNEMONIC)).unwrap()
}

#[tokio::test]
async fn test_add_accounts_matches_sync_variant() {
    let async_keyring = keyring();
    let sync_keyring = keyring();

    let from_async = async_keyring.add_accounts(3).await.unwrap();
    let from_sync = sync_keyring.add_accounts_sync(3).unwrap();

    assert_eq!(from_async, from_sync);
    assert_eq!(async_keyring.get_accounts().await, sync_keyring.accounts());
}

#[tokio::test]
async fn test_add_accounts_returns_new_addresses_only() {
    let keyring = keyring();

    let first = keyring.add_accounts(2).await.unwrap();
    let second = keyring.add_accounts(2).await.unwrap();

    assert!(first.iter().all(|a| !second.contains(a)));
    assert_eq!(keyring.get_accounts().await.len(), 4);
}

#[tokio::test]
async fn test_add_zero_accounts_fails() {
    let keyring = keyring();
    let result = keyring.add_accounts(0).await;

    assert!(matches!(result, Err(KeyringError::InvalidAccountCount(0))));
}

#[tokio::test]
async fn test_serialize_round_trip() {
    let keyring = keyring();
    keyring.add_accounts(3).await.unwrap();

    let serialized = keyring.serialize().await;
    assert_eq!(serialized.mnemonic, MNEMONIC);

    let restored = HdKeyring::deserialize(&serialized).unwrap();
    assert_eq!(restored.id(), keyring.id());
    assert_eq!(restored.get_accounts().await, keyring.get_accounts().await);
}

#[tokio::test]
async fn test_sign_message_recoverable() {
    let keyring = keyring();
    let accounts = keyring.add_accounts(2).await.unwrap();

    for address in accounts {
        let signature = keyring
            .sign_message(&address, b"recoverThisMessage")
            .await
            .unwrap();
        let recovered = recover_address(b"recoverThisMessage", &signature).unwrap();
        assert_eq!(recovered, address);
    }
}

#[tokio::test]
async fn test_sign_message_unknown_address() {
    let keyring = keyring();
    let result = keyring
        .sign_message("0x9858effd232b4033e47d90003d41ec34ecaeda94", b"nope")
        .await;

    assert!(matches!(result, Err(KeyringError::UnknownAddress(_))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_overlapping_additions_are_serialized() {
    let keyring = Arc::new(keyring());

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let keyring = Arc::clone(&keyring);
            tokio::spawn(async move { keyring.add_accounts(3).await.unwrap() })
        })
        .collect();

    let mut returned = Vec::new();
    for task in tasks {
        returned.extend(task.await.unwrap());
    }

    let accounts = keyring.get_accounts().await;
    assert_eq!(accounts.len(), 24);
    assert_eq!(keyring.account_count(), 24);
    assert_eq!(accounts.iter().collect::<HashSet<_>>().len(), 24);

    let mut returned_sorted = returned;
    let mut accounts_sorted = accounts;
    returned_sorted.sort();
    accounts_sorted.sort();
    assert_eq!(returned_sorted, accounts_sorted);
}
