//! Shared fixtures for lv_store integration tests.
#![allow(dead_code)]

use lv_crypto::FieldCipher;
use lv_store::Store;

pub const TEST_KEY: &str = "0123456789abcdef0123456789abcdef";
pub const TEST_IV: &str = "fedcba9876543210";

pub fn test_cipher() -> FieldCipher {
    FieldCipher::new(TEST_KEY, TEST_IV).expect("test key material is well-formed")
}

pub async fn open_store() -> Store {
    Store::open_in_memory(test_cipher())
        .await
        .expect("in-memory store opens")
}

/// Pause long enough that the next insert gets a strictly later timestamp.
pub async fn tick() {
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
}
