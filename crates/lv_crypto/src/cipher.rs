//! AES-256-CBC field codec.
//!
//! One `FieldCipher` is built from configuration at process start and shared,
//! immutable, for the whole process lifetime. Key and IV are fixed, so
//! encryption is deterministic: identical plaintext always yields identical
//! ciphertext. That property is load-bearing — the stored-value uniqueness
//! constraints on email/phone only dedup correctly because of it — and it is
//! also a known weakness (identical plaintexts are linkable). Do not switch
//! to a per-record random IV without migrating those constraints.
//!
//! Wire format: base64 (standard alphabet, padded) of the raw CBC output.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use zeroize::ZeroizeOnDrop;

use crate::classify::looks_encrypted;
use crate::error::CryptoError;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Placeholder substituted for any field whose decryption fails.
/// A corrupt record degrades to this string; it never aborts a listing.
pub const DECRYPT_SENTINEL: &str = "[decryption error]";

/// Environment variable holding the 32-byte AES key.
pub const ENV_AES_KEY: &str = "LEADVAULT_AES_KEY";
/// Environment variable holding the 16-byte AES IV.
pub const ENV_AES_IV: &str = "LEADVAULT_AES_IV";

/// Key material for the field codec, as read from external configuration.
///
/// Both values are raw bytes given as strings; lengths are validated by
/// [`CipherConfig::build`], and the process must treat a validation failure
/// as fatal at startup.
#[derive(Clone, Deserialize)]
pub struct CipherConfig {
    pub aes_key: String,
    pub aes_iv: String,
}

impl CipherConfig {
    /// Read key material from `LEADVAULT_AES_KEY` / `LEADVAULT_AES_IV`.
    pub fn from_env() -> Result<Self, CryptoError> {
        let aes_key =
            std::env::var(ENV_AES_KEY).map_err(|_| CryptoError::MissingSecret(ENV_AES_KEY))?;
        let aes_iv =
            std::env::var(ENV_AES_IV).map_err(|_| CryptoError::MissingSecret(ENV_AES_IV))?;
        Ok(Self { aes_key, aes_iv })
    }

    pub fn build(&self) -> Result<FieldCipher, CryptoError> {
        FieldCipher::new(&self.aes_key, &self.aes_iv)
    }
}

/// AES-256-CBC codec over UTF-8 field values. Zeroized on drop.
#[derive(ZeroizeOnDrop)]
pub struct FieldCipher {
    key: [u8; 32],
    iv: [u8; 16],
}

impl FieldCipher {
    /// Validate and fix the key material. `key` must be exactly 32 bytes of
    /// UTF-8, `iv` exactly 16.
    pub fn new(key: &str, iv: &str) -> Result<Self, CryptoError> {
        let key_bytes = key.as_bytes();
        let iv_bytes = iv.as_bytes();
        if key_bytes.len() != 32 {
            return Err(CryptoError::KeyLength(key_bytes.len()));
        }
        if iv_bytes.len() != 16 {
            return Err(CryptoError::IvLength(iv_bytes.len()));
        }
        let mut cipher = FieldCipher {
            key: [0u8; 32],
            iv: [0u8; 16],
        };
        cipher.key.copy_from_slice(key_bytes);
        cipher.iv.copy_from_slice(iv_bytes);
        Ok(cipher)
    }

    /// Encrypt a field value. Empty input is stored as-is (empty values are
    /// never encrypted).
    pub fn encrypt(&self, plaintext: &str) -> String {
        if plaintext.is_empty() {
            return String::new();
        }
        let ciphertext = Aes256CbcEnc::new(&self.key.into(), &self.iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
        BASE64.encode(ciphertext)
    }

    /// Decrypt a stored value, or report why it could not be decrypted.
    ///
    /// Empty input and values the heuristic classifies as legacy plaintext
    /// pass through unchanged. Bulk operations that must skip (rather than
    /// degrade) undecryptable records use this fallible form.
    pub fn try_decrypt(&self, stored: &str) -> Result<String, CryptoError> {
        if stored.is_empty() || !looks_encrypted(stored) {
            return Ok(stored.to_string());
        }
        let buffer = BASE64.decode(stored)?;
        let plaintext = Aes256CbcDec::new(&self.key.into(), &self.iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(&buffer)
            .map_err(|_| CryptoError::Decrypt)?;
        Ok(String::from_utf8(plaintext)?)
    }

    /// Decrypt a stored value, degrading any failure to [`DECRYPT_SENTINEL`].
    /// Never fails, never panics: a corrupt field must not abort a listing.
    pub fn decrypt(&self, stored: &str) -> String {
        self.try_decrypt(stored)
            .unwrap_or_else(|_| DECRYPT_SENTINEL.to_string())
    }
}
