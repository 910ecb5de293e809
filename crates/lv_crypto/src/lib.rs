//! lv_crypto — Leadvault field-level encryption primitives
//!
//! # Design principles
//! - NO custom crypto; all primitives come from the RustCrypto crates.
//! - Key material is zeroized on drop and loaded exactly once at startup.
//! - Decryption of stored values never panics and never aborts a batch:
//!   a value that cannot be decrypted degrades to a fixed sentinel.
//!
//! # Module layout
//! - `cipher`   — AES-256-CBC encrypt/decrypt of UTF-8 field values + config
//! - `classify` — heuristic distinguishing ciphertext from legacy plaintext
//! - `error`    — unified error type
//!
//! # Legacy coexistence
//! Stored columns hold *either* base64 ciphertext *or* plaintext written
//! before encryption was introduced. There is no stored discriminator; the
//! classifier in `classify` is a structural heuristic, not a guarantee, and
//! its known misfire mode is part of the contract (see `looks_encrypted`).

pub mod cipher;
pub mod classify;
pub mod error;

pub use cipher::{CipherConfig, FieldCipher, DECRYPT_SENTINEL};
pub use classify::looks_encrypted;
pub use error::CryptoError;
