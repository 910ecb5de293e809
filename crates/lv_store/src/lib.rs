//! lv_store — Encrypted client/bid store for Leadvault
//!
//! # Encryption strategy
//! SQLite does NOT natively encrypt. We use application-level field
//! encryption:
//! - Client identity columns (first/last name, email, phone) are stored as
//!   AES-256-CBC ciphertext, base64-encoded, via `lv_crypto::FieldCipher`.
//! - Columns written before encryption was introduced still hold plaintext;
//!   the two coexist in the same columns and are told apart heuristically
//!   on read (`lv_crypto::looks_encrypted`).
//! - Bid comments, timestamps and flags are plaintext to allow efficient
//!   queries.
//!
//! # Cost model
//! Because ciphertext is not searchable, deduplication and search load and
//! decrypt every client row per call. That O(n) full-table scan is the
//! deliberate price of field-level encryption here — there is no hidden
//! index over plaintext, and adding one would change which records match
//! under the heuristic.
//!
//! # Migration
//! SQLx migrations in `migrations/` are run on open.

pub mod bids;
pub mod clients;
pub mod db;
pub mod error;
pub mod models;
pub mod views;

pub use db::Store;
pub use error::StoreError;
pub use models::{BidRow, ClientRow};
pub use views::{BidView, ClientView};
