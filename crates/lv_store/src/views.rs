//! Decrypted views — the DTOs handed to the request layer.
//!
//! Ephemeral and process-local: produced on every read, serialized to the
//! caller, then discarded. Never persisted. Any field whose decryption
//! failed carries `lv_crypto::DECRYPT_SENTINEL` instead of aborting the
//! operation that produced the view.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A client with identity fields in the clear plus its bid count.
#[derive(Debug, Clone, Serialize)]
pub struct ClientView {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub registered_at: DateTime<Utc>,
    pub total_bids: i64,
}

/// A bid decorated with the decrypted identity of its client.
#[derive(Debug, Clone, Serialize)]
pub struct BidView {
    pub id: i64,
    pub comment: String,
    pub is_processed: bool,
    pub client_id: i64,
    pub client_first_name: String,
    pub client_last_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub submitted_at: DateTime<Utc>,
}
