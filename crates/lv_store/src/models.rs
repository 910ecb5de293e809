//! Database row models — these map to/from SQL rows.
//!
//! Client identity fields are opaque stored strings: *either* base64
//! ciphertext *or* legacy plaintext, with no discriminator. They are one
//! type on purpose; classification happens only at decrypt time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ClientRow {
    pub id: i64,
    /// Stored string: ciphertext or legacy plaintext.
    pub first_name: String,
    pub last_name: String,
    /// Unique on the stored value (valid because encryption is deterministic).
    pub email: String,
    pub phone_number: String,
    /// Set once at creation, immutable.
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BidRow {
    pub id: i64,
    /// Plaintext by design — only client identity is sensitive.
    pub comment: String,
    pub is_processed: bool,
    pub client_id: i64,
    pub submitted_at: DateTime<Utc>,
}
