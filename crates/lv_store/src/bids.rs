//! Bid workflows: submission, listing, status toggle, deletion.
//!
//! The store does not own much bid logic — bids are plaintext apart from
//! the joined client identity, which every projection decrypts (lossily,
//! sentinel per failed field) into a `BidView`.

use chrono::{DateTime, Utc};

use crate::db::Store;
use crate::error::StoreError;
use crate::models::BidRow;
use crate::views::BidView;

// ── Internal row types ──────────────────────────────────────────────────────

#[derive(sqlx::FromRow)]
struct BidWithClient {
    id: i64,
    comment: String,
    is_processed: bool,
    client_id: i64,
    submitted_at: DateTime<Utc>,
    first_name: String,
    last_name: String,
    email: String,
    phone_number: String,
}

const SELECT_WITH_CLIENT: &str = "SELECT b.id, b.comment, b.is_processed, b.client_id, b.submitted_at, \
     c.first_name, c.last_name, c.email, c.phone_number \
     FROM bids b JOIN clients c ON c.id = b.client_id";

impl Store {
    fn bid_view(&self, row: BidWithClient) -> BidView {
        BidView {
            id: row.id,
            comment: row.comment,
            is_processed: row.is_processed,
            client_id: row.client_id,
            client_first_name: self.cipher.decrypt(&row.first_name),
            client_last_name: self.cipher.decrypt(&row.last_name),
            client_email: self.cipher.decrypt(&row.email),
            client_phone: self.cipher.decrypt(&row.phone_number),
            submitted_at: row.submitted_at,
        }
    }

    async fn fetch_bid_views(&self, filter: &str) -> Result<Vec<BidView>, StoreError> {
        let query = format!("{SELECT_WITH_CLIENT} {filter} ORDER BY b.submitted_at DESC");
        let rows: Vec<BidWithClient> = sqlx::query_as(&query).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|row| self.bid_view(row)).collect())
    }

    // ── Submission ──────────────────────────────────────────────────────────

    /// Insert a new unprocessed bid for an existing client.
    pub async fn create_bid(&self, client_id: i64, comment: &str) -> Result<BidRow, StoreError> {
        let submitted_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO bids (comment, is_processed, client_id, submitted_at) \
             VALUES (?1, 0, ?2, ?3)",
        )
        .bind(comment)
        .bind(client_id)
        .bind(submitted_at)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        tracing::debug!(bid_id = id, client_id, "bid created");

        Ok(BidRow {
            id,
            comment: comment.to_string(),
            is_processed: false,
            client_id,
            submitted_at,
        })
    }

    /// Full inbound flow: resolve (or register) the client from the four
    /// plaintext contact fields, then record the bid against it.
    pub async fn submit_bid(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: &str,
        comment: &str,
    ) -> Result<BidRow, StoreError> {
        let client = self
            .get_or_create_client(first_name, last_name, email, phone)
            .await?;
        self.create_bid(client.id, comment).await
    }

    // ── Listings ────────────────────────────────────────────────────────────

    /// All bids with decrypted client identity, newest first.
    pub async fn get_all_bids(&self) -> Result<Vec<BidView>, StoreError> {
        self.fetch_bid_views("").await
    }

    /// Bids an admin has not processed yet.
    pub async fn get_unprocessed_bids(&self) -> Result<Vec<BidView>, StoreError> {
        self.fetch_bid_views("WHERE b.is_processed = 0").await
    }

    /// Bids already processed by an admin.
    pub async fn get_processed_bids(&self) -> Result<Vec<BidView>, StoreError> {
        self.fetch_bid_views("WHERE b.is_processed = 1").await
    }

    /// One bid by id; `None` if absent.
    pub async fn get_bid(&self, id: i64) -> Result<Option<BidView>, StoreError> {
        let query = format!("{SELECT_WITH_CLIENT} WHERE b.id = ?1");
        let row: Option<BidWithClient> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| self.bid_view(r)))
    }

    /// All bids of one client, newest first.
    pub async fn get_bids_for_client(&self, client_id: i64) -> Result<Vec<BidView>, StoreError> {
        let query = format!("{SELECT_WITH_CLIENT} WHERE b.client_id = ?1 ORDER BY b.submitted_at DESC");
        let rows: Vec<BidWithClient> = sqlx::query_as(&query)
            .bind(client_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|row| self.bid_view(row)).collect())
    }

    // ── Admin actions ───────────────────────────────────────────────────────

    /// Flip the processed flag. Returns the new value, or `None` if the bid
    /// does not exist.
    pub async fn toggle_bid_processed(&self, id: i64) -> Result<Option<bool>, StoreError> {
        let current: Option<bool> = sqlx::query_scalar("SELECT is_processed FROM bids WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(current) = current else {
            return Ok(None);
        };

        let toggled = !current;
        sqlx::query("UPDATE bids SET is_processed = ?1 WHERE id = ?2")
            .bind(toggled)
            .bind(id)
            .execute(&self.pool)
            .await?;
        tracing::debug!(bid_id = id, processed = toggled, "bid status toggled");
        Ok(Some(toggled))
    }

    /// Delete a bid. Returns `false` if it was already gone.
    pub async fn delete_bid(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM bids WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
