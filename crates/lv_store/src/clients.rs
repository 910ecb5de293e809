//! Client identity resolution and queries.
//!
//! Everything here pays the full decrypt-then-scan cost: ciphertext is not
//! searchable, so dedup and search load every client row and decrypt in the
//! clear. See the crate docs for why that is deliberate.

use chrono::{DateTime, Utc};

use lv_crypto::CryptoError;

use crate::db::Store;
use crate::error::StoreError;
use crate::models::ClientRow;
use crate::views::ClientView;

// ── Internal row types ──────────────────────────────────────────────────────

#[derive(sqlx::FromRow)]
struct ClientWithBids {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    phone_number: String,
    registered_at: DateTime<Utc>,
    total_bids: i64,
}

const SELECT_WITH_BIDS: &str = "SELECT c.id, c.first_name, c.last_name, c.email, c.phone_number, \
     c.registered_at, \
     (SELECT COUNT(*) FROM bids b WHERE b.client_id = c.id) AS total_bids \
     FROM clients c";

/// All four identity fields of one client, in the clear.
///
/// Built per record during bulk scans; a record that fails to produce one is
/// skipped by the scan, never fatal for it.
struct DecryptedClient {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
}

impl Store {
    fn decrypt_identity(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        phone_number: &str,
    ) -> Result<DecryptedClient, CryptoError> {
        Ok(DecryptedClient {
            first_name: self.cipher.try_decrypt(first_name)?,
            last_name: self.cipher.try_decrypt(last_name)?,
            email: self.cipher.try_decrypt(email)?,
            phone: self.cipher.try_decrypt(phone_number)?,
        })
    }

    /// Lossy projection: individual undecryptable fields degrade to the
    /// sentinel instead of failing the record.
    fn client_view(&self, row: ClientWithBids) -> ClientView {
        ClientView {
            id: row.id,
            first_name: self.cipher.decrypt(&row.first_name),
            last_name: self.cipher.decrypt(&row.last_name),
            email: self.cipher.decrypt(&row.email),
            phone: self.cipher.decrypt(&row.phone_number),
            registered_at: row.registered_at,
            total_bids: row.total_bids,
        }
    }

    // ── Identity resolver ───────────────────────────────────────────────────

    /// Find the first stored client whose decrypted email or phone matches
    /// the candidate, case-insensitively. Rows are scanned in id order, so
    /// the earliest-registered match wins.
    ///
    /// Loads and decrypts every client row. A record whose contact fields
    /// cannot be decrypted is skipped, not fatal for the search.
    pub async fn find_client_by_email_or_phone(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<Option<ClientRow>, StoreError> {
        if email.trim().is_empty() && phone.trim().is_empty() {
            return Ok(None);
        }

        let candidate_email = email.to_lowercase();
        let candidate_phone = phone.to_lowercase();

        let rows: Vec<ClientRow> = sqlx::query_as(
            "SELECT id, first_name, last_name, email, phone_number, registered_at \
             FROM clients ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(clients = rows.len(), "decrypt-scanning clients for identity match");

        for row in rows {
            let decrypted_email = self.cipher.try_decrypt(&row.email);
            let decrypted_phone = self.cipher.try_decrypt(&row.phone_number);
            let (stored_email, stored_phone) = match (decrypted_email, decrypted_phone) {
                (Ok(e), Ok(p)) => (e, p),
                _ => {
                    tracing::warn!(client_id = row.id, "skipping client with undecryptable contact fields");
                    continue;
                }
            };

            let email_matches =
                !email.is_empty() && stored_email.to_lowercase() == candidate_email;
            let phone_matches =
                !phone.is_empty() && stored_phone.to_lowercase() == candidate_phone;
            if email_matches || phone_matches {
                return Ok(Some(row));
            }
        }

        Ok(None)
    }

    /// Return the existing client for this email/phone, or create one.
    ///
    /// Idempotent create, not an upsert: when a match is found the stored
    /// record is returned unchanged — no field is ever updated from the new
    /// request. When none is found, all four fields are encrypted and a new
    /// row is inserted with `registered_at = now`.
    ///
    /// The read-then-insert pair is not serialized against concurrent
    /// callers: two requests for the same unseen email can both pass the
    /// not-found check. The stored-value UNIQUE constraint then fails the
    /// later insert only when the trimmed plaintexts are byte-identical
    /// (deterministic encryption); that surfaces as `StoreError::Database`.
    pub async fn get_or_create_client(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: &str,
    ) -> Result<ClientRow, StoreError> {
        let first_name = first_name.trim();
        let last_name = last_name.trim();
        let email = email.trim();
        let phone = phone.trim();

        if let Some(existing) = self.find_client_by_email_or_phone(email, phone).await? {
            tracing::debug!(client_id = existing.id, "identity resolved to existing client");
            return Ok(existing);
        }

        let encrypted_first = self.cipher.encrypt(first_name);
        let encrypted_last = self.cipher.encrypt(last_name);
        let encrypted_email = self.cipher.encrypt(email);
        let encrypted_phone = self.cipher.encrypt(phone);
        let registered_at = Utc::now();

        let result = sqlx::query(
            "INSERT INTO clients (first_name, last_name, email, phone_number, registered_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&encrypted_first)
        .bind(&encrypted_last)
        .bind(&encrypted_email)
        .bind(&encrypted_phone)
        .bind(registered_at)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        tracing::debug!(client_id = id, "registered new client");

        Ok(ClientRow {
            id,
            first_name: encrypted_first,
            last_name: encrypted_last,
            email: encrypted_email,
            phone_number: encrypted_phone,
            registered_at,
        })
    }

    // ── Query service ───────────────────────────────────────────────────────

    /// All clients as decrypted views with bid counts, newest registration
    /// first. Undecryptable fields degrade to the sentinel; the listing
    /// itself never fails because of one corrupt record.
    pub async fn get_all_clients(&self) -> Result<Vec<ClientView>, StoreError> {
        let rows: Vec<ClientWithBids> =
            sqlx::query_as(SELECT_WITH_BIDS).fetch_all(&self.pool).await?;

        let mut views: Vec<ClientView> =
            rows.into_iter().map(|row| self.client_view(row)).collect();
        views.sort_by(|a, b| b.registered_at.cmp(&a.registered_at));
        Ok(views)
    }

    /// One client by id; `None` if absent (a normal outcome, not an error).
    pub async fn get_client(&self, id: i64) -> Result<Option<ClientView>, StoreError> {
        let query = format!("{SELECT_WITH_BIDS} WHERE c.id = ?1");
        let row: Option<ClientWithBids> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| self.client_view(r)))
    }

    /// Substring search over decrypted full name, email and phone.
    ///
    /// Empty or whitespace-only queries return an empty result, not all
    /// clients. Records whose decryption fails are excluded, not reported.
    /// Ordered by registration time, newest first.
    pub async fn search_clients(&self, query: &str) -> Result<Vec<ClientView>, StoreError> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<ClientWithBids> =
            sqlx::query_as(SELECT_WITH_BIDS).fetch_all(&self.pool).await?;

        tracing::debug!(clients = rows.len(), "decrypt-scanning clients for search");

        let mut views: Vec<ClientView> = rows
            .into_iter()
            .filter_map(|row| {
                let identity = match self.decrypt_identity(
                    &row.first_name,
                    &row.last_name,
                    &row.email,
                    &row.phone_number,
                ) {
                    Ok(identity) => identity,
                    Err(_) => {
                        tracing::warn!(client_id = row.id, "excluding undecryptable client from search");
                        return None;
                    }
                };

                let full_name =
                    format!("{} {}", identity.first_name, identity.last_name).to_lowercase();
                let matches = full_name.contains(&needle)
                    || identity.email.to_lowercase().contains(&needle)
                    || identity.phone.to_lowercase().contains(&needle);
                if !matches {
                    return None;
                }

                Some(ClientView {
                    id: row.id,
                    first_name: identity.first_name,
                    last_name: identity.last_name,
                    email: identity.email,
                    phone: identity.phone,
                    registered_at: row.registered_at,
                    total_bids: row.total_bids,
                })
            })
            .collect();

        views.sort_by(|a, b| b.registered_at.cmp(&a.registered_at));
        Ok(views)
    }

    /// Remove a client that no longer has any bids. Returns `false` if the
    /// client still has bids or does not exist.
    pub async fn delete_client_if_bidless(&self, client_id: i64) -> Result<bool, StoreError> {
        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bids WHERE client_id = ?1")
            .bind(client_id)
            .fetch_one(&self.pool)
            .await?;
        if remaining > 0 {
            return Ok(false);
        }

        let result = sqlx::query("DELETE FROM clients WHERE id = ?1")
            .bind(client_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
