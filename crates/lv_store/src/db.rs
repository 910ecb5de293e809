//! Database abstraction over SQLite via sqlx.

use std::path::Path;
use std::sync::Arc;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use lv_crypto::FieldCipher;

use crate::error::StoreError;

/// Central store handle. Cheap to clone (Arc internally).
///
/// Holds the connection pool and the process-wide field cipher; the cipher
/// is built once at startup (fail-fast on bad key material) and immutable
/// thereafter.
#[derive(Clone)]
pub struct Store {
    pub pool: SqlitePool,
    pub(crate) cipher: Arc<FieldCipher>,
}

impl Store {
    /// Open (or create) the SQLite database at `db_path`.
    /// Runs all pending migrations automatically.
    ///
    /// WAL journal mode and foreign-key enforcement are configured at
    /// connection time, not inside a migration — SQLite forbids changing
    /// `journal_mode` inside a transaction and sqlx wraps every migration
    /// in one.
    pub async fn open(db_path: &Path, cipher: FieldCipher) -> Result<Self, StoreError> {
        let opts = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true);

        let pool = SqlitePool::connect_with(opts).await?;
        Self::migrate(&pool).await?;

        Ok(Self {
            pool,
            cipher: Arc::new(cipher),
        })
    }

    /// In-memory store for tests. A single pooled connection, kept alive for
    /// the pool's lifetime — SQLite drops a `:memory:` database when its
    /// last connection closes.
    pub async fn open_in_memory(cipher: FieldCipher) -> Result<Self, StoreError> {
        let opts = SqliteConnectOptions::new()
            .filename(":memory:")
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opts)
            .await?;
        Self::migrate(&pool).await?;

        Ok(Self {
            pool,
            cipher: Arc::new(cipher),
        })
    }

    async fn migrate(pool: &SqlitePool) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(|e| StoreError::Migration(e.to_string()))
    }

    /// The process-wide field cipher.
    pub fn cipher(&self) -> &FieldCipher {
        &self.cipher
    }
}
