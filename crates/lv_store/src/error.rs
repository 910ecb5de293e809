use thiserror::Error;

/// Store-level failures.
///
/// Deliberately small: a field that fails to decrypt degrades to the
/// sentinel (or the record is skipped) inside the operation and never
/// surfaces here, and a missing client/bid id is an `Option`/`bool`
/// result, not an error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(String),
}
