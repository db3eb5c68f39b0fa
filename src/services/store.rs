use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Profile, Role};

/// Errors that can occur when interacting with the profile store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("malformed row: {0}")]
    Decode(String),
}

/// Profile storage collaborator.
///
/// Supplies profile records by role and persists match records. Reads are
/// snapshot-consistent for the duration of one ranking call, and the order
/// of `fetch_by_role` is the tie-break order the ranking engine preserves.
/// `persist_match_batch` is all-or-nothing; a partially applied batch must
/// never be observable.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn fetch_by_id(&self, id: i64) -> Result<Profile, StoreError>;

    async fn fetch_by_role(&self, role: Role) -> Result<Vec<Profile>, StoreError>;

    async fn persist_match_batch(
        &self,
        seeker_id: i64,
        company_ids: &[i64],
    ) -> Result<(), StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
