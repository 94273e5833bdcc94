//! Storage trait and error types

use crate::storage::UserRecord;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("User not found: {0}")]
    UserNotFound(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Interface to the user table
///
/// Calls arrive strictly sequentially from the gateway; the upsert policy
/// itself lives above this trait, so implementations stay three dumb
/// statements.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks up a user row by id
    async fn find_user(&self, user_id: &str) -> StorageResult<Option<UserRecord>>;

    /// Inserts a new user row; the store assigns the timestamp
    async fn insert_user(
        &self,
        user_id: &str,
        username: &str,
        url: Option<&str>,
    ) -> StorageResult<()>;

    /// Replaces the stored homepage url and refreshes the timestamp
    async fn update_user_url(&self, user_id: &str, url: &str) -> StorageResult<()>;
}
