//! Storage layer for harvested user records
//!
//! One table, one row per user. The [`UserStore`] trait is the seam between
//! the crawl loop and MySQL; the [`Gateway`] sits above it and owns the
//! conditional-upsert policy together with the swallow-and-log error rule.

mod gateway;
mod mysql;
pub mod schema;
mod traits;

pub use gateway::Gateway;
pub use mysql::MySqlUserStore;
pub use traits::{StorageError, StorageResult, UserStore};

use chrono::{DateTime, Utc};

/// One persisted user row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Stable identifier, the table's primary key
    pub user_id: String,

    /// Display name as first observed; never rewritten afterwards
    pub username: String,

    /// Declared homepage, NULL until one is observed
    pub url: Option<String>,

    /// Server-assigned; touched on insert and on url change only
    pub last_updated: DateTime<Utc>,
}
