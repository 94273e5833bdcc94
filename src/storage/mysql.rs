//! MySQL storage implementation

use crate::config::DbConfig;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{StorageError, StorageResult, UserStore};
use crate::storage::UserRecord;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::{MySqlPool, Row};

/// User store backed by a MySQL server
pub struct MySqlUserStore {
    pool: MySqlPool,
}

impl MySqlUserStore {
    /// Connects to the configured server and ensures the schema exists
    ///
    /// Calls arrive strictly sequentially from the gateway, so the pool
    /// stays tiny and only spares a reconnect per upsert.
    pub async fn connect(config: &DbConfig) -> Result<Self, StorageError> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        let pool = MySqlPoolOptions::new()
            .max_connections(2)
            .connect_with(options)
            .await?;

        initialize_schema(&pool).await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl UserStore for MySqlUserStore {
    async fn find_user(&self, user_id: &str) -> StorageResult<Option<UserRecord>> {
        let row = sqlx::query("SELECT userID, username, url, timestamp FROM users WHERE userID = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        let record = match row {
            Some(row) => Some(UserRecord {
                user_id: row.try_get("userID")?,
                username: row.try_get("username")?,
                url: row.try_get("url")?,
                last_updated: row.try_get::<DateTime<Utc>, _>("timestamp")?,
            }),
            None => None,
        };

        Ok(record)
    }

    async fn insert_user(
        &self,
        user_id: &str,
        username: &str,
        url: Option<&str>,
    ) -> StorageResult<()> {
        sqlx::query("INSERT INTO users (userID, username, url) VALUES (?, ?, ?)")
            .bind(user_id)
            .bind(username)
            .bind(url)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update_user_url(&self, user_id: &str, url: &str) -> StorageResult<()> {
        let result =
            sqlx::query("UPDATE users SET url = ?, timestamp = CURRENT_TIMESTAMP WHERE userID = ?")
                .bind(url)
                .bind(user_id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::UserNotFound(user_id.to_string()));
        }

        Ok(())
    }
}
