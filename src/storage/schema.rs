//! Database schema for the user table

use sqlx::MySqlPool;

/// SQL schema for harvested users
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    userID    VARCHAR(64)  NOT NULL PRIMARY KEY,
    username  VARCHAR(255) NOT NULL,
    url       TEXT NULL,
    timestamp TIMESTAMP    NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

/// Creates the users table if it does not exist
pub async fn initialize_schema(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    sqlx::query(SCHEMA_SQL).execute(pool).await?;
    Ok(())
}
