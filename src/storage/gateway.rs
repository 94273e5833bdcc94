//! Persistence gateway - conditional upsert with a swallow-and-log policy

use crate::storage::traits::{StorageResult, UserStore};

/// Writes one observed profile per call, never failing the run
///
/// Storage errors are logged and swallowed here so a single bad record
/// cannot abort the crawl or poison its neighbours.
pub struct Gateway<S: UserStore> {
    store: S,
}

impl<S: UserStore> Gateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Inserts a first-sighted user, or refreshes the stored homepage when
    /// a newly observed one differs
    ///
    /// The username of an existing row is left untouched even when it
    /// changed upstream; only a present-and-different homepage url triggers
    /// an update.
    pub async fn upsert(&self, user_id: &str, username: &str, url: Option<&str>) {
        tracing::info!(user_id, username, url, "Processing user");

        if let Err(e) = self.try_upsert(user_id, username, url).await {
            tracing::error!(user_id, error = %e, "Storage error, record skipped");
        }
    }

    async fn try_upsert(
        &self,
        user_id: &str,
        username: &str,
        url: Option<&str>,
    ) -> StorageResult<()> {
        match self.store.find_user(user_id).await? {
            Some(existing) => {
                if let Some(url) = url {
                    if existing.url.as_deref() != Some(url) {
                        tracing::info!(user_id, "Updating existing user record");
                        self.store.update_user_url(user_id, url).await?;
                    }
                }
            }
            None => {
                tracing::info!(user_id, "Inserting new user record");
                self.store.insert_user(user_id, username, url).await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{StorageError, UserRecord};
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::{Arc, Mutex};

    /// In-memory store with a deterministic tick-based clock
    #[derive(Clone, Default)]
    struct MemoryStore {
        inner: Arc<MemoryInner>,
    }

    #[derive(Default)]
    struct MemoryInner {
        rows: Mutex<HashMap<String, UserRecord>>,
        clock: AtomicI64,
        broken: std::sync::atomic::AtomicBool,
    }

    impl MemoryStore {
        fn broken() -> Self {
            let store = Self::default();
            store
                .inner
                .broken
                .store(true, Ordering::SeqCst);
            store
        }

        fn next_stamp(&self) -> DateTime<Utc> {
            let tick = self.inner.clock.fetch_add(1, Ordering::SeqCst);
            Utc.timestamp_opt(tick, 0).unwrap()
        }

        fn row(&self, user_id: &str) -> Option<UserRecord> {
            self.inner.rows.lock().unwrap().get(user_id).cloned()
        }

        fn check(&self) -> StorageResult<()> {
            if self.inner.broken.load(Ordering::SeqCst) {
                Err(StorageError::UserNotFound("store offline".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl UserStore for MemoryStore {
        async fn find_user(&self, user_id: &str) -> StorageResult<Option<UserRecord>> {
            self.check()?;
            Ok(self.row(user_id))
        }

        async fn insert_user(
            &self,
            user_id: &str,
            username: &str,
            url: Option<&str>,
        ) -> StorageResult<()> {
            self.check()?;
            let record = UserRecord {
                user_id: user_id.to_string(),
                username: username.to_string(),
                url: url.map(|u| u.to_string()),
                last_updated: self.next_stamp(),
            };
            self.inner
                .rows
                .lock()
                .unwrap()
                .insert(user_id.to_string(), record);
            Ok(())
        }

        async fn update_user_url(&self, user_id: &str, url: &str) -> StorageResult<()> {
            self.check()?;
            let stamp = self.next_stamp();
            let mut rows = self.inner.rows.lock().unwrap();
            let record = rows
                .get_mut(user_id)
                .ok_or_else(|| StorageError::UserNotFound(user_id.to_string()))?;
            record.url = Some(url.to_string());
            record.last_updated = stamp;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_insert_on_first_sighting() {
        let store = MemoryStore::default();
        let gateway = Gateway::new(store.clone());

        gateway
            .upsert("123", "alice", Some("https://alice.example"))
            .await;

        let record = store.row("123").unwrap();
        assert_eq!(record.username, "alice");
        assert_eq!(record.url.as_deref(), Some("https://alice.example"));
    }

    #[tokio::test]
    async fn test_insert_without_homepage() {
        let store = MemoryStore::default();
        let gateway = Gateway::new(store.clone());

        gateway.upsert("123", "alice", None).await;

        let record = store.row("123").unwrap();
        assert_eq!(record.url, None);
    }

    #[tokio::test]
    async fn test_unchanged_url_is_idempotent() {
        let store = MemoryStore::default();
        let gateway = Gateway::new(store.clone());

        gateway
            .upsert("123", "alice", Some("https://alice.example"))
            .await;
        let first = store.row("123").unwrap();

        gateway
            .upsert("123", "alice", Some("https://alice.example"))
            .await;
        let second = store.row("123").unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_changed_url_updates_url_and_timestamp() {
        let store = MemoryStore::default();
        let gateway = Gateway::new(store.clone());

        gateway
            .upsert("123", "alice", Some("https://old.example"))
            .await;
        let before = store.row("123").unwrap();

        gateway
            .upsert("123", "alice", Some("https://new.example"))
            .await;
        let after = store.row("123").unwrap();

        assert_eq!(after.url.as_deref(), Some("https://new.example"));
        assert!(after.last_updated > before.last_updated);
    }

    #[tokio::test]
    async fn test_absent_url_never_updates() {
        let store = MemoryStore::default();
        let gateway = Gateway::new(store.clone());

        gateway
            .upsert("123", "alice", Some("https://alice.example"))
            .await;
        let before = store.row("123").unwrap();

        gateway.upsert("123", "alice", None).await;
        let after = store.row("123").unwrap();

        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_username_change_alone_is_a_noop() {
        let store = MemoryStore::default();
        let gateway = Gateway::new(store.clone());

        gateway
            .upsert("123", "alice", Some("https://alice.example"))
            .await;

        gateway
            .upsert("123", "alice-renamed", Some("https://alice.example"))
            .await;

        let record = store.row("123").unwrap();
        assert_eq!(record.username, "alice");
    }

    #[tokio::test]
    async fn test_first_homepage_on_existing_row_updates() {
        let store = MemoryStore::default();
        let gateway = Gateway::new(store.clone());

        gateway.upsert("123", "alice", None).await;
        gateway
            .upsert("123", "alice", Some("https://alice.example"))
            .await;

        let record = store.row("123").unwrap();
        assert_eq!(record.url.as_deref(), Some("https://alice.example"));
    }

    #[tokio::test]
    async fn test_storage_errors_are_swallowed() {
        let store = MemoryStore::broken();
        let gateway = Gateway::new(store.clone());

        // Must not panic or propagate
        gateway
            .upsert("123", "alice", Some("https://alice.example"))
            .await;

        assert!(store.row("123").is_none());
    }
}
