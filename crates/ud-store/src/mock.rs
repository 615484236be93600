//! Locally persisted mock backend
//!
//! The whole collection lives as one JSON array under [`USERS_KEY`]. The first
//! read of an empty storage seeds it with two example records. Every call
//! sleeps for its configured latency before touching storage.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};
use ud_core::config::MockLatency;
use ud_core::{UdError, UdResult};
use ud_models::{seed_users, User, UserFormData};
use uuid::Uuid;

use crate::storage::KeyValueStorage;
use crate::store::UserStore;

/// Storage key of the persisted collection
pub const USERS_KEY: &str = "users";

pub struct MockUserStore {
    storage: Arc<dyn KeyValueStorage>,
    latency: MockLatency,
    /// Serialises read-modify-write cycles on the blob
    write_lock: Mutex<()>,
}

impl MockUserStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>, latency: MockLatency) -> Self {
        Self {
            storage,
            latency,
            write_lock: Mutex::new(()),
        }
    }

    async fn simulate(&self, ms: u64) {
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }

    async fn load(&self) -> UdResult<Vec<User>> {
        match self.storage.get(USERS_KEY).await? {
            Some(blob) => Ok(serde_json::from_str(&blob)?),
            None => {
                let seeds = seed_users();
                self.save(&seeds).await?;
                info!(count = seeds.len(), "Seeded mock user store");
                Ok(seeds)
            }
        }
    }

    async fn save(&self, users: &[User]) -> UdResult<()> {
        let blob = serde_json::to_string(users)?;
        self.storage.set(USERS_KEY, &blob).await?;
        Ok(())
    }

    fn next_id(users: &[User]) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if users.iter().all(|u| u.id != id) {
                return id;
            }
        }
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn get_all(&self) -> UdResult<Vec<User>> {
        self.simulate(self.latency.list_ms).await;
        let _guard = self.write_lock.lock().await;
        let users = self.load().await?;
        debug!(count = users.len(), "Loaded users from mock store");
        Ok(users)
    }

    async fn get_by_id(&self, id: &str) -> UdResult<Option<User>> {
        self.simulate(self.latency.lookup_ms).await;
        let _guard = self.write_lock.lock().await;
        let users = self.load().await?;
        Ok(users.into_iter().find(|u| u.id == id))
    }

    async fn create(&self, data: UserFormData) -> UdResult<User> {
        self.simulate(self.latency.write_ms).await;
        let _guard = self.write_lock.lock().await;
        let mut users = self.load().await?;

        let user = data.into_user(Self::next_id(&users));
        users.push(user.clone());
        self.save(&users).await?;

        info!(user_id = %user.id, "Created user in mock store");
        Ok(user)
    }

    async fn update(&self, id: &str, data: UserFormData) -> UdResult<User> {
        self.simulate(self.latency.write_ms).await;
        let _guard = self.write_lock.lock().await;
        let mut users = self.load().await?;

        let slot = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| UdError::not_found("User", id))?;
        let updated = data.into_user(id);
        *slot = updated.clone();
        self.save(&users).await?;

        info!(user_id = %id, "Updated user in mock store");
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> UdResult<()> {
        self.simulate(self.latency.write_ms).await;
        let _guard = self.write_lock.lock().await;
        let mut users = self.load().await?;

        let before = users.len();
        users.retain(|u| u.id != id);
        self.save(&users).await?;

        debug!(user_id = %id, removed = before - users.len(), "Deleted user from mock store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn store() -> (MockUserStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        (MockUserStore::new(storage.clone(), MockLatency::none()), storage)
    }

    fn ann() -> UserFormData {
        UserFormData::new("Ann", "Lee", "a@b.com", "1234567890")
    }

    #[tokio::test]
    async fn test_first_read_seeds_storage() {
        let (store, storage) = store();

        let users = store.get_all().await.unwrap();
        assert_eq!(users, seed_users());

        let blob = storage.get(USERS_KEY).await.unwrap().unwrap();
        let persisted: Vec<User> = serde_json::from_str(&blob).unwrap();
        assert_eq!(persisted, users);
    }

    #[tokio::test]
    async fn test_existing_blob_is_not_reseeded() {
        let (store, storage) = store();
        storage.set(USERS_KEY, "[]").await.unwrap();

        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_assigns_fresh_id() {
        let (store, _) = store();
        let before = store.get_all().await.unwrap();

        let created = store.create(ann()).await.unwrap();
        assert!(before.iter().all(|u| u.id != created.id));
        assert_eq!(created.form_data(), ann());

        let after = store.get_all().await.unwrap();
        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(after.last(), Some(&created));
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let (store, _) = store();

        let john = store.get_by_id("1").await.unwrap().unwrap();
        assert_eq!(john.first_name, "John");
        assert_eq!(store.get_by_id("999").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_replaces_only_target() {
        let (store, _) = store();
        let mut data = store.get_by_id("1").await.unwrap().unwrap().form_data();
        data.last_name = "Smith".into();

        let updated = store.update("1", data.clone()).await.unwrap();
        assert_eq!(updated, data.into_user("1"));

        let john = store.get_by_id("1").await.unwrap().unwrap();
        assert_eq!(john.first_name, "John");
        assert_eq!(john.last_name, "Smith");

        let jane = store.get_by_id("2").await.unwrap().unwrap();
        assert_eq!(jane, seed_users()[1]);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (store, _) = store();

        let err = store.update("999", ann()).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.get_all().await.unwrap(), seed_users());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (store, _) = store();

        store.delete("2").await.unwrap();
        store.delete("2").await.unwrap();

        let users = store.get_all().await.unwrap();
        assert_eq!(users.len(), 1);
        assert!(users.iter().all(|u| u.id != "2"));
    }

    #[tokio::test]
    async fn test_delete_unknown_leaves_collection() {
        let (store, _) = store();

        store.delete("999").await.unwrap();
        assert_eq!(store.get_all().await.unwrap(), seed_users());
    }

    #[tokio::test]
    async fn test_corrupt_blob_is_transport_error() {
        let (store, storage) = store();
        storage.set(USERS_KEY, "{not json").await.unwrap();

        let err = store.get_all().await.unwrap_err();
        assert!(matches!(err, UdError::Transport(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_simulated() {
        let storage = Arc::new(MemoryStorage::new());
        let store = MockUserStore::new(storage, MockLatency::default());

        let started = tokio::time::Instant::now();
        store.get_by_id("1").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(300));
    }
}
