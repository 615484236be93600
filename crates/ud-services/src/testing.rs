//! Test doubles shared by the service tests

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use ud_core::config::MockLatency;
use ud_core::error::ValidationErrors;
use ud_core::{UdError, UdResult};
use ud_models::{User, UserFormData};
use ud_store::{MemoryStorage, MockUserStore, UserStore};

use crate::UserService;

/// In-memory mock store whose reads and writes can be switched to fail
pub struct FlakyStore {
    inner: MockUserStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    rejection: Mutex<Option<ValidationErrors>>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self {
            inner: MockUserStore::new(Arc::new(MemoryStorage::new()), MockLatency::none()),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            rejection: Mutex::new(None),
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Answer creates and updates with these validation errors
    pub fn reject_writes(&self, errors: Option<ValidationErrors>) {
        *self.rejection.lock() = errors;
    }

    fn check_write(&self) -> UdResult<()> {
        Self::check(&self.fail_writes)?;
        match &*self.rejection.lock() {
            Some(errors) => Err(UdError::Validation(errors.clone())),
            None => Ok(()),
        }
    }

    fn check(flag: &AtomicBool) -> UdResult<()> {
        if flag.load(Ordering::SeqCst) {
            Err(UdError::transport("connection refused"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UserStore for FlakyStore {
    async fn get_all(&self) -> UdResult<Vec<User>> {
        Self::check(&self.fail_reads)?;
        self.inner.get_all().await
    }

    async fn get_by_id(&self, id: &str) -> UdResult<Option<User>> {
        Self::check(&self.fail_reads)?;
        self.inner.get_by_id(id).await
    }

    async fn create(&self, data: UserFormData) -> UdResult<User> {
        self.check_write()?;
        self.inner.create(data).await
    }

    async fn update(&self, id: &str, data: UserFormData) -> UdResult<User> {
        self.check_write()?;
        self.inner.update(id, data).await
    }

    async fn delete(&self, id: &str) -> UdResult<()> {
        Self::check(&self.fail_writes)?;
        self.inner.delete(id).await
    }
}

/// A service over a fresh seeded in-memory store
pub fn service() -> (Arc<UserService>, Arc<FlakyStore>) {
    let store = Arc::new(FlakyStore::new());
    let service = Arc::new(UserService::new(store.clone()));
    (service, store)
}
