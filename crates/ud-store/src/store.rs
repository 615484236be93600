//! The user store capability

use async_trait::async_trait;
use ud_core::UdResult;
use ud_models::{User, UserFormData};

/// CRUD over user records
///
/// Implementations are selected once at startup and shared behind an `Arc`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Every record, in store order
    async fn get_all(&self) -> UdResult<Vec<User>>;

    /// The record with this id; absence is `Ok(None)`
    async fn get_by_id(&self, id: &str) -> UdResult<Option<User>>;

    /// Persist a new record under a freshly assigned id
    async fn create(&self, data: UserFormData) -> UdResult<User>;

    /// Replace the record with `{...data, id}`; `NotFound` if there is none
    async fn update(&self, id: &str, data: UserFormData) -> UdResult<User>;

    /// Remove the record; removing an absent id succeeds
    async fn delete(&self, id: &str) -> UdResult<()>;
}
