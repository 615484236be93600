//! User collection state container
//!
//! Owns the list the UI renders. `users` reflects the store as of the last
//! successful fetch, minus deletes applied locally since then. Overlapping
//! fetches are not de-duplicated: whichever resolves last wins.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::error;
use ud_core::UdResult;
use ud_models::User;

use crate::users::{log_failure, UserService};

pub const FETCH_FAILED: &str = "Failed to fetch users";
pub const DELETE_FAILED: &str = "Failed to delete user";

/// Snapshot of the collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionState {
    pub users: Vec<User>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct UserCollection {
    service: Arc<UserService>,
    state: watch::Sender<CollectionState>,
}

impl UserCollection {
    /// Starts out loading; nothing has been fetched yet
    pub fn new(service: Arc<UserService>) -> Self {
        let (state, _) = watch::channel(CollectionState {
            loading: true,
            ..Default::default()
        });
        Self { service, state }
    }

    /// Create the collection and run the initial fetch
    pub async fn load(service: Arc<UserService>) -> Self {
        let collection = Self::new(service);
        collection.fetch().await;
        collection
    }

    pub fn service(&self) -> &Arc<UserService> {
        &self.service
    }

    pub fn snapshot(&self) -> CollectionState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every state change
    pub fn subscribe(&self) -> watch::Receiver<CollectionState> {
        self.state.subscribe()
    }

    /// Replace the list with the store's current contents
    ///
    /// Failures are recorded in `error`; the previous list stays in place.
    pub async fn fetch(&self) {
        self.state.send_modify(|s| s.loading = true);

        match self.service.get_all().await {
            Ok(users) => self.state.send_modify(|s| {
                s.users = users;
                s.error = None;
                s.loading = false;
            }),
            Err(err) => {
                error!(error = %err, "Fetching users failed");
                self.state.send_modify(|s| {
                    s.error = Some(FETCH_FAILED.to_string());
                    s.loading = false;
                });
            }
        }
    }

    pub async fn refetch(&self) {
        self.fetch().await
    }

    /// Delete through the service, then drop the record from the local list
    pub async fn delete_user(&self, id: &str) -> UdResult<()> {
        match self.service.delete(id).await {
            Ok(()) => {
                self.state.send_modify(|s| s.users.retain(|u| u.id != id));
                Ok(())
            }
            Err(err) => {
                log_failure("Deleting user failed", &err);
                self.state
                    .send_modify(|s| s.error = Some(DELETE_FAILED.to_string()));
                Err(err)
            }
        }
    }
}
