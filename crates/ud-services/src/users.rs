//! User service
//!
//! Single entry point for user CRUD. Writes are checked against the
//! generated schema first; a record that fails validation never reaches the
//! store.

use std::sync::Arc;

use tracing::{debug, info, warn};
use ud_contracts::{generate_user_schema, Contract, Schema};
use ud_core::{UdError, UdResult};
use ud_models::{User, UserFormData};
use ud_store::UserStore;

/// Service for reading and writing users
///
/// # Example
/// ```ignore
/// let service = UserService::new(ud_store::connect(&config.store)?);
/// let user = service.create(form_data).await?;
/// ```
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    schema: Arc<Schema>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            store,
            schema: Arc::new(generate_user_schema()),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub async fn get_all(&self) -> UdResult<Vec<User>> {
        self.store.get_all().await
    }

    pub async fn get_by_id(&self, id: &str) -> UdResult<Option<User>> {
        self.store.get_by_id(id).await
    }

    pub async fn create(&self, data: UserFormData) -> UdResult<User> {
        self.validate(&data)?;

        let user = self.store.create(data).await?;
        info!(user_id = %user.id, "User created");
        Ok(user)
    }

    pub async fn update(&self, id: &str, data: UserFormData) -> UdResult<User> {
        self.validate(&data)?;

        let user = self.store.update(id, data).await?;
        info!(user_id = %id, "User updated");
        Ok(user)
    }

    pub async fn delete(&self, id: &str) -> UdResult<()> {
        self.store.delete(id).await?;
        info!(user_id = %id, "User deleted");
        Ok(())
    }

    fn validate(&self, data: &UserFormData) -> UdResult<()> {
        self.schema.validate(data).map_err(|errors| {
            debug!(fields = ?errors.fields().collect::<Vec<_>>(), "User form rejected");
            UdError::Validation(errors)
        })
    }
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish_non_exhaustive()
    }
}

/// Log a failure at the level its kind deserves
pub(crate) fn log_failure(context: &str, err: &UdError) {
    match err {
        UdError::NotFound { .. } | UdError::Validation(_) => {
            debug!(error = %err, "{}", context)
        }
        _ => warn!(error = %err, "{}", context),
    }
}
