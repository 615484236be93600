//! # ud-store
//!
//! Data access layer for UserDirectory RS.
//!
//! One capability trait, [`UserStore`], with two implementations:
//!
//! - [`MockUserStore`]: a locally persisted collection behind an injectable
//!   [`KeyValueStorage`], with simulated latency
//! - [`RemoteUserStore`]: the REST endpoint (`/users`, `/users/{id}`)
//!
//! ## Example
//!
//! ```ignore
//! use ud_core::config::AppConfig;
//!
//! let config = AppConfig::from_env()?;
//! let store = ud_store::connect(&config.store)?;
//! let users = store.get_all().await?;
//! ```

pub mod mock;
pub mod remote;
pub mod storage;
pub mod store;

use std::sync::Arc;

use tracing::info;
use ud_core::config::{BackendMode, StoreConfig};
use ud_core::UdResult;

pub use mock::{MockUserStore, USERS_KEY};
pub use remote::RemoteUserStore;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::UserStore;

/// Build the store selected by configuration
pub fn connect(config: &StoreConfig) -> UdResult<Arc<dyn UserStore>> {
    config.validate()?;

    let store: Arc<dyn UserStore> = match config.mode {
        BackendMode::Mock => {
            info!(data_dir = %config.mock.data_dir.display(), "Using mock user store");
            let storage = Arc::new(FileStorage::new(&config.mock.data_dir));
            Arc::new(MockUserStore::new(storage, config.mock.latency))
        }
        BackendMode::Remote => {
            info!(api_url = %config.api_url, "Using remote user store");
            Arc::new(RemoteUserStore::new(&config.api_url)?)
        }
    };

    Ok(store)
}
