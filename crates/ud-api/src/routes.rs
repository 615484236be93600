//! API routes

use std::sync::Arc;

use axum::{routing::get, Router};
use ud_services::UserService;
use ud_store::UserStore;

use crate::handlers::{self, users};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<UserService>,
}

impl AppState {
    pub fn new(service: Arc<UserService>) -> Self {
        Self { service }
    }

    pub fn with_store(store: Arc<dyn UserStore>) -> Self {
        Self::new(Arc::new(UserService::new(store)))
    }
}

/// Create the complete API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .nest("/users", users_router())
        .with_state(state)
}

fn users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route(
            "/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
}
