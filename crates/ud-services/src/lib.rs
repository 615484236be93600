//! # ud-services
//!
//! Business logic and UI-facing state for UserDirectory RS.
//!
//! - [`UserService`]: validates through the generated schema, then talks to
//!   whichever [`UserStore`](ud_store::UserStore) was configured
//! - [`UserCollection`]: the in-memory user list with loading and error state
//! - [`presentation`]: headless list, form and delete-confirmation controllers

pub mod collection;
pub mod presentation;
pub mod users;

#[cfg(test)]
pub(crate) mod testing;

pub use collection::{CollectionState, UserCollection};
pub use users::UserService;
