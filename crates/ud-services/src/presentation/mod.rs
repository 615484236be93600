//! Headless presentation controllers
//!
//! These hold the state a screen renders and translate user intent into
//! service or collection calls. Rendering itself belongs to the front end
//! (`ud-cli` draws them in a terminal).

pub mod delete_confirm;
pub mod form;
pub mod list_view;

pub use delete_confirm::{ConfirmError, DeleteConfirmation};
pub use form::{FieldView, FormMode, FormState, LoadOutcome, SubmitOutcome, UserForm};
pub use list_view::{ListView, UserRow};

/// One-line outcome notices
pub mod notices {
    pub use crate::collection::DELETE_FAILED;

    pub const USER_CREATED: &str = "User created successfully";
    pub const USER_UPDATED: &str = "User updated successfully";
    pub const USER_DELETED: &str = "User deleted successfully";
}
