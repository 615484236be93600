//! User list view model

use ud_models::User;

use crate::collection::CollectionState;

pub const EMPTY_MESSAGE: &str = "No users found.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.full_name(),
            email: user.email.clone(),
            phone: user.phone.clone(),
        }
    }
}

/// What the list screen shows for a given collection state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    /// First load, nothing to show yet
    Loading,
    /// Error banner
    Error(String),
    Empty,
    Rows(Vec<UserRow>),
}

impl ListView {
    pub const COLUMNS: [&'static str; 3] = ["Name", "Email", "Phone"];
}

impl From<&CollectionState> for ListView {
    fn from(state: &CollectionState) -> Self {
        if state.loading && state.users.is_empty() {
            return ListView::Loading;
        }
        if let Some(error) = &state.error {
            return ListView::Error(error.clone());
        }
        if state.users.is_empty() {
            return ListView::Empty;
        }
        ListView::Rows(state.users.iter().map(UserRow::from).collect())
    }
}
