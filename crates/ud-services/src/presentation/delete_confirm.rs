//! Two-step delete guard
//!
//! A delete only runs after the user first selects a record and then
//! explicitly confirms. While the request is outstanding the dialog is
//! pending: its controls are disabled and it can be neither cancelled nor
//! confirmed again.

use parking_lot::Mutex;
use ud_core::UdError;
use ud_models::User;

use crate::collection::UserCollection;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum DialogState {
    #[default]
    Closed,
    Open(User),
    Pending(User),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfirmError {
    #[error("No delete has been requested")]
    NotOpen,

    #[error("A delete is already in progress")]
    Pending,

    #[error("Delete failed: {0}")]
    Delete(#[from] UdError),
}

#[derive(Debug, Default)]
pub struct DeleteConfirmation {
    state: Mutex<DialogState>,
}

impl DeleteConfirmation {
    pub const TITLE: &'static str = "Delete User";
    pub const PROMPT: &'static str =
        "Are you sure you want to delete this user? This action cannot be undone.";

    pub fn new() -> Self {
        Self::default()
    }

    /// First step: select the record. Refused while a delete is pending.
    pub fn request(&self, user: User) -> bool {
        let mut state = self.state.lock();
        if matches!(*state, DialogState::Pending(_)) {
            return false;
        }
        *state = DialogState::Open(user);
        true
    }

    /// Dismiss without deleting. Refused while a delete is pending.
    pub fn cancel(&self) -> bool {
        let mut state = self.state.lock();
        if matches!(*state, DialogState::Pending(_)) {
            return false;
        }
        *state = DialogState::Closed;
        true
    }

    pub fn is_open(&self) -> bool {
        !matches!(*self.state.lock(), DialogState::Closed)
    }

    pub fn controls_disabled(&self) -> bool {
        matches!(*self.state.lock(), DialogState::Pending(_))
    }

    pub fn target(&self) -> Option<User> {
        match &*self.state.lock() {
            DialogState::Closed => None,
            DialogState::Open(user) | DialogState::Pending(user) => Some(user.clone()),
        }
    }

    /// Second step: run the delete through the collection
    ///
    /// Closes on success. On failure the dialog stays open on the same record
    /// so the user can retry or cancel.
    pub async fn confirm(&self, collection: &UserCollection) -> Result<User, ConfirmError> {
        let user = {
            let mut state = self.state.lock();
            match std::mem::take(&mut *state) {
                DialogState::Open(user) => {
                    *state = DialogState::Pending(user.clone());
                    user
                }
                DialogState::Closed => return Err(ConfirmError::NotOpen),
                pending @ DialogState::Pending(_) => {
                    *state = pending;
                    return Err(ConfirmError::Pending);
                }
            }
        };

        let result = collection.delete_user(&user.id).await;

        let mut state = self.state.lock();
        match result {
            Ok(()) => {
                *state = DialogState::Closed;
                Ok(user)
            }
            Err(err) => {
                *state = DialogState::Open(user);
                Err(ConfirmError::Delete(err))
            }
        }
    }
}
