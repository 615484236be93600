//! Create/edit form controller
//!
//! The form walks the same field table the schema is generated from, so the
//! rendered fields and the validated fields cannot drift apart.
//!
//! Every form owns a cancellation token. Closing the form cancels it; a load
//! or submit still in flight then resolves to `Cancelled` and leaves the form
//! state alone.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use ud_contracts::{user_form_config, Contract, FieldType};
use ud_core::error::ValidationErrors;
use ud_core::UdError;
use ud_models::{User, UserFormData, UserId};

use crate::users::{log_failure, UserService};

pub const USER_NOT_FOUND: &str = "User not found";
pub const LOAD_FAILED: &str = "Failed to fetch user details";
pub const SAVE_FAILED: &str = "Failed to save user. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(UserId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub values: UserFormData,
    pub field_errors: ValidationErrors,
    pub submit_error: Option<String>,
    pub loading: bool,
    pub submitting: bool,
}

/// One field as the front end should draw it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub field_type: FieldType,
    pub placeholder: Option<&'static str>,
    pub required: bool,
    pub value: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Ready,
    NotFound,
    Failed,
    Cancelled,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Persisted; the caller should refresh its list
    Saved(User),
    /// Blocked by field validation; nothing was sent
    Invalid(ValidationErrors),
    /// The service rejected or could not complete the save
    Failed(UdError),
    Cancelled,
}

pub struct UserForm {
    service: Arc<UserService>,
    mode: FormMode,
    state: Mutex<FormState>,
    cancel: CancellationToken,
}

impl UserForm {
    pub fn new(service: Arc<UserService>, mode: FormMode) -> Self {
        Self {
            service,
            mode,
            state: Mutex::new(FormState::default()),
            cancel: CancellationToken::new(),
        }
    }

    pub fn create(service: Arc<UserService>) -> Self {
        Self::new(service, FormMode::Create)
    }

    pub fn edit(service: Arc<UserService>, id: impl Into<UserId>) -> Self {
        Self::new(service, FormMode::Edit(id.into()))
    }

    /// Edit form pre-populated from a record the caller already holds
    pub fn edit_existing(service: Arc<UserService>, user: &User) -> Self {
        let form = Self::edit(service, user.id.clone());
        form.state.lock().values = user.form_data();
        form
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() {
            "Edit User"
        } else {
            "Create New User"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_edit() {
            "Update User"
        } else {
            "Create User"
        }
    }

    pub fn state(&self) -> FormState {
        self.state.lock().clone()
    }

    /// Controls are disabled while a request is outstanding
    pub fn is_busy(&self) -> bool {
        let state = self.state.lock();
        state.loading || state.submitting
    }

    /// Render routine over the field table, in table order
    pub fn fields(&self) -> Vec<FieldView> {
        let state = self.state.lock();
        user_form_config()
            .iter()
            .map(|field| FieldView {
                name: field.name,
                label: field.label,
                field_type: field.field_type,
                placeholder: field.placeholder,
                required: field.required,
                value: state.values.field(field.name).unwrap_or_default().to_string(),
                error: state.field_errors.first(field.name).map(str::to_string),
            })
            .collect()
    }

    /// Set one value by field name; names the schema does not accept are ignored
    pub fn set_value(&self, name: &str, value: impl Into<String>) -> bool {
        if !Contract::<UserFormData>::is_writable(self.service.schema(), name) {
            return false;
        }
        self.state.lock().values.set_field(name, value)
    }

    /// Pre-populate the form
    ///
    /// Create mode resets to empty values. Edit mode fetches the record and
    /// reports a missing record separately from a failed fetch.
    pub async fn load(&self) -> LoadOutcome {
        if self.cancel.is_cancelled() {
            return LoadOutcome::Cancelled;
        }

        let id = match &self.mode {
            FormMode::Create => {
                *self.state.lock() = FormState::default();
                return LoadOutcome::Ready;
            }
            FormMode::Edit(id) => id.clone(),
        };

        self.state.lock().loading = true;

        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return LoadOutcome::Cancelled,
            result = self.service.get_by_id(&id) => result,
        };

        let mut state = self.state.lock();
        state.loading = false;
        match result {
            Ok(Some(user)) => {
                state.values = user.form_data();
                state.field_errors = ValidationErrors::new();
                LoadOutcome::Ready
            }
            Ok(None) => {
                state.submit_error = Some(USER_NOT_FOUND.to_string());
                LoadOutcome::NotFound
            }
            Err(err) => {
                log_failure("Loading user failed", &err);
                state.submit_error = Some(LOAD_FAILED.to_string());
                LoadOutcome::Failed
            }
        }
    }

    /// Validate, then create or update
    pub async fn submit(&self, data: UserFormData) -> SubmitOutcome {
        if self.cancel.is_cancelled() {
            return SubmitOutcome::Cancelled;
        }

        {
            let mut state = self.state.lock();
            state.submit_error = None;
            state.values = data.clone();

            if let Err(errors) = self.service.schema().validate(&data) {
                state.field_errors = errors.clone();
                return SubmitOutcome::Invalid(errors);
            }
            state.field_errors = ValidationErrors::new();
            state.submitting = true;
        }

        let save = async {
            match &self.mode {
                FormMode::Create => self.service.create(data).await,
                FormMode::Edit(id) => self.service.update(id, data).await,
            }
        };

        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return SubmitOutcome::Cancelled,
            result = save => result,
        };

        let mut state = self.state.lock();
        state.submitting = false;
        match result {
            Ok(user) => SubmitOutcome::Saved(user),
            Err(UdError::Validation(errors)) => {
                // Remote endpoints may reject fields the local schema accepted
                state.field_errors = errors.clone();
                state.submit_error = unplaced_messages(&errors);
                SubmitOutcome::Invalid(errors)
            }
            Err(err) => {
                log_failure("Saving user failed", &err);
                state.submit_error = Some(SAVE_FAILED.to_string());
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Submit whatever values the form currently holds
    pub async fn submit_current(&self) -> SubmitOutcome {
        let data = self.state.lock().values.clone();
        self.submit(data).await
    }

    /// Close the form, abandoning any request in flight
    pub fn close(&self) {
        self.cancel.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Messages no field can show inline: base errors and unknown fields
fn unplaced_messages(errors: &ValidationErrors) -> Option<String> {
    let fields = user_form_config();
    let mut messages = errors.base_errors().to_vec();
    for (field, field_messages) in errors.iter() {
        if !fields.iter().any(|f| f.name == field) {
            messages.extend(field_messages.iter().cloned());
        }
    }
    (!messages.is_empty()).then(|| messages.join(", "))
}

impl Drop for UserForm {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::service;
    use std::time::Duration;
    use ud_core::config::MockLatency;
    use ud_store::{MemoryStorage, MockUserStore};

    fn ann() -> UserFormData {
        UserFormData::new("Ann", "Lee", "a@b.com", "1234567890")
    }

    #[tokio::test]
    async fn test_create_form_starts_empty() {
        let (service, _) = service();
        let form = UserForm::create(service);

        assert_eq!(form.load().await, LoadOutcome::Ready);
        assert_eq!(form.title(), "Create New User");

        let fields = form.fields();
        let names: Vec<_> = fields.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["firstName", "lastName", "email", "phone"]);
        assert!(fields.iter().all(|f| f.value.is_empty() && f.error.is_none()));
    }

    #[tokio::test]
    async fn test_edit_form_preloads() {
        let (service, _) = service();
        let form = UserForm::edit(service, "1");

        assert_eq!(form.load().await, LoadOutcome::Ready);
        assert_eq!(form.fields()[0].value, "John");
        assert_eq!(form.submit_label(), "Update User");
        assert!(!form.is_busy());
    }

    #[tokio::test]
    async fn test_edit_missing_and_failed_are_distinct() {
        let (service, store) = service();

        let missing = UserForm::edit(service.clone(), "999");
        assert_eq!(missing.load().await, LoadOutcome::NotFound);
        assert_eq!(missing.state().submit_error.as_deref(), Some(USER_NOT_FOUND));

        store.fail_reads(true);
        let broken = UserForm::edit(service, "1");
        assert_eq!(broken.load().await, LoadOutcome::Failed);
        assert_eq!(broken.state().submit_error.as_deref(), Some(LOAD_FAILED));
    }

    #[tokio::test]
    async fn test_invalid_submit_shows_inline_errors() {
        let (service, _) = service();
        let form = UserForm::create(service.clone());

        let mut data = ann();
        data.phone = "123".into();
        let outcome = form.submit(data).await;
        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));

        let phone = form.fields().into_iter().find(|f| f.name == "phone").unwrap();
        assert_eq!(
            phone.error.as_deref(),
            Some("Phone number must be a valid 10-digit number")
        );
        assert_eq!(phone.value, "123");
        assert_eq!(service.get_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_submit() {
        let (service, _) = service();
        let form = UserForm::create(service.clone());

        let SubmitOutcome::Saved(user) = form.submit(ann()).await else {
            panic!("expected save");
        };
        assert_eq!(user.form_data(), ann());
        assert!(service.get_all().await.unwrap().contains(&user));
        assert!(!form.is_busy());
    }

    #[tokio::test]
    async fn test_edit_submit_via_set_value() {
        let (service, _) = service();
        let form = UserForm::edit(service.clone(), "1");
        form.load().await;

        assert!(form.set_value("lastName", "Smith"));
        let outcome = form.submit_current().await;
        assert!(matches!(outcome, SubmitOutcome::Saved(_)));

        let john = service.get_by_id("1").await.unwrap().unwrap();
        assert_eq!(john.last_name, "Smith");
    }

    #[tokio::test]
    async fn test_failed_save_sets_submit_error() {
        let (service, store) = service();
        let form = UserForm::create(service);

        store.fail_writes(true);
        let outcome = form.submit(ann()).await;

        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert_eq!(form.state().submit_error.as_deref(), Some(SAVE_FAILED));
        assert!(!form.is_busy());
    }

    #[tokio::test]
    async fn test_rejected_without_field_errors_sets_submit_error() {
        let (service, store) = service();
        let form = UserForm::create(service.clone());

        let mut errors = ValidationErrors::new();
        errors.add_base("Email already taken");
        store.reject_writes(Some(errors));
        let outcome = form.submit(ann()).await;

        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        let state = form.state();
        assert!(state.field_errors.fields().next().is_none());
        assert_eq!(state.submit_error.as_deref(), Some("Email already taken"));
        assert!(form.fields().iter().all(|f| f.error.is_none()));
    }

    #[tokio::test]
    async fn test_rejected_unknown_field_sets_submit_error() {
        let (service, store) = service();
        let form = UserForm::create(service);

        let mut errors = ValidationErrors::new();
        errors.add("phone", "Phone number is already registered");
        errors.add("nickname", "Nickname is taken");
        store.reject_writes(Some(errors));
        form.submit(ann()).await;

        let state = form.state();
        assert_eq!(state.submit_error.as_deref(), Some("Nickname is taken"));
        let phone = form.fields().into_iter().find(|f| f.name == "phone").unwrap();
        assert_eq!(
            phone.error.as_deref(),
            Some("Phone number is already registered")
        );
    }

    #[tokio::test]
    async fn test_set_value_rejects_unwritable_names() {
        let (service, _) = service();
        let form = UserForm::create(service);

        assert!(!form.set_value("id", "42"));
        assert!(form.set_value("email", "a@b.com"));
        assert_eq!(form.state().values.email, "a@b.com");
    }

    #[tokio::test]
    async fn test_edit_existing_needs_no_fetch() {
        let (service, store) = service();
        let john = service.get_by_id("1").await.unwrap().unwrap();

        store.fail_reads(true);
        let form = UserForm::edit_existing(service, &john);
        assert_eq!(form.fields()[1].value, "Doe");
    }

    fn slow_service() -> Arc<UserService> {
        let store = MockUserStore::new(Arc::new(MemoryStorage::new()), MockLatency::uniform(500));
        Arc::new(UserService::new(Arc::new(store)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_cancels_inflight_submit() {
        let service = slow_service();
        let form = Arc::new(UserForm::create(service.clone()));

        let task = {
            let form = form.clone();
            tokio::spawn(async move { form.submit(ann()).await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(form.is_busy());

        form.close();
        let outcome = task.await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Cancelled));

        // State is frozen as it was when the form closed
        assert!(form.state().submitting);
        assert_eq!(form.state().submit_error, None);
        assert_eq!(service.get_all().await.unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_cancels_inflight_load() {
        let form = Arc::new(UserForm::edit(slow_service(), "1"));

        let task = {
            let form = form.clone();
            tokio::spawn(async move { form.load().await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;

        form.close();
        assert_eq!(task.await.unwrap(), LoadOutcome::Cancelled);
        assert_eq!(form.state().values, UserFormData::default());
        assert!(form.is_closed());
        assert_eq!(form.load().await, LoadOutcome::Cancelled);
    }
}
