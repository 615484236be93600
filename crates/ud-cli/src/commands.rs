//! Command implementations.
//!
//! Each command drives the same headless controllers a graphical front end
//! would: the collection for listing and deleting, the form for create and
//! edit, the confirmation dialog for delete.

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use colored::Colorize;
use tracing::debug;

use ud_models::User;
use ud_services::presentation::form::{LOAD_FAILED, USER_NOT_FOUND};
use ud_services::presentation::{
    notices, ConfirmError, DeleteConfirmation, FieldView, ListView, LoadOutcome, SubmitOutcome,
    UserForm,
};
use ud_services::{UserCollection, UserService};

use crate::cli::args::{Command, FieldArgs};
use crate::cli::console::Console;
use crate::render;

pub async fn dispatch<R: BufRead, W: Write>(
    command: Command,
    service: Arc<UserService>,
    console: &mut Console<R, W>,
) -> Result<()> {
    match command {
        Command::List => list(service, console).await,
        Command::Show { id } => show(&service, &id, console).await,
        Command::Create(fields) => create(service, &fields, console).await,
        Command::Edit { id, fields } => edit(service, id, &fields, console).await,
        Command::Delete { id, yes } => delete(service, &id, yes, console).await,
    }
}

async fn list<R: BufRead, W: Write>(
    service: Arc<UserService>,
    console: &mut Console<R, W>,
) -> Result<()> {
    let collection = UserCollection::load(service).await;

    match ListView::from(&collection.snapshot()) {
        ListView::Error(message) => bail!(message),
        view => console.line(render::list(&view))?,
    }
    Ok(())
}

async fn find_user(service: &UserService, id: &str) -> Result<User> {
    service
        .get_by_id(id)
        .await
        .context(LOAD_FAILED)?
        .ok_or_else(|| anyhow!(USER_NOT_FOUND))
}

async fn show<R: BufRead, W: Write>(
    service: &UserService,
    id: &str,
    console: &mut Console<R, W>,
) -> Result<()> {
    let user = find_user(service, id).await?;
    console.line(render::user(&user))?;
    Ok(())
}

async fn create<R: BufRead, W: Write>(
    service: Arc<UserService>,
    preset: &FieldArgs,
    console: &mut Console<R, W>,
) -> Result<()> {
    let form = UserForm::create(service);
    form.load().await;

    let user = fill_and_submit(&form, preset, console).await?;
    console.line(notices::USER_CREATED.green())?;
    console.line(render::user(&user))?;
    Ok(())
}

async fn edit<R: BufRead, W: Write>(
    service: Arc<UserService>,
    id: String,
    preset: &FieldArgs,
    console: &mut Console<R, W>,
) -> Result<()> {
    let form = UserForm::edit(service, id);
    match form.load().await {
        LoadOutcome::Ready => {}
        LoadOutcome::NotFound => bail!(USER_NOT_FOUND),
        LoadOutcome::Failed => bail!(LOAD_FAILED),
        LoadOutcome::Cancelled => bail!("Cancelled"),
    }

    let user = fill_and_submit(&form, preset, console).await?;
    console.line(notices::USER_UPDATED.green())?;
    console.line(render::user(&user))?;
    Ok(())
}

/// Take values from flags or prompts, then submit until the form validates
///
/// After a rejected submit only the fields in error are asked again, each
/// preceded by its inline message.
async fn fill_and_submit<R: BufRead, W: Write>(
    form: &UserForm,
    preset: &FieldArgs,
    console: &mut Console<R, W>,
) -> Result<User> {
    console.line(form.title().bold())?;
    for field in form.fields() {
        match preset.get(field.name) {
            Some(value) => {
                form.set_value(field.name, value);
            }
            None => ask_field(form, &field, console)?,
        }
    }

    loop {
        debug!(label = form.submit_label(), "Submitting form");
        match form.submit_current().await {
            SubmitOutcome::Saved(user) => return Ok(user),
            SubmitOutcome::Invalid(errors) => {
                let mut asked = 0;
                for field in form.fields() {
                    if let Some(message) = render::field_error(&field) {
                        console.line(message.red())?;
                        ask_field(form, &field, console)?;
                        asked += 1;
                    }
                }
                // Nothing the user can correct here; resubmitting would loop
                if asked == 0 {
                    let message = form
                        .state()
                        .submit_error
                        .unwrap_or_else(|| errors.full_messages().join(", "));
                    bail!(message);
                }
            }
            SubmitOutcome::Failed(err) => {
                let message = form.state().submit_error.unwrap_or_default();
                return Err(anyhow::Error::new(err).context(message));
            }
            SubmitOutcome::Cancelled => bail!("Cancelled"),
        }
    }
}

/// Prompt for one field; an empty answer keeps the current value
fn ask_field<R: BufRead, W: Write>(
    form: &UserForm,
    field: &FieldView,
    console: &mut Console<R, W>,
) -> Result<()> {
    let answer = console
        .ask(&render::field_prompt(field))?
        .ok_or_else(|| anyhow!("Input ended before {} was entered", field.label))?;

    let answer = answer.trim();
    if !answer.is_empty() || field.value.is_empty() {
        form.set_value(field.name, answer);
    }
    Ok(())
}

async fn delete<R: BufRead, W: Write>(
    service: Arc<UserService>,
    id: &str,
    yes: bool,
    console: &mut Console<R, W>,
) -> Result<()> {
    let user = find_user(&service, id).await?;
    let collection = UserCollection::load(service).await;

    let dialog = DeleteConfirmation::new();
    dialog.request(user.clone());
    console.line(DeleteConfirmation::TITLE.bold())?;
    console.line(render::user(&user))?;

    if !yes && !console.confirm(DeleteConfirmation::PROMPT)? {
        dialog.cancel();
        console.line("Cancelled.")?;
        return Ok(());
    }

    match dialog.confirm(&collection).await {
        Ok(_) => {
            console.line(notices::USER_DELETED.green())?;
            Ok(())
        }
        Err(ConfirmError::Delete(err)) => {
            Err(anyhow::Error::new(err).context(notices::DELETE_FAILED))
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use ud_core::config::MockLatency;
    use ud_core::error::ValidationErrors;
    use ud_core::{UdError, UdResult};
    use ud_models::UserFormData;
    use ud_store::{MemoryStorage, MockUserStore, UserStore};

    fn service() -> Arc<UserService> {
        let store = MockUserStore::new(Arc::new(MemoryStorage::new()), MockLatency::none());
        Arc::new(UserService::new(Arc::new(store)))
    }

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }

    fn ann() -> FieldArgs {
        FieldArgs {
            first_name: Some("Ann".into()),
            last_name: Some("Lee".into()),
            email: Some("a@b.com".into()),
            phone: Some("1234567890".into()),
        }
    }

    #[tokio::test]
    async fn test_list_prints_table() {
        let mut console = console("");
        dispatch(Command::List, service(), &mut console).await.unwrap();

        let out = output(console);
        assert!(out.contains("John Doe"));
        assert!(out.contains("janesmith456@gmail.com"));
    }

    #[tokio::test]
    async fn test_show_unknown_user() {
        let mut console = console("");
        let err = dispatch(Command::Show { id: "999".into() }, service(), &mut console)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), USER_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_from_flags() {
        let service = service();
        let mut console = console("");

        dispatch(Command::Create(ann()), service.clone(), &mut console)
            .await
            .unwrap();

        assert!(output(console).contains(notices::USER_CREATED));
        let users = service.get_all().await.unwrap();
        assert_eq!(users.len(), 3);
        assert!(users.iter().any(|u| u.full_name() == "Ann Lee"));
    }

    #[tokio::test]
    async fn test_create_reprompts_invalid_field() {
        let service = service();
        let mut console = console("1234567890\n");
        let fields = FieldArgs {
            phone: Some("123".into()),
            ..ann()
        };

        dispatch(Command::Create(fields), service.clone(), &mut console)
            .await
            .unwrap();

        let out = output(console);
        assert!(out.contains("Phone Number: Phone number must be a valid 10-digit number"));
        assert!(out.contains(notices::USER_CREATED));
        assert_eq!(service.get_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_create_invalid_without_input_persists_nothing() {
        let service = service();
        let mut console = console("");
        let fields = FieldArgs {
            phone: Some("123".into()),
            ..ann()
        };

        let result = dispatch(Command::Create(fields), service.clone(), &mut console).await;

        assert!(result.is_err());
        assert_eq!(service.get_all().await.unwrap().len(), 2);
    }

    /// Answers every create with a validation error no field owns
    struct RejectingStore {
        inner: MockUserStore,
        creates: AtomicUsize,
    }

    #[async_trait]
    impl UserStore for RejectingStore {
        async fn get_all(&self) -> UdResult<Vec<User>> {
            self.inner.get_all().await
        }

        async fn get_by_id(&self, id: &str) -> UdResult<Option<User>> {
            self.inner.get_by_id(id).await
        }

        async fn create(&self, _data: UserFormData) -> UdResult<User> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            let mut errors = ValidationErrors::new();
            errors.add_base("Email already taken");
            Err(UdError::Validation(errors))
        }

        async fn update(&self, id: &str, data: UserFormData) -> UdResult<User> {
            self.inner.update(id, data).await
        }

        async fn delete(&self, id: &str) -> UdResult<()> {
            self.inner.delete(id).await
        }
    }

    #[tokio::test]
    async fn test_create_rejected_without_field_errors_fails_once() {
        let store = Arc::new(RejectingStore {
            inner: MockUserStore::new(Arc::new(MemoryStorage::new()), MockLatency::none()),
            creates: AtomicUsize::new(0),
        });
        let service = Arc::new(UserService::new(store.clone()));
        let mut console = console("");

        let result = tokio::time::timeout(
            Duration::from_secs(1),
            dispatch(Command::Create(ann()), service, &mut console),
        )
        .await
        .expect("create should not resubmit forever");

        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Email already taken");
        assert_eq!(store.creates.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_edit_keeps_unprompted_values() {
        let service = service();
        // Empty answers for first name, email and phone keep current values
        let mut console = console("\n\n\n");
        let fields = FieldArgs {
            last_name: Some("Smith".into()),
            ..Default::default()
        };

        dispatch(
            Command::Edit {
                id: "1".into(),
                fields,
            },
            service.clone(),
            &mut console,
        )
        .await
        .unwrap();

        let user = service.get_by_id("1").await.unwrap().unwrap();
        assert_eq!(user.full_name(), "John Smith");
        assert_eq!(user.email, "johndoe123@gmail.com");
        assert!(output(console).contains(notices::USER_UPDATED));
    }

    #[tokio::test]
    async fn test_edit_unknown_user() {
        let mut console = console("");
        let err = dispatch(
            Command::Edit {
                id: "999".into(),
                fields: ann(),
            },
            service(),
            &mut console,
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), USER_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_declined() {
        let service = service();
        let mut console = console("n\n");

        dispatch(
            Command::Delete {
                id: "1".into(),
                yes: false,
            },
            service.clone(),
            &mut console,
        )
        .await
        .unwrap();

        assert!(output(console).contains("Cancelled."));
        assert!(service.get_by_id("1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_confirmed() {
        let service = service();
        let mut console = console("y\n");

        dispatch(
            Command::Delete {
                id: "2".into(),
                yes: false,
            },
            service.clone(),
            &mut console,
        )
        .await
        .unwrap();

        let out = output(console);
        assert!(out.contains(DeleteConfirmation::PROMPT));
        assert!(out.contains(notices::USER_DELETED));
        assert_eq!(service.get_by_id("2").await.unwrap(), None);
    }
}
