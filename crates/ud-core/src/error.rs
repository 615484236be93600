//! Core error types for UserDirectory RS
//!
//! Every service-layer failure lands in one of four buckets: a missing
//! record, a field-scoped validation failure, a transport failure (network or
//! local store), or something unexpected.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core error type for all user directory operations
#[derive(Error, Debug)]
pub enum UdError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl UdError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        UdError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn transport(message: impl std::fmt::Display) -> Self {
        UdError::Transport(message.to_string())
    }

    pub fn unexpected(message: impl std::fmt::Display) -> Self {
        UdError::Unexpected(message.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, UdError::NotFound { .. })
    }

    /// Field errors, if this is a validation failure
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            UdError::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            UdError::NotFound { .. } => 404,
            UdError::Validation(_) => 422,
            UdError::Transport(_) => 502,
            UdError::Unexpected(_) | UdError::Config(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            UdError::NotFound { .. } => "not_found",
            UdError::Validation(_) => "validation_failed",
            UdError::Transport(_) => "transport_error",
            UdError::Unexpected(_) => "unexpected_error",
            UdError::Config(_) => "configuration_error",
        }
    }
}

impl From<serde_json::Error> for UdError {
    fn from(err: serde_json::Error) -> Self {
        UdError::Transport(format!("malformed payload: {}", err))
    }
}

/// Field-scoped validation errors
///
/// Fields keep the order in which their first error was recorded, so a form
/// can report errors in the same order it renders its fields.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    /// Field-specific errors: (field_name, messages)
    errors: Vec<(String, Vec<String>)>,
    /// Base errors not tied to a specific field
    base_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();
        match self.errors.iter_mut().find(|(name, _)| *name == field) {
            Some((_, messages)) => messages.push(message),
            None => self.errors.push((field, vec![message])),
        }
    }

    pub fn add_base(&mut self, message: impl Into<String>) {
        self.base_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.base_errors.is_empty()
    }

    /// Check if there are errors for a specific field
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|(name, _)| name == field)
    }

    /// Get errors for a specific field
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.errors
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
    }

    /// First message recorded for a field
    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// Names of every field with at least one error, in recording order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|(name, _)| name.as_str())
    }

    /// (field, messages) pairs in recording order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.errors
            .iter()
            .map(|(name, messages)| (name.as_str(), messages.as_slice()))
    }

    pub fn base_errors(&self) -> &[String] {
        &self.base_errors
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.errors {
            for message in messages {
                self.add(field.clone(), message);
            }
        }
        self.base_errors.extend(other.base_errors);
    }

    /// Flat list of messages; field messages are already phrased for display
    pub fn full_messages(&self) -> Vec<String> {
        let mut messages = self.base_errors.clone();
        for (_, field_messages) in &self.errors {
            messages.extend(field_messages.iter().cloned());
        }
        messages
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_messages().join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// JSON error payload exchanged with the REST endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldErrorBody>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrorBody {
    pub field: String,
    pub messages: Vec<String>,
}

impl From<&UdError> for ErrorBody {
    fn from(err: &UdError) -> Self {
        let fields = err
            .validation_errors()
            .map(|errors| {
                errors
                    .iter()
                    .map(|(field, messages)| FieldErrorBody {
                        field: field.to_string(),
                        messages: messages.to_vec(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            error: err.error_code().to_string(),
            message: err.to_string(),
            fields,
        }
    }
}

impl ErrorBody {
    /// Rebuild field errors from the payload
    pub fn validation_errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for field in &self.fields {
            for message in &field.messages {
                errors.add(field.field.clone(), message.clone());
            }
        }
        if errors.is_empty() {
            errors.add_base(self.message.clone());
        }
        errors
    }
}
