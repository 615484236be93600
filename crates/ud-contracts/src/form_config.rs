//! Declarative form field configuration
//!
//! The table order is the render order and the schema iteration order.
//! Names match the camelCase keys of `UserFormData`.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Input kind of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Tel,
    Number,
    Date,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Tel => "tel",
            FieldType::Number => "number",
            FieldType::Date => "date",
        }
    }
}

/// A single rule with the message reported when it fails
#[derive(Debug, Clone)]
pub enum ValidationRule {
    /// At least `min` characters
    MinLength { min: usize, message: String },
    /// Well-formed email address
    Email { message: String },
    /// Whole value matches the pattern
    Pattern { regex: Regex, message: String },
}

impl ValidationRule {
    pub fn min_length(min: usize, message: impl Into<String>) -> Self {
        ValidationRule::MinLength {
            min,
            message: message.into(),
        }
    }

    pub fn email(message: impl Into<String>) -> Self {
        ValidationRule::Email {
            message: message.into(),
        }
    }

    pub fn pattern(regex: Regex, message: impl Into<String>) -> Self {
        ValidationRule::Pattern {
            regex,
            message: message.into(),
        }
    }

    pub fn check(&self, value: &str) -> bool {
        match self {
            ValidationRule::MinLength { min, .. } => value.chars().count() >= *min,
            ValidationRule::Email { .. } => validator::validate_email(value),
            ValidationRule::Pattern { regex, .. } => regex.is_match(value),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ValidationRule::MinLength { message, .. }
            | ValidationRule::Email { message }
            | ValidationRule::Pattern { message, .. } => message,
        }
    }
}

/// One entry of the form table
#[derive(Debug, Clone)]
pub struct FieldConfig {
    pub name: &'static str,
    pub label: &'static str,
    pub field_type: FieldType,
    pub placeholder: Option<&'static str>,
    pub required: bool,
    pub validation: Option<ValidationRule>,
}

/// Ten ASCII digits, nothing else
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern compiles"));

static USER_FORM_CONFIG: LazyLock<Vec<FieldConfig>> = LazyLock::new(|| {
    vec![
        FieldConfig {
            name: "firstName",
            label: "First Name",
            field_type: FieldType::Text,
            placeholder: None,
            required: true,
            validation: Some(ValidationRule::min_length(
                2,
                "First name must be at least 2 characters",
            )),
        },
        FieldConfig {
            name: "lastName",
            label: "Last Name",
            field_type: FieldType::Text,
            placeholder: None,
            required: true,
            validation: Some(ValidationRule::min_length(
                2,
                "Last name must be at least 2 characters",
            )),
        },
        FieldConfig {
            name: "email",
            label: "Email Address",
            field_type: FieldType::Email,
            placeholder: None,
            required: true,
            validation: Some(ValidationRule::email("Invalid email address")),
        },
        FieldConfig {
            name: "phone",
            label: "Phone Number",
            field_type: FieldType::Tel,
            placeholder: None,
            required: true,
            validation: Some(ValidationRule::pattern(
                PHONE_PATTERN.clone(),
                "Phone number must be a valid 10-digit number",
            )),
        },
    ]
});

/// The user form, in render order
pub fn user_form_config() -> &'static [FieldConfig] {
    &USER_FORM_CONFIG
}
