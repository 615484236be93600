//! Schema generation from the form configuration
//!
//! Each field gets exactly one rule: its explicit rule, a non-empty rule when
//! it is required without one, or "anything, absence allowed" otherwise.

use std::collections::HashMap;

use ud_core::error::ValidationErrors;
use ud_models::UserFormData;

use crate::base::{Contract, ValidationResult};
use crate::form_config::{user_form_config, FieldConfig, ValidationRule};

/// Raw form input keyed by field name; a missing key is an absent value
pub type FormValues = HashMap<String, String>;

/// Resolved rule for one field of the schema
#[derive(Debug, Clone)]
pub enum FieldRule {
    Rule(ValidationRule),
    NonEmpty { message: String },
    Optional,
}

#[derive(Debug, Clone)]
struct SchemaField {
    name: &'static str,
    label: &'static str,
    rule: FieldRule,
}

/// Composite validator over every configured field
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<SchemaField>,
}

/// Build a schema from a field table, in table order
pub fn generate_schema(config: &[FieldConfig]) -> Schema {
    let fields = config
        .iter()
        .map(|field| {
            let rule = match (&field.validation, field.required) {
                (Some(rule), _) => FieldRule::Rule(rule.clone()),
                (None, true) => FieldRule::NonEmpty {
                    message: format!("{} is required", field.label),
                },
                (None, false) => FieldRule::Optional,
            };
            SchemaField {
                name: field.name,
                label: field.label,
                rule,
            }
        })
        .collect();

    Schema { fields }
}

/// Schema for the user create/edit form
pub fn generate_user_schema() -> Schema {
    generate_schema(user_form_config())
}

impl Schema {
    /// Field names in iteration order
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    pub fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.rule)
    }

    /// Validate raw form values
    pub fn validate_values(&self, values: &FormValues) -> ValidationResult {
        self.validate_with(|name| values.get(name).map(String::as_str))
    }

    /// Validate a typed user form
    pub fn validate_user(&self, data: &UserFormData) -> ValidationResult {
        self.validate_with(|name| data.field(name))
    }

    fn validate_with<'v, F>(&self, lookup: F) -> ValidationResult
    where
        F: Fn(&str) -> Option<&'v str>,
    {
        let mut errors = ValidationErrors::new();

        for field in &self.fields {
            let value = lookup(field.name);
            match (&field.rule, value) {
                (FieldRule::Optional, _) => {}
                (_, None) => errors.add(field.name, format!("{} is required", field.label)),
                (FieldRule::NonEmpty { message }, Some(v)) => {
                    if v.is_empty() {
                        errors.add(field.name, message.as_str());
                    }
                }
                (FieldRule::Rule(rule), Some(v)) => {
                    if !rule.check(v) {
                        errors.add(field.name, rule.message());
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Contract<UserFormData> for Schema {
    fn validate(&self, entity: &UserFormData) -> ValidationResult {
        self.validate_user(entity)
    }

    fn is_writable(&self, attribute: &str) -> bool {
        self.fields.iter().any(|f| f.name == attribute)
    }
}

impl Contract<FormValues> for Schema {
    fn validate(&self, entity: &FormValues) -> ValidationResult {
        self.validate_values(entity)
    }

    fn is_writable(&self, attribute: &str) -> bool {
        self.fields.iter().any(|f| f.name == attribute)
    }
}
