//! # ud-contracts
//!
//! Contract validation for UserDirectory RS.
//!
//! A declarative field table describes the user form. The same table drives
//! form rendering and the generated schema that every create and update must
//! pass before it reaches a store.

pub mod base;
pub mod form_config;
pub mod schema;

pub use base::*;
pub use form_config::{user_form_config, FieldConfig, FieldType, ValidationRule};
pub use schema::{generate_schema, generate_user_schema, FieldRule, FormValues, Schema};
