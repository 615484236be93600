//! User model
//!
//! Wire format is camelCase JSON, shared by the mock blob and the REST
//! endpoint.

use serde::{Deserialize, Serialize};

/// Record identifier, assigned by the store on creation
pub type UserId = String;

/// A persisted user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl User {
    /// Get full name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Mutable view of this record, without its id
    pub fn form_data(&self) -> UserFormData {
        UserFormData::from(self)
    }
}

/// A user record that has not been persisted yet, or the editable part of one
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFormData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl UserFormData {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Attach an id, producing the stored form of this data
    pub fn into_user(self, id: impl Into<UserId>) -> User {
        User {
            id: id.into(),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
        }
    }

    /// Look up a value by its wire name
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "firstName" => Some(&self.first_name),
            "lastName" => Some(&self.last_name),
            "email" => Some(&self.email),
            "phone" => Some(&self.phone),
            _ => None,
        }
    }

    /// Set a value by its wire name; returns false for unknown names
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        let slot = match name {
            "firstName" => &mut self.first_name,
            "lastName" => &mut self.last_name,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            _ => return false,
        };
        *slot = value.into();
        true
    }
}

impl From<&User> for UserFormData {
    fn from(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
        }
    }
}

impl From<User> for UserFormData {
    fn from(user: User) -> Self {
        Self {
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
        }
    }
}

/// Records written to an empty mock store on first access
pub fn seed_users() -> Vec<User> {
    vec![
        UserFormData::new("John", "Doe", "johndoe123@gmail.com", "1234567890").into_user("1"),
        UserFormData::new("Jane", "Smith", "janesmith456@gmail.com", "9876543210").into_user("2"),
    ]
}
