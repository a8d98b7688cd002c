//! User identity models.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::secrets;

/// A registered (or anonymous) platform user.
///
/// `password_hash` holds a one-way hash only and is skipped on
/// serialization. The anonymous flag is plain data here; the session layer
/// owns its meaning.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip)]
    pub password_hash: Option<String>,
    pub is_anonymous: bool,
}

impl User {
    /// Checks a candidate password against the stored hash.
    ///
    /// A user without a stored hash never verifies, and a malformed stored
    /// hash reads the same as a wrong password.
    pub fn verify_password(&self, candidate: &str) -> bool {
        match self.password_hash.as_deref() {
            Some(hash) => secrets::verify_secret(candidate, hash),
            None => false,
        }
    }
}

/// Insertable row for creating a new user.
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub is_anonymous: bool,
}

/// Equality predicates identifying a user. `None` fields are not matched;
/// set fields are AND-combined.
#[derive(Debug, Clone, Default)]
pub struct UserLookup {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl UserLookup {
    pub fn by_email(email: impl Into<String>) -> Self {
        UserLookup {
            email: Some(email.into()),
            ..Default::default()
        }
    }

    pub fn by_username(username: impl Into<String>) -> Self {
        UserLookup {
            username: Some(username.into()),
            ..Default::default()
        }
    }

    /// Builds the row to insert when the lookup found nothing. Lookup values
    /// win over defaults on the overlapping fields.
    pub(crate) fn merged_row(&self, defaults: &UserDefaults) -> Result<NewUser> {
        let username = self
            .username
            .clone()
            .or_else(|| defaults.username.clone())
            .ok_or_else(|| ValidationError::MissingField("username".to_string()))?;
        let email = self
            .email
            .clone()
            .or_else(|| defaults.email.clone())
            .ok_or_else(|| ValidationError::MissingField("email".to_string()))?;

        Ok(NewUser {
            username,
            email,
            password_hash: defaults.password_hash.clone(),
            is_anonymous: defaults.is_anonymous,
        })
    }
}

/// Creation-time fields, never used to match existing rows.
#[derive(Debug, Clone, Default)]
pub struct UserDefaults {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub is_anonymous: bool,
}
