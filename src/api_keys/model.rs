//! Exchange-credential models.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::secrets;

/// A credential binding one user to one exchange.
///
/// The API secret is never stored; only its one-way hash is. Rotation
/// replaces the hash, unlinking deletes the row.
#[derive(Queryable, Identifiable, Selectable, Associations, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(belongs_to(crate::users::User, foreign_key = user_id))]
#[diesel(belongs_to(crate::exchanges::Exchange, foreign_key = exchange_id))]
#[diesel(table_name = crate::schema::api_keys)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    pub id: i32,
    pub api_key: Option<String>,
    #[serde(skip)]
    pub api_secret_hash: Option<String>,
    pub user_id: i32,
    pub exchange_id: i32,
}

impl ApiKey {
    /// Checks a candidate API secret against the stored `api_secret_hash`.
    ///
    /// A row without a stored hash never verifies, and a malformed stored
    /// hash reads the same as a wrong secret.
    pub fn verify_api_secret(&self, candidate: &str) -> bool {
        match self.api_secret_hash.as_deref() {
            Some(hash) => secrets::verify_secret(candidate, hash),
            None => false,
        }
    }
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::api_keys)]
#[serde(rename_all = "camelCase")]
pub struct NewApiKey {
    pub api_key: Option<String>,
    pub api_secret_hash: Option<String>,
    pub user_id: i32,
    pub exchange_id: i32,
}

/// Lookup by the (user, exchange) pair. The pair carries no store-level
/// unique constraint; dedup relies on the acquisition engine's transaction.
#[derive(Debug, Clone, Copy)]
pub struct ApiKeyLookup {
    pub user_id: i32,
    pub exchange_id: i32,
}

/// Creation-time fields. `api_secret` is plaintext here and is hashed on the
/// way into the store; it is never persisted as given.
#[derive(Debug, Clone, Default)]
pub struct ApiKeyDefaults {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
}
