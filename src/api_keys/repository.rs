use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use super::model::{ApiKey, ApiKeyDefaults, ApiKeyLookup, NewApiKey};
use crate::acquire::{self, LookupKey};
use crate::errors::{Error, Result};
use crate::schema::api_keys;
use crate::secrets;

impl LookupKey for ApiKeyLookup {
    type Record = ApiKey;
    type Defaults = ApiKeyDefaults;

    fn find(&self, conn: &mut SqliteConnection) -> QueryResult<Option<ApiKey>> {
        api_keys::table
            .filter(api_keys::user_id.eq(self.user_id))
            .filter(api_keys::exchange_id.eq(self.exchange_id))
            .first::<ApiKey>(conn)
            .optional()
    }

    fn insert(&self, defaults: &ApiKeyDefaults, conn: &mut SqliteConnection) -> Result<ApiKey> {
        let api_secret_hash = match defaults.api_secret.as_deref() {
            Some(plain) => Some(secrets::hash_secret(plain)?),
            None => None,
        };

        diesel::insert_into(api_keys::table)
            .values(&NewApiKey {
                api_key: defaults.api_key.clone(),
                api_secret_hash,
                user_id: self.user_id,
                exchange_id: self.exchange_id,
            })
            .returning(ApiKey::as_returning())
            .get_result(conn)
            .map_err(Error::from)
    }
}

pub struct ApiKeyRepository;

impl ApiKeyRepository {
    pub fn new() -> Self {
        ApiKeyRepository
    }

    pub fn find_by_id(&self, conn: &mut SqliteConnection, api_key_id: i32) -> Result<ApiKey> {
        api_keys::table
            .find(api_key_id)
            .first::<ApiKey>(conn)
            .map_err(Error::from)
    }

    pub fn find_for_user_exchange(
        &self,
        conn: &mut SqliteConnection,
        user_id: i32,
        exchange_id: i32,
    ) -> Result<Option<ApiKey>> {
        ApiKeyLookup {
            user_id,
            exchange_id,
        }
        .find(conn)
        .map_err(Error::from)
    }

    pub fn load_for_user(&self, conn: &mut SqliteConnection, user_id: i32) -> Result<Vec<ApiKey>> {
        api_keys::table
            .filter(api_keys::user_id.eq(user_id))
            .order(api_keys::id.asc())
            .load::<ApiKey>(conn)
            .map_err(Error::from)
    }

    /// Inserts a credential, hashing the secret on the way in. A missing
    /// user or exchange surfaces as a foreign-key violation.
    pub fn insert_new_api_key(
        &self,
        conn: &mut SqliteConnection,
        user_id: i32,
        exchange_id: i32,
        api_key: Option<String>,
        api_secret: Option<&str>,
    ) -> Result<ApiKey> {
        let api_secret_hash = match api_secret {
            Some(plain) => Some(secrets::hash_secret(plain)?),
            None => None,
        };

        diesel::insert_into(api_keys::table)
            .values(&NewApiKey {
                api_key,
                api_secret_hash,
                user_id,
                exchange_id,
            })
            .returning(ApiKey::as_returning())
            .get_result(conn)
            .map_err(Error::from)
    }

    pub fn get_or_create(
        &self,
        conn: &mut SqliteConnection,
        lookup: &ApiKeyLookup,
        defaults: &ApiKeyDefaults,
    ) -> Result<(ApiKey, bool)> {
        acquire::get_or_create(conn, lookup, defaults)
    }

    /// Replaces the stored secret hash with one for the new secret.
    pub fn rotate_secret(
        &self,
        conn: &mut SqliteConnection,
        api_key_id: i32,
        new_secret: &str,
    ) -> Result<ApiKey> {
        let new_hash = secrets::hash_secret(new_secret)?;

        diesel::update(api_keys::table.find(api_key_id))
            .set(api_keys::api_secret_hash.eq(Some(new_hash)))
            .execute(conn)
            .map_err(Error::from)?;

        self.find_by_id(conn, api_key_id)
    }

    /// Unlinks the credential. Returns the number of rows removed.
    pub fn delete_api_key(&self, conn: &mut SqliteConnection, api_key_id: i32) -> Result<usize> {
        diesel::delete(api_keys::table.find(api_key_id))
            .execute(conn)
            .map_err(Error::from)
    }
}

impl Default for ApiKeyRepository {
    fn default() -> Self {
        Self::new()
    }
}
