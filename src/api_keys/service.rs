use log::info;
use std::sync::Arc;

use super::model::{ApiKey, ApiKeyDefaults, ApiKeyLookup};
use super::repository::ApiKeyRepository;
use crate::db::{self, DbPool};
use crate::errors::Result;

pub struct ApiKeyService {
    api_key_repo: ApiKeyRepository,
    pool: Arc<DbPool>,
}

impl ApiKeyService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        ApiKeyService {
            api_key_repo: ApiKeyRepository::new(),
            pool,
        }
    }

    /// Links an exchange account to a user, idempotently: a second link for
    /// the same (user, exchange) pair returns the existing credential.
    pub fn link_account(
        &self,
        user_id: i32,
        exchange_id: i32,
        api_key: Option<String>,
        api_secret: Option<&str>,
    ) -> Result<(ApiKey, bool)> {
        let mut conn = db::get_connection(&self.pool)?;
        let (key, created) = self.api_key_repo.get_or_create(
            &mut conn,
            &ApiKeyLookup {
                user_id,
                exchange_id,
            },
            &ApiKeyDefaults {
                api_key,
                api_secret: api_secret.map(str::to_string),
            },
        )?;

        if created {
            info!(
                "Linked exchange {} for user {} (credential {})",
                exchange_id, user_id, key.id
            );
        }
        Ok((key, created))
    }

    pub fn get_credential(&self, user_id: i32, exchange_id: i32) -> Result<Option<ApiKey>> {
        let mut conn = db::get_connection(&self.pool)?;
        self.api_key_repo
            .find_for_user_exchange(&mut conn, user_id, exchange_id)
    }

    /// Checks a candidate API secret for the (user, exchange) credential.
    /// Missing credential, missing hash, and wrong secret all read as false.
    pub fn verify_secret(&self, user_id: i32, exchange_id: i32, candidate: &str) -> Result<bool> {
        let mut conn = db::get_connection(&self.pool)?;
        let credential = self
            .api_key_repo
            .find_for_user_exchange(&mut conn, user_id, exchange_id)?;

        Ok(match credential {
            Some(key) => key.verify_api_secret(candidate),
            None => false,
        })
    }

    pub fn rotate_secret(&self, api_key_id: i32, new_secret: &str) -> Result<ApiKey> {
        let mut conn = db::get_connection(&self.pool)?;
        self.api_key_repo
            .rotate_secret(&mut conn, api_key_id, new_secret)
    }

    pub fn unlink(&self, api_key_id: i32) -> Result<usize> {
        let mut conn = db::get_connection(&self.pool)?;
        self.api_key_repo.delete_api_key(&mut conn, api_key_id)
    }
}
