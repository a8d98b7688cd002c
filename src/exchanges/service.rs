use std::sync::Arc;

use super::model::{Exchange, ExchangeDefaults, ExchangeLookup};
use super::repository::ExchangeRepository;
use crate::db::{self, DbPool};
use crate::errors::Result;

pub struct ExchangeService {
    exchange_repo: ExchangeRepository,
    pool: Arc<DbPool>,
}

impl ExchangeService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        ExchangeService {
            exchange_repo: ExchangeRepository::new(),
            pool,
        }
    }

    pub fn get_exchanges(&self) -> Result<Vec<Exchange>> {
        let mut conn = db::get_connection(&self.pool)?;
        self.exchange_repo.load_exchanges(&mut conn)
    }

    pub fn get_exchange_by_name(&self, name: &str) -> Result<Option<Exchange>> {
        let mut conn = db::get_connection(&self.pool)?;
        self.exchange_repo.find_by_name(&mut conn, name)
    }

    /// Idempotent setup entry point: returns the venue row, creating it with
    /// the given defaults when absent.
    pub fn ensure_exchange(
        &self,
        name: &str,
        defaults: &ExchangeDefaults,
    ) -> Result<(Exchange, bool)> {
        let mut conn = db::get_connection(&self.pool)?;
        self.exchange_repo
            .get_or_create(&mut conn, &ExchangeLookup::by_name(name), defaults)
    }
}
