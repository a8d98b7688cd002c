use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use super::model::{Exchange, ExchangeDefaults, ExchangeLookup, NewExchange};
use crate::acquire::{self, LookupKey};
use crate::errors::{Error, Result};
use crate::schema::exchanges;

impl LookupKey for ExchangeLookup {
    type Record = Exchange;
    type Defaults = ExchangeDefaults;

    fn find(&self, conn: &mut SqliteConnection) -> QueryResult<Option<Exchange>> {
        exchanges::table
            .filter(exchanges::name.eq(&self.name))
            .first::<Exchange>(conn)
            .optional()
    }

    fn insert(&self, defaults: &ExchangeDefaults, conn: &mut SqliteConnection) -> Result<Exchange> {
        let new_exchange = NewExchange {
            name: self.name.clone(),
            ccxt_name: defaults.ccxt_name.clone(),
            class_name: defaults.class_name.clone(),
        };
        diesel::insert_into(exchanges::table)
            .values(&new_exchange)
            .returning(Exchange::as_returning())
            .get_result(conn)
            .map_err(Error::from)
    }
}

pub struct ExchangeRepository;

impl ExchangeRepository {
    pub fn new() -> Self {
        ExchangeRepository
    }

    pub fn load_exchanges(&self, conn: &mut SqliteConnection) -> Result<Vec<Exchange>> {
        exchanges::table
            .order(exchanges::name.asc())
            .load::<Exchange>(conn)
            .map_err(Error::from)
    }

    pub fn find_by_id(&self, conn: &mut SqliteConnection, exchange_id: i32) -> Result<Exchange> {
        exchanges::table
            .find(exchange_id)
            .first::<Exchange>(conn)
            .map_err(Error::from)
    }

    pub fn find_by_name(
        &self,
        conn: &mut SqliteConnection,
        exchange_name: &str,
    ) -> Result<Option<Exchange>> {
        exchanges::table
            .filter(exchanges::name.eq(exchange_name))
            .first::<Exchange>(conn)
            .optional()
            .map_err(Error::from)
    }

    /// Direct insert path with no dedup; a duplicate name surfaces as a
    /// unique violation.
    pub fn insert_new_exchange(
        &self,
        conn: &mut SqliteConnection,
        new_exchange: NewExchange,
    ) -> Result<Exchange> {
        diesel::insert_into(exchanges::table)
            .values(&new_exchange)
            .returning(Exchange::as_returning())
            .get_result(conn)
            .map_err(Error::from)
    }

    pub fn get_or_create(
        &self,
        conn: &mut SqliteConnection,
        lookup: &ExchangeLookup,
        defaults: &ExchangeDefaults,
    ) -> Result<(Exchange, bool)> {
        acquire::get_or_create(conn, lookup, defaults)
    }
}

impl Default for ExchangeRepository {
    fn default() -> Self {
        Self::new()
    }
}
