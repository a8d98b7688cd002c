use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use super::model::{ExchangeData, NewExchangeData};
use crate::errors::{Error, Result};
use crate::schema::exchange_data;

pub struct ExchangeDataRepository;

impl ExchangeDataRepository {
    pub fn new() -> Self {
        ExchangeDataRepository
    }

    /// Appends a snapshot. Always inserts; identical arguments produce
    /// distinct rows.
    pub fn append(
        &self,
        conn: &mut SqliteConnection,
        new_record: NewExchangeData,
    ) -> Result<ExchangeData> {
        diesel::insert_into(exchange_data::table)
            .values(&new_record)
            .returning(ExchangeData::as_returning())
            .get_result(conn)
            .map_err(Error::from)
    }

    pub fn find_by_id(&self, conn: &mut SqliteConnection, record_id: i32) -> Result<ExchangeData> {
        exchange_data::table
            .find(record_id)
            .first::<ExchangeData>(conn)
            .map_err(Error::from)
    }

    /// Loads one (user, exchange, data_type) stream in insertion order.
    pub fn load_stream(
        &self,
        conn: &mut SqliteConnection,
        user_id: i32,
        exchange_id: i32,
        data_type: &str,
    ) -> Result<Vec<ExchangeData>> {
        exchange_data::table
            .filter(exchange_data::user_id.eq(user_id))
            .filter(exchange_data::exchange_id.eq(exchange_id))
            .filter(exchange_data::data_type.eq(data_type))
            .order(exchange_data::id.asc())
            .load::<ExchangeData>(conn)
            .map_err(Error::from)
    }

    pub fn latest(
        &self,
        conn: &mut SqliteConnection,
        user_id: i32,
        exchange_id: i32,
        data_type: &str,
    ) -> Result<Option<ExchangeData>> {
        exchange_data::table
            .filter(exchange_data::user_id.eq(user_id))
            .filter(exchange_data::exchange_id.eq(exchange_id))
            .filter(exchange_data::data_type.eq(data_type))
            .order(exchange_data::id.desc())
            .first::<ExchangeData>(conn)
            .optional()
            .map_err(Error::from)
    }

    /// Retention helper: removes snapshots older than the cutoff. The only
    /// permitted delete on this log.
    pub fn purge_before(
        &self,
        conn: &mut SqliteConnection,
        cutoff: NaiveDateTime,
    ) -> Result<usize> {
        diesel::delete(exchange_data::table.filter(exchange_data::timestamp.lt(cutoff)))
            .execute(conn)
            .map_err(Error::from)
    }
}

impl Default for ExchangeDataRepository {
    fn default() -> Self {
        Self::new()
    }
}
