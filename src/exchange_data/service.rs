use chrono::NaiveDateTime;
use log::info;
use std::sync::Arc;

use super::model::{ExchangeData, NewExchangeData};
use super::repository::ExchangeDataRepository;
use crate::db::{self, DbPool};
use crate::errors::Result;

pub struct ExchangeDataService {
    data_repo: ExchangeDataRepository,
    pool: Arc<DbPool>,
}

impl ExchangeDataService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        ExchangeDataService {
            data_repo: ExchangeDataRepository::new(),
            pool,
        }
    }

    /// Appends one exchange snapshot. `sanitized_request` must already be
    /// scrubbed of embedded API keys and secrets by the caller.
    pub fn ingest(
        &self,
        user_id: i32,
        exchange_id: i32,
        timestamp: NaiveDateTime,
        sanitized_request: &str,
        payload: &serde_json::Value,
        data_type: &str,
        is_open: bool,
    ) -> Result<ExchangeData> {
        let mut conn = db::get_connection(&self.pool)?;
        self.data_repo.append(
            &mut conn,
            NewExchangeData {
                timestamp,
                request: sanitized_request.to_string(),
                data: serde_json::to_string(payload)?,
                data_type: data_type.to_string(),
                data_type_is_open: is_open,
                user_id,
                exchange_id,
            },
        )
    }

    pub fn get_stream(
        &self,
        user_id: i32,
        exchange_id: i32,
        data_type: &str,
    ) -> Result<Vec<ExchangeData>> {
        let mut conn = db::get_connection(&self.pool)?;
        self.data_repo
            .load_stream(&mut conn, user_id, exchange_id, data_type)
    }

    pub fn get_latest(
        &self,
        user_id: i32,
        exchange_id: i32,
        data_type: &str,
    ) -> Result<Option<ExchangeData>> {
        let mut conn = db::get_connection(&self.pool)?;
        self.data_repo
            .latest(&mut conn, user_id, exchange_id, data_type)
    }

    pub fn purge_before(&self, cutoff: NaiveDateTime) -> Result<usize> {
        let mut conn = db::get_connection(&self.pool)?;
        let purged = self.data_repo.purge_before(&mut conn, cutoff)?;
        if purged > 0 {
            info!("Purged {} exchange data records before {}", purged, cutoff);
        }
        Ok(purged)
    }
}
