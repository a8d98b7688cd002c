//! Exchange-activity snapshot models.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// A timestamped snapshot of exchange-reported state (orders, positions).
///
/// Rows are immutable once written; the stream is append-only. `request` is
/// the serialized request that produced the snapshot and must be scrubbed of
/// embedded credentials by the caller before it gets here.
#[derive(Queryable, Identifiable, Selectable, Associations, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(belongs_to(crate::users::User, foreign_key = user_id))]
#[diesel(belongs_to(crate::exchanges::Exchange, foreign_key = exchange_id))]
#[diesel(table_name = crate::schema::exchange_data)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ExchangeData {
    pub id: i32,
    pub timestamp: NaiveDateTime,
    pub request: String,
    pub data: String,
    pub data_type: String,
    pub data_type_is_open: bool,
    pub user_id: i32,
    pub exchange_id: i32,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::exchange_data)]
#[serde(rename_all = "camelCase")]
pub struct NewExchangeData {
    pub timestamp: NaiveDateTime,
    pub request: String,
    pub data: String,
    pub data_type: String,
    pub data_type_is_open: bool,
    pub user_id: i32,
    pub exchange_id: i32,
}
