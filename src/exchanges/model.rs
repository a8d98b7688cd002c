//! Exchange reference-table models.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// A tradable venue. Populated at setup time, read-mostly afterwards.
///
/// `ccxt_name` is the external-integration identifier; `class_name` tells
/// calling code which venue driver to dispatch to.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::exchanges)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Exchange {
    pub id: i32,
    pub name: String,
    pub ccxt_name: Option<String>,
    pub class_name: Option<String>,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::exchanges)]
#[serde(rename_all = "camelCase")]
pub struct NewExchange {
    pub name: String,
    pub ccxt_name: Option<String>,
    pub class_name: Option<String>,
}

/// Lookup by the globally unique exchange name.
#[derive(Debug, Clone)]
pub struct ExchangeLookup {
    pub name: String,
}

impl ExchangeLookup {
    pub fn by_name(name: impl Into<String>) -> Self {
        ExchangeLookup { name: name.into() }
    }
}

/// Creation-time fields, never used to match existing rows.
#[derive(Debug, Clone, Default)]
pub struct ExchangeDefaults {
    pub ccxt_name: Option<String>,
    pub class_name: Option<String>,
}
