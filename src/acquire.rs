//! Idempotent record acquisition (`get_or_create`).
//!
//! A lookup key identifies the wanted row by concrete equality predicates;
//! defaults are applied only when a new row has to be materialized. The
//! engine guarantees at most one row per distinct lookup key under
//! concurrent callers.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::errors::{Error, Result};

/// A typed lookup key for one entity.
///
/// `find` must apply only the key's equality predicates (AND-combined);
/// `insert` materializes a new row from the key merged with the defaults,
/// with key values taking precedence on any overlap.
pub trait LookupKey {
    type Record;
    type Defaults;

    fn find(&self, conn: &mut SqliteConnection) -> QueryResult<Option<Self::Record>>;

    fn insert(
        &self,
        defaults: &Self::Defaults,
        conn: &mut SqliteConnection,
    ) -> Result<Self::Record>;
}

/// Returns the row matching `key`, creating it from `key` + `defaults` when
/// absent. The boolean is `true` iff this call created the row.
///
/// The check-then-insert window is closed in two layers: an immediate
/// transaction takes the SQLite write lock before re-checking, and a
/// unique-violation on insert falls back to re-reading the key in case a
/// writer outside this process won the race. A unique violation on a
/// constraint other than the lookup key (the re-read still misses)
/// propagates to the caller.
pub fn get_or_create<K: LookupKey>(
    conn: &mut SqliteConnection,
    key: &K,
    defaults: &K::Defaults,
) -> Result<(K::Record, bool)> {
    if let Some(found) = key.find(conn).map_err(Error::from)? {
        return Ok((found, false));
    }

    let attempt = conn.immediate_transaction::<_, Error, _>(|tx| {
        if let Some(found) = key.find(tx)? {
            return Ok((found, false));
        }
        let created = key.insert(defaults, tx)?;
        Ok((created, true))
    });

    match attempt {
        Err(err) if err.is_unique_violation() => match key.find(conn).map_err(Error::from)? {
            Some(found) => Ok((found, false)),
            None => Err(err),
        },
        other => other,
    }
}
