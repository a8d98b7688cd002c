//! Storage core for a multi-user trading platform.
//!
//! Persists users, tradable-exchange definitions, per-user API credentials,
//! and timestamped snapshots of exchange-reported activity on SQLite via
//! Diesel. The two load-bearing pieces:
//!
//! - [`acquire::get_or_create`]: idempotent record acquisition. A typed
//!   lookup key either matches an existing row or atomically materializes a
//!   new one from the key plus creation-time defaults, with at most one row
//!   per distinct key under concurrent writers.
//! - [`secrets`]: one-way hashing of credential secrets (API secrets,
//!   account passwords). Plaintext never reaches the store.
//!
//! Repositories take an explicit `&mut SqliteConnection`; services own the
//! pool and scope connection acquisition per call. There is no transport
//! layer here; callers bring their own.

pub mod acquire;
pub mod db;
pub mod errors;
pub mod schema;
pub mod secrets;

pub mod api_keys;
pub mod exchange_data;
pub mod exchanges;
pub mod users;

pub use acquire::{get_or_create, LookupKey};
pub use db::{create_pool, get_connection, init, reset_database, run_migrations, DbConnection, DbPool};
pub use errors::{DatabaseError, Error, Result, ValidationError};
