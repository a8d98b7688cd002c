use std::sync::Arc;

use tempfile::TempDir;
use tradestore::db::{self, DbPool};

/// Temp-directory database fixture. The directory (and the database file in
/// it) is removed when the fixture drops.
pub struct TestDb {
    pub pool: Arc<DbPool>,
    _dir: TempDir,
}

pub fn setup_db() -> TestDb {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = db::init(dir.path().to_str().unwrap()).expect("Failed to initialize database");
    let pool = db::create_pool(&db_path).expect("Failed to create database pool");
    db::run_migrations(&pool).expect("Failed to run migrations");

    TestDb {
        pool,
        _dir: dir,
    }
}
