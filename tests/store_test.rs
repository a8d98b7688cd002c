mod common;

use tradestore::db;
use tradestore::exchanges::{ExchangeRepository, NewExchange};
use tradestore::users::UserRepository;

#[test]
fn test_duplicate_exchange_name_is_rejected() {
    let test_db = common::setup_db();
    let repo = ExchangeRepository::new();
    let mut conn = db::get_connection(&test_db.pool).unwrap();

    let row = NewExchange {
        name: "binance".to_string(),
        ccxt_name: Some("binance".to_string()),
        class_name: Some("BinanceDriver".to_string()),
    };

    repo.insert_new_exchange(&mut conn, row.clone()).unwrap();

    // Same name straight through the insert path, no dedup involved.
    let err = repo.insert_new_exchange(&mut conn, row).unwrap_err();
    assert!(err.is_unique_violation());
}

#[test]
fn test_lookup_by_missing_id_is_not_found() {
    let test_db = common::setup_db();
    let repo = UserRepository::new();
    let mut conn = db::get_connection(&test_db.pool).unwrap();

    let err = repo.find_by_id(&mut conn, 9999).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_reset_drops_and_migrations_recreate() {
    let test_db = common::setup_db();
    let repo = ExchangeRepository::new();

    db::reset_database(&test_db.pool).unwrap();

    {
        let mut conn = db::get_connection(&test_db.pool).unwrap();
        assert!(repo.load_exchanges(&mut conn).is_err());
    }

    db::run_migrations(&test_db.pool).unwrap();

    let mut conn = db::get_connection(&test_db.pool).unwrap();
    assert!(repo.load_exchanges(&mut conn).unwrap().is_empty());
}
