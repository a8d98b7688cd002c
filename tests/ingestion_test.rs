mod common;

use chrono::{Duration, Utc};
use serde_json::json;
use tradestore::exchange_data::ExchangeDataService;
use tradestore::exchanges::{ExchangeDefaults, ExchangeService};
use tradestore::users::UserService;
use tradestore::{DatabaseError, Error};

struct Fixture {
    db: common::TestDb,
    user_id: i32,
    exchange_id: i32,
}

fn setup_linked_entities() -> Fixture {
    let db = common::setup_db();

    let user = UserService::new(db.pool.clone())
        .register("trader", "trader@example.com", None)
        .unwrap();
    let (exchange, _) = ExchangeService::new(db.pool.clone())
        .ensure_exchange("binance", &ExchangeDefaults::default())
        .unwrap();

    Fixture {
        db,
        user_id: user.id,
        exchange_id: exchange.id,
    }
}

#[test]
fn test_append_never_deduplicates() {
    let fixture = setup_linked_entities();
    let service = ExchangeDataService::new(fixture.db.pool.clone());

    let now = Utc::now().naive_utc();
    let payload = json!({"orders": [{"id": 42, "side": "buy"}]});

    let first = service
        .ingest(
            fixture.user_id,
            fixture.exchange_id,
            now,
            "GET /api/v3/openOrders",
            &payload,
            "open_orders",
            true,
        )
        .unwrap();
    let second = service
        .ingest(
            fixture.user_id,
            fixture.exchange_id,
            now,
            "GET /api/v3/openOrders",
            &payload,
            "open_orders",
            true,
        )
        .unwrap();

    assert_ne!(first.id, second.id);

    let stream = service
        .get_stream(fixture.user_id, fixture.exchange_id, "open_orders")
        .unwrap();
    assert_eq!(stream.len(), 2);
    assert_eq!(stream[0].id, first.id);
    assert_eq!(stream[1].id, second.id);
}

#[test]
fn test_streams_are_isolated_by_data_type() {
    let fixture = setup_linked_entities();
    let service = ExchangeDataService::new(fixture.db.pool.clone());
    let now = Utc::now().naive_utc();

    service
        .ingest(
            fixture.user_id,
            fixture.exchange_id,
            now,
            "GET /api/v3/openOrders",
            &json!([]),
            "open_orders",
            true,
        )
        .unwrap();
    let closed = service
        .ingest(
            fixture.user_id,
            fixture.exchange_id,
            now,
            "GET /api/v3/allOrders",
            &json!([]),
            "closed_positions",
            false,
        )
        .unwrap();

    let stream = service
        .get_stream(fixture.user_id, fixture.exchange_id, "closed_positions")
        .unwrap();
    assert_eq!(stream.len(), 1);
    assert_eq!(stream[0].id, closed.id);
    assert!(!stream[0].data_type_is_open);

    let latest = service
        .get_latest(fixture.user_id, fixture.exchange_id, "open_orders")
        .unwrap()
        .unwrap();
    assert!(latest.data_type_is_open);
}

#[test]
fn test_purge_removes_only_old_records() {
    let fixture = setup_linked_entities();
    let service = ExchangeDataService::new(fixture.db.pool.clone());

    let old = Utc::now().naive_utc() - Duration::days(30);
    let recent = Utc::now().naive_utc();

    service
        .ingest(
            fixture.user_id,
            fixture.exchange_id,
            old,
            "GET /api/v3/openOrders",
            &json!([]),
            "open_orders",
            true,
        )
        .unwrap();
    let kept = service
        .ingest(
            fixture.user_id,
            fixture.exchange_id,
            recent,
            "GET /api/v3/openOrders",
            &json!([]),
            "open_orders",
            true,
        )
        .unwrap();

    let cutoff = Utc::now().naive_utc() - Duration::days(7);
    assert_eq!(service.purge_before(cutoff).unwrap(), 1);

    let stream = service
        .get_stream(fixture.user_id, fixture.exchange_id, "open_orders")
        .unwrap();
    assert_eq!(stream.len(), 1);
    assert_eq!(stream[0].id, kept.id);
}

#[test]
fn test_unknown_user_is_a_foreign_key_violation() {
    let fixture = setup_linked_entities();
    let service = ExchangeDataService::new(fixture.db.pool.clone());

    let err = service
        .ingest(
            9999,
            fixture.exchange_id,
            Utc::now().naive_utc(),
            "GET /api/v3/openOrders",
            &json!([]),
            "open_orders",
            true,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Database(DatabaseError::ForeignKeyViolation(_))
    ));
}
