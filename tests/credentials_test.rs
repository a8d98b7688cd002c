mod common;

use diesel::prelude::*;
use tradestore::api_keys::ApiKeyService;
use tradestore::db;
use tradestore::exchanges::{ExchangeDefaults, ExchangeService};
use tradestore::schema::api_keys;
use tradestore::users::UserService;

struct Fixture {
    db: common::TestDb,
    user_id: i32,
    exchange_id: i32,
}

fn setup_linked_entities() -> Fixture {
    let db = common::setup_db();

    let user = UserService::new(db.pool.clone())
        .register("trader", "trader@example.com", Some("hunter2-pw"))
        .unwrap();
    let (exchange, _) = ExchangeService::new(db.pool.clone())
        .ensure_exchange("kraken", &ExchangeDefaults::default())
        .unwrap();

    Fixture {
        db,
        user_id: user.id,
        exchange_id: exchange.id,
    }
}

#[test]
fn test_register_stores_hash_not_password() {
    let test_db = common::setup_db();
    let users = UserService::new(test_db.pool.clone());

    let user = users
        .register("trader", "trader@example.com", Some("hunter2-pw"))
        .unwrap();

    let stored = user.password_hash.as_deref().unwrap();
    assert!(stored.starts_with("$argon2id$"));
    assert_ne!(stored, "hunter2-pw");

    assert!(users
        .authenticate("trader@example.com", "hunter2-pw")
        .unwrap()
        .is_some());
    assert!(users
        .authenticate("trader@example.com", "wrong")
        .unwrap()
        .is_none());
    assert!(users
        .authenticate("nobody@example.com", "hunter2-pw")
        .unwrap()
        .is_none());
}

#[test]
fn test_change_password_invalidates_old_one() {
    let test_db = common::setup_db();
    let users = UserService::new(test_db.pool.clone());

    let user = users
        .register("trader", "trader@example.com", Some("old-password-1"))
        .unwrap();
    users.change_password(user.id, "new-password-2").unwrap();

    assert!(users
        .authenticate("trader@example.com", "old-password-1")
        .unwrap()
        .is_none());
    assert!(users
        .authenticate("trader@example.com", "new-password-2")
        .unwrap()
        .is_some());
}

#[test]
fn test_link_account_hashes_the_api_secret() {
    let fixture = setup_linked_entities();
    let service = ApiKeyService::new(fixture.db.pool.clone());

    let (key, created) = service
        .link_account(
            fixture.user_id,
            fixture.exchange_id,
            Some("AKIA-PUBLIC".to_string()),
            Some("topsecret"),
        )
        .unwrap();
    assert!(created);
    assert_eq!(key.api_key.as_deref(), Some("AKIA-PUBLIC"));

    let stored = key.api_secret_hash.as_deref().unwrap();
    assert!(stored.starts_with("$argon2id$"));
    assert_ne!(stored, "topsecret");

    // Linking again is idempotent for the (user, exchange) pair.
    let (again, created) = service
        .link_account(
            fixture.user_id,
            fixture.exchange_id,
            Some("OTHER".to_string()),
            Some("othersecret"),
        )
        .unwrap();
    assert!(!created);
    assert_eq!(again.id, key.id);
    assert_eq!(again.api_key.as_deref(), Some("AKIA-PUBLIC"));
}

#[test]
fn test_api_key_secret_verifies_against_stored_hash() {
    let fixture = setup_linked_entities();
    let service = ApiKeyService::new(fixture.db.pool.clone());

    service
        .link_account(
            fixture.user_id,
            fixture.exchange_id,
            Some("AKIA-PUBLIC".to_string()),
            Some("topsecret"),
        )
        .unwrap();

    // Verification must read the credential's own hash column, not any
    // other stored hash (the user's password hash in particular).
    assert!(service
        .verify_secret(fixture.user_id, fixture.exchange_id, "topsecret")
        .unwrap());
    assert!(!service
        .verify_secret(fixture.user_id, fixture.exchange_id, "hunter2-pw")
        .unwrap());
    assert!(!service
        .verify_secret(fixture.user_id, fixture.exchange_id, "wrong")
        .unwrap());
}

#[test]
fn test_verify_with_malformed_stored_hash_is_just_false() {
    let fixture = setup_linked_entities();
    let service = ApiKeyService::new(fixture.db.pool.clone());

    let (key, _) = service
        .link_account(fixture.user_id, fixture.exchange_id, None, Some("topsecret"))
        .unwrap();

    // Corrupt the stored hash out-of-band.
    let mut conn = db::get_connection(&fixture.db.pool).unwrap();
    diesel::update(api_keys::table.find(key.id))
        .set(api_keys::api_secret_hash.eq(Some("corrupted".to_string())))
        .execute(&mut conn)
        .unwrap();

    assert!(!service
        .verify_secret(fixture.user_id, fixture.exchange_id, "topsecret")
        .unwrap());
}

#[test]
fn test_rotate_and_unlink() {
    let fixture = setup_linked_entities();
    let service = ApiKeyService::new(fixture.db.pool.clone());

    let (key, _) = service
        .link_account(fixture.user_id, fixture.exchange_id, None, Some("old-secret"))
        .unwrap();

    let rotated = service.rotate_secret(key.id, "new-secret").unwrap();
    assert_eq!(rotated.id, key.id);
    assert_ne!(rotated.api_secret_hash, key.api_secret_hash);
    assert!(!service
        .verify_secret(fixture.user_id, fixture.exchange_id, "old-secret")
        .unwrap());
    assert!(service
        .verify_secret(fixture.user_id, fixture.exchange_id, "new-secret")
        .unwrap());

    assert_eq!(service.unlink(key.id).unwrap(), 1);
    assert!(service
        .get_credential(fixture.user_id, fixture.exchange_id)
        .unwrap()
        .is_none());
}

#[test]
fn test_missing_credential_verifies_false() {
    let fixture = setup_linked_entities();
    let service = ApiKeyService::new(fixture.db.pool.clone());

    assert!(!service
        .verify_secret(fixture.user_id, fixture.exchange_id, "anything")
        .unwrap());
}
