// SPDX-License-Identifier: MIT

//! Firestore integration tests (require emulator).
//!
//! Run with: FIRESTORE_EMULATOR_HOST=localhost:8080 cargo test

use motorlot::models::{Address, Role, User};

mod common;

fn make_user(id: &str, username: &str, email: &str, code: u32) -> User {
    User {
        id: id.to_string(),
        username: username.to_string(),
        email: email.to_string(),
        password: "$argon2id$fake-hash".to_string(),
        role: Role::User,
        is_verified: false,
        code: Some(code),
        profile_image: None,
        address: None,
        created_at: chrono::Utc::now().to_rfc3339(),
    }
}

#[tokio::test]
async fn test_user_roundtrip_and_lookups() {
    require_emulator!();
    let db = common::test_db().await;

    let user = make_user("it-user-1", "it_alice", "it_alice@x.com", 123456);
    db.upsert_user(&user).await.expect("upsert");

    let by_id = db.get_user("it-user-1").await.unwrap().expect("by id");
    assert_eq!(by_id.username, "it_alice");
    assert_eq!(by_id.code, Some(123456));

    let by_email = db
        .find_user_by_email("it_alice@x.com")
        .await
        .unwrap()
        .expect("by email");
    assert_eq!(by_email.id, "it-user-1");

    // Unverified users are invisible to the login lookup.
    assert!(db
        .find_verified_user_by_email("it_alice@x.com")
        .await
        .unwrap()
        .is_none());

    db.delete_user("it-user-1").await.unwrap();
    assert!(db.get_user("it-user-1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_verification_code_lookup_is_exact() {
    require_emulator!();
    let db = common::test_db().await;

    let user = make_user("it-user-2", "it_bob", "it_bob@x.com", 654321);
    db.upsert_user(&user).await.unwrap();

    // Wrong code: no match.
    assert!(db
        .find_user_by_username_and_code("it_bob", 111111)
        .await
        .unwrap()
        .is_none());

    // Wrong username: no match.
    assert!(db
        .find_user_by_username_and_code("it_mallory", 654321)
        .await
        .unwrap()
        .is_none());

    // Exact pair matches; flipping the flag is visible to the login lookup.
    let mut found = db
        .find_user_by_username_and_code("it_bob", 654321)
        .await
        .unwrap()
        .expect("exact match");
    found.is_verified = true;
    db.upsert_user(&found).await.unwrap();

    assert!(db
        .find_verified_user_by_email("it_bob@x.com")
        .await
        .unwrap()
        .is_some());

    db.delete_user("it-user-2").await.unwrap();
}

#[tokio::test]
async fn test_address_overwrite_persists() {
    require_emulator!();
    let db = common::test_db().await;

    let mut user = make_user("it-user-3", "it_carol", "it_carol@x.com", 222222);
    user.set_address(Address {
        city: Some("Pune".to_string()),
        country: Some("India".to_string()),
        phone: Some("12345".to_string()),
        pin_code: Some("411001".to_string()),
    });
    db.upsert_user(&user).await.unwrap();

    // Overwrite with a sparse address; the old fields must not survive.
    user.set_address(Address {
        city: Some("Mumbai".to_string()),
        country: None,
        phone: None,
        pin_code: None,
    });
    db.upsert_user(&user).await.unwrap();

    let stored = db.get_user("it-user-3").await.unwrap().unwrap();
    let address = stored.address.expect("address present");
    assert_eq!(address.city.as_deref(), Some("Mumbai"));
    assert!(address.country.is_none());
    assert!(address.phone.is_none());
    assert!(address.pin_code.is_none());

    // Delete clears the embedded value entirely.
    user.clear_address();
    db.upsert_user(&user).await.unwrap();
    let stored = db.get_user("it-user-3").await.unwrap().unwrap();
    assert!(stored.address.is_none());

    db.delete_user("it-user-3").await.unwrap();
}
