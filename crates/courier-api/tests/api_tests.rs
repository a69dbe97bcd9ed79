use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use courier_api::auth::{AppState, AppStateInner};
use courier_crypto::{CipherBox, keys};
use courier_db::Database;

fn test_state() -> AppState {
    let db = Database::open_in_memory().unwrap();
    Arc::new(AppStateInner {
        db,
        cipher: CipherBox::new(keys::generate_key()),
    })
}

async fn post(app: &Router, path: &str, body: Value) -> Value {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn register(app: &Router, username: &str, password: &str) -> Value {
    post(
        app,
        "/register",
        json!({"username": username, "password": password}),
    )
    .await
}

async fn login(app: &Router, username: &str, password: &str) -> bool {
    let body = post(
        app,
        "/login",
        json!({"username": username, "password": password}),
    )
    .await;
    body["success"].as_bool().unwrap()
}

#[tokio::test]
async fn register_then_login() {
    let app = courier_api::routes(test_state());

    assert_eq!(register(&app, "alice", "s3cret").await["success"], true);

    assert!(login(&app, "alice", "s3cret").await);
    assert!(!login(&app, "alice", "wrong").await);
    assert!(!login(&app, "bob", "anything").await);
}

#[tokio::test]
async fn ids_follow_registration_order() {
    let app = courier_api::routes(test_state());

    register(&app, "zed", "pw").await;
    register(&app, "alice", "pw").await;
    register(&app, "bob", "pw").await;

    // Requester name matches nobody, so all accounts come back.
    let body = post(&app, "/get-users", json!({"username": "observer"})).await;
    let entries = body.as_array().unwrap();

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0], json!({"id": 1, "username": "zed"}));
    assert_eq!(entries[1], json!({"id": 2, "username": "alice"}));
    assert_eq!(entries[2], json!({"id": 3, "username": "bob"}));
}

#[tokio::test]
async fn conversation_is_direction_independent() {
    let app = courier_api::routes(test_state());

    let sent = post(
        &app,
        "/send-message",
        json!({"username": "alice", "friendname": "bob", "message": "hi"}),
    )
    .await;
    assert_eq!(sent["success"], true);

    // Queried from the other side; the stored direction is preserved.
    let body = post(
        &app,
        "/get-chat",
        json!({"username": "bob", "friendname": "alice"}),
    )
    .await;

    assert_eq!(
        body,
        json!([{"sendername": "alice", "gettername": "bob", "message": "hi"}])
    );
}

#[tokio::test]
async fn chat_excludes_third_parties() {
    let app = courier_api::routes(test_state());

    for (from, to, text) in [
        ("alice", "bob", "one"),
        ("bob", "alice", "two"),
        ("alice", "carol", "three"),
    ] {
        post(
            &app,
            "/send-message",
            json!({"username": from, "friendname": to, "message": text}),
        )
        .await;
    }

    let body = post(
        &app,
        "/get-chat",
        json!({"username": "alice", "friendname": "bob"}),
    )
    .await;
    let entries = body.as_array().unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["message"], "one");
    assert_eq!(entries[1]["message"], "two");
}

#[tokio::test]
async fn directory_excludes_requester() {
    let app = courier_api::routes(test_state());

    register(&app, "alice", "pw").await;
    register(&app, "bob", "pw").await;
    register(&app, "carol", "pw").await;

    let body = post(&app, "/get-users", json!({"username": "bob"})).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["username"].as_str().unwrap())
        .collect();

    assert_eq!(names, ["alice", "carol"]);
}

#[tokio::test]
async fn credentials_are_encrypted_at_rest() {
    let state = test_state();
    let app = courier_api::routes(state.clone());

    register(&app, "alice", "s3cret").await;

    let row = state.db.get_user_by_username("alice").unwrap().unwrap();
    let stored = hex::decode(&row.password_data).unwrap();
    assert_ne!(stored, b"s3cret");

    let field =
        courier_crypto::EncryptedField::from_hex(&row.password_data, &row.password_iv).unwrap();
    assert_eq!(state.cipher.decrypt(&field).unwrap(), b"s3cret");
}

#[tokio::test]
async fn shadow_account_login_resolves_first_registration() {
    let app = courier_api::routes(test_state());

    assert_eq!(register(&app, "alice", "first").await["success"], true);
    assert_eq!(register(&app, "alice", "second").await["success"], true);

    assert!(login(&app, "alice", "first").await);
    assert!(!login(&app, "alice", "second").await);
}

#[tokio::test]
async fn corrupt_credential_fails_login_quietly() {
    let state = test_state();
    let app = courier_api::routes(state.clone());

    state.db.create_user("mallory", "not-hex", "also-not-hex").unwrap();

    assert!(!login(&app, "mallory", "whatever").await);
}

#[tokio::test]
async fn undecryptable_message_is_skipped() {
    let state = test_state();
    let app = courier_api::routes(state.clone());

    post(
        &app,
        "/send-message",
        json!({"username": "alice", "friendname": "bob", "message": "readable"}),
    )
    .await;
    state
        .db
        .insert_chat("alice", "bob", "ffff", &hex::encode([0u8; 16]))
        .unwrap();

    let body = post(
        &app,
        "/get-chat",
        json!({"username": "alice", "friendname": "bob"}),
    )
    .await;
    let entries = body.as_array().unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["message"], "readable");
}
