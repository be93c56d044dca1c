//! HTTP-level tests for the `/api/v1/activity` resource.

mod common;

use aurora_core::activity::NewActivity;
use axum::http::StatusCode;
use common::{body_json, get, get_with_cookie, session_cookie, session_token, TEST_SECRET};
use jsonwebtoken::{encode, EncodingKey, Header};

fn signed_payload(payload: serde_json::Value) -> String {
    encode(
        &Header::default(),
        &payload,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("encoding should succeed")
}

#[tokio::test]
async fn list_requires_session() {
    let app = common::build_test_app();
    let response = get(app.router, "/api/v1/activity").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn string_subject_identifies_the_user() {
    let app = common::build_test_app();
    app.recorder
        .record(NewActivity::new(42, "login", "completed"))
        .await
        .unwrap();

    let exp = chrono::Utc::now().timestamp() + 600;
    let token = signed_payload(serde_json::json!({ "sub": "42", "exp": exp }));
    let response = get_with_cookie(app.router, "/api/v1/activity", &session_cookie(&token)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn valid_token_without_subject_is_unauthorized() {
    let app = common::build_test_app();
    let exp = chrono::Utc::now().timestamp() + 600;
    let token = signed_payload(serde_json::json!({ "exp": exp }));

    let response = get_with_cookie(app.router, "/api/v1/activity", &session_cookie(&token)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn list_returns_only_the_session_users_activity_newest_first() {
    let app = common::build_test_app();
    app.recorder
        .record(NewActivity::new(42, "login", "completed"))
        .await
        .unwrap();
    app.recorder
        .record(NewActivity::new(99, "login", "completed"))
        .await
        .unwrap();
    let deposit = app
        .recorder
        .record(NewActivity::new(42, "deposit", "completed").with_amount(5000, "USD"))
        .await
        .unwrap();

    let cookie = session_cookie(&session_token(42));
    let response = get_with_cookie(app.router, "/api/v1/activity", &cookie).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0], serde_json::to_value(&deposit).unwrap());
    assert_eq!(items[0]["type"], "deposit");
    assert!(items[0]["description"].is_null());
    assert_eq!(items[1]["type"], "login");
}

#[tokio::test]
async fn list_honours_limit() {
    let app = common::build_test_app();
    for _ in 0..5 {
        app.recorder
            .record(NewActivity::new(42, "transfer", "pending"))
            .await
            .unwrap();
    }

    let cookie = session_cookie(&session_token(42));
    let response = get_with_cookie(app.router, "/api/v1/activity?limit=3", &cookie).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn list_rejects_out_of_range_limit() {
    let app = common::build_test_app();
    let cookie = session_cookie(&session_token(42));

    for uri in ["/api/v1/activity?limit=0", "/api/v1/activity?limit=101"] {
        let response = get_with_cookie(app.router.clone(), uri, &cookie).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn feed_requires_session() {
    let app = common::build_test_app();
    let response = get(app.router, "/api/v1/activity/ws").await;

    // The session is checked before the upgrade handshake.
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn dashboard_home_shows_recorded_activity() {
    let app = common::build_test_app();
    let record = app
        .recorder
        .record(NewActivity::new(42, "deposit", "completed").with_amount(5000, "USD"))
        .await
        .unwrap();

    let cookie = session_cookie(&session_token(42));
    let response = get_with_cookie(app.router, "/dashboard", &cookie).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["data"]["recent_activity"][0],
        serde_json::to_value(&record).unwrap()
    );
}
