mod common;

use blog_service::inbound::http::rate_limit::RateLimitPolicy;
use common::varies_on_authorization;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_user_success() {
    let app = TestApp::spawn().await;

    let body = app.register("alice@example.com", "pa55word!").await;

    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert_eq!(body["data"]["activated"], false);
    assert!(body["data"]["id"].is_string());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_user_duplicate_email() {
    let app = TestApp::spawn().await;
    app.register("alice@example.com", "pa55word!").await;

    let response = app
        .post("/api/v1/users")
        .json(&json!({ "email": "alice@example.com", "password": "other-pa55word" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["data"]["errors"]["email"],
        "a user with this email address already exists"
    );
}

#[tokio::test]
async fn test_create_authentication_token_success() {
    let app = TestApp::spawn().await;
    app.register("alice@example.com", "pa55word!").await;

    let response = app
        .post("/api/v1/tokens/authentication")
        .json(&json!({ "email": "alice@example.com", "password": "pa55word!" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let token = body["data"]["authentication_token"]["token"]
        .as_str()
        .expect("Missing token");
    assert_eq!(token.len(), 26);
    assert!(body["data"]["authentication_token"]["expiry"].is_string());
}

#[tokio::test]
async fn test_create_authentication_token_wrong_password() {
    let app = TestApp::spawn().await;
    app.register("alice@example.com", "pa55word!").await;

    let response = app
        .post("/api/v1/tokens/authentication")
        .json(&json!({ "email": "alice@example.com", "password": "wrong-password" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_authentication_token_unknown_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/tokens/authentication")
        .json(&json!({ "email": "nobody@example.com", "password": "pa55word!" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_authentication_token_invalid_fields() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/tokens/authentication")
        .json(&json!({ "email": "not-an-email", "password": "short" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["data"]["errors"]["email"],
        "must be a valid email address"
    );
    assert_eq!(
        body["data"]["errors"]["password"],
        "must be at least 8 bytes long"
    );
}

#[tokio::test]
async fn test_inactive_user_is_forbidden_from_me() {
    let app = TestApp::spawn().await;
    app.register("alice@example.com", "pa55word!").await;
    let token = app
        .issue_token("authentication", "alice@example.com", "pa55word!")
        .await;

    let response = app
        .get_authenticated("/api/v1/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_activation_flow_grants_access() {
    let app = TestApp::spawn().await;
    let token = app
        .activated_user_token("alice@example.com", "pa55word!")
        .await;

    let response = app
        .get_authenticated("/api/v1/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(varies_on_authorization(&response));

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert_eq!(body["data"]["activated"], true);
}

#[tokio::test]
async fn test_activation_token_is_single_use() {
    let app = TestApp::spawn().await;
    app.register("alice@example.com", "pa55word!").await;
    let first = app
        .issue_token("activation", "alice@example.com", "pa55word!")
        .await;
    let second = app
        .issue_token("activation", "alice@example.com", "pa55word!")
        .await;

    let response = app
        .put("/api/v1/users/activated")
        .json(&json!({ "token": first }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    // Activation revokes every outstanding activation token.
    for token in [first, second] {
        let response = app
            .put("/api/v1/users/activated")
            .json(&json!({ "token": token }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert_eq!(
            body["data"]["errors"]["token"],
            "invalid or expired activation token"
        );
    }
}

#[tokio::test]
async fn test_activation_token_cannot_authenticate() {
    let app = TestApp::spawn().await;
    app.register("alice@example.com", "pa55word!").await;
    let activation = app
        .issue_token("activation", "alice@example.com", "pa55word!")
        .await;

    let response = app
        .get_authenticated("/api/v1/healthcheck", &activation)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_invalidates_token() {
    let app = TestApp::spawn().await;
    let token = app
        .activated_user_token("alice@example.com", "pa55word!")
        .await;

    let response = app
        .delete_authenticated("/api/v1/tokens/authentication", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .get_authenticated("/api/v1/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_authorization_header() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/v1/healthcheck")
        .header("Authorization", "Token abc")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()["www-authenticate"], "Bearer");
    assert!(varies_on_authorization(&response));
}

#[tokio::test]
async fn test_rate_limit_per_client() {
    let app = TestApp::spawn_with_policy(RateLimitPolicy::default()).await;

    for _ in 0..4 {
        let response = app
            .get("/api/v1/healthcheck")
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .get("/api/v1/healthcheck")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    tokio::time::sleep(std::time::Duration::from_millis(600)).await;

    let response = app
        .get("/api/v1/healthcheck")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}
