//! Login, logout, refresh, and current-user flows.

use axum::http::StatusCode;

use crate::helpers::test_app;

#[tokio::test]
async fn login_returns_token_pair() {
    let app = test_app!();
    app.create_test_user("authuser", "stapler-horizon-9").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "authuser",
                "password": "stapler-horizon-9",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["access_token"].is_string());
    assert!(response.body["data"]["refresh_token"].is_string());
    assert_eq!(response.body["data"]["user"]["username"], "authuser");
}

#[tokio::test]
async fn login_accepts_email_in_place_of_username() {
    let app = test_app!();
    app.create_test_user("emailuser", "stapler-horizon-9").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "emailuser@test.com",
                "password": "stapler-horizon-9",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn wrong_password_and_unknown_user_are_indistinguishable() {
    let app = test_app!();
    app.create_test_user("realuser", "stapler-horizon-9").await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "realuser",
                "password": "not-the-password",
            })),
            None,
        )
        .await;

    let unknown_user = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "no-such-user",
                "password": "stapler-horizon-9",
            })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        wrong_password.body["message"],
        unknown_user.body["message"]
    );
}

#[tokio::test]
async fn logout_blocklists_the_access_token() {
    let app = test_app!();
    app.create_test_user("signoffuser", "stapler-horizon-9").await;
    let token = app.login("signoffuser", "stapler-horizon-9").await;

    let response = app
        .request("POST", "/api/auth/logout", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_rotates_the_token_pair() {
    let app = test_app!();
    app.create_test_user("rotator", "stapler-horizon-9").await;

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "rotator",
                "password": "stapler-horizon-9",
            })),
            None,
        )
        .await;
    let refresh_token = login.body["data"]["refresh_token"].as_str().unwrap().to_string();

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh_token })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // The old refresh token is single-use.
    let replay = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh_token })),
            None,
        )
        .await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_requires_authentication() {
    let app = test_app!();

    let response = app.request("GET", "/api/auth/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn account_uniqueness_ignores_case() {
    let app = test_app!();
    app.create_admin("caseadmin", "stapler-horizon-9").await;
    app.create_test_user("caseuser", "stapler-horizon-9").await;
    let token = app.login("caseadmin", "stapler-horizon-9").await;

    // Same account differing only in case must hit the unique index.
    let response = app
        .request(
            "POST",
            "/api/admin/users",
            Some(serde_json::json!({
                "email": "CaseUser@test.com",
                "username": "CaseUser",
                "password": "stapler-horizon-9",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT, "{:?}", response.body);
    assert_eq!(response.body["error"], "CONFLICT");
}
