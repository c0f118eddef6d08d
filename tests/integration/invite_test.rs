//! Invitation issue and acceptance.

use axum::http::StatusCode;

use crate::helpers::test_app;

#[tokio::test]
async fn accepted_invite_provisions_a_user_with_the_role() {
    let app = test_app!();
    app.create_admin("inviter", "stapler-horizon-9").await;
    let token = app.login("inviter", "stapler-horizon-9").await;

    let created = app
        .request(
            "POST",
            "/api/invites",
            Some(serde_json::json!({
                "email": "newhire@example.com",
                "role_name": "read",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK, "{:?}", created.body);
    let invite_token = created.body["data"]["token"].as_str().unwrap().to_string();

    let accepted = app
        .request(
            "GET",
            &format!("/api/accept-invite?token={invite_token}"),
            None,
            None,
        )
        .await;
    assert_eq!(accepted.status, StatusCode::OK, "{:?}", accepted.body);
    assert_eq!(accepted.body["data"]["email"], "newhire@example.com");

    let user_id = accepted.body["data"]["id"].as_str().unwrap();
    let grants: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM permissions WHERE user_id = $1::uuid",
    )
    .bind(user_id)
    .fetch_one(&app.pool)
    .await
    .unwrap();
    assert_eq!(grants, 1);
}

#[tokio::test]
async fn invite_is_consumed_exactly_once() {
    let app = test_app!();
    app.create_admin("onceinviter", "stapler-horizon-9").await;
    let token = app.login("onceinviter", "stapler-horizon-9").await;

    let created = app
        .request(
            "POST",
            "/api/invites",
            Some(serde_json::json!({
                "email": "oneshot@example.com",
                "role_name": "read",
            })),
            Some(&token),
        )
        .await;
    let invite_token = created.body["data"]["token"].as_str().unwrap().to_string();

    let first = app
        .request(
            "GET",
            &format!("/api/accept-invite?token={invite_token}"),
            None,
            None,
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app
        .request(
            "GET",
            &format!("/api/accept-invite?token={invite_token}"),
            None,
            None,
        )
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn invite_for_an_unknown_role_is_rejected() {
    let app = test_app!();
    app.create_admin("badinviter", "stapler-horizon-9").await;
    let token = app.login("badinviter", "stapler-horizon-9").await;

    let response = app
        .request(
            "POST",
            "/api/invites",
            Some(serde_json::json!({
                "email": "someone@example.com",
                "role_name": "superuser",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn accepting_an_invite_for_an_existing_user_reuses_the_account() {
    let app = test_app!();
    app.create_admin("reinviter", "stapler-horizon-9").await;
    let existing_id = app.create_test_user("existing", "stapler-horizon-9").await;
    let token = app.login("reinviter", "stapler-horizon-9").await;

    let created = app
        .request(
            "POST",
            "/api/invites",
            Some(serde_json::json!({
                "email": "existing@test.com",
                "role_name": "read",
            })),
            Some(&token),
        )
        .await;
    let invite_token = created.body["data"]["token"].as_str().unwrap().to_string();

    let accepted = app
        .request(
            "GET",
            &format!("/api/accept-invite?token={invite_token}"),
            None,
            None,
        )
        .await;
    assert_eq!(accepted.status, StatusCode::OK);
    assert_eq!(
        accepted.body["data"]["id"].as_str().unwrap(),
        existing_id.to_string()
    );
}

#[tokio::test]
async fn issuing_invites_requires_user_management_rights() {
    let app = test_app!();
    app.create_test_user("plainuser", "stapler-horizon-9").await;
    let token = app.login("plainuser", "stapler-horizon-9").await;

    let response = app
        .request(
            "POST",
            "/api/invites",
            Some(serde_json::json!({
                "email": "blocked@example.com",
                "role_name": "read",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
