//! Permission resolution: direct grants, group inheritance, the Admin
//! override, and expiry handling.

use axum::http::StatusCode;

use crate::helpers::test_app;

#[tokio::test]
async fn user_without_grants_is_denied_everywhere() {
    let app = test_app!();
    app.create_test_user("nobody", "stapler-horizon-9").await;
    let token = app.login("nobody", "stapler-horizon-9").await;

    let response = app
        .request("GET", "/api/documents/policy", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn direct_grant_opens_exactly_that_system() {
    let app = test_app!();
    let user_id = app.create_test_user("reader", "stapler-horizon-9").await;
    app.grant(user_id, "policies", "read").await;
    let token = app.login("reader", "stapler-horizon-9").await;

    let allowed = app
        .request("GET", "/api/documents/policy", None, Some(&token))
        .await;
    assert_eq!(allowed.status, StatusCode::OK);

    let denied = app
        .request("GET", "/api/documents/manual", None, Some(&token))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn read_grant_does_not_allow_writes() {
    let app = test_app!();
    let user_id = app.create_test_user("readonly", "stapler-horizon-9").await;
    app.grant(user_id, "policies", "read").await;
    let token = app.login("readonly", "stapler-horizon-9").await;

    let response = app
        .request(
            "POST",
            "/api/documents/policy",
            Some(serde_json::json!({ "title": "Quality Policy" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn wildcard_grant_covers_every_system() {
    let app = test_app!();
    let user_id = app.create_test_user("wildcard", "stapler-horizon-9").await;
    app.grant(user_id, "*", "read").await;
    let token = app.login("wildcard", "stapler-horizon-9").await;

    for kind in ["policy", "manual", "risk_assessment"] {
        let response = app
            .request("GET", &format!("/api/documents/{kind}"), None, Some(&token))
            .await;
        assert_eq!(response.status, StatusCode::OK, "kind: {kind}");
    }
}

#[tokio::test]
async fn admin_override_passes_every_check() {
    let app = test_app!();
    app.create_admin("superadmin", "stapler-horizon-9").await;
    let token = app.login("superadmin", "stapler-horizon-9").await;

    let read = app
        .request("GET", "/api/documents/coshh", None, Some(&token))
        .await;
    assert_eq!(read.status, StatusCode::OK);

    let admin_list = app
        .request("GET", "/api/admin/users", None, Some(&token))
        .await;
    assert_eq!(admin_list.status, StatusCode::OK);
}

#[tokio::test]
async fn group_grant_is_inherited_by_members() {
    let app = test_app!();
    let admin_id = app.create_admin("groupadmin", "stapler-horizon-9").await;
    let member_id = app.create_test_user("groupmember", "stapler-horizon-9").await;
    let admin_token = app.login("groupadmin", "stapler-horizon-9").await;

    let group = app
        .request(
            "POST",
            "/api/groups",
            Some(serde_json::json!({
                "name": "Auditors",
                "initial_user_ids": [member_id],
            })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(group.status, StatusCode::OK, "{:?}", group.body);
    let group_id = group.body["data"]["id"].as_str().unwrap().to_string();

    let role_id: uuid::Uuid =
        sqlx::query_scalar("SELECT id FROM roles WHERE name = 'read'")
            .fetch_one(&app.pool)
            .await
            .unwrap();

    let grant = app
        .request(
            "POST",
            &format!("/api/permissions/groups/{group_id}"),
            Some(serde_json::json!({
                "system_id": "audit-records",
                "role_id": role_id,
            })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(grant.status, StatusCode::OK, "{:?}", grant.body);

    let member_token = app.login("groupmember", "stapler-horizon-9").await;
    let response = app
        .request("GET", "/api/documents/audit_record", None, Some(&member_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let _ = admin_id;
}

#[tokio::test]
async fn expired_grant_behaves_like_no_grant() {
    let app = test_app!();
    let user_id = app.create_test_user("expired", "stapler-horizon-9").await;

    sqlx::query(
        "INSERT INTO permissions (user_id, system_id, role_id, expiry) \
         VALUES ($1, 'policies', (SELECT id FROM roles WHERE name = 'read'), NOW() - INTERVAL '1 hour')",
    )
    .bind(user_id)
    .execute(&app.pool)
    .await
    .unwrap();

    let token = app.login("expired", "stapler-horizon-9").await;
    let response = app
        .request("GET", "/api/documents/policy", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);

    // The lapsed row is never eagerly deleted.
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM permissions WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn check_endpoint_reports_the_decision_without_failing() {
    let app = test_app!();
    let user_id = app.create_test_user("checker", "stapler-horizon-9").await;
    app.grant(user_id, "policies", "read").await;
    let token = app.login("checker", "stapler-horizon-9").await;

    let allowed = app
        .request(
            "GET",
            "/api/permissions/check?system=policies&role=read",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(allowed.status, StatusCode::OK);
    assert_eq!(allowed.body["data"]["allowed"], true);

    let denied = app
        .request(
            "GET",
            "/api/permissions/check?system=manuals&role=write",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(denied.status, StatusCode::OK);
    assert_eq!(denied.body["data"]["allowed"], false);
}

#[tokio::test]
async fn revoking_a_grant_closes_access() {
    let app = test_app!();
    app.create_admin("revoker", "stapler-horizon-9").await;
    let target_id = app.create_test_user("target", "stapler-horizon-9").await;
    let admin_token = app.login("revoker", "stapler-horizon-9").await;

    let role_id: uuid::Uuid =
        sqlx::query_scalar("SELECT id FROM roles WHERE name = 'read'")
            .fetch_one(&app.pool)
            .await
            .unwrap();

    let grant = app
        .request(
            "POST",
            &format!("/api/permissions/users/{target_id}"),
            Some(serde_json::json!({
                "system_id": "policies",
                "role_id": role_id,
            })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(grant.status, StatusCode::OK);
    let permission_id = grant.body["data"]["id"].as_str().unwrap().to_string();

    let target_token = app.login("target", "stapler-horizon-9").await;
    let before = app
        .request("GET", "/api/documents/policy", None, Some(&target_token))
        .await;
    assert_eq!(before.status, StatusCode::OK);

    let revoke = app
        .request(
            "DELETE",
            &format!("/api/permissions/users/{target_id}/{permission_id}"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(revoke.status, StatusCode::OK);

    let after = app
        .request("GET", "/api/documents/policy", None, Some(&target_token))
        .await;
    assert_eq!(after.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn granting_the_same_triple_twice_conflicts() {
    let app = test_app!();
    app.create_admin("regrant", "stapler-horizon-9").await;
    let target_id = app.create_test_user("grantee", "stapler-horizon-9").await;
    let admin_token = app.login("regrant", "stapler-horizon-9").await;

    let role_id: uuid::Uuid =
        sqlx::query_scalar("SELECT id FROM roles WHERE name = 'read'")
            .fetch_one(&app.pool)
            .await
            .unwrap();
    let body = serde_json::json!({
        "system_id": "policies",
        "role_id": role_id,
    });

    let first = app
        .request(
            "POST",
            &format!("/api/permissions/users/{target_id}"),
            Some(body.clone()),
            Some(&admin_token),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK, "{:?}", first.body);

    let second = app
        .request(
            "POST",
            &format!("/api/permissions/users/{target_id}"),
            Some(body),
            Some(&admin_token),
        )
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["error"], "CONFLICT");
}
