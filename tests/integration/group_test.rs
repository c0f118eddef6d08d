//! Group membership management.

use axum::http::StatusCode;

use crate::helpers::test_app;

#[tokio::test]
async fn create_group_enrolls_initial_members() {
    let app = test_app!();
    app.create_admin("groupcreator", "stapler-horizon-9").await;
    let member_a = app.create_test_user("membera", "stapler-horizon-9").await;
    let member_b = app.create_test_user("memberb", "stapler-horizon-9").await;
    let token = app.login("groupcreator", "stapler-horizon-9").await;

    let created = app
        .request(
            "POST",
            "/api/groups",
            Some(serde_json::json!({
                "name": "Quality Team",
                "description": "ISO 9001 owners",
                "initial_user_ids": [member_a, member_b],
            })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK, "{:?}", created.body);
    let group_id = created.body["data"]["id"].as_str().unwrap().to_string();

    let members = app
        .request(
            "GET",
            &format!("/api/groups/{group_id}/members"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(members.body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn duplicate_group_name_conflicts() {
    let app = test_app!();
    app.create_admin("dupadmin", "stapler-horizon-9").await;
    let token = app.login("dupadmin", "stapler-horizon-9").await;

    let body = serde_json::json!({ "name": "Safety Committee" });
    let first = app
        .request("POST", "/api/groups", Some(body.clone()), Some(&token))
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app
        .request("POST", "/api/groups", Some(body), Some(&token))
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn failed_duplicate_create_enrolls_nobody() {
    let app = test_app!();
    app.create_admin("txnadmin", "stapler-horizon-9").await;
    let straggler = app.create_test_user("straggler", "stapler-horizon-9").await;
    let token = app.login("txnadmin", "stapler-horizon-9").await;

    let first = app
        .request(
            "POST",
            "/api/groups",
            Some(serde_json::json!({ "name": "Review Board" })),
            Some(&token),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let memberships_before: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_groups")
        .fetch_one(&app.pool)
        .await
        .unwrap();

    // Name collision must roll the whole create back, members included.
    let duplicate = app
        .request(
            "POST",
            "/api/groups",
            Some(serde_json::json!({
                "name": "Review Board",
                "initial_user_ids": [straggler],
            })),
            Some(&token),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let memberships_after: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_groups")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(memberships_after, memberships_before);
}

#[tokio::test]
async fn membership_can_be_added_and_removed() {
    let app = test_app!();
    app.create_admin("memberadmin", "stapler-horizon-9").await;
    let user_id = app.create_test_user("joiner", "stapler-horizon-9").await;
    let token = app.login("memberadmin", "stapler-horizon-9").await;

    let group = app
        .request(
            "POST",
            "/api/groups",
            Some(serde_json::json!({ "name": "Rotating Crew" })),
            Some(&token),
        )
        .await;
    let group_id = group.body["data"]["id"].as_str().unwrap().to_string();

    let added = app
        .request(
            "POST",
            &format!("/api/groups/{group_id}/members"),
            Some(serde_json::json!({ "user_id": user_id })),
            Some(&token),
        )
        .await;
    assert_eq!(added.status, StatusCode::OK);

    // Adding the same member twice conflicts.
    let again = app
        .request(
            "POST",
            &format!("/api/groups/{group_id}/members"),
            Some(serde_json::json!({ "user_id": user_id })),
            Some(&token),
        )
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);

    let removed = app
        .request(
            "DELETE",
            &format!("/api/groups/{group_id}/members/{user_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(removed.status, StatusCode::OK);

    // Removing a non-member is not found.
    let absent = app
        .request(
            "DELETE",
            &format!("/api/groups/{group_id}/members/{user_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(absent.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn group_mutations_are_audited() {
    let app = test_app!();
    let admin_id = app.create_admin("auditadmin", "stapler-horizon-9").await;
    let user_id = app.create_test_user("audited", "stapler-horizon-9").await;
    let token = app.login("auditadmin", "stapler-horizon-9").await;

    let group = app
        .request(
            "POST",
            "/api/groups",
            Some(serde_json::json!({ "name": "Audited Group" })),
            Some(&token),
        )
        .await;
    let group_id = group.body["data"]["id"].as_str().unwrap().to_string();

    app.request(
        "POST",
        &format!("/api/groups/{group_id}/members"),
        Some(serde_json::json!({ "user_id": user_id })),
        Some(&token),
    )
    .await;

    let audit = app
        .request(
            "GET",
            &format!("/api/admin/audit?actor_id={admin_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(audit.status, StatusCode::OK);

    let actions: Vec<&str> = audit.body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|entry| entry["action"].as_str())
        .collect();
    assert!(actions.contains(&"GROUP_CREATED"), "actions: {actions:?}");
    assert!(actions.contains(&"ADD_USER_TO_GROUP"), "actions: {actions:?}");
}
