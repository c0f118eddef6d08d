//! Document lifecycle: CRUD, flag actions, reordering, versions, and
//! categories across the shared document shape.

use axum::http::StatusCode;

use crate::helpers::{test_app, TestApp};

async fn writer_token(app: &TestApp, username: &str) -> String {
    let user_id = app.create_test_user(username, "stapler-horizon-9").await;
    app.grant(user_id, "*", "read").await;
    app.grant(user_id, "*", "write").await;
    app.grant(user_id, "*", "delete").await;
    app.login(username, "stapler-horizon-9").await
}

async fn create_document(app: &TestApp, token: &str, kind: &str, title: &str) -> String {
    let response = app
        .request(
            "POST",
            &format!("/api/documents/{kind}"),
            Some(serde_json::json!({ "title": title })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    response.body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn unknown_kind_is_not_found() {
    let app = test_app!();
    let token = writer_token(&app, "kinduser").await;

    let response = app
        .request("GET", "/api/documents/blueprint", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn created_document_starts_unapproved_at_version_one() {
    let app = test_app!();
    let token = writer_token(&app, "creator").await;

    let id = create_document(&app, &token, "policy", "Quality Policy").await;

    let response = app
        .request("GET", &format!("/api/documents/policy/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let doc = &response.body["data"];
    assert_eq!(doc["version"], 1);
    assert_eq!(doc["approved"], false);
    assert_eq!(doc["archived"], false);
    assert_eq!(doc["kind"], "policy");
}

#[tokio::test]
async fn kinds_are_isolated_from_each_other() {
    let app = test_app!();
    let token = writer_token(&app, "isolator").await;

    let id = create_document(&app, &token, "policy", "Only a policy").await;

    // The same id under another kind does not exist.
    let response = app
        .request("GET", &format!("/api/documents/manual/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn default_delete_archives_instead_of_removing() {
    let app = test_app!();
    let token = writer_token(&app, "archiver").await;

    let id = create_document(&app, &token, "form", "Incident Form").await;

    let delete = app
        .request("DELETE", &format!("/api/documents/form/{id}"), None, Some(&token))
        .await;
    assert_eq!(delete.status, StatusCode::OK);

    // Hidden from the default listing.
    let listing = app
        .request("GET", "/api/documents/form", None, Some(&token))
        .await;
    assert_eq!(listing.body["data"]["total"], 0);

    // Still present when archived records are included.
    let archived = app
        .request(
            "GET",
            "/api/documents/form?archived=true",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(archived.body["data"]["total"], 1);
}

#[tokio::test]
async fn permanent_delete_removes_the_record() {
    let app = test_app!();
    let token = writer_token(&app, "purger").await;

    let id = create_document(&app, &token, "form", "Scrap Form").await;

    let delete = app
        .request(
            "DELETE",
            &format!("/api/documents/form/{id}?permanent=true"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(delete.status, StatusCode::OK);

    let get = app
        .request("GET", &format!("/api/documents/form/{id}"), None, Some(&token))
        .await;
    assert_eq!(get.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bulk_action_reports_the_updated_count() {
    let app = test_app!();
    let token = writer_token(&app, "bulkuser").await;

    let a = create_document(&app, &token, "register", "Register A").await;
    let b = create_document(&app, &token, "register", "Register B").await;

    let response = app
        .request(
            "PUT",
            "/api/documents/register",
            Some(serde_json::json!({
                "ids": [a, b],
                "action": "approve",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["updated"], 2);
}

#[tokio::test]
async fn bulk_action_with_no_ids_is_rejected() {
    let app = test_app!();
    let token = writer_token(&app, "emptybulk").await;

    let response = app
        .request(
            "PUT",
            "/api/documents/register",
            Some(serde_json::json!({ "ids": [], "action": "approve" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn toggle_highlight_flips_the_flag_both_ways() {
    let app = test_app!();
    let token = writer_token(&app, "highlighter").await;

    let id = create_document(&app, &token, "manual", "Ops Manual").await;

    let first = app
        .request(
            "PATCH",
            &format!("/api/documents/manual/{id}"),
            Some(serde_json::json!({ "action": "toggle_highlight" })),
            Some(&token),
        )
        .await;
    assert_eq!(first.body["data"]["highlighted"], true);

    let second = app
        .request(
            "PATCH",
            &format!("/api/documents/manual/{id}"),
            Some(serde_json::json!({ "action": "toggle_highlight" })),
            Some(&token),
        )
        .await;
    assert_eq!(second.body["data"]["highlighted"], false);
}

#[tokio::test]
async fn reorder_swaps_positions_with_the_neighbor() {
    let app = test_app!();
    let token = writer_token(&app, "sorter").await;

    let first = create_document(&app, &token, "procedure", "Step One").await;
    let second = create_document(&app, &token, "procedure", "Step Two").await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/documents/procedure/{second}"),
            Some(serde_json::json!({ "action": "move_up" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let listing = app
        .request("GET", "/api/documents/procedure", None, Some(&token))
        .await;
    let items = listing.body["data"]["items"].as_array().unwrap();
    assert_eq!(items[0]["id"], second.as_str());
    assert_eq!(items[1]["id"], first.as_str());
}

#[tokio::test]
async fn publishing_a_version_bumps_the_document() {
    let app = test_app!();
    let token = writer_token(&app, "versioner").await;

    let id = create_document(&app, &token, "policy", "Versioned Policy").await;

    let publish = app
        .request(
            "POST",
            &format!("/api/documents/policy/{id}/versions"),
            Some(serde_json::json!({ "notes": "Annual review" })),
            Some(&token),
        )
        .await;
    assert_eq!(publish.status, StatusCode::OK, "{:?}", publish.body);
    assert_eq!(publish.body["data"]["version"], 2);

    let versions = app
        .request(
            "GET",
            &format!("/api/documents/policy/{id}/versions"),
            None,
            Some(&token),
        )
        .await;
    let items = versions.body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["notes"], "Annual review");
}

#[tokio::test]
async fn categories_are_scoped_to_their_kind() {
    let app = test_app!();
    let token = writer_token(&app, "categorizer").await;

    let created = app
        .request(
            "POST",
            "/api/documents/policy/categories",
            Some(serde_json::json!({ "name": "Health and Safety" })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK, "{:?}", created.body);
    let category_id = created.body["data"]["id"].as_str().unwrap().to_string();

    // A document of another kind cannot use the category.
    let mismatch = app
        .request(
            "POST",
            "/api/documents/manual",
            Some(serde_json::json!({
                "title": "Misfiled Manual",
                "category_id": category_id,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(mismatch.status, StatusCode::BAD_REQUEST);

    // Duplicate names within a kind conflict.
    let duplicate = app
        .request(
            "POST",
            "/api/documents/policy/categories",
            Some(serde_json::json!({ "name": "Health and Safety" })),
            Some(&token),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
}
