//! Integration tests for the protected catalogue surface.

mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

use stepflow_entity::user::Role;

#[tokio::test]
async fn test_only_admins_create_moves() {
    let app = TestApp::new();
    app.create_user("admin", "secret1", Role::Admin).await;
    app.create_user("dancer", "secret1", Role::User).await;
    let (admin_access, _) = app.login("admin", "secret1").await;
    let (user_access, _) = app.login("dancer", "secret1").await;

    let body = json!({
        "name": "Cross-body lead",
        "difficulty": "medium",
        "start_position": "closed",
        "end_position": "open_left_to_right",
    });

    let response = app
        .request(
            "POST",
            "/dance-moves",
            Some(body.clone()),
            &[("accessToken", &user_access)],
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "POST",
            "/dance-moves",
            Some(body),
            &[("accessToken", &admin_access)],
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["name"], "Cross-body lead");

    // Everyone authenticated can read.
    let response = app
        .request("GET", "/dance-moves", None, &[("accessToken", &user_access)])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_move_update_and_delete_are_admin_gated() {
    let app = TestApp::new();
    app.create_user("admin", "secret1", Role::Admin).await;
    app.create_user("dancer", "secret1", Role::User).await;
    let (admin_access, _) = app.login("admin", "secret1").await;
    let (user_access, _) = app.login("dancer", "secret1").await;

    let created = app
        .request(
            "POST",
            "/dance-moves",
            Some(json!({
                "name": "Basic step",
                "difficulty": "easy",
                "start_position": "closed",
                "end_position": "closed",
            })),
            &[("accessToken", &admin_access)],
        )
        .await;
    let move_id = created.body["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "PUT",
            &format!("/dance-moves/{move_id}"),
            Some(json!({ "difficulty": "medium" })),
            &[("accessToken", &user_access)],
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "PUT",
            &format!("/dance-moves/{move_id}"),
            Some(json!({ "difficulty": "medium" })),
            &[("accessToken", &admin_access)],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["difficulty"], "medium");

    let response = app
        .request(
            "DELETE",
            &format!("/dance-moves/{move_id}"),
            None,
            &[("accessToken", &admin_access)],
        )
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app
        .request(
            "GET",
            &format!("/dance-moves/{move_id}"),
            None,
            &[("accessToken", &admin_access)],
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sequence_delete_is_owner_or_admin() {
    let app = TestApp::new();
    app.create_user("admin", "secret1", Role::Admin).await;
    app.create_user("owner", "secret1", Role::User).await;
    app.create_user("other", "secret1", Role::User).await;
    let (admin_access, _) = app.login("admin", "secret1").await;
    let (owner_access, _) = app.login("owner", "secret1").await;
    let (other_access, _) = app.login("other", "secret1").await;

    let mut sequence_ids = Vec::new();
    for name in ["Opening set", "Closing set"] {
        let created = app
            .request(
                "POST",
                "/dance-sequences",
                Some(json!({ "name": name })),
                &[("accessToken", &owner_access)],
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED);
        sequence_ids.push(created.body["id"].as_str().unwrap().to_string());
    }

    // A stranger cannot delete.
    let response = app
        .request(
            "DELETE",
            &format!("/dance-sequences/{}", sequence_ids[0]),
            None,
            &[("accessToken", &other_access)],
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    // The owner can.
    let response = app
        .request(
            "DELETE",
            &format!("/dance-sequences/{}", sequence_ids[0]),
            None,
            &[("accessToken", &owner_access)],
        )
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    // So can an admin.
    let response = app
        .request(
            "DELETE",
            &format!("/dance-sequences/{}", sequence_ids[1]),
            None,
            &[("accessToken", &admin_access)],
        )
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_sequence_rating_upserts_and_averages() {
    let app = TestApp::new();
    app.create_user("alice", "secret1", Role::User).await;
    app.create_user("bob", "secret1", Role::User).await;
    let (alice_access, _) = app.login("alice", "secret1").await;
    let (bob_access, _) = app.login("bob", "secret1").await;

    let created = app
        .request(
            "POST",
            "/dance-sequences",
            Some(json!({ "name": "Showcase", "description": "Competition set" })),
            &[("accessToken", &alice_access)],
        )
        .await;
    let sequence_id = created.body["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "PUT",
            &format!("/dance-sequences/{sequence_id}/rating"),
            Some(json!({ "score": 2 })),
            &[("accessToken", &alice_access)],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["average_score"], 2.0);

    let response = app
        .request(
            "PUT",
            &format!("/dance-sequences/{sequence_id}/rating"),
            Some(json!({ "score": 4 })),
            &[("accessToken", &bob_access)],
        )
        .await;
    assert_eq!(response.body["average_score"], 3.0);

    // Re-rating replaces the previous score.
    let response = app
        .request(
            "PUT",
            &format!("/dance-sequences/{sequence_id}/rating"),
            Some(json!({ "score": 4 })),
            &[("accessToken", &alice_access)],
        )
        .await;
    assert_eq!(response.body["average_score"], 4.0);

    // Scores outside 1..=5 are rejected.
    let response = app
        .request(
            "PUT",
            &format!("/dance-sequences/{sequence_id}/rating"),
            Some(json!({ "score": 6 })),
            &[("accessToken", &alice_access)],
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_events_are_admin_managed() {
    let app = TestApp::new();
    app.create_user("admin", "secret1", Role::Admin).await;
    app.create_user("dancer", "secret1", Role::User).await;
    let (admin_access, _) = app.login("admin", "secret1").await;
    let (user_access, _) = app.login("dancer", "secret1").await;

    let response = app
        .request(
            "POST",
            "/events",
            Some(json!({ "name": "Spring ball", "location": "Vilnius" })),
            &[("accessToken", &user_access)],
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let created = app
        .request(
            "POST",
            "/events",
            Some(json!({ "name": "Spring ball", "location": "Vilnius" })),
            &[("accessToken", &admin_access)],
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let event_id = created.body["id"].as_str().unwrap().to_string();

    // A sequence can reference the event.
    let response = app
        .request(
            "POST",
            "/dance-sequences",
            Some(json!({ "name": "Ball opener", "event_id": event_id })),
            &[("accessToken", &user_access)],
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["event_id"], event_id);

    // Referencing a missing event is a validation failure.
    let response = app
        .request(
            "POST",
            "/dance-sequences",
            Some(json!({
                "name": "Orphan",
                "event_id": "00000000-0000-0000-0000-000000000000",
            })),
            &[("accessToken", &user_access)],
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
