//! Integration tests for projects, testimonials and the contact form.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database (folio migrate)
//! - The server running (cargo run -p folio-server)
//! - An admin account in `FOLIO_ADMIN_EMAIL` / `FOLIO_ADMIN_PASSWORD`
//!
//! Run with: cargo test -p folio-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use folio_integration_tests::{admin_token, bearer, client, message, register_user, unique, url};
use reqwest::StatusCode;
use serde_json::{Value, json};

// ============================================================================
// Projects
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_admin_creates_project_and_it_is_listed() {
    let client = client();
    let token = admin_token(&client).await;
    let title = format!("Project {}", unique());

    let resp = bearer(client.post(url("/api/projects")), &token)
        .json(&json!({
            "title": title,
            "description": "Created by an integration test",
            "tags": ["rust", "rust", " "],
            "githubUrl": "https://github.com/example/test"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = resp.json().await.unwrap();
    assert_eq!(created["tags"], json!(["rust"]));

    let list: Vec<Value> = client
        .get(url("/api/projects"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(list.iter().any(|p| p["title"] == title.as_str()));

    let resp = bearer(
        client.delete(url(&format!("/api/admin/projects/{}", created["id"]))),
        &token,
    )
    .send()
    .await
    .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_regular_user_cannot_create_project() {
    let client = client();
    let user = register_user(&client).await;

    let resp = bearer(client.post(url("/api/projects")), &user.token)
        .json(&json!({"title": "Nope", "description": "x"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// ============================================================================
// Testimonials
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_testimonial_hidden_until_approved() {
    let client = client();
    let token = admin_token(&client).await;
    let name = format!("Reviewer {}", unique());

    let resp = client
        .post(url("/api/testimonials"))
        .json(&json!({"name": name, "content": "Great work", "approved": true}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = resp.json().await.unwrap();
    assert_eq!(created["approved"], false);
    let id = created["id"].as_i64().unwrap();

    let public: Vec<Value> = client
        .get(url("/api/testimonials"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!public.iter().any(|t| t["id"].as_i64() == Some(id)));

    let resp = bearer(
        client.patch(url(&format!("/api/testimonials/{id}/approve"))),
        &token,
    )
    .send()
    .await
    .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let approved: Value = resp.json().await.unwrap();
    assert_eq!(approved["approved"], true);

    let public: Vec<Value> = client
        .get(url("/api/testimonials"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(public.iter().any(|t| t["id"].as_i64() == Some(id)));

    let resp = bearer(client.delete(url(&format!("/api/testimonials/{id}"))), &token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(message(resp).await, "Deleted");
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_approve_unknown_testimonial() {
    let client = client();
    let token = admin_token(&client).await;

    let resp = bearer(
        client.patch(url("/api/testimonials/2147483647/approve")),
        &token,
    )
    .send()
    .await
    .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message(resp).await, "Invalid request");
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_regular_user_cannot_approve() {
    let client = client();
    let user = register_user(&client).await;

    let resp = bearer(client.patch(url("/api/testimonials/1/approve")), &user.token)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// ============================================================================
// Contact
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_contact_submission_visible_to_authenticated_users() {
    let client = client();
    let subject = format!("Hello {}", unique());

    let resp = client
        .post(url("/api/contact"))
        .json(&json!({
            "name": "Visitor",
            "email": "visitor@example.com",
            "subject": subject,
            "message": "Are you available for work?"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(message(resp).await, "Message received");

    let anonymous = client.get(url("/api/contact")).send().await.unwrap();
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let user = register_user(&client).await;
    let list: Vec<Value> = bearer(client.get(url("/api/contact")), &user.token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(list.iter().any(|c| c["subject"] == subject.as_str()));
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_contact_invalid_email_rejected() {
    let resp = client()
        .post(url("/api/contact"))
        .json(&json!({"name": "Visitor", "email": "not-an-email", "message": "hi"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message(resp).await, "Invalid data");
}
