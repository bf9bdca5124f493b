//! End-to-end tests for the portfolio API.
//!
//! # Running Tests
//!
//! ```bash
//! # Database, migrations and one admin account
//! folio migrate
//! folio admin create -u e2e-admin -e e2e-admin@example.com -p 'e2e-admin-pass'
//!
//! # Server
//! cargo run -p folio-server
//!
//! # Tests (all ignored by default)
//! FOLIO_ADMIN_EMAIL=e2e-admin@example.com FOLIO_ADMIN_PASSWORD=e2e-admin-pass \
//!     cargo test -p folio-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `FOLIO_BASE_URL` - Server under test (default `http://localhost:5000`)
//! - `FOLIO_ADMIN_EMAIL` / `FOLIO_ADMIN_PASSWORD` - An existing admin account
//!
//! Register and login share a tight rate limit, so each helper request
//! carries a fresh `x-forwarded-for` address.

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL of the server under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("FOLIO_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

/// Absolute URL for `path`.
#[must_use]
pub fn url(path: &str) -> String {
    format!("{}{path}", base_url())
}

#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// Short random suffix for unique usernames and emails.
#[must_use]
pub fn unique() -> String {
    Uuid::new_v4().simple().to_string().chars().take(12).collect()
}

/// A random address in 10.0.0.0/8, used to get a fresh rate limit bucket.
#[must_use]
pub fn fresh_ip() -> String {
    let [a, b, c, ..] = Uuid::new_v4().into_bytes();
    format!("10.{a}.{b}.{c}")
}

/// Attach a bearer token.
#[must_use]
pub fn bearer(request: RequestBuilder, token: &str) -> RequestBuilder {
    request.header("authorization", format!("Bearer {token}"))
}

/// A registered account and its token.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

/// Register a fresh account and log it in.
pub async fn register_user(client: &Client) -> TestUser {
    let suffix = unique();
    let username = format!("user_{suffix}");
    let email = format!("user-{suffix}@example.com");
    let password = "integration-pass".to_string();

    let resp = client
        .post(url("/api/auth/register"))
        .header("x-forwarded-for", fresh_ip())
        .json(&json!({"username": username, "email": email, "password": password}))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.unwrap();
    let id = body["user"]["id"].as_i64().expect("user id in response");

    let token = login(client, &email, &password).await;

    TestUser {
        id,
        username,
        email,
        password,
        token,
    }
}

/// Log in and return the token.
pub async fn login(client: &Client, email: &str, password: &str) -> String {
    let resp = client
        .post(url("/api/auth/login"))
        .header("x-forwarded-for", fresh_ip())
        .json(&json!({"email": email, "password": password}))
        .send()
        .await
        .expect("Failed to log in");
    assert_eq!(resp.status(), StatusCode::OK, "login failed for {email}");

    let body: Value = resp.json().await.unwrap();
    body["token"].as_str().expect("token in response").to_string()
}

/// Token for the admin named by `FOLIO_ADMIN_EMAIL` / `FOLIO_ADMIN_PASSWORD`.
pub async fn admin_token(client: &Client) -> String {
    let email = std::env::var("FOLIO_ADMIN_EMAIL").expect("FOLIO_ADMIN_EMAIL not set");
    let password = std::env::var("FOLIO_ADMIN_PASSWORD").expect("FOLIO_ADMIN_PASSWORD not set");
    login(client, &email, &password).await
}

/// Read the `message` field of an error or message body.
pub async fn message(resp: reqwest::Response) -> String {
    let body: Value = resp.json().await.unwrap();
    body["message"].as_str().unwrap_or_default().to_string()
}
