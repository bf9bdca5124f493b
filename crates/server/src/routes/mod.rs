//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                                  - Banner
//! GET    /health, /health/ready             - Liveness / readiness
//!
//! # Auth
//! POST   /api/auth/register                 - Create an account
//! POST   /api/auth/login                    - Exchange credentials for a token
//! GET    /api/auth/me                       - Current user (auth)
//!
//! # Content
//! GET    /api/projects                      - List projects
//! POST   /api/projects                      - Create project (admin)
//! GET    /api/testimonials                  - Approved testimonials
//! POST   /api/testimonials                  - Submit testimonial (stored unapproved)
//! PATCH  /api/testimonials/{id}/approve     - Approve (admin)
//! DELETE /api/testimonials/{id}             - Delete (admin)
//! POST   /api/contact                       - Submit contact form
//! GET    /api/contact                       - List submissions (auth)
//!
//! # AI
//! GET    /api/chat                          - Own chat history (auth)
//! POST   /api/chat                          - Ask the chat model (auth)
//! GET    /api/image-classifier              - Own classifications (auth)
//! POST   /api/image-classifier              - Classify an image (token optional)
//!
//! # Admin (admin)
//! GET    /api/admin/{users,projects,testimonials,contacts}
//! DELETE /api/admin/{users,projects,testimonials,contacts}/{id}
//! ```

pub mod admin;
pub mod auth;
pub mod chat;
pub mod contact;
pub mod health;
pub mod image_classifier;
pub mod projects;
pub mod testimonials;

use axum::{
    Router,
    extract::{DefaultBodyLimit, FromRequest, FromRequestParts},
    routing::{delete, get, patch, post},
};

use crate::error::AppError;
use crate::middleware::{ai_rate_limiter, auth_rate_limiter};
use crate::state::AppState;

/// JSON body extractor that rejects with [`AppError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Path extractor that rejects with [`AppError`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct IdPath<T>(pub T);

/// `{"message": "..."}` acknowledgement body.
#[derive(Debug, serde::Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    #[must_use]
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .layer(auth_rate_limiter())
        .route("/me", get(auth::me))
}

pub fn project_routes() -> Router<AppState> {
    Router::new().route("/", get(projects::list).post(projects::create))
}

pub fn testimonial_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(testimonials::list).post(testimonials::create))
        .route("/{id}/approve", patch(testimonials::approve))
        .route("/{id}", delete(testimonials::delete))
}

pub fn contact_routes() -> Router<AppState> {
    Router::new().route("/", get(contact::list).post(contact::submit))
}

pub fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(chat::history).post(chat::send_message))
        .layer(ai_rate_limiter())
}

/// Image uploads arrive base64-encoded in JSON, so they get their own body
/// limit instead of axum's 2 MB default.
pub fn image_classifier_routes(max_body_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(image_classifier::history).post(image_classifier::classify),
        )
        .layer(ai_rate_limiter())
        .layer(DefaultBodyLimit::max(max_body_bytes))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{id}", delete(admin::delete_user))
        .route("/projects", get(admin::list_projects))
        .route("/projects/{id}", delete(admin::delete_project))
        .route("/testimonials", get(admin::list_testimonials))
        .route("/testimonials/{id}", delete(admin::delete_testimonial))
        .route("/contacts", get(admin::list_contacts))
        .route("/contacts/{id}", delete(admin::delete_contact))
}

/// Create all API routes.
pub fn routes(max_image_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(health::banner))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::ready))
        .nest("/api/auth", auth_routes())
        .nest("/api/projects", project_routes())
        .nest("/api/testimonials", testimonial_routes())
        .nest("/api/contact", contact_routes())
        .nest("/api/chat", chat_routes())
        .nest(
            "/api/image-classifier",
            image_classifier_routes(max_image_bytes),
        )
        .nest("/api/admin", admin_routes())
}
