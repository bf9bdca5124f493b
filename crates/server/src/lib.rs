//! Portfolio API server.
//!
//! JSON API behind the portfolio site: accounts and bearer tokens, projects,
//! testimonials, the contact form, and two Gemini-backed routes (chat and
//! image classification). Exposed as a library so the binary, the CLI and
//! the tests share one router.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod gemini;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use app::build_router;
