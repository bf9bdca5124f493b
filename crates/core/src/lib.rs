//! Folio Core - Shared types library.
//!
//! This crate provides the domain types shared by the portfolio components:
//! - `server` - The public JSON API (auth, content, AI proxy routes)
//! - `cli` - Command-line tools for migrations and user management
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP clients. Database encoding is opt-in via the `postgres`
//! feature.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, validated emails and usernames, user roles, and
//!   inline image payloads

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
