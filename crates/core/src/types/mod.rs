//! Core types for the portfolio API.
//!
//! This module provides validated wrappers for the domain concepts that
//! cross crate boundaries.

pub mod email;
pub mod id;
pub mod image;
pub mod role;
pub mod username;

pub use email::{Email, EmailError};
pub use id::*;
pub use image::{ImageError, ImageFormat, InlineImage};
pub use role::UserRole;
pub use username::{Username, UsernameError};
