//! Business logic services.
//!
//! - `auth` - registration and password login
//! - `token` - signing and verifying bearer tokens

pub mod auth;
pub mod token;

pub use auth::{AuthError, AuthService};
pub use token::{Claims, TokenError, TokenKeys};
