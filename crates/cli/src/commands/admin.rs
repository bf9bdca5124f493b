//! Admin account management.
//!
//! The HTTP API never lets a caller pick their own role, so the first
//! admin has to be created (or promoted) from here.

use folio_core::UserRole;
use folio_server::services::AuthService;

/// Create a new account with the admin role.
///
/// Goes through the same username, email and password rules as
/// `POST /api/auth/register`.
///
/// # Errors
///
/// Returns an error if validation fails, the username or email is taken,
/// or the database is unreachable.
#[allow(clippy::print_stdout)]
pub async fn create_user(
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    let auth = AuthService::new(&pool);

    let user = auth
        .register_with_role(username, email, password, UserRole::Admin)
        .await?;

    tracing::info!(user_id = %user.id, email = %user.email, "Admin user created");
    println!("Created admin {} <{}> (id {})", user.username, user.email, user.id);
    Ok(())
}

/// Give an existing account the admin role.
///
/// # Errors
///
/// Returns an error if no account has this email.
pub async fn promote(email: &str) -> Result<(), Box<dyn std::error::Error>> {
    set_role(email, UserRole::Admin).await
}

/// Reset an account back to the user role.
///
/// # Errors
///
/// Returns an error if no account has this email.
pub async fn demote(email: &str) -> Result<(), Box<dyn std::error::Error>> {
    set_role(email, UserRole::User).await
}

#[allow(clippy::print_stdout)]
async fn set_role(email: &str, role: UserRole) -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    let user = AuthService::new(&pool).set_role(email, role).await?;

    tracing::info!(user_id = %user.id, role = %role, "Role updated");
    println!("{} <{}> is now {role}", user.username, user.email);
    Ok(())
}
