//! Portfolio CLI - database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! folio migrate
//!
//! # Create an admin account
//! folio admin create -u owner -e owner@example.com -p 'correct horse'
//!
//! # Promote an existing account to admin
//! folio admin promote -e owner@example.com
//!
//! # Load sample projects
//! folio seed projects --file crates/cli/seed/projects.yaml
//! ```
//!
//! All commands read `PORTFOLIO_DATABASE_URL` (or `DATABASE_URL`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "Portfolio API CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Load sample data
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin account
    Create {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        email: String,

        /// At least 6 characters
        #[arg(short, long)]
        password: String,
    },
    /// Give an existing account the admin role
    Promote {
        #[arg(short, long)]
        email: String,
    },
    /// Take the admin role away from an account
    Demote {
        #[arg(short, long)]
        email: String,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Insert projects from a YAML file
    Projects {
        #[arg(short, long, default_value = "crates/cli/seed/projects.yaml")]
        file: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create {
                username,
                email,
                password,
            } => {
                commands::admin::create_user(&username, &email, &password).await?;
            }
            AdminAction::Promote { email } => commands::admin::promote(&email).await?,
            AdminAction::Demote { email } => commands::admin::demote(&email).await?,
        },
        Commands::Seed { target } => match target {
            SeedTarget::Projects { file } => commands::seed::projects(&file).await?,
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_admin_create() {
        let cli = Cli::try_parse_from([
            "folio", "admin", "create", "-u", "owner", "-e", "o@example.com", "-p", "secret1",
        ])
        .map_err(|e| e.to_string());
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Admin {
                action: AdminAction::Create { .. }
            })
        ));
    }
}
