//! CLI administration tool for career-portal.
//!
//! Manages admin accounts, prints platform statistics and checks the
//! database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create an admin account (prompts for missing values)
//! cargo run --bin admin -- account create --email ops@example.com --super-admin
//!
//! # List accounts
//! cargo run --bin admin -- account list
//!
//! # Deactivate an account
//! cargo run --bin admin -- account deactivate ops@example.com
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use career_portal::application::services::{AuthService, NewAdmin, StatsService};
use career_portal::domain::entities::AdminRole;
use career_portal::infrastructure::persistence::PgDocumentRepository;
use career_portal::utils::session_token::TokenSigner;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing career-portal.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage admin accounts
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// Show platform statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum AccountAction {
    /// Create an admin account
    Create {
        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        name: Option<String>,

        /// Grant the super_admin role
        #[arg(long)]
        super_admin: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List admin accounts
    List,

    /// Deactivate an admin account
    Deactivate {
        email: String,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Account { action } => handle_account_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_account_action(action: AccountAction, pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;

    let repository = Arc::new(PgDocumentRepository::new(Arc::new(pool.clone())));
    // Account management never issues tokens; the secret only matters for login.
    let secret = std::env::var("TOKEN_SIGNING_SECRET").unwrap_or_default();
    let service = AuthService::new(
        repository,
        TokenSigner::new(secret.as_bytes(), chrono::Duration::hours(1)),
    );

    match action {
        AccountAction::Create {
            email,
            name,
            super_admin,
            yes,
        } => create_account(&service, email, name, super_admin, yes).await,
        AccountAction::List => list_accounts(&service).await,
        AccountAction::Deactivate { email } => deactivate_account(&service, email).await,
    }
}

/// Creates an admin account with interactive prompts for missing values.
async fn create_account(
    service: &AuthService<PgDocumentRepository>,
    email: Option<String>,
    name: Option<String>,
    super_admin: bool,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create Admin Account".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Name")
            .with_initial_text("Administrator")
            .interact_text()?,
    };
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .validate_with(|p: &String| -> Result<(), &str> {
            if p.len() >= 8 {
                Ok(())
            } else {
                Err("Password must be at least 8 characters")
            }
        })
        .interact()?;

    let role = if super_admin {
        AdminRole::SuperAdmin
    } else {
        AdminRole::Admin
    };

    println!();
    println!("{}", "Account details:".bright_white().bold());
    println!("  Email: {}", email.cyan());
    println!("  Name:  {}", name.cyan());
    println!("  Role:  {}", role.as_str().cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this account?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let admin = service
        .register(
            NewAdmin {
                email,
                password,
                name,
                role,
            },
            None,
        )
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create account: {}", e))?;

    println!();
    println!("{}", "✅ Account created successfully!".green().bold());
    println!("  ID: {}", admin.id.bright_black());
    println!();

    Ok(())
}

/// Lists admin accounts, oldest first.
///
/// ```text
/// 📋 Admin Accounts
///
///   Email                          Name                 Role         Status
///   ───────────────────────────────────────────────────────────────────────
///   root@example.com               Root                 super_admin  ACTIVE
/// ```
async fn list_accounts(service: &AuthService<PgDocumentRepository>) -> Result<()> {
    println!("{}", "📋 Admin Accounts".bright_blue().bold());
    println!();

    let admins = service
        .list_accounts()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list accounts: {}", e))?;

    if admins.is_empty() {
        println!("{}", "  No admin accounts found".yellow());
        println!();
        println!(
            "  Create one with: {} admin account create --super-admin",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<30} {:<20} {:<12} {:<10}",
        "Email".bright_white().bold(),
        "Name".bright_white().bold(),
        "Role".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for admin in &admins {
        let status = if admin.is_active {
            "ACTIVE".green()
        } else {
            "INACTIVE".red()
        };

        println!(
            "  {:<30} {:<20} {:<12} {}",
            admin.email.cyan(),
            admin.name,
            admin.role.as_str().bright_black(),
            status
        );
    }

    println!();
    println!("  Total: {}", admins.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn deactivate_account(
    service: &AuthService<PgDocumentRepository>,
    email: String,
) -> Result<()> {
    println!("{}", "🔒 Deactivate Admin Account".bright_blue().bold());
    println!();
    println!("  Email: {}", email.cyan());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Deactivate this account?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    service
        .deactivate(&email)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to deactivate account: {}", e))?;

    println!();
    println!("{}", "✅ Account deactivated".green().bold());
    println!();

    Ok(())
}

/// Displays the same totals as `GET /admin/stats`.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let repository = Arc::new(PgDocumentRepository::new(Arc::new(pool.clone())));
    let stats = StatsService::new(repository)
        .system_stats()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to compute statistics: {}", e))?;

    let rows = [
        ("Users", stats.total_users),
        ("Institutions", stats.total_institutions),
        ("Companies", stats.total_companies),
        ("  pending", stats.pending_companies),
        ("  approved", stats.active_companies),
        ("  suspended", stats.suspended_companies),
        ("Applications", stats.total_applications),
        ("  pending", stats.pending_applications),
        ("  approved", stats.approved_applications),
        ("  rejected", stats.rejected_applications),
    ];

    for (label, value) in rows {
        println!("  {:<15}{}", label, value.to_string().bright_green().bold());
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let documents: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Documents:  {}", documents.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
