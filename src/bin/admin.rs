//! CLI administration tool for yacut.
//!
//! Creates and resolves short links and checks the database without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Register a link (prompts for the URL when omitted)
//! cargo run --bin admin -- link create https://example.com --custom promo
//!
//! # Show the target of a short code
//! cargo run --bin admin -- link resolve promo
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*` components) and `BASE_URL`.
//! Pending migrations are applied on startup, so a fresh database works.

use yacut::application::services::RegistrationService;
use yacut::config::{self, mask_connection_string};
use yacut::infrastructure::persistence::PgMappingRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing yacut.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// Register a target URL under a custom or generated code
    Create {
        /// Target URL (prompted for when omitted)
        url: Option<String>,

        /// Custom short code
        #[arg(short, long)]
        custom: Option<String>,
    },

    /// Show the target URL of a short code
    Resolve {
        code: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and count mappings
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let pool = PgPool::connect(&config.database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to {}",
                mask_connection_string(&config.database_url)
            )
        })?;
    yacut::server::run_migrations(&pool).await?;

    let repository = Arc::new(PgMappingRepository::new(Arc::new(pool)));
    let service = RegistrationService::new(repository, &config.base_url);

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &service).await?,
        Commands::Db { action } => handle_db_action(action, &service).await?,
    }

    Ok(())
}

async fn handle_link_action(
    action: LinkAction,
    service: &RegistrationService<PgMappingRepository>,
) -> Result<()> {
    match action {
        LinkAction::Create { url, custom } => create_link(service, url, custom).await,
        LinkAction::Resolve { code } => resolve_link(service, &code).await,
    }
}

/// Registers a link, prompting for the URL if it was not given.
async fn create_link(
    service: &RegistrationService<PgMappingRepository>,
    url: Option<String>,
    custom: Option<String>,
) -> Result<()> {
    println!("{}", "Create short link".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Target URL")
            .with_initial_text("https://")
            .interact_text()?,
    };

    let mapping = service
        .register(url.trim(), custom.as_deref())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("  Target: {}", mapping.original.cyan());
    println!("  Code:   {}", mapping.short.bright_white());
    println!(
        "  Link:   {}",
        service.short_link(&mapping.short).bright_yellow().bold()
    );
    println!();
    println!("{}", "Link created successfully!".green().bold());

    Ok(())
}

async fn resolve_link(service: &RegistrationService<PgMappingRepository>, code: &str) -> Result<()> {
    let mapping = service
        .resolve(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    match mapping {
        Some(m) => {
            println!("  {} -> {}", code.bright_white(), m.original.cyan());
            println!(
                "  Created: {}",
                m.created_at
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .bright_black()
            );
        }
        None => {
            println!("{}", format!("Short code '{code}' not found").yellow());
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(
    action: DbAction,
    service: &RegistrationService<PgMappingRepository>,
) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            let count = service
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            println!("{}", "Database connection OK".green().bold());
            println!(
                "  Mappings: {}",
                count.to_string().bright_green().bold()
            );
        }
    }

    Ok(())
}
