//! CLI administration tool for url-sh.
//!
//! Provides commands for viewing statistics, inspecting short URLs and
//! performing database operations without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Inspect a short URL
//! cargo run --bin admin -- link show 47DEQpj8
//!
//! # Generate a code without storing it
//! cargo run --bin admin -- generate --method hash --url https://example.com
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required for database commands): PostgreSQL connection string
//! - `BASE_URL` (optional): default base for `generate`

use url_sh::application::services::{AnalyticsService, ShortenerService};
use url_sh::infrastructure::persistence::{PgAccessLogRepository, PgShortUrlRepository};
use url_sh::utils::code_generator::ShortenerRequest;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing url-sh.
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
    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Short URL inspection
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Generate a short code without storing it
    Generate {
        /// Shortening method: custom, random, hash or secure
        #[arg(short, long, default_value = "random")]
        method: String,

        /// Original URL
        #[arg(short, long)]
        url: String,

        /// Alias for the custom method
        #[arg(short, long)]
        alias: Option<String>,

        /// Base URL (defaults to BASE_URL or http://localhost:8090)
        #[arg(short, long)]
        base: Option<String>,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

/// Short URL subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Show a short URL with its analytics
    Show {
        /// Short code
        code: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            method,
            url,
            alias,
            base,
        } => handle_generate(&method, url, alias, base)?,
        Commands::Stats => handle_stats(&connect().await?).await?,
        Commands::Db { action } => handle_db_action(action, &connect().await?).await?,
        Commands::Link { action } => handle_link_action(action, &connect().await?).await?,
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

/// Displays system statistics.
///
/// Shows:
/// - Total number of short URLs
/// - Total number of recorded accesses
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let pool = Arc::new(pool.clone());
    let shortener = ShortenerService::new(Arc::new(PgShortUrlRepository::new(pool.clone())), "");
    let analytics = AnalyticsService::new(Arc::new(PgAccessLogRepository::new(pool)));

    let links_count = shortener
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;
    let accesses_count = analytics
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    println!(
        "  Short URLs: {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Accesses:   {}",
        accesses_count.to_string().bright_green().bold()
    );
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

            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}

/// Handles short URL inspection commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool) -> Result<()> {
    let pool = Arc::new(pool.clone());

    match action {
        LinkAction::Show { code } => {
            let shortener =
                ShortenerService::new(Arc::new(PgShortUrlRepository::new(pool.clone())), "");
            let analytics = AnalyticsService::new(Arc::new(PgAccessLogRepository::new(pool)));

            let short_url = shortener
                .get_by_code(&code)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            println!("{}", "🔗 Short URL".bright_blue().bold());
            println!();
            println!("  Code:      {}", short_url.short_code.cyan());
            println!("  Short URL: {}", short_url.short_url.bright_white());
            println!("  Target:    {}", short_url.original_url);
            println!("  Method:    {}", short_url.method);
            println!(
                "  Redirects: {}",
                short_url.redirect_count.to_string().bright_green().bold()
            );
            println!("  Created:   {}", short_url.created_at);

            match short_url.expires_at {
                Some(expires_at) if short_url.is_expired() => {
                    println!("  Expires:   {}", format!("{expires_at} (expired)").red())
                }
                Some(expires_at) => println!("  Expires:   {expires_at}"),
                None => println!("  Expires:   {}", "never".bright_black()),
            }

            let ips = analytics
                .unique_ips(&code)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;
            println!("  Unique IPs: {}", ips.len().to_string().bright_white());

            let agents = analytics
                .top_user_agents(&code, None)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

            if !agents.is_empty() {
                println!();
                println!("  {}", "Top user agents:".bold());
                for agent in agents {
                    println!(
                        "    {:>6}  {}",
                        agent.count.to_string().bright_green(),
                        agent.user_agent
                    );
                }
            }
            println!();
        }
    }

    Ok(())
}

/// Runs the code generator locally and prints the result.
fn handle_generate(
    method: &str,
    url: String,
    alias: Option<String>,
    base: Option<String>,
) -> Result<()> {
    let base_url = base
        .or_else(|| std::env::var("BASE_URL").ok())
        .unwrap_or_else(|| "http://localhost:8090".to_string());

    let result = ShortenerRequest::parse(url, method, alias, base_url)
        .and_then(ShortenerRequest::generate)
        .map_err(|e| anyhow::anyhow!("Generation failed: {}", e))?;

    println!("{}", "✨ Generated".green().bold());
    println!();
    println!("  Code:      {}", result.short_code.cyan());
    println!("  Short URL: {}", result.short_url.bright_white());
    println!();
    println!(
        "{}",
        "Nothing was stored; use POST /v1/shorten to persist a short URL.".bright_black()
    );

    Ok(())
}
