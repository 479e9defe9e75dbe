//! CLI administration tool for tinylink.
//!
//! Works directly on the configured database, without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create the mappings table (safe to repeat)
//! cargo run --bin tinylink-admin -- init
//!
//! # Shorten a URL
//! cargo run --bin tinylink-admin -- shorten https://example.com/page
//!
//! # Look up a token
//! cargo run --bin tinylink-admin -- resolve AbC123xy
//!
//! # Check database connection
//! cargo run --bin tinylink-admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL`, `BASE_URL`, `SAVE_MAX_ATTEMPTS`, ...

use tinylink::AppError;
use tinylink::config::{self, Config};
use tinylink::domain::repositories::MappingRepository;
use tinylink::server::{build_link_service, open_store};
use tinylink::telemetry;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for managing tinylink.
#[derive(Parser)]
#[command(name = "tinylink-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Create the mappings table if it does not exist
    Init,

    /// Create a short URL
    Shorten {
        /// The long URL to shorten
        url: String,
    },

    /// Print the URL a token redirects to
    Resolve {
        /// Short token
        token: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and show the number of stored links
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    telemetry::init("warn", &config.log_format)?;

    match cli.command {
        Commands::Init => handle_init(&config).await?,
        Commands::Shorten { url } => handle_shorten(&config, url).await?,
        Commands::Resolve { token } => handle_resolve(&config, token).await?,
        Commands::Db { action } => match action {
            DbAction::Check => handle_db_check(&config).await?,
        },
    }

    Ok(())
}

/// Ensures the schema exists. Opening the store already runs initialization.
async fn handle_init(config: &Config) -> Result<()> {
    open_store(config).await?;

    println!("{}", "✅ Mappings table ready".green().bold());
    println!("  Database: {}", config.database_url.cyan());

    Ok(())
}

/// Creates a mapping and prints the short URL.
async fn handle_shorten(config: &Config, url: String) -> Result<()> {
    let repository = open_store(config).await?;
    let service = build_link_service(config, repository);

    let mapping = service
        .shorten(&url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    println!("{}", "✨ Short link created".green().bold());
    println!("  Token:     {}", mapping.token.bright_yellow().bold());
    println!("  Target:    {}", mapping.target.cyan());
    println!(
        "  Short URL: {}",
        service.short_url(&mapping.token).bright_white().bold()
    );

    Ok(())
}

/// Prints the target of a token, failing if it is unknown.
async fn handle_resolve(config: &Config, token: String) -> Result<()> {
    let repository = open_store(config).await?;

    match repository.resolve(&token).await {
        Ok(target) => {
            println!("  {} -> {}", token.bright_yellow(), target.cyan());
            Ok(())
        }
        Err(AppError::NotFound { .. }) => {
            println!("{}", format!("❌ No link for token '{}'", token).red());
            anyhow::bail!("token not found")
        }
        Err(e) => Err(anyhow::anyhow!("Database error: {}", e)),
    }
}

/// Checks connectivity and reports the number of stored links.
async fn handle_db_check(config: &Config) -> Result<()> {
    println!("{}", "🔍 Checking database connection...".bright_blue());

    let repository = open_store(config).await?;

    repository
        .ping()
        .await
        .map_err(|e| anyhow::anyhow!("Database did not answer: {}", e))?;

    let count = repository
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;

    println!("{}", "✅ Database connection OK".green().bold());
    println!("  Database: {}", config.database_url.cyan());
    println!("  Links:    {}", count.to_string().bright_white().bold());

    Ok(())
}
