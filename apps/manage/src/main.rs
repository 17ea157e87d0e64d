//! Scribe management CLI - seeds users, posts and comments.

mod commands;
mod sample;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use scribe_infra::database::{DatabaseConfig, connect};

use commands::Backend;

#[derive(Parser)]
#[command(name = "manage")]
#[command(about = "Scribe blog administration commands", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the `admin` superuser
    CreateAdmin {
        /// Password for the admin account
        #[arg(long, default_value = "1234")]
        password: String,
    },

    /// Generate random users
    CreateUsers {
        /// Number of users to create
        #[arg(short, long, default_value = "10")]
        count: u32,
    },

    /// Generate sample posts by existing users
    CreateSamplePosts {
        /// Number of posts to create
        count: u32,
    },

    /// Generate sample comments on existing posts
    CreateSampleComments {
        /// Number of comments to create
        count: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let conn = connect(&DatabaseConfig {
        url: cli.database_url,
        max_connections: 5,
        min_connections: 1,
    })
    .await
    .context("failed to connect to the database")?;
    let backend = Backend::postgres(Arc::new(conn));

    match cli.command {
        Commands::CreateAdmin { password } => backend.create_admin(&password).await,
        Commands::CreateUsers { count } => backend.create_users(count).await,
        Commands::CreateSamplePosts { count } => backend.create_sample_posts(count).await,
        Commands::CreateSampleComments { count } => backend.create_sample_comments(count).await,
    }
}
