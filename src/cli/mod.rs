//! CLI module for the Movie API
//!
//! - `serve`: run the HTTP server
//! - `migrate`: manage the PostgreSQL schema

pub mod migrate;
pub mod serve;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Movie API - movie catalogue with API key access control
#[derive(Parser)]
#[command(name = "movie-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Apply or revert database migrations
    Migrate(migrate::MigrateArgs),
}

/// Loads `.env`, the layered configuration and the log subscriber
fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init_logging(&config.logging)?;

    Ok(config)
}
