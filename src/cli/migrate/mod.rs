//! Migrate command - manages the PostgreSQL schema

use anyhow::{bail, Context};
use clap::Args;
use tracing::info;

use crate::infrastructure::storage::{Migrator, PostgresMigrator, StorageConfig};

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Revert the most recently applied migration instead of applying
    #[arg(long)]
    pub revert: bool,

    /// Only print the current schema version
    #[arg(long, conflicts_with = "revert")]
    pub status: bool,
}

pub async fn run(args: MigrateArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let storage_config = config
        .storage
        .to_storage_config()
        .map_err(anyhow::Error::msg)?;

    let StorageConfig::Postgres(pg_config) = storage_config else {
        bail!("Migrations require the postgres storage backend (storage.backend = \"postgres\")");
    };

    let pool = pg_config
        .connect()
        .await
        .context("Failed to connect to PostgreSQL")?;
    let migrator = PostgresMigrator::new(pool);

    if args.status {
        match migrator.version().await? {
            Some(version) => info!(version, "Current schema version"),
            None => info!("No migrations applied"),
        }
    } else if args.revert {
        match migrator.revert().await? {
            Some(version) => info!(version, "Reverted migration"),
            None => info!("Nothing to revert"),
        }
    } else {
        let applied = migrator.run().await?;
        info!(applied, "Migrations complete");
    }

    Ok(())
}
