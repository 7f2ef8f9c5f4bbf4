// ABOUTME: First-time setup: migrations directory, marker table, initial sync
// ABOUTME: Pre-existing migration files are applied as part of init

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::commands::sync;
use crate::config::DbConfig;
use crate::db::Database;
use crate::marker::MarkerStore;

/// Set up the database for syncing migrations.
///
/// Creates the migrations directory when missing, creates the
/// `last_migration` table, then runs a full sync so any files already
/// in the directory are applied and the initial marker is written.
pub async fn init(config: &DbConfig, dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        info!("created migrations directory {}", dir.display());
    }

    let mut db = Database::connect(config).await?;
    MarkerStore::new(db.client())
        .create_table()
        .await
        .context("Failed to create the last_migration table (already initialized?)")?;
    sync::run(&mut db, dir).await?;
    db.close().await;
    Ok(())
}
