// ABOUTME: Lists applied and pending migrations relative to the marker
// ABOUTME: With --all, every applied file prints instead of just the latest

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::DbConfig;
use crate::db::Database;
use crate::marker::MarkerStore;
use crate::migrations;
use crate::status::StatusReport;

pub async fn status(config: &DbConfig, dir: &Path, show_all: bool) -> Result<()> {
    let db = Database::connect(config).await?;

    let marker = MarkerStore::new(db.client())
        .read()
        .await
        .context("Failed to read the sync marker (did you run `migrate init`?)")?
        .map(|m| m.synced_at);
    let files = migrations::scan(dir).context("Failed to scan the migrations directory")?;

    StatusReport::new(marker, files).print(dir, show_all);

    db.close().await;
    Ok(())
}
