// ABOUTME: Prints the pending script and advances the marker without executing it
// ABOUTME: For databases whose migrations were applied out-of-band

use std::path::Path;

use anyhow::{Context, Result};

use crate::commands::{diff, sync};
use crate::config::DbConfig;
use crate::db::Database;
use crate::marker::MarkerStore;

/// Show the pending SQL and mark it as applied without running it.
pub async fn update_sync_date(config: &DbConfig, dir: &Path) -> Result<()> {
    let mut db = Database::connect(config).await?;
    let pending = diff::compute(&db, dir).await?;
    println!("{}", pending.script);

    let next = sync::next_marker(pending.marker, &pending.files);
    let tx = db.transaction().await?;
    MarkerStore::new(&tx).advance(next).await?;
    tx.commit().await.context("Failed to commit the marker update")?;
    println!("Sync date updated");

    db.close().await;
    Ok(())
}
