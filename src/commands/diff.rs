// ABOUTME: Computes and prints the pending migration script
// ABOUTME: The shared pending-set computation lives here; sync reuses it

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;

use crate::config::DbConfig;
use crate::db::Database;
use crate::marker::MarkerStore;
use crate::migrations::{self, MigrationFile};

/// The pending set relative to the stored marker, with its concatenated
/// SQL ready to print or execute.
pub(crate) struct PendingSet {
    pub marker: Option<NaiveDateTime>,
    pub files: Vec<MigrationFile>,
    pub script: String,
}

/// Read the marker, scan the directory, and build the pending script.
pub(crate) async fn compute(db: &Database, dir: &Path) -> Result<PendingSet> {
    let marker = MarkerStore::new(db.client())
        .read()
        .await
        .context("Failed to read the sync marker (did you run `migrate init`?)")?
        .map(|m| m.synced_at);

    let files = migrations::scan(dir).context("Failed to scan the migrations directory")?;
    let files = migrations::compute_pending(marker, files);
    let script = migrations::build_script(dir, &files)
        .context("Failed to read pending migration files")?;

    Ok(PendingSet {
        marker,
        files,
        script,
    })
}

/// Print the SQL that `sync` would execute, without touching anything.
pub async fn diff(config: &DbConfig, dir: &Path) -> Result<()> {
    let db = Database::connect(config).await?;
    let pending = compute(&db, dir).await?;
    println!("{}", pending.script);
    db.close().await;
    Ok(())
}
