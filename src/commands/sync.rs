// ABOUTME: Applies pending migrations and advances the sync marker
// ABOUTME: The SQL batch and the marker update commit as one transaction

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::commands::diff;
use crate::config::DbConfig;
use crate::db::Database;
use crate::marker::MarkerStore;
use crate::migrations::MigrationFile;

/// Apply every migration created after the last sync.
pub async fn sync(config: &DbConfig, dir: &Path) -> Result<()> {
    let mut db = Database::connect(config).await?;
    run(&mut db, dir).await?;
    db.close().await;
    Ok(())
}

/// Sync against an already-open connection. `init` reuses this after
/// creating the marker table.
pub(crate) async fn run(db: &mut Database, dir: &Path) -> Result<()> {
    let pending = diff::compute(db, dir).await?;

    let tx = db.transaction().await?;
    if pending.script.is_empty() {
        info!("no pending migrations, advancing the marker only");
    } else {
        info!("applying {} pending migration(s)", pending.files.len());
        tx.batch_execute(&pending.script)
            .await
            .context("Failed to execute the pending migration batch")?;
    }
    MarkerStore::new(&tx)
        .advance(next_marker(pending.marker, &pending.files))
        .await?;
    tx.commit()
        .await
        .context("Failed to commit the migration batch")?;

    println!("Migrations synced successfully!");
    Ok(())
}

/// The marker only ever moves forward: to now, or past a hand-stamped
/// file dated in the future, and never behind its current value.
pub(crate) fn next_marker(
    current: Option<NaiveDateTime>,
    applied: &[MigrationFile],
) -> NaiveDateTime {
    next_marker_from(Local::now().naive_local(), current, applied)
}

fn next_marker_from(
    now: NaiveDateTime,
    current: Option<NaiveDateTime>,
    applied: &[MigrationFile],
) -> NaiveDateTime {
    let mut next = now;
    if let Some(last) = applied.last() {
        next = next.max(last.timestamp);
    }
    if let Some(current) = current {
        next = next.max(current);
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::parse_timestamp;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn file(name: &str) -> MigrationFile {
        MigrationFile {
            filename: name.to_string(),
            timestamp: parse_timestamp(name).unwrap(),
        }
    }

    #[test]
    fn test_next_marker_defaults_to_now() {
        let now = ts("2024-06-01 12:00:00");
        assert_eq!(
            next_marker_from(now, Some(ts("2024-01-01 00:00:00")), &[]),
            now
        );
    }

    #[test]
    fn test_next_marker_follows_future_stamped_file() {
        // A file stamped after the wall clock must not stay pending
        // forever once applied.
        let now = ts("2024-06-01 12:00:00");
        let applied = vec![file("680101-0000-future.sql")];
        assert_eq!(
            next_marker_from(now, None, &applied),
            ts("2068-01-01 00:00:00")
        );
    }

    #[test]
    fn test_next_marker_never_regresses() {
        let now = ts("2024-06-01 12:00:00");
        let current = Some(ts("2024-07-01 00:00:00"));
        assert_eq!(next_marker_from(now, current, &[]), current.unwrap());
    }
}
