// ABOUTME: Marker store over the single-row last_migration table
// ABOUTME: Reads and advances the last-synced timestamp

use chrono::NaiveDateTime;
use tokio_postgres::{GenericClient, Row};

use crate::error::{MigrateError, Result};

/// The `last_migration` row: the timestamp of the last successful sync.
///
/// Migration files stamped at or before this point are considered
/// applied; anything later is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub synced_at: NaiveDateTime,
}

impl Marker {
    fn from_row(row: &Row) -> Self {
        Self {
            synced_at: row.get(0),
        }
    }
}

/// Store for the sync marker.
///
/// Generic over [`GenericClient`] so the same store works on a plain
/// client (`status`, `diff`) and inside the transaction that applies a
/// migration batch (`sync`).
pub struct MarkerStore<'a, C: GenericClient> {
    db: &'a C,
}

impl<'a, C: GenericClient> MarkerStore<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Create the backing table. Fails if it already exists.
    pub async fn create_table(&self) -> Result<()> {
        self.db
            .execute("CREATE TABLE last_migration (date TIMESTAMP NOT NULL)", &[])
            .await
            .map_err(MigrateError::Execution)?;
        Ok(())
    }

    /// Read the marker; `None` when the table is empty (fresh init).
    pub async fn read(&self) -> Result<Option<Marker>> {
        let row = self
            .db
            .query_opt(
                "SELECT date FROM last_migration ORDER BY date ASC LIMIT 1",
                &[],
            )
            .await
            .map_err(MigrateError::Execution)?;
        Ok(row.as_ref().map(Marker::from_row))
    }

    /// Overwrite the marker. The table keeps its single-row shape by
    /// deleting before the parameterized insert.
    pub async fn advance(&self, to: NaiveDateTime) -> Result<()> {
        self.db
            .execute("DELETE FROM last_migration", &[])
            .await
            .map_err(MigrateError::Execution)?;
        self.db
            .execute("INSERT INTO last_migration (date) VALUES ($1)", &[&to])
            .await
            .map_err(MigrateError::Execution)?;
        Ok(())
    }
}
