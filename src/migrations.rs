// ABOUTME: Migration file scanning, timestamp parsing, and pending-set computation
// ABOUTME: Filenames carry a fixed-width yymmdd-HHMM prefix that orders the files

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use tracing::warn;

use crate::error::{MigrateError, Result};

/// Filename stamp layout, e.g. `240201-0930-add-users.sql`.
///
/// The same format drives both the `create` generator and the scanner's
/// parser; they must never diverge.
pub const FILE_STAMP_FORMAT: &str = "%y%m%d-%H%M";

/// Width of the rendered stamp (`yymmdd-HHMM`).
pub const FILE_STAMP_WIDTH: usize = 11;

/// A migration file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    pub filename: String,
    pub timestamp: NaiveDateTime,
}

/// Parse the fixed-width timestamp prefix of a migration filename.
pub fn parse_timestamp(filename: &str) -> Result<NaiveDateTime> {
    let prefix = filename.get(..FILE_STAMP_WIDTH).unwrap_or(filename);
    NaiveDateTime::parse_from_str(prefix, FILE_STAMP_FORMAT).map_err(|source| {
        MigrateError::Parse {
            filename: filename.to_string(),
            source,
        }
    })
}

/// Render the filename for a migration created at `now`.
pub fn generate_filename(now: NaiveDateTime, name: Option<&str>) -> String {
    let stamp = now.format(FILE_STAMP_FORMAT);
    match name {
        Some(n) if !n.is_empty() => format!("{}-{}.sql", stamp, n),
        _ => format!("{}.sql", stamp),
    }
}

/// Scan `dir` for migration files, in directory order.
///
/// Entries without a `.sql` extension are skipped with a warning; a
/// `.sql` file whose prefix does not parse aborts the whole scan.
/// Callers sort the result.
pub fn scan(dir: &Path) -> Result<Vec<MigrationFile>> {
    let entries = fs::read_dir(dir).map_err(|source| MigrateError::Filesystem {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| MigrateError::Filesystem {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("sql") || !path.is_file() {
            warn!("skipping non-migration entry {:?}", entry.file_name());
            continue;
        }
        let filename = entry.file_name().to_string_lossy().into_owned();
        let timestamp = parse_timestamp(&filename)?;
        files.push(MigrationFile {
            filename,
            timestamp,
        });
    }
    Ok(files)
}

fn by_stamp(a: &MigrationFile, b: &MigrationFile) -> Ordering {
    a.timestamp
        .cmp(&b.timestamp)
        .then_with(|| a.filename.cmp(&b.filename))
}

/// Sort ascending by timestamp, ties broken by filename so repeated
/// runs always see the same sequence.
pub fn sort_files(files: &mut [MigrationFile]) {
    files.sort_by(by_stamp);
}

/// Sort ascending and keep only files strictly newer than the marker.
///
/// A file stamped exactly at the marker counts as applied. A missing
/// marker means nothing has ever been synced and every file is pending.
pub fn compute_pending(
    marker: Option<NaiveDateTime>,
    mut files: Vec<MigrationFile>,
) -> Vec<MigrationFile> {
    sort_files(&mut files);
    match marker {
        Some(m) => files.into_iter().filter(|f| f.timestamp > m).collect(),
        None => files,
    }
}

/// Concatenate the pending files' SQL in order.
///
/// Contents are joined as-is: a file that does not end in a statement
/// delimiter will run together with the start of the next one.
pub fn build_script(dir: &Path, pending: &[MigrationFile]) -> Result<String> {
    let mut script = String::new();
    for migration in pending {
        let path = dir.join(&migration.filename);
        let sql = fs::read_to_string(&path).map_err(|source| MigrateError::Filesystem {
            path: path.clone(),
            source,
        })?;
        script.push_str(&sql);
    }
    Ok(script)
}
