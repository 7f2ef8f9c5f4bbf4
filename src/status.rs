// ABOUTME: Status reporting for applied and pending migrations
// ABOUTME: Splits the scanned files around the marker and renders them

use std::path::Path;

use chrono::NaiveDateTime;
use console::style;

use crate::migrations::{sort_files, MigrationFile};

/// Partition of the known migration files around the sync marker.
///
/// Files stamped at or before the marker are applied; later ones are
/// pending. With no marker stored yet, everything is pending.
#[derive(Debug)]
pub struct StatusReport {
    pub applied: Vec<MigrationFile>,
    pub pending: Vec<MigrationFile>,
}

impl StatusReport {
    pub fn new(marker: Option<NaiveDateTime>, mut files: Vec<MigrationFile>) -> Self {
        sort_files(&mut files);
        let split = match marker {
            Some(m) => files.partition_point(|f| f.timestamp <= m),
            None => 0,
        };
        let pending = files.split_off(split);
        Self {
            applied: files,
            pending,
        }
    }

    pub fn is_up_to_date(&self) -> bool {
        self.pending.is_empty()
    }

    /// Print the report.
    ///
    /// Applied files show in green, pending in red. Without `show_all`
    /// only the most recent applied file prints, as a reference point
    /// for where the pending ones start.
    pub fn print(&self, dir: &Path, show_all: bool) {
        let applied_shown = if show_all {
            &self.applied[..]
        } else {
            &self.applied[self.applied.len().saturating_sub(1)..]
        };

        for m in applied_shown {
            println!("{}", style(format!("{}/{}", dir.display(), m.filename)).green());
        }
        for m in &self.pending {
            println!("{}", style(format!("{}/{}", dir.display(), m.filename)).red());
        }

        if self.is_up_to_date() {
            println!("Migrations are up to date!");
        }
    }
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
    fn test_partition_around_marker() {
        let files = vec![
            file("240301-0000-c.sql"),
            file("240101-0000-a.sql"),
            file("240201-0000-b.sql"),
        ];
        let report = StatusReport::new(Some(ts("2024-02-15 00:00:00")), files);
        let applied: Vec<_> = report.applied.iter().map(|f| f.filename.as_str()).collect();
        let pending: Vec<_> = report.pending.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(applied, ["240101-0000-a.sql", "240201-0000-b.sql"]);
        assert_eq!(pending, ["240301-0000-c.sql"]);
    }

    #[test]
    fn test_file_at_marker_counts_as_applied() {
        let report = StatusReport::new(
            Some(ts("2024-02-01 09:30:00")),
            vec![file("240201-0930-add.sql")],
        );
        assert_eq!(report.applied.len(), 1);
        assert!(report.is_up_to_date());
    }

    #[test]
    fn test_no_marker_means_everything_pending() {
        let report = StatusReport::new(None, vec![file("240101-0000-a.sql")]);
        assert!(report.applied.is_empty());
        assert_eq!(report.pending.len(), 1);
        assert!(!report.is_up_to_date());
    }

    #[test]
    fn test_empty_directory_is_up_to_date() {
        let report = StatusReport::new(Some(ts("2024-01-01 00:00:00")), Vec::new());
        assert!(report.is_up_to_date());
        assert!(report.applied.is_empty());
    }

    #[test]
    fn test_classification_is_idempotent() {
        let files = || vec![file("240101-0000-a.sql"), file("240301-0000-c.sql")];
        let marker = Some(ts("2024-02-01 00:00:00"));
        let first = StatusReport::new(marker, files());
        let second = StatusReport::new(marker, files());
        assert_eq!(first.applied, second.applied);
        assert_eq!(first.pending, second.pending);
    }
}
