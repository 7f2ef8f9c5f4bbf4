//! Error types for the migration tool.

use std::path::PathBuf;

/// Failures raised by the library layer, classified by kind.
///
/// Command handlers wrap these with `anyhow` context at each boundary;
/// the kinds exist so a bad filename can be told apart from a dead
/// database without matching on message strings.
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    /// Could not reach or authenticate against the database.
    #[error("database connection failed: {0}")]
    Connection(#[source] tokio_postgres::Error),

    /// TLS connector setup failed before a connection was attempted.
    #[error("TLS setup failed: {0}")]
    Tls(#[from] native_tls::Error),

    /// A migration filename does not carry a parsable timestamp prefix.
    #[error("cannot parse timestamp prefix of '{filename}': {source}")]
    Parse {
        filename: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Reading or writing the migrations directory failed.
    #[error("filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The database rejected a statement or batch.
    #[error("SQL execution failed: {0}")]
    Execution(#[source] tokio_postgres::Error),
}

/// Result type for library-layer operations.
pub type Result<T> = std::result::Result<T, MigrateError>;
