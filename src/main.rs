// ABOUTME: CLI entry point for migrate
// ABOUTME: Parses commands and routes to appropriate handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sql_migrate::commands;
use sql_migrate::config::DbOpts;

#[derive(Parser)]
#[command(name = "migrate")]
#[command(about = "Tracks and applies timestamped SQL schema migrations", long_about = None)]
#[command(version)]
struct Cli {
    /// Set the log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    log: String,

    /// Directory holding the .sql migration files
    #[arg(long, global = true, default_value = "migrations")]
    migrations_dir: PathBuf,

    #[command(flatten)]
    db: DbOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set up the database for syncing, then apply any existing migrations
    Init,
    /// Create a timestamped migration file
    Create {
        /// Name appended to the timestamp prefix
        name: Option<String>,
        /// Open the new file in the configured editor
        #[arg(short, long)]
        open: bool,
        /// Editor to open migrations with
        #[arg(long, env = "EDITOR", default_value = "vim")]
        editor: String,
    },
    /// List the last applied migration and the pending ones
    Status {
        /// Also list every already-applied migration
        #[arg(short, long)]
        all: bool,
    },
    /// Print the SQL that sync would apply, without executing it
    Diff,
    /// Apply migrations created after the last sync
    Sync,
    /// Print the pending SQL and advance the marker without executing it
    UpdateSyncDate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before clap runs so its env fallbacks see the values
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logging
    // 1. RUST_LOG environment variable has highest precedence
    // 2. --log flag is used if RUST_LOG is not set
    // 3. Default to "info" if neither are provided
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log.clone()));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Init => {
            let config = cli.db.resolve()?;
            commands::init(&config, &cli.migrations_dir).await
        }
        Commands::Create { name, open, editor } => {
            commands::create(&cli.migrations_dir, name.as_deref(), open, &editor)
        }
        Commands::Status { all } => {
            let config = cli.db.resolve()?;
            commands::status(&config, &cli.migrations_dir, all).await
        }
        Commands::Diff => {
            let config = cli.db.resolve()?;
            commands::diff(&config, &cli.migrations_dir).await
        }
        Commands::Sync => {
            let config = cli.db.resolve()?;
            commands::sync(&config, &cli.migrations_dir).await
        }
        Commands::UpdateSyncDate => {
            let config = cli.db.resolve()?;
            commands::update_sync_date(&config, &cli.migrations_dir).await
        }
    }
}
