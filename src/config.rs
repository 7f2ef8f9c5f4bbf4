// ABOUTME: Database connection settings sourced from flags and environment
// ABOUTME: Mirrors the DB_USER/DB_PASS/DB_NAME/DB_HOST variables from .env

use anyhow::{bail, Result};
use clap::Args;

/// Connection parameters for the target database.
///
/// Every field falls back to the environment, so a `.env` file is all a
/// project needs; the flags exist for one-off overrides.
#[derive(Args, Debug, Clone)]
pub struct DbOpts {
    /// Database user (falls back to DB_USER)
    #[arg(long, env = "DB_USER", global = true)]
    pub db_user: Option<String>,

    /// Database password (falls back to DB_PASS)
    #[arg(long, env = "DB_PASS", global = true, hide_env_values = true)]
    pub db_pass: Option<String>,

    /// Database name (falls back to DB_NAME)
    #[arg(long, env = "DB_NAME", global = true)]
    pub db_name: Option<String>,

    /// Database host (falls back to DB_HOST)
    #[arg(long, env = "DB_HOST", global = true)]
    pub db_host: Option<String>,
}

/// Fully resolved connection settings.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub user: String,
    pub password: String,
    pub dbname: String,
    pub host: String,
}

impl DbOpts {
    /// Resolve all parameters, failing with a setup hint when one is
    /// missing. Commands that never touch the database (`create`) skip
    /// this.
    pub fn resolve(&self) -> Result<DbConfig> {
        Ok(DbConfig {
            user: required(&self.db_user, "DB_USER", "--db-user")?,
            password: required(&self.db_pass, "DB_PASS", "--db-pass")?,
            dbname: required(&self.db_name, "DB_NAME", "--db-name")?,
            host: required(&self.db_host, "DB_HOST", "--db-host")?,
        })
    }
}

fn required(value: &Option<String>, env_var: &str, flag: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.clone()),
        _ => bail!(
            "{} is not set.\n\
             Provide it via the environment (a .env file works) or the {} flag.",
            env_var,
            flag
        ),
    }
}
