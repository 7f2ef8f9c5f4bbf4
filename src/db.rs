// ABOUTME: Database handle owning a tokio-postgres client and its connection task
// ABOUTME: Acquired once per command and released on every exit path

use postgres_native_tls::MakeTlsConnector;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, Transaction};
use tracing::debug;

use crate::config::DbConfig;
use crate::error::{MigrateError, Result};

/// A live connection to the target database.
///
/// The client and its background connection task are owned together, so
/// dropping the handle (on the error path) tears both down; the happy
/// path calls [`Database::close`] to let the task drain first.
pub struct Database {
    client: Client,
    connection: JoinHandle<()>,
}

impl Database {
    /// Connect using the resolved settings.
    ///
    /// Server certificates are not verified; the host named in DB_HOST
    /// is trusted as-is.
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        let connector = native_tls::TlsConnector::builder()
            .danger_accept_invalid_certs(true)
            .build()?;
        let tls = MakeTlsConnector::new(connector);

        let mut pg = tokio_postgres::Config::new();
        pg.user(&config.user)
            .password(&config.password)
            .dbname(&config.dbname)
            .host(&config.host);

        let (client, connection) = pg.connect(tls).await.map_err(MigrateError::Connection)?;

        let connection = tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("database connection error: {}", e);
            }
        });
        debug!("connected to {} as {}", config.host, config.user);

        Ok(Self { client, connection })
    }

    /// The underlying client, for read-only statements.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Open a transaction; statements issued through it commit or roll
    /// back as one unit.
    pub async fn transaction(&mut self) -> Result<Transaction<'_>> {
        self.client
            .transaction()
            .await
            .map_err(MigrateError::Execution)
    }

    /// Close the connection and wait for the background task to finish.
    pub async fn close(self) {
        drop(self.client);
        let _ = self.connection.await;
    }
}
