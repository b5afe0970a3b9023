use crate::error::Result;
use sqlx::{
    Pool, Sqlite,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::{str::FromStr, time::Duration};
use tracing::{debug, trace};

/// Tuning knobs for the connection pool behind a [Database]
#[derive(Clone, Debug, PartialEq)]
pub struct PoolOptions {
    /// The maximum number of connections the pool will keep open
    pub max_connections: u32,
    /// How long to wait for a free connection before giving up
    pub acquire_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

/// An object that represents a connection to the locations database
#[derive(Clone, Debug)]
pub struct Database(Pool<Sqlite>);

impl From<Pool<Sqlite>> for Database {
    /// **WARNING**: This is primarily intended for tests. You should probably
    /// use [Database::open()] instead of creating the pool yourself, since
    /// [Database::open()] will perform database schema migration automatically.
    fn from(value: Pool<Sqlite>) -> Self {
        Self(value)
    }
}

impl Database {
    /// Open a connection to the database at the given connection string. Both
    /// `sqlite://path/to/file.sqlite` and a plain file path are accepted, and the
    /// file is created if it doesn't exist yet. This will also perform any
    /// necessary sql migrations to ensure that the database is up to date with the
    /// latest schema changes.
    pub async fn open(url: &str, options: &PoolOptions) -> Result<Self> {
        debug!(url, ?options, "Opening database");
        let connect = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let dbpool = SqlitePoolOptions::new()
            .max_connections(options.max_connections)
            .acquire_timeout(options.acquire_timeout)
            .connect_with(connect)
            .await?;
        trace!("Running database migrations");
        sqlx::migrate!("../db/migrations").run(&dbpool).await?;
        Ok(Database(dbpool))
    }

    /// gets a reference to the underlying sqlx connection pool
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.0
    }

    /// Close all connections in the pool
    pub async fn close(&self) {
        self.0.close().await
    }
}
