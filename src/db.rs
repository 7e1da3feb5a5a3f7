//! Database connection helpers.
//!
//! Wraps the Diesel r2d2 pool for the SQLite file holding trainer records.
//! Every connection handed out by the pool is tuned for many concurrent
//! readers and an occasional registration write.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::define_sql_function;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection};
use diesel::sql_types::Text;
use diesel::sqlite::SqliteConnection;
use log::error;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

define_sql_function! {
    /// Lowercases with full Unicode case folding, unlike SQLite's `lower`.
    fn lower_unicode(value: Text) -> Text;
}

/// Makes `lower_unicode` callable on `conn`.
pub fn register_sql_functions(conn: &mut SqliteConnection) -> diesel::QueryResult<()> {
    lower_unicode_utils::register_impl(conn, |value: String| value.to_lowercase())
}

#[derive(Debug)]
/// Options that are applied each time a connection is acquired from the pool.
pub struct ConnectionOptions {
    /// Enable Write Ahead Logging mode for SQLite.
    pub enable_wal: bool,
    /// Enforce foreign key checks for SQLite.
    pub enable_foreign_keys: bool,
    /// Timeout to wait for a locked database.
    pub busy_timeout: Option<Duration>,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            enable_wal: true,
            enable_foreign_keys: true,
            busy_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl ConnectionOptions {
    fn pragmas(&self) -> String {
        let mut sql = String::new();
        // Set first so the remaining pragmas wait on a locked file.
        if let Some(timeout) = self.busy_timeout {
            sql.push_str(&format!("PRAGMA busy_timeout = {};", timeout.as_millis()));
        }
        if self.enable_wal {
            sql.push_str("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;");
        }
        if self.enable_foreign_keys {
            sql.push_str("PRAGMA foreign_keys = ON;");
        }
        sql
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        register_sql_functions(conn).map_err(diesel::r2d2::Error::QueryError)?;
        let pragmas = self.pragmas();
        if pragmas.is_empty() {
            return Ok(());
        }
        conn.batch_execute(&pragmas)
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a Diesel connection pool for the given database URL.
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, PoolError> {
    establish_connection_pool_with(database_url, ConnectionOptions::default())
}

/// Create a pool with explicit per-connection options.
pub fn establish_connection_pool_with(
    database_url: &str,
    options: ConnectionOptions,
) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(options))
        .build(manager)
}

/// Retrieve a connection from the pool
pub fn get_connection(pool: &DbPool) -> Result<DbConnection, PoolError> {
    pool.get().inspect_err(|e| {
        error!("Failed to get connection from pool: {e}");
    })
}
