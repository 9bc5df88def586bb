//! Database connection management
//!
//! Provides SQLite connection pooling via r2d2. The pool is the shared
//! connection context handed to every store.

use std::{path::Path, sync::Arc};

use application::ApplicationError;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use thiserror::Error;
use tokio::task;
use tracing::{debug, info};

use super::error::{map_join_error, map_store_error};
use crate::config::DatabaseConfig;

/// Database errors raised while opening or migrating the store
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// SQLite connection pool type alias
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Pooled connection type alias
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

const CONNECTION_PRAGMAS: &str = "
    PRAGMA foreign_keys = ON;
    PRAGMA busy_timeout = 0;
";

/// Create a new connection pool
///
/// Every connection has foreign keys enabled and no busy timeout, so a
/// locked database fails the statement at once. An in-memory database is
/// private to its connection, so `:memory:` should be paired with a pool
/// size of 1.
pub fn create_pool(config: &DatabaseConfig) -> Result<ConnectionPool, DatabaseError> {
    info!(path = %config.path, max_connections = config.max_connections, "Creating database connection pool");

    let manager = if config.path == ":memory:" {
        SqliteConnectionManager::memory()
    } else {
        if let Some(parent) = Path::new(&config.path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    DatabaseError::Migration(format!("Failed to create database directory: {e}"))
                })?;
            }
        }
        SqliteConnectionManager::file(&config.path)
    };
    let manager = manager.with_init(|conn| conn.execute_batch(CONNECTION_PRAGMAS));

    let pool = Pool::builder()
        .max_size(config.max_connections.max(1))
        .build(manager)?;

    if config.run_migrations {
        let conn = pool.get()?;
        super::migrations::run_migrations(&conn)?;
    }

    debug!("Database connection pool created successfully");
    Ok(pool)
}

/// Run blocking work against a pooled connection off the async runtime
///
/// The connection is returned to the pool when `work` finishes, whatever
/// its outcome. Driver errors are logged and surfaced as store errors.
pub(crate) async fn with_connection<T, F>(
    pool: &Arc<ConnectionPool>,
    work: F,
) -> Result<T, ApplicationError>
where
    T: Send + 'static,
    F: FnOnce(&mut PooledConn) -> Result<T, rusqlite::Error> + Send + 'static,
{
    let pool = Arc::clone(pool);

    task::spawn_blocking(move || {
        let mut conn = pool.get().map_err(map_store_error)?;
        work(&mut conn).map_err(map_store_error)
    })
    .await
    .map_err(map_join_error)?
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> DatabaseConfig {
        DatabaseConfig {
            path: ":memory:".to_string(),
            max_connections: 1,
            run_migrations: true,
        }
    }

    #[test]
    fn create_in_memory_pool() {
        let pool = create_pool(&memory_config());
        assert!(pool.is_ok());
    }

    #[test]
    fn foreign_keys_are_enabled() {
        let pool = create_pool(&memory_config()).unwrap();
        let conn = pool.get().unwrap();
        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn busy_timeout_is_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            path: dir.path().join("registry.db").to_string_lossy().into_owned(),
            max_connections: 1,
            run_migrations: false,
        };
        let pool = create_pool(&config).unwrap();
        let conn = pool.get().unwrap();
        let timeout: i64 = conn
            .query_row("PRAGMA busy_timeout", [], |row| row.get(0))
            .unwrap();
        assert_eq!(timeout, 0);
    }

    #[test]
    fn file_pool_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("registry.db");
        let config = DatabaseConfig {
            path: path.to_string_lossy().into_owned(),
            max_connections: 2,
            run_migrations: true,
        };

        assert!(create_pool(&config).is_ok());
        assert!(path.exists());
    }

    #[test]
    fn zero_pool_size_is_clamped() {
        let config = DatabaseConfig {
            max_connections: 0,
            ..memory_config()
        };
        let pool = create_pool(&config).unwrap();
        assert_eq!(pool.max_size(), 1);
    }

    #[tokio::test]
    async fn with_connection_maps_driver_errors() {
        let pool = Arc::new(create_pool(&memory_config()).unwrap());
        let err = with_connection(&pool, |conn| {
            conn.execute("INSERT INTO missing_table VALUES (1)", [])
        })
        .await
        .unwrap_err();

        assert!(matches!(err, ApplicationError::Store(msg) if msg.contains("missing_table")));
    }

    #[test]
    fn database_error_display() {
        let err = DatabaseError::Migration("boom".to_string());
        assert_eq!(err.to_string(), "Migration error: boom");
    }
}
