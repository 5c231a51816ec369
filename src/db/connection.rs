// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Explicit connection pooling
// - No hidden connection creation
// - Clear error propagation

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Default database location: {APP_DATA}/bibliored/bibliored.db
pub fn get_database_path() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Other("Could not determine app data directory".to_string()))?;

    let bibliored_dir = app_data_dir.join("bibliored");
    std::fs::create_dir_all(&bibliored_dir)?;

    Ok(bibliored_dir.join("bibliored.db"))
}

/// Create a file-backed connection pool
///
/// - WAL journal so readers never block the single writer
/// - Busy timeout set to avoid immediate errors
pub fn create_connection_pool(db_path: &Path) -> AppResult<ConnectionPool> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let manager = SqliteConnectionManager::file(db_path).with_init(|conn| {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;",
        )?;
        Ok(())
    });

    Pool::builder()
        .max_size(4)
        .build(manager)
        .map_err(|e| AppError::Other(format!("Failed to create connection pool: {}", e)))
}

/// Single-connection in-memory pool.
///
/// Every in-memory SQLite connection is its own database, so the pool is
/// capped at one connection to keep the data visible across checkouts.
pub fn create_memory_pool() -> AppResult<ConnectionPool> {
    Pool::builder()
        .max_size(1)
        .build(SqliteConnectionManager::memory())
        .map_err(|e| AppError::Other(format!("Failed to create in-memory pool: {}", e)))
}

/// Get a connection from the pool with a readable error
pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get()
        .map_err(|e| AppError::Pool(format!("Failed to get database connection: {}", e)))
}

/// Standalone in-memory connection (for tests)
pub fn create_test_connection() -> AppResult<Connection> {
    Ok(Connection::open_in_memory()?)
}
