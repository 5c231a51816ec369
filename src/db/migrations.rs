// src/db/migrations.rs
//
// Database schema initialization and migrations
//
// PRINCIPLES:
// - Explicit schema versions
// - No automatic migrations
// - Idempotent operations

use rusqlite::Connection;
use crate::error::{AppError, AppResult};

/// Current schema version
/// Increment this when adding migrations
const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
///
/// Safe to call multiple times (idempotent).
pub fn initialize_database(conn: &Connection) -> AppResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        apply_initial_schema(conn)?;
        set_schema_version(conn, CURRENT_SCHEMA_VERSION)?;
        log::debug!("Applied schema version {}", CURRENT_SCHEMA_VERSION);
    } else if current_version < CURRENT_SCHEMA_VERSION {
        return Err(AppError::Other(
            format!("Schema version {} is outdated. Expected {}. Manual migration required.",
                current_version, CURRENT_SCHEMA_VERSION)
        ));
    } else if current_version > CURRENT_SCHEMA_VERSION {
        return Err(AppError::Other(
            format!("Schema version {} is newer than supported {}. Update the application.",
                current_version, CURRENT_SCHEMA_VERSION)
        ));
    }

    Ok(())
}

/// Returns 0 if schema_version table doesn't exist (fresh database)
fn get_schema_version(conn: &Connection) -> AppResult<i32> {
    let table_exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !table_exists {
        return Ok(0);
    }

    let version: Option<i32> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;

    Ok(version.unwrap_or(0))
}

fn set_schema_version(conn: &Connection, version: i32) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

fn apply_initial_schema(conn: &Connection) -> AppResult<()> {
    let schema = include_str!("../../schema.sql");

    conn.execute_batch(schema)
        .map_err(|e| AppError::Other(format!("Failed to apply initial schema: {}", e)))
}

/// Runs SQLite's integrity check
pub fn verify_database_integrity(conn: &Connection) -> AppResult<()> {
    let result: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

    if result != "ok" {
        return Err(AppError::Other(format!("Database integrity check failed: {}", result)));
    }

    Ok(())
}
