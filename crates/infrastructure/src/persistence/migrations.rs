//! Database migrations
//!
//! Manages schema versioning. The current version is kept in a single-row
//! `schema_version` table and each pending `migrate_vN` step is applied in
//! order at startup.
//!
//! ## Adding New Migrations
//!
//! 1. Increment `SCHEMA_VERSION`
//! 2. Add a new `migrate_vX` function
//! 3. Call it from `run_migrations`

use rusqlite::Connection;
use tracing::{debug, error, info};

use super::connection::DatabaseError;

/// Current schema version
const SCHEMA_VERSION: i32 = 2;

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let current_version = get_schema_version(conn)?;

    if current_version >= SCHEMA_VERSION {
        debug!(version = current_version, "Database schema is up to date");
        return Ok(());
    }

    info!(
        from_version = current_version,
        to_version = SCHEMA_VERSION,
        "Running database migrations"
    );

    let steps: [(i32, &str, fn(&Connection) -> Result<(), DatabaseError>); 2] = [
        (1, "base schema", migrate_v1),
        (2, "expert profile columns", migrate_v2),
    ];

    for (version, name, migrate) in steps {
        if current_version < version {
            if let Err(e) = migrate(conn) {
                error!(version, migration = name, error = %e, "Migration failed");
                return Err(e);
            }
            set_schema_version(conn, version)?;
        }
    }

    info!(version = SCHEMA_VERSION, "Database migrations complete");
    Ok(())
}

/// Get current schema version
fn get_schema_version(conn: &Connection) -> Result<i32, DatabaseError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        )",
        [],
    )?;

    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;

    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

/// Migration to version 1: experts, classifier, assignments and places
fn migrate_v1(conn: &Connection) -> Result<(), DatabaseError> {
    debug!("Applying migration V001: base schema");

    conn.execute_batch(
        "
        BEGIN;

        CREATE TABLE IF NOT EXISTS grnti_classifier (
            codrub INTEGER PRIMARY KEY,
            description TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS expert (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            region TEXT NOT NULL,
            city TEXT NOT NULL,
            input_date TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS expert_grnti (
            id INTEGER NOT NULL REFERENCES expert(id) ON DELETE CASCADE,
            rubric INTEGER NOT NULL REFERENCES grnti_classifier(codrub),
            subrubric INTEGER NOT NULL,
            discipline INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_expert_grnti_expert ON expert_grnti(id);
        CREATE INDEX IF NOT EXISTS idx_expert_grnti_rubric ON expert_grnti(rubric);

        CREATE TABLE IF NOT EXISTS reg_obl_city (
            region TEXT NOT NULL,
            oblname TEXT NOT NULL,
            city TEXT PRIMARY KEY
        );

        COMMIT;
        ",
    )?;

    Ok(())
}

/// Migration to version 2: optional keywords and group count on experts
fn migrate_v2(conn: &Connection) -> Result<(), DatabaseError> {
    debug!("Applying migration V002: expert profile columns");

    conn.execute_batch(
        "
        BEGIN;
        ALTER TABLE expert ADD COLUMN keywords TEXT;
        ALTER TABLE expert ADD COLUMN group_count INTEGER;
        COMMIT;
        ",
    )?;

    Ok(())
}
