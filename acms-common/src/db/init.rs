//! Database initialization
//!
//! Opens (creating if necessary) the SQLite database and brings the schema
//! up to date. Safe to call on every startup: all schema statements are
//! idempotent and migrations track their own version.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys (needed for compliance-record cascade on airport delete)
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL mode allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create an in-memory database with the full schema, for tests
pub async fn init_memory_database() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;
    create_schema(&pool).await?;
    Ok(pool)
}

/// Create all tables (idempotent) and run migrations
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_schema_version_table(pool).await?;
    create_airports_table(pool).await?;
    create_regulations_table(pool).await?;
    create_compliance_records_table(pool).await?;

    crate::db::migrations::run_migrations(pool).await?;

    Ok(())
}

async fn create_schema_version_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_airports_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS airports (
            guid TEXT PRIMARY KEY,
            code TEXT UNIQUE NOT NULL,
            name TEXT NOT NULL,
            size TEXT,
            airport_type TEXT,
            usage_class TEXT,
            annual_passengers INTEGER,
            has_international_operations INTEGER NOT NULL DEFAULT 0,
            has_cargo_operations INTEGER NOT NULL DEFAULT 0,
            has_maintenance_facility INTEGER NOT NULL DEFAULT 0,
            number_of_runways INTEGER NOT NULL DEFAULT 1,
            max_aircraft_weight INTEGER,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_regulations_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS regulations (
            guid TEXT PRIMARY KEY,
            code TEXT UNIQUE NOT NULL,
            title TEXT NOT NULL,
            description TEXT,
            safety_category TEXT NOT NULL,
            requirement_tier TEXT,
            evaluation_mode TEXT,
            weight INTEGER,
            authority_reference TEXT,
            applies_to_sizes TEXT,
            applies_to_types TEXT,
            min_passengers INTEGER,
            requires_international INTEGER NOT NULL DEFAULT 0,
            requires_cargo INTEGER NOT NULL DEFAULT 0,
            requires_maintenance INTEGER NOT NULL DEFAULT 0,
            min_runways INTEGER,
            min_aircraft_weight INTEGER,
            requirements TEXT NOT NULL,
            expected_performance TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_compliance_records_table(pool: &SqlitePool) -> Result<()> {
    // UNIQUE(airport_id, regulation_id): concurrent compliance checks may
    // race on record creation; inserts use ON CONFLICT DO NOTHING and
    // re-select, so exactly one record survives per pair.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS compliance_records (
            guid TEXT PRIMARY KEY,
            airport_id TEXT NOT NULL REFERENCES airports(guid) ON DELETE CASCADE,
            regulation_id TEXT NOT NULL REFERENCES regulations(guid),
            status TEXT NOT NULL DEFAULT 'pending_review',
            notes TEXT,
            last_verified TEXT,
            verified_by TEXT,
            action_items TEXT,
            completed_items TEXT,
            item_due_dates TEXT,
            custom_fields TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE(airport_id, regulation_id)
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}
