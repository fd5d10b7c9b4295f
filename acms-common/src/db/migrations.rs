//! Manual schema migrations
//!
//! Complex transformations that CREATE TABLE IF NOT EXISTS cannot express.
//! Each migration records its version in schema_version and is skipped on
//! subsequent startups.

use crate::Result;
use sqlx::{Row, SqlitePool};
use tracing::info;

/// Run all pending migrations in order
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    // Migration 1: custom_fields column on compliance_records.
    // Databases created before regulation-specific structured data was
    // supported lack this column.
    if !migration_applied(pool, 1).await? {
        if !column_exists(pool, "compliance_records", "custom_fields").await? {
            sqlx::query("ALTER TABLE compliance_records ADD COLUMN custom_fields TEXT")
                .execute(pool)
                .await?;
            info!("Migration 1: added compliance_records.custom_fields");
        }
        mark_applied(pool, 1).await?;
    }

    Ok(())
}

async fn migration_applied(pool: &SqlitePool, version: i64) -> Result<bool> {
    let row = sqlx::query("SELECT version FROM schema_version WHERE version = ?")
        .bind(version)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

async fn mark_applied(pool: &SqlitePool, version: i64) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO schema_version (version) VALUES (?)")
        .bind(version)
        .execute(pool)
        .await?;
    Ok(())
}

async fn column_exists(pool: &SqlitePool, table: &str, column: &str) -> Result<bool> {
    let rows = sqlx::query(&format!("PRAGMA table_info({})", table))
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().any(|row| {
        let name: String = row.get("name");
        name == column
    }))
}
