//! Regulation database operations
//!
//! Applicability sets are stored as JSON arrays of wire strings and decoded
//! fail-open: a corrupt predicate means "no restriction", never a load
//! failure. See the codec notes in acms-common.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use acms_common::db::{decode_enum_set, encode_enum_set, Regulation};
use acms_common::types::SafetyCategory;
use acms_common::Result;

use crate::db::{parse_guid, parse_opt_enum};

fn from_row(row: &SqliteRow) -> Result<Regulation> {
    let guid: String = row.get("guid");
    let safety_category: String = row.get("safety_category");
    let applies_to_sizes: Option<String> = row.get("applies_to_sizes");
    let applies_to_types: Option<String> = row.get("applies_to_types");

    Ok(Regulation {
        guid: parse_guid(&guid)?,
        code: row.get("code"),
        title: row.get("title"),
        description: row.get("description"),
        safety_category: safety_category.parse()?,
        requirement_tier: parse_opt_enum(row.get("requirement_tier"))?,
        evaluation_mode: parse_opt_enum(row.get("evaluation_mode"))?,
        weight: row.get("weight"),
        authority_reference: row.get("authority_reference"),
        applies_to_sizes: decode_enum_set(applies_to_sizes.as_deref(), "applies_to_sizes"),
        applies_to_types: decode_enum_set(applies_to_types.as_deref(), "applies_to_types"),
        min_passengers: row.get("min_passengers"),
        requires_international: row.get::<i64, _>("requires_international") != 0,
        requires_cargo: row.get::<i64, _>("requires_cargo") != 0,
        requires_maintenance: row.get::<i64, _>("requires_maintenance") != 0,
        min_runways: row.get("min_runways"),
        min_aircraft_weight: row.get("min_aircraft_weight"),
        requirements: row.get("requirements"),
        expected_performance: row.get("expected_performance"),
    })
}

const SELECT_COLUMNS: &str = r#"
    SELECT guid, code, title, description, safety_category, requirement_tier,
           evaluation_mode, weight, authority_reference, applies_to_sizes,
           applies_to_types, min_passengers, requires_international,
           requires_cargo, requires_maintenance, min_runways,
           min_aircraft_weight, requirements, expected_performance
    FROM regulations
"#;

/// Insert a new regulation
pub async fn insert(pool: &SqlitePool, regulation: &Regulation) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO regulations (
            guid, code, title, description, safety_category, requirement_tier,
            evaluation_mode, weight, authority_reference, applies_to_sizes,
            applies_to_types, min_passengers, requires_international,
            requires_cargo, requires_maintenance, min_runways,
            min_aircraft_weight, requirements, expected_performance
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(regulation.guid.to_string())
    .bind(&regulation.code)
    .bind(&regulation.title)
    .bind(&regulation.description)
    .bind(regulation.safety_category.as_str())
    .bind(regulation.requirement_tier.map(|v| v.as_str()))
    .bind(regulation.evaluation_mode.map(|v| v.as_str()))
    .bind(regulation.weight)
    .bind(&regulation.authority_reference)
    .bind(encode_enum_set(regulation.applies_to_sizes.as_ref()))
    .bind(encode_enum_set(regulation.applies_to_types.as_ref()))
    .bind(regulation.min_passengers)
    .bind(regulation.requires_international as i64)
    .bind(regulation.requires_cargo as i64)
    .bind(regulation.requires_maintenance as i64)
    .bind(regulation.min_runways)
    .bind(regulation.min_aircraft_weight)
    .bind(&regulation.requirements)
    .bind(&regulation.expected_performance)
    .execute(pool)
    .await?;
    Ok(())
}

/// Load one regulation by id
pub async fn get(pool: &SqlitePool, guid: Uuid) -> Result<Option<Regulation>> {
    let row = sqlx::query(&format!("{} WHERE guid = ?", SELECT_COLUMNS))
        .bind(guid.to_string())
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(from_row).transpose()
}

/// Load one regulation by its unique code
pub async fn get_by_code(pool: &SqlitePool, code: &str) -> Result<Option<Regulation>> {
    let row = sqlx::query(&format!("{} WHERE code = ?", SELECT_COLUMNS))
        .bind(code)
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(from_row).transpose()
}

/// Every regulation, in code order (the matcher filters in memory; the
/// catalog is expected to stay in the low hundreds)
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Regulation>> {
    let rows = sqlx::query(&format!("{} ORDER BY code", SELECT_COLUMNS))
        .fetch_all(pool)
        .await?;
    rows.iter().map(from_row).collect()
}

/// List regulations, paged, optionally filtered by safety category
pub async fn list(
    pool: &SqlitePool,
    category: Option<SafetyCategory>,
    skip: i64,
    limit: i64,
) -> Result<Vec<Regulation>> {
    let rows = match category {
        Some(category) => {
            sqlx::query(&format!(
                "{} WHERE safety_category = ? ORDER BY code LIMIT ? OFFSET ?",
                SELECT_COLUMNS
            ))
            .bind(category.as_str())
            .bind(limit)
            .bind(skip)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query(&format!(
                "{} ORDER BY code LIMIT ? OFFSET ?",
                SELECT_COLUMNS
            ))
            .bind(limit)
            .bind(skip)
            .fetch_all(pool)
            .await?
        }
    };
    rows.iter().map(from_row).collect()
}

/// Total number of regulations in the catalog
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS n FROM regulations")
        .fetch_one(pool)
        .await?;
    Ok(row.get("n"))
}
