//! Airport database operations

use sqlx::{Row, SqlitePool};
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

use acms_common::db::Airport;
use acms_common::types::AirportSize;
use acms_common::Result;

use crate::db::{parse_guid, parse_opt_enum};

fn from_row(row: &SqliteRow) -> Result<Airport> {
    let guid: String = row.get("guid");
    Ok(Airport {
        guid: parse_guid(&guid)?,
        code: row.get("code"),
        name: row.get("name"),
        size: parse_opt_enum(row.get("size"))?,
        airport_type: parse_opt_enum(row.get("airport_type"))?,
        usage_class: parse_opt_enum(row.get("usage_class"))?,
        annual_passengers: row.get("annual_passengers"),
        has_international_operations: row.get::<i64, _>("has_international_operations") != 0,
        has_cargo_operations: row.get::<i64, _>("has_cargo_operations") != 0,
        has_maintenance_facility: row.get::<i64, _>("has_maintenance_facility") != 0,
        number_of_runways: row.get("number_of_runways"),
        max_aircraft_weight: row.get("max_aircraft_weight"),
    })
}

const SELECT_COLUMNS: &str = r#"
    SELECT guid, code, name, size, airport_type, usage_class, annual_passengers,
           has_international_operations, has_cargo_operations,
           has_maintenance_facility, number_of_runways, max_aircraft_weight
    FROM airports
"#;

/// Insert a new airport
pub async fn insert(pool: &SqlitePool, airport: &Airport) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO airports (
            guid, code, name, size, airport_type, usage_class,
            annual_passengers, has_international_operations,
            has_cargo_operations, has_maintenance_facility,
            number_of_runways, max_aircraft_weight
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(airport.guid.to_string())
    .bind(&airport.code)
    .bind(&airport.name)
    .bind(airport.size.map(|v| v.as_str()))
    .bind(airport.airport_type.map(|v| v.as_str()))
    .bind(airport.usage_class.map(|v| v.as_str()))
    .bind(airport.annual_passengers)
    .bind(airport.has_international_operations as i64)
    .bind(airport.has_cargo_operations as i64)
    .bind(airport.has_maintenance_facility as i64)
    .bind(airport.number_of_runways)
    .bind(airport.max_aircraft_weight)
    .execute(pool)
    .await?;
    Ok(())
}

/// Load one airport by id
pub async fn get(pool: &SqlitePool, guid: Uuid) -> Result<Option<Airport>> {
    let row = sqlx::query(&format!("{} WHERE guid = ?", SELECT_COLUMNS))
        .bind(guid.to_string())
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(from_row).transpose()
}

/// Load one airport by its unique code
pub async fn get_by_code(pool: &SqlitePool, code: &str) -> Result<Option<Airport>> {
    let row = sqlx::query(&format!("{} WHERE code = ?", SELECT_COLUMNS))
        .bind(code)
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(from_row).transpose()
}

/// List airports, paged
pub async fn list(pool: &SqlitePool, skip: i64, limit: i64) -> Result<Vec<Airport>> {
    let rows = sqlx::query(&format!(
        "{} ORDER BY code LIMIT ? OFFSET ?",
        SELECT_COLUMNS
    ))
    .bind(limit)
    .bind(skip)
    .fetch_all(pool)
    .await?;
    rows.iter().map(from_row).collect()
}

/// Update every mutable field of an airport
pub async fn update(pool: &SqlitePool, airport: &Airport) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE airports SET
            code = ?, name = ?, size = ?, airport_type = ?, usage_class = ?,
            annual_passengers = ?, has_international_operations = ?,
            has_cargo_operations = ?, has_maintenance_facility = ?,
            number_of_runways = ?, max_aircraft_weight = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE guid = ?
        "#,
    )
    .bind(&airport.code)
    .bind(&airport.name)
    .bind(airport.size.map(|v| v.as_str()))
    .bind(airport.airport_type.map(|v| v.as_str()))
    .bind(airport.usage_class.map(|v| v.as_str()))
    .bind(airport.annual_passengers)
    .bind(airport.has_international_operations as i64)
    .bind(airport.has_cargo_operations as i64)
    .bind(airport.has_maintenance_facility as i64)
    .bind(airport.number_of_runways)
    .bind(airport.max_aircraft_weight)
    .bind(airport.guid.to_string())
    .execute(pool)
    .await?;
    Ok(())
}

/// Write inferred classification attributes back onto the airport row
///
/// Invoked at most once per compliance check, and only for fields the
/// airport is missing; explicit values are never overwritten because the
/// inference output echoes them.
pub async fn persist_profile(
    pool: &SqlitePool,
    guid: Uuid,
    size: AirportSize,
    annual_passengers: i64,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE airports SET
            size = COALESCE(size, ?),
            annual_passengers = COALESCE(annual_passengers, ?),
            updated_at = CURRENT_TIMESTAMP
        WHERE guid = ?
        "#,
    )
    .bind(size.as_str())
    .bind(annual_passengers)
    .bind(guid.to_string())
    .execute(pool)
    .await?;
    Ok(())
}

/// Delete an airport; compliance records cascade at the schema level
pub async fn delete(pool: &SqlitePool, guid: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM airports WHERE guid = ?")
        .bind(guid.to_string())
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
