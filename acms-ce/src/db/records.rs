//! Compliance record database operations
//!
//! Checklist, completed-index, due-date and custom-field columns hold JSON
//! text; all round-tripping goes through the codecs in acms-common so a
//! stored list of strings and a sparse integer-keyed map survive a
//! store/reload cycle unchanged.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use acms_common::db::{
    decode_due_dates, decode_index_set, decode_string_list, encode_due_dates, encode_index_set,
    encode_string_list, ComplianceRecord,
};
use acms_common::Result;

use crate::db::parse_guid;

fn from_row(row: &SqliteRow) -> Result<ComplianceRecord> {
    let guid: String = row.get("guid");
    let airport_id: String = row.get("airport_id");
    let regulation_id: String = row.get("regulation_id");
    let status: String = row.get("status");
    let action_items: Option<String> = row.get("action_items");
    let completed_items: Option<String> = row.get("completed_items");
    let item_due_dates: Option<String> = row.get("item_due_dates");
    let custom_fields: Option<String> = row.get("custom_fields");

    Ok(ComplianceRecord {
        guid: parse_guid(&guid)?,
        airport_id: parse_guid(&airport_id)?,
        regulation_id: parse_guid(&regulation_id)?,
        status: status.parse()?,
        notes: row.get("notes"),
        last_verified: row.get("last_verified"),
        verified_by: row.get("verified_by"),
        action_items: decode_string_list(action_items.as_deref()),
        completed_items: decode_index_set(completed_items.as_deref()),
        item_due_dates: decode_due_dates(item_due_dates.as_deref()),
        custom_fields: custom_fields.and_then(|text| serde_json::from_str(&text).ok()),
    })
}

const SELECT_COLUMNS: &str = r#"
    SELECT guid, airport_id, regulation_id, status, notes, last_verified,
           verified_by, action_items, completed_items, item_due_dates,
           custom_fields
    FROM compliance_records
"#;

/// Insert a record for a newly applicable (airport, regulation) pair
///
/// Tolerates a concurrent check having created the pair first: the unique
/// constraint swallows the duplicate and the caller re-selects.
pub async fn insert(pool: &SqlitePool, record: &ComplianceRecord) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO compliance_records (
            guid, airport_id, regulation_id, status, notes, last_verified,
            verified_by, action_items, completed_items, item_due_dates,
            custom_fields
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(airport_id, regulation_id) DO NOTHING
        "#,
    )
    .bind(record.guid.to_string())
    .bind(record.airport_id.to_string())
    .bind(record.regulation_id.to_string())
    .bind(record.status.as_str())
    .bind(&record.notes)
    .bind(&record.last_verified)
    .bind(&record.verified_by)
    .bind(encode_string_list(&record.action_items))
    .bind(encode_index_set(&record.completed_items))
    .bind(encode_due_dates(&record.item_due_dates))
    .bind(
        record
            .custom_fields
            .as_ref()
            .and_then(|v| serde_json::to_string(v).ok()),
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Load one record by id
pub async fn get(pool: &SqlitePool, guid: Uuid) -> Result<Option<ComplianceRecord>> {
    let row = sqlx::query(&format!("{} WHERE guid = ?", SELECT_COLUMNS))
        .bind(guid.to_string())
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(from_row).transpose()
}

/// Load the record for one (airport, regulation) pair
pub async fn get_by_pair(
    pool: &SqlitePool,
    airport_id: Uuid,
    regulation_id: Uuid,
) -> Result<Option<ComplianceRecord>> {
    let row = sqlx::query(&format!(
        "{} WHERE airport_id = ? AND regulation_id = ?",
        SELECT_COLUMNS
    ))
    .bind(airport_id.to_string())
    .bind(regulation_id.to_string())
    .fetch_optional(pool)
    .await?;
    row.as_ref().map(from_row).transpose()
}

/// All records for one airport
pub async fn list_by_airport(pool: &SqlitePool, airport_id: Uuid) -> Result<Vec<ComplianceRecord>> {
    let rows = sqlx::query(&format!(
        "{} WHERE airport_id = ? ORDER BY created_at",
        SELECT_COLUMNS
    ))
    .bind(airport_id.to_string())
    .fetch_all(pool)
    .await?;
    rows.iter().map(from_row).collect()
}

/// Persist every mutable field of a record
pub async fn save(pool: &SqlitePool, record: &ComplianceRecord) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE compliance_records SET
            status = ?, notes = ?, last_verified = ?, verified_by = ?,
            action_items = ?, completed_items = ?, item_due_dates = ?,
            custom_fields = ?, updated_at = CURRENT_TIMESTAMP
        WHERE guid = ?
        "#,
    )
    .bind(record.status.as_str())
    .bind(&record.notes)
    .bind(&record.last_verified)
    .bind(&record.verified_by)
    .bind(encode_string_list(&record.action_items))
    .bind(encode_index_set(&record.completed_items))
    .bind(encode_due_dates(&record.item_due_dates))
    .bind(
        record
            .custom_fields
            .as_ref()
            .and_then(|v| serde_json::to_string(v).ok()),
    )
    .bind(record.guid.to_string())
    .execute(pool)
    .await?;
    Ok(())
}
