//! Compliance engine handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use acms_common::db::{ComplianceRecord, Regulation};

use crate::api::AppState;
use crate::db;
use crate::engine::{ComplianceEngine, RecordUpdate, Scorecard, StatusCounts};
use crate::error::ApiResult;

/// Compliance check request body
#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub airport_id: Uuid,
    #[serde(default = "default_auto_create")]
    pub auto_create_records: bool,
}

fn default_auto_create() -> bool {
    true
}

/// One record plus its resolved regulation, for display
#[derive(Debug, Serialize)]
pub struct RecordResponse {
    #[serde(flatten)]
    pub record: ComplianceRecord,
    pub regulation: Option<Regulation>,
}

/// Compliance check response
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub airport_id: Uuid,
    pub total_applicable: usize,
    pub status_counts: StatusCounts,
    pub records: Vec<RecordResponse>,
    pub recommendations: Vec<String>,
    pub scorecard: Scorecard,
}

/// POST /api/compliance/check - Run a full compliance check for an airport
pub async fn check(
    State(state): State<AppState>,
    Json(request): Json<CheckRequest>,
) -> ApiResult<Json<CheckResponse>> {
    let engine = ComplianceEngine::new(state.db.clone());
    let report = engine
        .run_compliance_check(request.airport_id, request.auto_create_records)
        .await?;

    let mut regulations: HashMap<Uuid, Regulation> = HashMap::new();
    for record in &report.records {
        if !regulations.contains_key(&record.regulation_id) {
            if let Some(regulation) = db::regulations::get(&state.db, record.regulation_id).await? {
                regulations.insert(record.regulation_id, regulation);
            }
        }
    }

    let records = report
        .records
        .into_iter()
        .map(|record| {
            let regulation = regulations.get(&record.regulation_id).cloned();
            RecordResponse { record, regulation }
        })
        .collect();

    Ok(Json(CheckResponse {
        airport_id: report.airport_id,
        total_applicable: report.total_applicable,
        status_counts: report.status_counts,
        records,
        recommendations: report.recommendations,
        scorecard: report.scorecard,
    }))
}

/// GET /api/compliance/airport/:airport_id - All records for an airport
pub async fn airport_records(
    State(state): State<AppState>,
    Path(airport_id): Path<Uuid>,
) -> ApiResult<Json<Vec<RecordResponse>>> {
    let records = db::records::list_by_airport(&state.db, airport_id).await?;

    let mut responses = Vec::with_capacity(records.len());
    for record in records {
        let regulation = db::regulations::get(&state.db, record.regulation_id).await?;
        responses.push(RecordResponse { record, regulation });
    }
    Ok(Json(responses))
}

/// PUT /api/compliance/records/:record_id - Update a compliance record
pub async fn update_record(
    State(state): State<AppState>,
    Path(record_id): Path<Uuid>,
    Json(update): Json<RecordUpdate>,
) -> ApiResult<Json<RecordResponse>> {
    let engine = ComplianceEngine::new(state.db.clone());
    let record = engine.update_record(record_id, update).await?;
    let regulation = db::regulations::get(&state.db, record.regulation_id).await?;
    Ok(Json(RecordResponse { record, regulation }))
}
