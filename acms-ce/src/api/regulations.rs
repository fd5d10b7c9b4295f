//! Regulation catalog handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use acms_common::db::Regulation;
use acms_common::types::{
    AirportSize, AirportType, EvaluationMode, RequirementTier, SafetyCategory,
};

use crate::api::AppState;
use crate::db;
use crate::error::{ApiError, ApiResult};

/// Regulation create request body
#[derive(Debug, Deserialize)]
pub struct RegulationPayload {
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub safety_category: SafetyCategory,
    #[serde(default)]
    pub requirement_tier: Option<RequirementTier>,
    #[serde(default)]
    pub evaluation_mode: Option<EvaluationMode>,
    #[serde(default)]
    pub weight: Option<i64>,
    #[serde(default)]
    pub authority_reference: Option<String>,
    #[serde(default)]
    pub applies_to_sizes: Option<Vec<AirportSize>>,
    #[serde(default)]
    pub applies_to_types: Option<Vec<AirportType>>,
    #[serde(default)]
    pub min_passengers: Option<i64>,
    #[serde(default)]
    pub requires_international: bool,
    #[serde(default)]
    pub requires_cargo: bool,
    #[serde(default)]
    pub requires_maintenance: bool,
    #[serde(default)]
    pub min_runways: Option<i64>,
    #[serde(default)]
    pub min_aircraft_weight: Option<i64>,
    pub requirements: String,
    #[serde(default)]
    pub expected_performance: Option<String>,
}

impl RegulationPayload {
    fn into_regulation(self, guid: Uuid) -> Regulation {
        Regulation {
            guid,
            code: self.code,
            title: self.title,
            description: self.description,
            safety_category: self.safety_category,
            requirement_tier: self.requirement_tier,
            evaluation_mode: self.evaluation_mode,
            weight: self.weight,
            authority_reference: self.authority_reference,
            applies_to_sizes: self.applies_to_sizes,
            applies_to_types: self.applies_to_types,
            min_passengers: self.min_passengers,
            requires_international: self.requires_international,
            requires_cargo: self.requires_cargo,
            requires_maintenance: self.requires_maintenance,
            min_runways: self.min_runways,
            min_aircraft_weight: self.min_aircraft_weight,
            requirements: self.requirements,
            expected_performance: self.expected_performance,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegulationQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub category: Option<SafetyCategory>,
}

fn default_limit() -> i64 {
    100
}

/// POST /api/regulations - Create a new regulation
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<RegulationPayload>,
) -> ApiResult<(StatusCode, Json<Regulation>)> {
    if db::regulations::get_by_code(&state.db, &payload.code)
        .await?
        .is_some()
    {
        return Err(ApiError::BadRequest(format!(
            "Regulation with code {} already exists",
            payload.code
        )));
    }

    let regulation = payload.into_regulation(Uuid::new_v4());
    db::regulations::insert(&state.db, &regulation).await?;
    Ok((StatusCode::CREATED, Json(regulation)))
}

/// GET /api/regulations - List regulations, optionally by safety category
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<RegulationQuery>,
) -> ApiResult<Json<Vec<Regulation>>> {
    let regulations =
        db::regulations::list(&state.db, query.category, query.skip, query.limit).await?;
    Ok(Json(regulations))
}

/// GET /api/regulations/:regulation_id - Get a specific regulation
pub async fn get_one(
    State(state): State<AppState>,
    Path(regulation_id): Path<Uuid>,
) -> ApiResult<Json<Regulation>> {
    let regulation = db::regulations::get(&state.db, regulation_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Regulation {} not found", regulation_id)))?;
    Ok(Json(regulation))
}
