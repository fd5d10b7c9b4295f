//! Airport registry handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use acms_common::db::Airport;
use acms_common::types::{AirportSize, AirportType, UsageClass};

use crate::api::AppState;
use crate::db;
use crate::error::{ApiError, ApiResult};

/// Airport create/update request body
#[derive(Debug, Deserialize)]
pub struct AirportPayload {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub size: Option<AirportSize>,
    #[serde(default)]
    pub airport_type: Option<AirportType>,
    #[serde(default)]
    pub usage_class: Option<UsageClass>,
    #[serde(default)]
    pub annual_passengers: Option<i64>,
    #[serde(default)]
    pub has_international_operations: bool,
    #[serde(default)]
    pub has_cargo_operations: bool,
    #[serde(default)]
    pub has_maintenance_facility: bool,
    #[serde(default = "default_runway_count")]
    pub number_of_runways: i64,
    #[serde(default)]
    pub max_aircraft_weight: Option<i64>,
}

fn default_runway_count() -> i64 {
    1
}

impl AirportPayload {
    fn into_airport(self, guid: Uuid) -> Airport {
        Airport {
            guid,
            code: self.code,
            name: self.name,
            size: self.size,
            airport_type: self.airport_type,
            usage_class: self.usage_class,
            annual_passengers: self.annual_passengers,
            has_international_operations: self.has_international_operations,
            has_cargo_operations: self.has_cargo_operations,
            has_maintenance_facility: self.has_maintenance_facility,
            number_of_runways: self.number_of_runways,
            max_aircraft_weight: self.max_aircraft_weight,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

/// POST /api/airports - Create a new airport profile
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<AirportPayload>,
) -> ApiResult<(StatusCode, Json<Airport>)> {
    if db::airports::get_by_code(&state.db, &payload.code)
        .await?
        .is_some()
    {
        return Err(ApiError::BadRequest(format!(
            "Airport with code {} already exists",
            payload.code
        )));
    }

    let airport = payload.into_airport(Uuid::new_v4());
    db::airports::insert(&state.db, &airport).await?;
    Ok((StatusCode::CREATED, Json(airport)))
}

/// GET /api/airports - List all airports
pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> ApiResult<Json<Vec<Airport>>> {
    let airports = db::airports::list(&state.db, page.skip, page.limit).await?;
    Ok(Json(airports))
}

/// GET /api/airports/:airport_id - Get a specific airport
pub async fn get_one(
    State(state): State<AppState>,
    Path(airport_id): Path<Uuid>,
) -> ApiResult<Json<Airport>> {
    let airport = db::airports::get(&state.db, airport_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Airport {} not found", airport_id)))?;
    Ok(Json(airport))
}

/// PUT /api/airports/:airport_id - Update an existing airport profile
pub async fn update(
    State(state): State<AppState>,
    Path(airport_id): Path<Uuid>,
    Json(payload): Json<AirportPayload>,
) -> ApiResult<Json<Airport>> {
    let existing = db::airports::get(&state.db, airport_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Airport {} not found", airport_id)))?;

    // Reject a code change that collides with another airport
    if payload.code != existing.code
        && db::airports::get_by_code(&state.db, &payload.code)
            .await?
            .is_some()
    {
        return Err(ApiError::BadRequest(format!(
            "Airport with code {} already exists",
            payload.code
        )));
    }

    let airport = payload.into_airport(existing.guid);
    db::airports::update(&state.db, &airport).await?;
    Ok(Json(airport))
}

/// DELETE /api/airports/:airport_id - Delete an airport profile
///
/// Administrative action: compliance records cascade away with the airport.
pub async fn remove(
    State(state): State<AppState>,
    Path(airport_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if db::airports::delete(&state.db, airport_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!(
            "Airport {} not found",
            airport_id
        )))
    }
}
