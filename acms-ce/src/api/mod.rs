//! REST API for the compliance engine service

pub mod airports;
pub mod compliance;
pub mod regulations;

use axum::{
    extract::State,
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde_json::json;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiResult;
use crate::seed;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database pool
    pub db: SqlitePool,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Create the API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check (no prefix for health endpoint)
        .route("/health", get(health_check))
        .nest(
            "/api",
            Router::new()
                // Airport registry
                .route("/airports", post(airports::create).get(airports::list))
                .route(
                    "/airports/:airport_id",
                    get(airports::get_one)
                        .put(airports::update)
                        .delete(airports::remove),
                )
                // Regulation catalog
                .route(
                    "/regulations",
                    post(regulations::create).get(regulations::list),
                )
                .route("/regulations/:regulation_id", get(regulations::get_one))
                // Compliance engine
                .route("/compliance/check", post(compliance::check))
                .route(
                    "/compliance/airport/:airport_id",
                    get(compliance::airport_records),
                )
                .route(
                    "/compliance/records/:record_id",
                    put(compliance::update_record),
                )
                // Built-in regulation catalog loader
                .route("/seed", post(seed_catalog)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "module": "acms-ce",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// POST /api/seed - Load the built-in regulation catalog (idempotent)
async fn seed_catalog(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let summary = seed::seed_regulations(&state.db).await?;
    Ok(Json(json!({
        "inserted": summary.inserted,
        "skipped": summary.skipped,
    })))
}
