use aerodex_core::FacilityResponse;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::{openapi, AppState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub provider: String,
    pub circuit: &'static str,
    pub cached_entries: usize,
}

pub async fn get_airport(
    State(state): State<AppState>,
    Path(icao): Path<String>,
) -> Result<Json<FacilityResponse>, ApiError> {
    let airport = state.lookup.get_by_code(&icao).await?;
    Ok(Json(airport))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP",
        provider: state.lookup.provider_name().to_owned(),
        circuit: state.lookup.circuit_state().as_str(),
        cached_entries: state.lookup.cached_entries().await,
    })
}

pub async fn api_docs() -> Json<Value> {
    Json(openapi::document())
}
