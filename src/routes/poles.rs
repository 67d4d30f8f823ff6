use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use sea_orm::{EntityTrait, QueryOrder};
use serde::Serialize;
use utoipa::ToSchema;

use crate::common::AppState;
use crate::entity::poles;
use crate::entity::types::{CommStatus, LightState};
use crate::error::{AppError, AppResult};
use crate::health::{classify, DisplayStatus};

#[derive(Debug, Serialize, ToSchema)]
pub struct PoleResponse {
    pub pole_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: LightState,
    pub communication_status: CommStatus,
    pub region: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub firmware_version: Option<String>,
    /// Last accepted telemetry, RFC 3339
    pub update_time: Option<DateTime<Utc>>,
    /// Health label derived at read time, never stored
    pub display_status: DisplayStatus,
}

impl PoleResponse {
    fn from_model(pole: poles::Model, now: DateTime<Utc>, window_days: i64) -> Self {
        let update_time = pole.update_time.map(|t| t.with_timezone(&Utc));
        let display_status = classify(pole.communication_status, update_time, now, window_days);

        Self {
            pole_id: pole.pole_id,
            latitude: pole.latitude,
            longitude: pole.longitude,
            status: pole.status,
            communication_status: pole.communication_status,
            region: pole.region,
            district: pole.district,
            city: pole.city,
            firmware_version: pole.firmware_version,
            update_time,
            display_status,
        }
    }
}

/// List all poles with their derived display status
#[utoipa::path(
    get,
    path = "/api/poles",
    responses(
        (status = 200, description = "Poles retrieved successfully", body = Vec<PoleResponse>),
    ),
    tag = "poles"
)]
pub async fn list_poles(State(state): State<AppState>) -> AppResult<Json<Vec<PoleResponse>>> {
    let now = Utc::now();
    let window_days = state.config.maintenance_window_days;

    let poles_list = poles::Entity::find()
        .order_by_asc(poles::Column::PoleId)
        .all(&*state.db)
        .await?;

    let response: Vec<PoleResponse> = poles_list
        .into_iter()
        .map(|p| PoleResponse::from_model(p, now, window_days))
        .collect();

    Ok(Json(response))
}

/// Get a single pole by its device identifier
#[utoipa::path(
    get,
    path = "/api/poles/{pole_id}",
    params(
        ("pole_id" = String, Path, description = "Externally assigned pole identifier"),
    ),
    responses(
        (status = 200, description = "Pole retrieved successfully", body = PoleResponse),
        (status = 404, description = "Pole not found"),
    ),
    tag = "poles"
)]
pub async fn get_pole(
    State(state): State<AppState>,
    Path(pole_id): Path<String>,
) -> AppResult<Json<PoleResponse>> {
    let pole = poles::Entity::find_by_id(&pole_id)
        .one(&*state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Pole {pole_id} not found")))?;

    Ok(Json(PoleResponse::from_model(
        pole,
        Utc::now(),
        state.config.maintenance_window_days,
    )))
}
