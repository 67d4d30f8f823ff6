use axum::{extract::State, Json};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde::Serialize;
use utoipa::ToSchema;

use crate::common::AppState;
use crate::entity::types::{AlertStatus, LightState};
use crate::entity::{alerts, poles};
use crate::error::AppResult;

#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    pub total: u64,
    pub active: u64,
    pub inactive: u64,
    pub alerts: u64,
}

/// Fleet summary counts for the operator dashboard
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Stats retrieved successfully", body = StatsResponse),
    ),
    tag = "stats"
)]
pub async fn get_stats(State(state): State<AppState>) -> AppResult<Json<StatsResponse>> {
    let total = poles::Entity::find().count(&*state.db).await?;

    let active = poles::Entity::find()
        .filter(poles::Column::Status.eq(LightState::On))
        .count(&*state.db)
        .await?;

    let inactive = poles::Entity::find()
        .filter(poles::Column::Status.eq(LightState::Off))
        .count(&*state.db)
        .await?;

    let alerts = alerts::Entity::find()
        .filter(alerts::Column::AlertStatus.eq(AlertStatus::Active))
        .count(&*state.db)
        .await?;

    Ok(Json(StatsResponse {
        total,
        active,
        inactive,
        alerts,
    }))
}
