use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use sea_orm::{EntityTrait, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::common::AppState;
use crate::entity::alerts;
use crate::entity::types::{AlertStatus, Severity};
use crate::error::AppResult;

#[derive(Debug, Deserialize, IntoParams)]
pub struct AlertsQuery {
    /// Max rows (default 10)
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AlertResponse {
    pub id: Uuid,
    pub pole_id: String,
    pub message: String,
    pub severity: Severity,
    pub alert_type: String,
    pub alert_status: AlertStatus,
    pub timestamp: DateTime<Utc>,
}

/// List the most recent alerts, newest first
#[utoipa::path(
    get,
    path = "/api/alerts",
    params(AlertsQuery),
    responses(
        (status = 200, description = "Alerts retrieved successfully", body = Vec<AlertResponse>),
    ),
    tag = "alerts"
)]
pub async fn list_alerts(
    State(state): State<AppState>,
    Query(query): Query<AlertsQuery>,
) -> AppResult<Json<Vec<AlertResponse>>> {
    let limit = query.limit.unwrap_or(state.config.alerts_default_limit);

    let alerts_list = alerts::Entity::find()
        .order_by_desc(alerts::Column::Timestamp)
        .limit(limit)
        .all(&*state.db)
        .await?;

    let response: Vec<AlertResponse> = alerts_list
        .into_iter()
        .map(|a| AlertResponse {
            id: a.id,
            pole_id: a.pole_id,
            message: a.message,
            severity: a.severity,
            alert_type: a.alert_type,
            alert_status: a.alert_status,
            timestamp: a.timestamp.with_timezone(&Utc),
        })
        .collect();

    Ok(Json(response))
}
