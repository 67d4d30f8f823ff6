use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::common::AppState;
use crate::entity::telemetry;
use crate::entity::types::LightState;
use crate::error::AppResult;
use crate::health::{ingest, TelemetryReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TelemetryMode {
    /// Only samples from the sunrise (06:30-07:00) and sunset (18:00-18:30)
    /// windows, the solar-relevant capture times.
    #[default]
    Filtered,
    /// Most recent N samples regardless of time of day.
    Raw,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TelemetryQuery {
    /// Restrict to one pole
    pub pole_id: Option<String>,
    /// Retrieval mode, default "filtered"
    #[serde(default)]
    pub mode: TelemetryMode,
    /// Max rows in raw mode (default 24)
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TelemetryResponse {
    pub id: Uuid,
    pub pole_id: String,
    pub timestamp: DateTime<Utc>,
    pub status: LightState,
    pub signal_strength: Option<i32>,
    pub firmware_version: Option<String>,
}

/// List telemetry samples, newest first
#[utoipa::path(
    get,
    path = "/api/telemetry",
    params(TelemetryQuery),
    responses(
        (status = 200, description = "Telemetry retrieved successfully", body = Vec<TelemetryResponse>),
    ),
    tag = "telemetry"
)]
pub async fn list_telemetry(
    State(state): State<AppState>,
    Query(query): Query<TelemetryQuery>,
) -> AppResult<Json<Vec<TelemetryResponse>>> {
    let mut db_query = telemetry::Entity::find();

    if let Some(pole_id) = &query.pole_id {
        db_query = db_query.filter(telemetry::Column::PoleId.eq(pole_id));
    }

    db_query = db_query.order_by_desc(telemetry::Column::Timestamp);

    let rows = match query.mode {
        TelemetryMode::Filtered => {
            db_query
                .filter(
                    Condition::any()
                        .add(Expr::cust(
                            r#""timestamp"::time BETWEEN '06:30:00' AND '07:00:00'"#,
                        ))
                        .add(Expr::cust(
                            r#""timestamp"::time BETWEEN '18:00:00' AND '18:30:00'"#,
                        )),
                )
                .all(&*state.db)
                .await?
        }
        TelemetryMode::Raw => {
            let limit = query.limit.unwrap_or(state.config.telemetry_default_limit);
            db_query.limit(limit).all(&*state.db).await?
        }
    };

    let response: Vec<TelemetryResponse> = rows
        .into_iter()
        .map(|t| TelemetryResponse {
            id: t.id,
            pole_id: t.pole_id,
            timestamp: t.timestamp.with_timezone(&Utc),
            status: t.status,
            signal_strength: t.signal_strength,
            firmware_version: t.firmware_version,
        })
        .collect();

    Ok(Json(response))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IngestResponse {
    pub message: String,
}

/// Receive a telemetry report from a device controller
#[utoipa::path(
    post,
    path = "/api/iot/data",
    request_body = TelemetryReport,
    responses(
        (status = 200, description = "Telemetry accepted", body = IngestResponse),
        (status = 400, description = "Malformed report"),
        (status = 404, description = "Unknown pole"),
    ),
    tag = "telemetry"
)]
pub async fn ingest_telemetry(
    State(state): State<AppState>,
    Json(report): Json<TelemetryReport>,
) -> AppResult<Json<IngestResponse>> {
    ingest(&*state.db, &state.config, report, Utc::now()).await?;

    Ok(Json(IngestResponse {
        message: "Telemetry data received successfully".to_string(),
    }))
}
