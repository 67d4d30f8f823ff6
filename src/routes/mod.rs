pub mod alerts;
pub mod health;
pub mod poles;
mod rate_limit;
pub mod stats;
pub mod telemetry;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};

use rate_limit::FallbackIpKeyExtractor;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::common::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        poles::list_poles,
        poles::get_pole,
        telemetry::list_telemetry,
        telemetry::ingest_telemetry,
        alerts::list_alerts,
        stats::get_stats,
    ),
    components(
        schemas(
            poles::PoleResponse,
            telemetry::TelemetryResponse,
            telemetry::TelemetryMode,
            telemetry::IngestResponse,
            alerts::AlertResponse,
            stats::StatsResponse,
            crate::health::DisplayStatus,
            crate::health::TelemetryReport,
            crate::entity::types::LightState,
            crate::entity::types::CommStatus,
            crate::entity::types::Severity,
            crate::entity::types::AlertStatus,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "poles", description = "Pole inventory with derived display status"),
        (name = "telemetry", description = "Device telemetry ingestion and history"),
        (name = "alerts", description = "Anomaly alerts"),
        (name = "stats", description = "Fleet summary counts"),
    ),
    info(
        title = "Polewatch API",
        description = "Operational health API for solar street-light poles",
        version = "0.1.0"
    )
)]
struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    let config = &state.config;

    if config.disable_rate_limiting {
        tracing::warn!("Rate limiting DISABLED");
    } else {
        tracing::info!(
            read_rate = %format!("{}/s burst {}", config.rate_limit_read_per_second, config.rate_limit_read_burst),
            ingest_rate = %format!("{}/s burst {}", config.rate_limit_ingest_per_second, config.rate_limit_ingest_burst),
            "Rate limiting configured"
        );
    }

    // Base routes without rate limiting
    let read_routes_base = Router::new()
        .route("/poles", get(poles::list_poles))
        .route("/poles/{pole_id}", get(poles::get_pole))
        .route("/telemetry", get(telemetry::list_telemetry))
        .route("/alerts", get(alerts::list_alerts))
        .route("/stats", get(stats::get_stats));

    let ingest_routes_base =
        Router::new().route("/iot/data", post(telemetry::ingest_telemetry));

    // Combine API routes, conditionally applying rate limiting
    let api_routes = if config.disable_rate_limiting {
        Router::new()
            .merge(read_routes_base)
            .merge(ingest_routes_base)
    } else {
        let read_limiter = GovernorConfigBuilder::default()
            .key_extractor(FallbackIpKeyExtractor)
            .per_second(config.rate_limit_read_per_second)
            .burst_size(config.rate_limit_read_burst)
            .finish()
            .expect("Failed to create read rate limiter");

        let ingest_limiter = GovernorConfigBuilder::default()
            .key_extractor(FallbackIpKeyExtractor)
            .per_second(config.rate_limit_ingest_per_second)
            .burst_size(config.rate_limit_ingest_burst)
            .finish()
            .expect("Failed to create ingest rate limiter");

        Router::new()
            .merge(read_routes_base.layer(GovernorLayer {
                config: Arc::new(read_limiter),
            }))
            .merge(ingest_routes_base.layer(GovernorLayer {
                config: Arc::new(ingest_limiter),
            }))
    }
    .layer(RequestBodyLimitLayer::new(64 * 1024)); // device reports are tiny

    // Health check routes (NO rate limiting)
    let health_routes = Router::new().route("/healthz", get(health::healthz));

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    // Combine all routes
    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(docs_routes)
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
