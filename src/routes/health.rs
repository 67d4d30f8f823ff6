use axum::http::StatusCode;

/// Liveness probe
///
/// Answers 200 whenever the process is serving, without touching the
/// database. Deliberately exempt from rate limiting so orchestrator
/// probes are never throttled away.
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Service is up"),
    ),
    tag = "health"
)]
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
