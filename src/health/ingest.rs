use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QuerySelect, Set, TransactionTrait,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::Config;
use crate::entity::types::{AlertStatus, CommStatus, LightState};
use crate::entity::{alerts, poles, telemetry};
use crate::error::{AppError, AppResult};

use super::alerts::evaluate;

/// Raw ingestion payload as posted by a device controller.
///
/// Required fields are `Option` here so that a missing field surfaces as a
/// validation error with a useful message instead of a deserializer rejection.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TelemetryReport {
    pub pole_id: Option<String>,
    /// "ON" or "OFF", case-insensitive.
    pub status: Option<String>,
    /// Signal strength in dBm.
    pub signal_strength: Option<i32>,
    pub firmware_version: Option<String>,
}

/// Report with required fields checked and the status normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidReport {
    pub pole_id: String,
    pub status: LightState,
    pub signal_strength: Option<i32>,
    pub firmware_version: Option<String>,
}

impl TelemetryReport {
    /// Check required fields and normalize the status value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when `pole_id` or `status` is missing,
    /// or `status` normalizes to neither ON nor OFF.
    pub fn validate(self) -> AppResult<ValidReport> {
        let pole_id = match self.pole_id {
            Some(id) if !id.trim().is_empty() => id,
            _ => return Err(AppError::Validation("Missing field: pole_id".to_string())),
        };

        let status = self
            .status
            .ok_or_else(|| AppError::Validation("Missing field: status".to_string()))?;
        let status = LightState::parse(&status)
            .ok_or_else(|| AppError::Validation(format!("Invalid status value: {status}")))?;

        Ok(ValidReport {
            pole_id,
            status,
            signal_strength: self.signal_strength,
            firmware_version: self.firmware_version,
        })
    }
}

#[derive(Debug)]
pub struct IngestOutcome {
    pub pole_id: String,
    pub alerts_raised: usize,
}

/// Accept one device report.
///
/// The telemetry append, the alert inserts, and the pole update commit as a
/// single transaction, with the pole row locked FOR UPDATE so concurrent
/// reports for the same pole evaluate alerts against a consistent previous
/// state. `now` is the single captured instant stamped on all records.
///
/// # Errors
///
/// `Validation` for a malformed report, `NotFound` for an unknown pole,
/// `Database` when storage rejects the transaction (nothing is persisted in
/// that case).
pub async fn ingest(
    db: &DatabaseConnection,
    config: &Config,
    report: TelemetryReport,
    now: DateTime<Utc>,
) -> AppResult<IngestOutcome> {
    let report = report.validate()?;

    let txn = db.begin().await?;

    let pole = poles::Entity::find_by_id(&report.pole_id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Pole {} not found", report.pole_id)))?;

    telemetry::ActiveModel {
        id: Set(Uuid::new_v4()),
        pole_id: Set(report.pole_id.clone()),
        timestamp: Set(now.into()),
        status: Set(report.status),
        signal_strength: Set(report.signal_strength),
        firmware_version: Set(report.firmware_version.clone()),
    }
    .insert(&txn)
    .await?;

    // Alerts judge the report against the pre-update state.
    let drafts = evaluate(
        &pole,
        report.status,
        report.signal_strength,
        config.weak_signal_threshold_dbm,
    );
    let alerts_raised = drafts.len();

    if !drafts.is_empty() {
        let models: Vec<alerts::ActiveModel> = drafts
            .into_iter()
            .map(|draft| alerts::ActiveModel {
                id: Set(Uuid::new_v4()),
                pole_id: Set(report.pole_id.clone()),
                message: Set(draft.message),
                severity: Set(draft.severity),
                alert_type: Set(draft.alert_type.to_string()),
                alert_status: Set(AlertStatus::Active),
                timestamp: Set(now.into()),
            })
            .collect();
        alerts::Entity::insert_many(models).exec(&txn).await?;
    }

    // update_time never moves backward, even with clock skew between replicas.
    let update_time = match pole.update_time {
        Some(prev) if prev.with_timezone(&Utc) > now => prev,
        _ => now.into(),
    };

    let mut pole_update: poles::ActiveModel = pole.into();
    pole_update.status = Set(report.status);
    pole_update.communication_status = Set(CommStatus::Online);
    if report.firmware_version.is_some() {
        pole_update.firmware_version = Set(report.firmware_version);
    }
    pole_update.update_time = Set(Some(update_time));
    pole_update.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        pole_id = %report.pole_id,
        status = ?report.status,
        alerts = alerts_raised,
        "Telemetry ingested"
    );

    Ok(IngestOutcome {
        pole_id: report.pole_id,
        alerts_raised,
    })
}
