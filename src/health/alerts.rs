use crate::entity::poles;
use crate::entity::types::{LightState, Severity};

/// An alert the evaluator wants raised; the ingestor stamps it with the
/// pole id, ACTIVE status, and the ingestion timestamp when persisting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertDraft {
    pub alert_type: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Inspect a report against the pole's pre-update state.
///
/// Rules are independent and additive; a single report can raise both a
/// weak-signal warning and a shutoff critical. Duplicate ACTIVE alerts for a
/// flapping pole are not suppressed here.
#[must_use]
pub fn evaluate(
    previous: &poles::Model,
    status: LightState,
    signal_strength: Option<i32>,
    weak_signal_threshold_dbm: i32,
) -> Vec<AlertDraft> {
    let mut drafts = Vec::new();

    if let Some(dbm) = signal_strength
        && dbm < weak_signal_threshold_dbm
    {
        drafts.push(AlertDraft {
            alert_type: "No Communication",
            severity: Severity::Warning,
            message: format!("Weak signal strength ({dbm} dBm)"),
        });
    }

    if status == LightState::Off && previous.status == LightState::On {
        drafts.push(AlertDraft {
            alert_type: "Manual Switch",
            severity: Severity::Critical,
            message: "Sudden light OFF detected".to_string(),
        });
    }

    drafts
}
