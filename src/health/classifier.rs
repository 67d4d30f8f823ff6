use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::entity::types::CommStatus;

/// Three-valued health label shown to operators. Derived at read time from
/// the stored communication state and the last-seen timestamp; never
/// persisted, so it can't go stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum DisplayStatus {
    Online,
    Maintenance,
    Offline,
}

/// Classify a pole's displayed health.
///
/// A pole that reports ONLINE is ONLINE regardless of timestamps. An OFFLINE
/// pole that was last seen less than `maintenance_window_days` whole days ago
/// (floored, so 2d23h counts as 2) is assumed to be in a transient outage and
/// shows MAINTENANCE; at or past the window, or with no last-seen timestamp
/// at all, it is confirmed OFFLINE.
///
/// `now` is caller-supplied so query handlers and tests share the same
/// deterministic evaluation instant.
#[must_use]
pub fn classify(
    communication_status: CommStatus,
    last_update_time: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    maintenance_window_days: i64,
) -> DisplayStatus {
    match (communication_status, last_update_time) {
        (CommStatus::Online, _) => DisplayStatus::Online,
        (CommStatus::Offline, Some(last_seen)) => {
            if (now - last_seen).num_days() < maintenance_window_days {
                DisplayStatus::Maintenance
            } else {
                DisplayStatus::Offline
            }
        }
        (CommStatus::Offline, None) => DisplayStatus::Offline,
    }
}
