//! Unit tests for the pole health core.
//!
//! Run with: cargo test --test health_unit_test

use chrono::{Duration, TimeZone, Utc};

use polewatch::entity::poles;
use polewatch::entity::types::{CommStatus, LightState, Severity};
use polewatch::error::AppError;
use polewatch::health::{classify, evaluate, DisplayStatus, TelemetryReport};

const WINDOW_DAYS: i64 = 3;
const WEAK_SIGNAL_DBM: i32 = -85;

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap()
}

fn pole(status: LightState) -> poles::Model {
    poles::Model {
        pole_id: "A01".to_string(),
        latitude: 12.97,
        longitude: 77.59,
        status,
        communication_status: CommStatus::Online,
        region: Some("Karnataka".to_string()),
        district: None,
        city: None,
        firmware_version: Some("v1.0.3".to_string()),
        update_time: Some(now().into()),
    }
}

fn report(pole_id: Option<&str>, status: Option<&str>) -> TelemetryReport {
    TelemetryReport {
        pole_id: pole_id.map(String::from),
        status: status.map(String::from),
        signal_strength: None,
        firmware_version: None,
    }
}

// ---- classifier ----

#[test]
fn online_is_online_regardless_of_update_time() {
    let stale = now() - Duration::days(400);
    assert_eq!(
        classify(CommStatus::Online, Some(stale), now(), WINDOW_DAYS),
        DisplayStatus::Online
    );
    assert_eq!(
        classify(CommStatus::Online, None, now(), WINDOW_DAYS),
        DisplayStatus::Online
    );
}

#[test]
fn offline_recently_seen_is_maintenance() {
    let last_seen = now() - Duration::days(2);
    assert_eq!(
        classify(CommStatus::Offline, Some(last_seen), now(), WINDOW_DAYS),
        DisplayStatus::Maintenance
    );
}

#[test]
fn offline_at_exactly_three_days_is_offline() {
    let last_seen = now() - Duration::days(3);
    assert_eq!(
        classify(CommStatus::Offline, Some(last_seen), now(), WINDOW_DAYS),
        DisplayStatus::Offline
    );
}

#[test]
fn offline_without_timestamp_is_offline() {
    assert_eq!(
        classify(CommStatus::Offline, None, now(), WINDOW_DAYS),
        DisplayStatus::Offline
    );
}

#[test]
fn silent_pole_crosses_from_maintenance_to_offline() {
    // 50 hours silent: still plausibly a transient outage
    let last_seen = now() - Duration::hours(50);
    assert_eq!(
        classify(CommStatus::Offline, Some(last_seen), now(), WINDOW_DAYS),
        DisplayStatus::Maintenance
    );

    // 80 hours silent: confirmed down
    let last_seen = now() - Duration::hours(80);
    assert_eq!(
        classify(CommStatus::Offline, Some(last_seen), now(), WINDOW_DAYS),
        DisplayStatus::Offline
    );
}

#[test]
fn classify_is_deterministic() {
    let last_seen = now() - Duration::hours(50);
    let first = classify(CommStatus::Offline, Some(last_seen), now(), WINDOW_DAYS);
    let second = classify(CommStatus::Offline, Some(last_seen), now(), WINDOW_DAYS);
    assert_eq!(first, second);
}

// ---- report validation ----

#[test]
fn status_parses_case_insensitively() {
    assert_eq!(LightState::parse("on"), Some(LightState::On));
    assert_eq!(LightState::parse("Off"), Some(LightState::Off));
    assert_eq!(LightState::parse("ON"), Some(LightState::On));
    assert_eq!(LightState::parse("dim"), None);
}

#[test]
fn lowercase_status_normalizes_like_uppercase() {
    let lower = report(Some("A01"), Some("on")).validate().unwrap();
    let upper = report(Some("A01"), Some("ON")).validate().unwrap();
    assert_eq!(lower, upper);
    assert_eq!(lower.status, LightState::On);
}

#[test]
fn missing_pole_id_is_a_validation_error() {
    let err = report(None, Some("ON")).validate().unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
}

#[test]
fn missing_status_is_a_validation_error() {
    let err = report(Some("A01"), None).validate().unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
}

#[test]
fn unrecognized_status_is_a_validation_error() {
    let err = report(Some("A01"), Some("BLINKING")).validate().unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
}

// ---- alert evaluator ----

#[test]
fn weak_signal_raises_a_warning() {
    let drafts = evaluate(&pole(LightState::On), LightState::On, Some(-90), WEAK_SIGNAL_DBM);
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].alert_type, "No Communication");
    assert_eq!(drafts[0].severity, Severity::Warning);
    assert!(drafts[0].message.contains("-90 dBm"), "{}", drafts[0].message);
}

#[test]
fn weak_signal_threshold_is_strict() {
    // -85 exactly is not "below" the threshold
    let drafts = evaluate(&pole(LightState::On), LightState::On, Some(-85), WEAK_SIGNAL_DBM);
    assert!(drafts.is_empty());
}

#[test]
fn absent_signal_strength_raises_nothing() {
    let drafts = evaluate(&pole(LightState::On), LightState::On, None, WEAK_SIGNAL_DBM);
    assert!(drafts.is_empty());
}

#[test]
fn sudden_shutoff_raises_a_critical() {
    let drafts = evaluate(&pole(LightState::On), LightState::Off, None, WEAK_SIGNAL_DBM);
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].alert_type, "Manual Switch");
    assert_eq!(drafts[0].severity, Severity::Critical);
    assert_eq!(drafts[0].message, "Sudden light OFF detected");
}

#[test]
fn rules_are_additive() {
    // OFF with a weak signal on a previously-ON pole fires both rules
    let drafts = evaluate(&pole(LightState::On), LightState::Off, Some(-90), WEAK_SIGNAL_DBM);
    assert_eq!(drafts.len(), 2);
    assert_eq!(drafts[0].alert_type, "No Communication");
    assert_eq!(drafts[1].alert_type, "Manual Switch");
}

#[test]
fn steady_off_with_good_signal_raises_nothing() {
    let drafts = evaluate(&pole(LightState::Off), LightState::Off, Some(-50), WEAK_SIGNAL_DBM);
    assert!(drafts.is_empty());
}
