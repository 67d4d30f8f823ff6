//! Transactional ingest tests against a mock database.
//!
//! Run with: cargo test --test ingest_flow_test

use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{DatabaseBackend, MockDatabase};
use uuid::Uuid;

use polewatch::config::{Config, Deployment};
use polewatch::entity::types::{AlertStatus, CommStatus, LightState, Severity};
use polewatch::entity::{alerts, poles, telemetry};
use polewatch::error::AppError;
use polewatch::health::{ingest, TelemetryReport};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap()
}

fn config() -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        maintenance_window_days: 3,
        weak_signal_threshold_dbm: -85,
        telemetry_default_limit: 24,
        alerts_default_limit: 10,
        api_host: "127.0.0.1".to_string(),
        api_port: 3000,
        disable_rate_limiting: true,
        rate_limit_read_per_second: 5,
        rate_limit_read_burst: 60,
        rate_limit_ingest_per_second: 10,
        rate_limit_ingest_burst: 60,
        deployment: Deployment::Local,
    }
}

fn pole_row() -> poles::Model {
    poles::Model {
        pole_id: "A01".to_string(),
        latitude: 12.97,
        longitude: 77.59,
        status: LightState::On,
        communication_status: CommStatus::Online,
        region: Some("Karnataka".to_string()),
        district: None,
        city: None,
        firmware_version: Some("v1.0.3".to_string()),
        update_time: Some(now().into()),
    }
}

fn report(status: &str, signal_strength: Option<i32>) -> TelemetryReport {
    TelemetryReport {
        pole_id: Some("A01".to_string()),
        status: Some(status.to_string()),
        signal_strength,
        firmware_version: None,
    }
}

#[test]
fn unknown_pole_is_not_found_and_writes_nothing() {
    tokio_test::block_on(async {
        // Locked pole lookup finds no row.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<poles::Model>::new()])
            .into_connection();

        let err = ingest(&db, &config(), report("ON", None), now())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("FOR UPDATE"), "lookup must lock the row: {log}");
        assert!(!log.contains("INSERT"), "no telemetry or alert row: {log}");
        assert!(!log.contains("UPDATE \"poles\""), "pole left untouched: {log}");
    });
}

#[test]
fn off_report_with_weak_signal_commits_two_alerts() {
    tokio_test::block_on(async {
        let telemetry_row = telemetry::Model {
            id: Uuid::new_v4(),
            pole_id: "A01".to_string(),
            timestamp: now().into(),
            status: LightState::Off,
            signal_strength: Some(-90),
            firmware_version: None,
        };
        let alert_row = alerts::Model {
            id: Uuid::new_v4(),
            pole_id: "A01".to_string(),
            message: "Sudden light OFF detected".to_string(),
            severity: Severity::Critical,
            alert_type: "Manual Switch".to_string(),
            alert_status: AlertStatus::Active,
            timestamp: now().into(),
        };
        let updated_pole = poles::Model {
            status: LightState::Off,
            ..pole_row()
        };

        // One result set per statement: locked lookup, telemetry insert,
        // alert batch insert, pole update.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![pole_row()]])
            .append_query_results([vec![telemetry_row]])
            .append_query_results([vec![alert_row]])
            .append_query_results([vec![updated_pole]])
            .into_connection();

        let outcome = ingest(&db, &config(), report("OFF", Some(-90)), now())
            .await
            .unwrap();
        assert_eq!(outcome.pole_id, "A01");
        assert_eq!(outcome.alerts_raised, 2);

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("INSERT INTO \"telemetry\""), "{log}");
        assert!(log.contains("INSERT INTO \"alerts\""), "{log}");
        assert!(log.contains("UPDATE \"poles\""), "{log}");
    });
}

#[test]
fn clean_report_updates_pole_without_alerts() {
    tokio_test::block_on(async {
        let telemetry_row = telemetry::Model {
            id: Uuid::new_v4(),
            pole_id: "A01".to_string(),
            timestamp: now().into(),
            status: LightState::On,
            signal_strength: Some(-60),
            firmware_version: None,
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![pole_row()]])
            .append_query_results([vec![telemetry_row]])
            .append_query_results([vec![pole_row()]])
            .into_connection();

        let outcome = ingest(&db, &config(), report("ON", Some(-60)), now())
            .await
            .unwrap();
        assert_eq!(outcome.alerts_raised, 0);

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("INSERT INTO \"telemetry\""), "{log}");
        assert!(!log.contains("INSERT INTO \"alerts\""), "{log}");
    });
}
