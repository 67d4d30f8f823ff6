//! Closed status vocabularies shared by the entities.
//!
//! All of these are stored as short strings but only ever round-trip through
//! these enums; unrecognized values are rejected at the serde and database
//! boundaries rather than inside the health logic.

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Power/light mode reported by the device.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
#[serde(rename_all = "UPPERCASE")]
pub enum LightState {
    #[sea_orm(string_value = "ON")]
    On,
    #[sea_orm(string_value = "OFF")]
    Off,
}

impl LightState {
    /// Case-insensitive parse of the wire value ("on", "OFF", ...).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "ON" => Some(Self::On),
            "OFF" => Some(Self::Off),
            _ => None,
        }
    }
}

/// Last-known communication state of a pole, as stored.
///
/// Distinct from the derived `DisplayStatus`: this only flips to OFFLINE when
/// an external watchdog marks the pole silent, never on the read path.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "UPPERCASE")]
pub enum CommStatus {
    #[sea_orm(string_value = "ONLINE")]
    Online,
    #[sea_orm(string_value = "OFFLINE")]
    Offline,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[sea_orm(string_value = "warning")]
    Warning,
    #[sea_orm(string_value = "critical")]
    Critical,
}

/// Lifecycle of an alert. Alerts are created ACTIVE; the RESOLVED transition
/// is a manual/external operation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertStatus {
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "RESOLVED")]
    Resolved,
}
