use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::types::{CommStatus, LightState};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "poles")]
pub struct Model {
    /// Externally assigned device identifier, e.g. "A01".
    #[sea_orm(primary_key, auto_increment = false)]
    pub pole_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: LightState,
    pub communication_status: CommStatus,
    pub region: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub firmware_version: Option<String>,
    /// Timestamp of the last accepted telemetry. Updated atomically with
    /// `communication_status`; never moves backward.
    pub update_time: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::telemetry::Entity")]
    Telemetry,
    #[sea_orm(has_many = "super::alerts::Entity")]
    Alerts,
}

impl Related<super::telemetry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Telemetry.def()
    }
}

impl Related<super::alerts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Alerts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
