use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::types::LightState;

/// One reported snapshot of a pole's operating state. Append-only.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "telemetry")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub pole_id: String,
    pub timestamp: DateTimeWithTimeZone,
    pub status: LightState,
    /// Received signal strength in dBm, when the device reports it.
    pub signal_strength: Option<i32>,
    pub firmware_version: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::poles::Entity",
        from = "Column::PoleId",
        to = "super::poles::Column::PoleId"
    )]
    Pole,
}

impl Related<super::poles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pole.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
