use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::types::{AlertStatus, Severity};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "alerts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub pole_id: String,
    pub message: String,
    pub severity: Severity,
    /// Free-form classification tag, e.g. "No Communication".
    pub alert_type: String,
    pub alert_status: AlertStatus,
    pub timestamp: DateTimeWithTimeZone,
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
