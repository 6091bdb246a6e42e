use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sensors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(column_name = "type")]
    pub sensor_type: String,
    pub unit: Option<String>,
    #[sea_orm(indexed)]
    pub location: String,
    pub active: bool,
    pub activation_date: DateTime,
    pub updated_at: DateTime,
    pub updated_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sensor_values::Entity")]
    SensorValues,
}

impl Related<super::sensor_values::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SensorValues.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
