use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::sensors;
use crate::routes::extract::timestamp;

#[derive(Debug, Serialize, ToSchema)]
pub struct SensorResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub sensor_type: String,
    pub unit: Option<String>,
    pub location: String,
    pub active: bool,
    pub activation_date: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub updated_by: String,
}

impl From<sensors::Model> for SensorResponse {
    fn from(s: sensors::Model) -> Self {
        Self {
            id: s.id,
            name: s.name,
            sensor_type: s.sensor_type,
            unit: s.unit,
            location: s.location,
            active: s.active,
            activation_date: s.activation_date,
            updated_at: s.updated_at,
            updated_by: s.updated_by,
        }
    }
}

/// Sensor payload for bulk creation
#[derive(Debug, Deserialize, ToSchema)]
pub struct SensorRequest {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub sensor_type: String,
    #[serde(default)]
    pub unit: Option<String>,
    pub location: String,
    pub active: bool,
    /// ISO 8601; an offset, if present, is converted to UTC
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub activation_date: NaiveDateTime,
    pub updated_by: String,
    /// Defaults to the current UTC time
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub updated_at: Option<NaiveDateTime>,
}

impl From<SensorRequest> for sensors::Model {
    fn from(r: SensorRequest) -> Self {
        Self {
            id: r.id,
            name: r.name,
            sensor_type: r.sensor_type,
            unit: r.unit,
            location: r.location,
            active: r.active,
            activation_date: r.activation_date,
            updated_at: r.updated_at.unwrap_or_else(|| Utc::now().naive_utc()),
            updated_by: r.updated_by,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
