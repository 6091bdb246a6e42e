use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::sensor_values;
use crate::routes::extract::timestamp;

#[derive(Debug, Serialize, ToSchema)]
pub struct SensorValuesResponse {
    /// Readings of the day ordered by creation time (null for missing values)
    pub values: Vec<Option<f64>>,
    /// Unit of the owning sensor
    pub unit: Option<String>,
}

/// Reading payload for bulk creation.
///
/// The unit belongs to the sensor; a `unit` field sent by older clients is
/// ignored.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SensorValueRequest {
    pub sensor_id: String,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub creation_date: NaiveDateTime,
}

impl From<SensorValueRequest> for sensor_values::Model {
    fn from(r: SensorValueRequest) -> Self {
        Self {
            sensor_id: r.sensor_id,
            creation_date: r.creation_date,
            value: r.value,
        }
    }
}
