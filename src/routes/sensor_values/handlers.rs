use axum::{
    extract::{Path, State},
    Json,
};

use crate::common::AppState;
use crate::db::Record;
use crate::entity::sensor_values;
use crate::error::{AppError, AppResult};
use crate::routes::extract::AppJson;
use crate::routes::{parse_day, MessageResponse};

use super::types::{SensorValueRequest, SensorValuesResponse};

/// Get the readings of a sensor for one day
#[utoipa::path(
    get,
    path = "/sensor_values/{sensor_id}/{date}",
    params(
        ("sensor_id" = String, Path, description = "Sensor ID"),
        ("date" = String, Path, description = "Day in YYYY-MM-DD format"),
    ),
    responses(
        (status = 200, description = "Readings retrieved successfully", body = SensorValuesResponse),
        (status = 401, description = "Missing or invalid API key"),
        (status = 404, description = "Sensor not found"),
        (status = 500, description = "Database error"),
        (status = 502, description = "Malformed date"),
    ),
    security(("api_key" = [])),
    tag = "sensor_values"
)]
pub async fn get_sensor_values(
    State(state): State<AppState>,
    Path((sensor_id, date)): Path<(String, String)>,
) -> AppResult<Json<SensorValuesResponse>> {
    let day = parse_day(&date)?;

    let unit = state
        .repo
        .get_sensor_unit(&sensor_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Sensor '{sensor_id}' not found")))?;

    let values = state
        .repo
        .get_sensor_values_by_date(&sensor_id, day, true)
        .await?;

    Ok(Json(SensorValuesResponse { values, unit }))
}

/// Create readings in bulk
///
/// All readings are inserted in one transaction. A duplicate
/// (sensor, timestamp) pair or an unknown sensor rejects the whole batch.
#[utoipa::path(
    post,
    path = "/sensor_values",
    request_body = Vec<SensorValueRequest>,
    responses(
        (status = 200, description = "Readings created", body = MessageResponse),
        (status = 400, description = "Malformed request body"),
        (status = 401, description = "Missing or invalid API key"),
        (status = 500, description = "Database error"),
    ),
    security(("api_key" = [])),
    tag = "sensor_values"
)]
pub async fn create_sensor_values(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Vec<SensorValueRequest>>,
) -> AppResult<Json<MessageResponse>> {
    let records: Vec<Record> = payload
        .into_iter()
        .map(|r| Record::from(sensor_values::Model::from(r)))
        .collect();

    state.repo.bulk_insert(records).await?;
    Ok(Json(MessageResponse::new("successfully added items!")))
}
