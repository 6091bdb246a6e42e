use axum::{
    extract::{Path, State},
    Json,
};

use crate::common::AppState;
use crate::db::Record;
use crate::entity::sensors;
use crate::error::{AppError, AppResult};
use crate::routes::extract::AppJson;

use super::types::{MessageResponse, SensorRequest, SensorResponse};

/// List all sensors
///
/// Sensors are ordered by activation date, newest first.
#[utoipa::path(
    get,
    path = "/sensors",
    responses(
        (status = 200, description = "Sensors retrieved successfully", body = Vec<SensorResponse>),
        (status = 401, description = "Missing or invalid API key"),
        (status = 500, description = "Database error"),
    ),
    security(("api_key" = [])),
    tag = "sensors"
)]
pub async fn list_sensors(State(state): State<AppState>) -> AppResult<Json<Vec<SensorResponse>>> {
    let sensors_list = state.repo.list_sensors().await?;
    Ok(Json(sensors_list.into_iter().map(SensorResponse::from).collect()))
}

/// Get a sensor by ID
#[utoipa::path(
    get,
    path = "/sensors/{sensor_id}",
    params(
        ("sensor_id" = String, Path, description = "Sensor ID"),
    ),
    responses(
        (status = 200, description = "Sensor retrieved successfully", body = SensorResponse),
        (status = 401, description = "Missing or invalid API key"),
        (status = 404, description = "Sensor not found"),
        (status = 500, description = "Database error"),
    ),
    security(("api_key" = [])),
    tag = "sensors"
)]
pub async fn get_sensor(
    State(state): State<AppState>,
    Path(sensor_id): Path<String>,
) -> AppResult<Json<SensorResponse>> {
    state
        .repo
        .get_sensor_by_id(&sensor_id)
        .await?
        .map(|s| Json(SensorResponse::from(s)))
        .ok_or_else(|| AppError::NotFound(format!("Sensor '{sensor_id}' not found")))
}

/// List sensors at a location
#[utoipa::path(
    get,
    path = "/sensors/location/{location}",
    params(
        ("location" = String, Path, description = "Exact location name"),
    ),
    responses(
        (status = 200, description = "Sensors retrieved successfully", body = Vec<SensorResponse>),
        (status = 401, description = "Missing or invalid API key"),
        (status = 500, description = "Database error"),
    ),
    security(("api_key" = [])),
    tag = "sensors"
)]
pub async fn list_sensors_by_location(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> AppResult<Json<Vec<SensorResponse>>> {
    let sensors_list = state.repo.list_sensors_by_location(&location).await?;
    Ok(Json(sensors_list.into_iter().map(SensorResponse::from).collect()))
}

/// Create sensors in bulk
///
/// All sensors are inserted in one transaction; if any is rejected none are
/// stored.
#[utoipa::path(
    post,
    path = "/sensors",
    request_body = Vec<SensorRequest>,
    responses(
        (status = 200, description = "Sensors created", body = MessageResponse),
        (status = 400, description = "Malformed request body"),
        (status = 401, description = "Missing or invalid API key"),
        (status = 500, description = "Database error"),
    ),
    security(("api_key" = [])),
    tag = "sensors"
)]
pub async fn create_sensors(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Vec<SensorRequest>>,
) -> AppResult<Json<MessageResponse>> {
    let records: Vec<Record> = payload
        .into_iter()
        .map(|r| Record::from(sensors::Model::from(r)))
        .collect();

    state.repo.bulk_insert(records).await?;
    Ok(Json(MessageResponse::new("successfully added items!")))
}

/// Delete a sensor and all of its readings
///
/// Deleting an unknown sensor is not an error.
#[utoipa::path(
    delete,
    path = "/sensors/{sensor_id}",
    params(
        ("sensor_id" = String, Path, description = "Sensor ID"),
    ),
    responses(
        (status = 200, description = "Sensor deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid API key"),
        (status = 500, description = "Database error"),
    ),
    security(("api_key" = [])),
    tag = "sensors"
)]
pub async fn delete_sensor(
    State(state): State<AppState>,
    Path(sensor_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.repo.delete_sensor(&sensor_id).await?;
    Ok(Json(MessageResponse::new("successfully deleted sensor!")))
}
