use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::common::AppState;
use crate::error::{AppError, AppResult};
use crate::routes::parse_day;
use crate::services::aggregation;

#[derive(Debug, Serialize, ToSchema)]
pub struct DailyAggregationResponse {
    pub min_val: f64,
    pub max_val: f64,
    /// 25th percentile
    pub q1: f64,
    pub median: f64,
    /// 75th percentile
    pub q3: f64,
    pub unit: Option<String>,
}

/// Get daily aggregations for a sensor
///
/// Minimum, maximum and quartiles of the readings recorded on `date`.
#[utoipa::path(
    get,
    path = "/daily_aggregations/{sensor_id}/{date}",
    params(
        ("sensor_id" = String, Path, description = "Sensor ID"),
        ("date" = String, Path, description = "Day in YYYY-MM-DD format"),
    ),
    responses(
        (status = 200, description = "Aggregations computed successfully", body = DailyAggregationResponse),
        (status = 401, description = "Missing or invalid API key"),
        (status = 404, description = "Sensor not found"),
        (status = 500, description = "Database error"),
        (status = 502, description = "Malformed date or no readings for that day"),
    ),
    security(("api_key" = [])),
    tag = "aggregations"
)]
pub async fn get_daily_aggregations(
    State(state): State<AppState>,
    Path((sensor_id, date)): Path<(String, String)>,
) -> AppResult<Json<DailyAggregationResponse>> {
    let day = parse_day(&date)?;

    let unit = state
        .repo
        .get_sensor_unit(&sensor_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Sensor '{sensor_id}' not found")))?;

    // Order is irrelevant for the statistics
    let values = state
        .repo
        .get_sensor_values_by_date(&sensor_id, day, false)
        .await?;

    let summary = aggregation::summarize(&values).inspect_err(|_| {
        tracing::warn!(sensor_id = %sensor_id, date = %day, "No readings to aggregate");
    })?;

    Ok(Json(DailyAggregationResponse {
        min_val: summary.min,
        max_val: summary.max,
        q1: summary.q1,
        median: summary.median,
        q3: summary.q3,
        unit,
    }))
}
