pub mod aggregations;
pub mod auth;
pub mod extract;
pub mod health;
pub mod sensor_values;
pub mod sensors;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_scalar::{Scalar, Servable};

use crate::common::AppState;
use crate::error::{AppError, AppResult};

pub use sensors::MessageResponse;

/// Parse a `YYYY-MM-DD` path segment.
///
/// A malformed date is an uncategorized failure: the detail is logged and the
/// client only sees the generic 502 body.
pub fn parse_day(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| AppError::Unknown(format!("invalid date '{date}': {e}")))
}

struct ApiKeyAddon;

impl Modify for ApiKeyAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_key",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-API-KEY"))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        sensors::list_sensors,
        sensors::get_sensor,
        sensors::list_sensors_by_location,
        sensors::create_sensors,
        sensors::delete_sensor,
        sensor_values::get_sensor_values,
        sensor_values::create_sensor_values,
        aggregations::get_daily_aggregations,
    ),
    components(
        schemas(
            sensors::SensorResponse,
            sensors::SensorRequest,
            sensors::MessageResponse,
            sensor_values::SensorValuesResponse,
            sensor_values::SensorValueRequest,
            aggregations::DailyAggregationResponse,
        )
    ),
    modifiers(&ApiKeyAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "sensors", description = "Sensor metadata"),
        (name = "sensor_values", description = "Raw sensor readings"),
        (name = "aggregations", description = "Daily statistics over readings"),
    ),
    info(
        title = "Sensor API",
        description = "CRUD API for sensor metadata and time-stamped sensor readings",
        version = "0.1.0"
    )
)]
struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/sensors", get(sensors::list_sensors).post(sensors::create_sensors))
        .route(
            "/sensors/{sensor_id}",
            get(sensors::get_sensor).delete(sensors::delete_sensor),
        )
        .route(
            "/sensors/location/{location}",
            get(sensors::list_sensors_by_location),
        )
        .route("/sensor_values", post(sensor_values::create_sensor_values))
        .route(
            "/sensor_values/{sensor_id}/{date}",
            get(sensor_values::get_sensor_values),
        )
        .route(
            "/daily_aggregations/{sensor_id}/{date}",
            get(aggregations::get_daily_aggregations),
        )
        .route("/healthz", get(health::healthz))
        .layer(RequestBodyLimitLayer::new(1024 * 1024)); // 1MB body limit

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    // Every route, docs included, sits behind the API key
    Router::new()
        .merge(api_routes)
        .merge(docs_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ))
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
