mod handlers;
mod types;

pub use handlers::{create_sensor_values, get_sensor_values};
pub use types::{SensorValueRequest, SensorValuesResponse};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{__path_create_sensor_values, __path_get_sensor_values};
