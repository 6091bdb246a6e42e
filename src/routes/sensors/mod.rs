mod handlers;
mod types;

pub use handlers::{create_sensors, delete_sensor, get_sensor, list_sensors, list_sensors_by_location};
pub use types::{MessageResponse, SensorRequest, SensorResponse};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{
    __path_create_sensors, __path_delete_sensor, __path_get_sensor, __path_list_sensors,
    __path_list_sensors_by_location,
};
