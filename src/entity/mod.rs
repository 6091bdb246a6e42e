pub mod sensor_values;
pub mod sensors;
