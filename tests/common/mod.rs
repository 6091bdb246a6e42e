//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::DatabaseConnection;
use sensor_api::config::PoolConfig;
use sensor_api::db::{self, SensorRepository, SessionScope};
use sensor_api::entity::{sensor_values, sensors};

/// A single connection keeps the in-memory SQLite database alive and shared.
pub fn test_pool_config() -> PoolConfig {
    PoolConfig {
        size: 1,
        max_overflow: 0,
        recycle: Duration::from_secs(3600),
        acquire_timeout: Duration::from_secs(5),
    }
}

/// Fresh in-memory database without any tables.
pub async fn empty_database() -> DatabaseConnection {
    db::pool::connect_url("sqlite::memory:", &test_pool_config())
        .await
        .expect("sqlite in-memory connection")
}

/// Fresh in-memory database with the sensor schema.
pub async fn database() -> DatabaseConnection {
    let conn = empty_database().await;
    db::schema::create_tables(&conn)
        .await
        .expect("schema creation");
    conn
}

pub async fn repository() -> SensorRepository {
    SensorRepository::new(SessionScope::new(database().await))
}

pub fn at(date: &str, time: &str) -> NaiveDateTime {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .expect("valid date")
        .and_time(time.parse().expect("valid time"))
}

pub fn sensor(id: &str, location: &str, activated: NaiveDateTime) -> sensors::Model {
    sensors::Model {
        id: id.to_string(),
        name: format!("{id} sensor"),
        sensor_type: "temperature".to_string(),
        unit: Some("C".to_string()),
        location: location.to_string(),
        active: true,
        activation_date: activated,
        updated_at: activated,
        updated_by: "tests".to_string(),
    }
}

pub fn reading(sensor_id: &str, created: NaiveDateTime, value: f64) -> sensor_values::Model {
    sensor_values::Model {
        sensor_id: sensor_id.to_string(),
        creation_date: created,
        value: Some(value),
    }
}
