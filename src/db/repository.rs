use chrono::{NaiveDate, NaiveTime};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

use crate::entity::{sensor_values, sensors};

use super::session::{SessionError, SessionScope};

/// Maximum rows per INSERT statement
const BATCH_SIZE: usize = 1000;

/// One row of a heterogeneous bulk insert.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Sensor(sensors::Model),
    Value(sensor_values::Model),
}

impl From<sensors::Model> for Record {
    fn from(model: sensors::Model) -> Self {
        Self::Sensor(model)
    }
}

impl From<sensor_values::Model> for Record {
    fn from(model: sensor_values::Model) -> Self {
        Self::Value(model)
    }
}

/// Queries and mutations over sensors and their readings.
///
/// Every method runs in exactly one [`SessionScope`] transaction.
#[derive(Debug, Clone)]
pub struct SensorRepository {
    session: SessionScope,
}

impl SensorRepository {
    #[must_use]
    pub fn new(session: SessionScope) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn session(&self) -> &SessionScope {
        &self.session
    }

    /// All sensors, newest activation first.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the query fails.
    pub async fn list_sensors(&self) -> Result<Vec<sensors::Model>, SessionError> {
        self.session
            .with_session(|txn| {
                Box::pin(async move {
                    sensors::Entity::find()
                        .order_by_desc(sensors::Column::ActivationDate)
                        .all(txn)
                        .await
                })
            })
            .await
    }

    /// A single sensor by primary key. `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the query fails.
    pub async fn get_sensor_by_id(&self, id: &str) -> Result<Option<sensors::Model>, SessionError> {
        let id = id.to_owned();
        self.session
            .with_session(move |txn| {
                Box::pin(async move { sensors::Entity::find_by_id(id).one(txn).await })
            })
            .await
    }

    /// Sensors whose location matches exactly.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the query fails.
    pub async fn list_sensors_by_location(
        &self,
        location: &str,
    ) -> Result<Vec<sensors::Model>, SessionError> {
        let location = location.to_owned();
        self.session
            .with_session(move |txn| {
                Box::pin(async move {
                    sensors::Entity::find()
                        .filter(sensors::Column::Location.eq(location))
                        .all(txn)
                        .await
                })
            })
            .await
    }

    /// Unit of a sensor.
    ///
    /// The outer `Option` is `None` when no sensor has this id; the inner one
    /// mirrors the nullable `unit` column.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the query fails.
    pub async fn get_sensor_unit(
        &self,
        sensor_id: &str,
    ) -> Result<Option<Option<String>>, SessionError> {
        let sensor_id = sensor_id.to_owned();
        self.session
            .with_session(move |txn| {
                Box::pin(async move {
                    sensors::Entity::find_by_id(sensor_id)
                        .select_only()
                        .column(sensors::Column::Unit)
                        .into_tuple::<Option<String>>()
                        .one(txn)
                        .await
                })
            })
            .await
    }

    /// Readings of one sensor whose `creation_date` falls on `date`
    /// (`[date 00:00, date+1 00:00)`).
    ///
    /// With `ordered` the values come back by ascending `creation_date`;
    /// without it the store returns them in whatever order is cheapest, which
    /// is all aggregation needs.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the query fails.
    pub async fn get_sensor_values_by_date(
        &self,
        sensor_id: &str,
        date: NaiveDate,
        ordered: bool,
    ) -> Result<Vec<Option<f64>>, SessionError> {
        let sensor_id = sensor_id.to_owned();
        let start = date.and_time(NaiveTime::MIN);
        let end = date.succ_opt().map(|next| next.and_time(NaiveTime::MIN));

        self.session
            .with_session(move |txn| {
                Box::pin(async move {
                    let mut query = sensor_values::Entity::find()
                        .select_only()
                        .column(sensor_values::Column::Value)
                        .filter(sensor_values::Column::SensorId.eq(sensor_id))
                        .filter(sensor_values::Column::CreationDate.gte(start));

                    if let Some(end) = end {
                        query = query.filter(sensor_values::Column::CreationDate.lt(end));
                    }

                    if ordered {
                        query = query.order_by_asc(sensor_values::Column::CreationDate);
                    }

                    query.into_tuple::<Option<f64>>().all(txn).await
                })
            })
            .await
    }

    /// Insert sensors and readings in one transaction.
    ///
    /// Sensors are written before readings so a batch may introduce a sensor
    /// together with its values. Either every row commits or none does.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if any row is rejected (duplicate key,
    /// unknown sensor, ...). Nothing is persisted in that case.
    pub async fn bulk_insert(&self, records: Vec<Record>) -> Result<(), SessionError> {
        if records.is_empty() {
            tracing::debug!("Bulk insert called with an empty batch");
            return Ok(());
        }

        let mut new_sensors = Vec::new();
        let mut new_values = Vec::new();
        for record in records {
            match record {
                Record::Sensor(s) => new_sensors.push(sensors::ActiveModel {
                    id: Set(s.id),
                    name: Set(s.name),
                    sensor_type: Set(s.sensor_type),
                    unit: Set(s.unit),
                    location: Set(s.location),
                    active: Set(s.active),
                    activation_date: Set(s.activation_date),
                    updated_at: Set(s.updated_at),
                    updated_by: Set(s.updated_by),
                }),
                Record::Value(v) => new_values.push(sensor_values::ActiveModel {
                    sensor_id: Set(v.sensor_id),
                    creation_date: Set(v.creation_date),
                    value: Set(v.value),
                }),
            }
        }

        let sensors_count = new_sensors.len();
        let values_count = new_values.len();

        self.session
            .with_session(move |txn| {
                Box::pin(async move {
                    for chunk in new_sensors.chunks(BATCH_SIZE) {
                        sensors::Entity::insert_many(chunk.to_vec())
                            .exec_without_returning(txn)
                            .await?;
                    }
                    for chunk in new_values.chunks(BATCH_SIZE) {
                        sensor_values::Entity::insert_many(chunk.to_vec())
                            .exec_without_returning(txn)
                            .await?;
                    }
                    Ok(())
                })
            })
            .await?;

        tracing::info!(
            sensors = sensors_count,
            values = values_count,
            "Bulk insert committed"
        );
        Ok(())
    }

    /// Delete a sensor and all of its readings.
    ///
    /// Readings are removed first, then the sensor, in one transaction.
    /// Returns `false` (and changes nothing) when the sensor does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if either delete fails.
    pub async fn delete_sensor(&self, id: &str) -> Result<bool, SessionError> {
        let id = id.to_owned();
        self.session
            .with_session(move |txn| {
                Box::pin(async move {
                    if sensors::Entity::find_by_id(id.as_str())
                        .one(txn)
                        .await?
                        .is_none()
                    {
                        tracing::warn!(sensor_id = %id, "No sensor found, delete skipped");
                        return Ok(false);
                    }

                    let values = sensor_values::Entity::delete_many()
                        .filter(sensor_values::Column::SensorId.eq(id.as_str()))
                        .exec(txn)
                        .await?;

                    sensors::Entity::delete_by_id(id.as_str()).exec(txn).await?;

                    tracing::info!(
                        sensor_id = %id,
                        values_deleted = values.rows_affected,
                        "Sensor deleted"
                    );
                    Ok(true)
                })
            })
            .await
    }
}
