use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, Schema};

use crate::entity::{sensor_values, sensors};

/// Create the `sensors` and `sensor_values` tables (and their indexes) from
/// the entity definitions if they do not exist yet.
///
/// This is a bootstrap for empty databases and tests, not a migration tool:
/// existing tables are left untouched.
///
/// # Errors
///
/// Returns an error if any DDL statement fails.
pub async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Parent first so the foreign key on sensor_values resolves
    create_table_for(db, sensors::Entity).await?;
    create_table_for(db, sensor_values::Entity).await?;
    tracing::info!("Schema ready");
    Ok(())
}

async fn create_table_for<E>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut table = schema.create_table_from_entity(entity);
    table.if_not_exists();
    db.execute(backend.build(&table)).await?;

    for mut index in schema.create_index_from_entity(entity) {
        index.if_not_exists();
        db.execute(backend.build(&index)).await?;
    }

    tracing::debug!(table = entity.table_name(), "Table ensured");
    Ok(())
}
