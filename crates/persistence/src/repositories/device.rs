//! Device repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::DeviceEntity;
use crate::metrics::QueryTimer;

/// Repository for device-related database operations.
#[derive(Clone)]
pub struct DeviceRepository {
    pool: PgPool,
}

impl DeviceRepository {
    /// Creates a new DeviceRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a new device.
    pub async fn register(
        &self,
        name: &str,
        device_type: &str,
    ) -> Result<DeviceEntity, sqlx::Error> {
        let timer = QueryTimer::new("register_device");
        let result = sqlx::query_as::<_, DeviceEntity>(
            r#"
            INSERT INTO devices (name, device_type)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(device_type)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find device by UUID.
    pub async fn find_by_device_id(
        &self,
        device_id: Uuid,
    ) -> Result<Option<DeviceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_device_by_id");
        let result = sqlx::query_as::<_, DeviceEntity>(
            r#"
            SELECT * FROM devices WHERE device_id = $1
            "#,
        )
        .bind(device_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all devices, newest first.
    pub async fn list(&self) -> Result<Vec<DeviceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_devices");
        let result = sqlx::query_as::<_, DeviceEntity>(
            r#"
            SELECT * FROM devices ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Overwrite a device's single last-known location slot.
    /// Returns the number of rows affected (0 when the device is unknown).
    pub async fn update_last_location(
        &self,
        device_id: Uuid,
        location: serde_json::Value,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("update_device_last_location");
        let result = sqlx::query(
            r#"
            UPDATE devices SET
                last_location = $2,
                updated_at = NOW()
            WHERE device_id = $1
            "#,
        )
        .bind(device_id)
        .bind(location)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Delete a device.
    /// Returns the number of rows deleted (0 or 1).
    pub async fn delete(&self, device_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_device");
        let result = sqlx::query(
            r#"
            DELETE FROM devices WHERE device_id = $1
            "#,
        )
        .bind(device_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
