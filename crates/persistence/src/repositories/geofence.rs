//! Geo-fence repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::GeoFenceEntity;
use crate::metrics::QueryTimer;

/// Repository for geo-fence-related database operations.
#[derive(Clone)]
pub struct GeoFenceRepository {
    pool: PgPool,
}

impl GeoFenceRepository {
    /// Creates a new GeoFenceRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new geo-fence.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        name: &str,
        kind: &str,
        center_latitude: f64,
        center_longitude: f64,
        radius_meters: Option<f64>,
        polygon_vertices: Option<serde_json::Value>,
        poi_id: Option<Uuid>,
        campaign_ids: &[Uuid],
        active: bool,
    ) -> Result<GeoFenceEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_geo_fence");
        let result = sqlx::query_as::<_, GeoFenceEntity>(
            r#"
            INSERT INTO geo_fences (name, kind, center_latitude, center_longitude,
                                    radius_meters, polygon_vertices, poi_id,
                                    campaign_ids, active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(kind)
        .bind(center_latitude)
        .bind(center_longitude)
        .bind(radius_meters)
        .bind(polygon_vertices)
        .bind(poi_id)
        .bind(campaign_ids)
        .bind(active)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find geo-fence by UUID.
    pub async fn find_by_fence_id(
        &self,
        fence_id: Uuid,
    ) -> Result<Option<GeoFenceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_geo_fence_by_id");
        let result = sqlx::query_as::<_, GeoFenceEntity>(
            r#"
            SELECT * FROM geo_fences WHERE fence_id = $1
            "#,
        )
        .bind(fence_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List geo-fences, newest first.
    pub async fn list(&self, include_inactive: bool) -> Result<Vec<GeoFenceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_geo_fences");
        let result = if include_inactive {
            sqlx::query_as::<_, GeoFenceEntity>(
                r#"
                SELECT * FROM geo_fences ORDER BY created_at DESC
                "#,
            )
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, GeoFenceEntity>(
                r#"
                SELECT * FROM geo_fences WHERE active = true ORDER BY created_at DESC
                "#,
            )
            .fetch_all(&self.pool)
            .await
        };
        timer.record();
        result
    }

    /// Find active fences linked to at least one of the given campaigns.
    /// The matching pipeline calls this with the active campaign set.
    pub async fn find_active_linked_to(
        &self,
        campaign_ids: &[Uuid],
    ) -> Result<Vec<GeoFenceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_active_geo_fences_linked_to");
        let result = sqlx::query_as::<_, GeoFenceEntity>(
            r#"
            SELECT * FROM geo_fences
            WHERE active = true AND campaign_ids && $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(campaign_ids)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a geo-fence (partial update).
    /// Only provided fields are updated; None values are preserved. The
    /// shape kind is immutable.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        fence_id: Uuid,
        name: Option<&str>,
        center_latitude: Option<f64>,
        center_longitude: Option<f64>,
        radius_meters: Option<f64>,
        polygon_vertices: Option<serde_json::Value>,
        campaign_ids: Option<&[Uuid]>,
        active: Option<bool>,
    ) -> Result<Option<GeoFenceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_geo_fence");
        let result = sqlx::query_as::<_, GeoFenceEntity>(
            r#"
            UPDATE geo_fences SET
                name = COALESCE($2, name),
                center_latitude = COALESCE($3, center_latitude),
                center_longitude = COALESCE($4, center_longitude),
                radius_meters = COALESCE($5, radius_meters),
                polygon_vertices = COALESCE($6, polygon_vertices),
                campaign_ids = COALESCE($7, campaign_ids),
                active = COALESCE($8, active),
                updated_at = NOW()
            WHERE fence_id = $1
            RETURNING *
            "#,
        )
        .bind(fence_id)
        .bind(name)
        .bind(center_latitude)
        .bind(center_longitude)
        .bind(radius_meters)
        .bind(polygon_vertices)
        .bind(campaign_ids)
        .bind(active)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a geo-fence.
    /// Returns the number of rows deleted (0 or 1).
    pub async fn delete(&self, fence_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_geo_fence");
        let result = sqlx::query(
            r#"
            DELETE FROM geo_fences WHERE fence_id = $1
            "#,
        )
        .bind(fence_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
