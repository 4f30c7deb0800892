//! Ad-delivery repository for database operations.
//!
//! Read-only: delivery rows are written by the delivery subsystem and only
//! consumed here for insights aggregation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::DeliveryEntity;
use crate::metrics::QueryTimer;

/// Repository for ad-delivery history queries.
#[derive(Clone)]
pub struct DeliveryRepository {
    pool: PgPool,
}

impl DeliveryRepository {
    /// Creates a new DeliveryRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Delivery rows for one campaign scheduled at or after the given
    /// instant. The insights window is applied here so the read stays
    /// bounded regardless of campaign history depth.
    pub async fn find_by_campaign_since(
        &self,
        campaign_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<DeliveryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_deliveries_by_campaign_since");
        let result = sqlx::query_as::<_, DeliveryEntity>(
            r#"
            SELECT * FROM ad_deliveries
            WHERE campaign_id = $1 AND scheduled_at >= $2
            ORDER BY scheduled_at ASC
            "#,
        )
        .bind(campaign_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All delivery rows scheduled at or after the given instant. Feeds the
    /// cross-campaign device-targeting recommendation.
    pub async fn find_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<DeliveryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_deliveries_since");
        let result = sqlx::query_as::<_, DeliveryEntity>(
            r#"
            SELECT * FROM ad_deliveries
            WHERE scheduled_at >= $1
            ORDER BY scheduled_at ASC
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
