//! Campaign repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::CampaignEntity;
use crate::metrics::QueryTimer;

/// Repository for campaign-related database operations.
#[derive(Clone)]
pub struct CampaignRepository {
    pool: PgPool,
}

impl CampaignRepository {
    /// Creates a new CampaignRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new campaign in the active state.
    pub async fn create(&self, name: &str) -> Result<CampaignEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_campaign");
        let result = sqlx::query_as::<_, CampaignEntity>(
            r#"
            INSERT INTO campaigns (name, status)
            VALUES ($1, 'active')
            RETURNING *
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find campaign by UUID.
    pub async fn find_by_campaign_id(
        &self,
        campaign_id: Uuid,
    ) -> Result<Option<CampaignEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_campaign_by_id");
        let result = sqlx::query_as::<_, CampaignEntity>(
            r#"
            SELECT * FROM campaigns WHERE campaign_id = $1
            "#,
        )
        .bind(campaign_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all campaigns, newest first.
    pub async fn list(&self) -> Result<Vec<CampaignEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_campaigns");
        let result = sqlx::query_as::<_, CampaignEntity>(
            r#"
            SELECT * FROM campaigns ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// UUIDs of campaigns currently in the active state. Seeds every
    /// matching pipeline run.
    pub async fn active_campaign_ids(&self) -> Result<Vec<Uuid>, sqlx::Error> {
        let timer = QueryTimer::new("active_campaign_ids");
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT campaign_id FROM campaigns WHERE status = 'active'
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Change a campaign's lifecycle status.
    pub async fn update_status(
        &self,
        campaign_id: Uuid,
        status: &str,
    ) -> Result<Option<CampaignEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_campaign_status");
        let result = sqlx::query_as::<_, CampaignEntity>(
            r#"
            UPDATE campaigns SET
                status = $2,
                updated_at = NOW()
            WHERE campaign_id = $1
            RETURNING *
            "#,
        )
        .bind(campaign_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a campaign.
    /// Returns the number of rows deleted (0 or 1).
    pub async fn delete(&self, campaign_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_campaign");
        let result = sqlx::query(
            r#"
            DELETE FROM campaigns WHERE campaign_id = $1
            "#,
        )
        .bind(campaign_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
