//! Targeting rule repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::TargetingRuleEntity;
use crate::metrics::QueryTimer;

/// Repository for targeting-rule-related database operations.
#[derive(Clone)]
pub struct TargetingRuleRepository {
    pool: PgPool,
}

impl TargetingRuleRepository {
    /// Creates a new TargetingRuleRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new targeting rule.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        name: &str,
        action: &str,
        location_types: &[String],
        geo_fence_ids: &[Uuid],
        radius_meters: Option<f64>,
        time_window: Option<serde_json::Value>,
        weather_conditions: &[String],
        campaign_ids: &[Uuid],
        priority: i32,
        active: bool,
    ) -> Result<TargetingRuleEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_targeting_rule");
        let result = sqlx::query_as::<_, TargetingRuleEntity>(
            r#"
            INSERT INTO targeting_rules (name, action, location_types, geo_fence_ids,
                                         radius_meters, time_window, weather_conditions,
                                         campaign_ids, priority, active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(action)
        .bind(location_types)
        .bind(geo_fence_ids)
        .bind(radius_meters)
        .bind(time_window)
        .bind(weather_conditions)
        .bind(campaign_ids)
        .bind(priority)
        .bind(active)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find targeting rule by UUID.
    pub async fn find_by_rule_id(
        &self,
        rule_id: Uuid,
    ) -> Result<Option<TargetingRuleEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_targeting_rule_by_id");
        let result = sqlx::query_as::<_, TargetingRuleEntity>(
            r#"
            SELECT * FROM targeting_rules WHERE rule_id = $1
            "#,
        )
        .bind(rule_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List targeting rules ordered by priority, then rule UUID. This is the
    /// order the rule engine folds them in.
    pub async fn list(
        &self,
        include_inactive: bool,
    ) -> Result<Vec<TargetingRuleEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_targeting_rules");
        let result = if include_inactive {
            sqlx::query_as::<_, TargetingRuleEntity>(
                r#"
                SELECT * FROM targeting_rules ORDER BY priority ASC, rule_id ASC
                "#,
            )
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, TargetingRuleEntity>(
                r#"
                SELECT * FROM targeting_rules
                WHERE active = true
                ORDER BY priority ASC, rule_id ASC
                "#,
            )
            .fetch_all(&self.pool)
            .await
        };
        timer.record();
        result
    }

    /// Update a targeting rule (partial update).
    /// Only provided fields are updated; None values are preserved.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        rule_id: Uuid,
        name: Option<&str>,
        action: Option<&str>,
        location_types: Option<&[String]>,
        geo_fence_ids: Option<&[Uuid]>,
        radius_meters: Option<f64>,
        time_window: Option<serde_json::Value>,
        weather_conditions: Option<&[String]>,
        campaign_ids: Option<&[Uuid]>,
        priority: Option<i32>,
        active: Option<bool>,
    ) -> Result<Option<TargetingRuleEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_targeting_rule");
        let result = sqlx::query_as::<_, TargetingRuleEntity>(
            r#"
            UPDATE targeting_rules SET
                name = COALESCE($2, name),
                action = COALESCE($3, action),
                location_types = COALESCE($4, location_types),
                geo_fence_ids = COALESCE($5, geo_fence_ids),
                radius_meters = COALESCE($6, radius_meters),
                time_window = COALESCE($7, time_window),
                weather_conditions = COALESCE($8, weather_conditions),
                campaign_ids = COALESCE($9, campaign_ids),
                priority = COALESCE($10, priority),
                active = COALESCE($11, active),
                updated_at = NOW()
            WHERE rule_id = $1
            RETURNING *
            "#,
        )
        .bind(rule_id)
        .bind(name)
        .bind(action)
        .bind(location_types)
        .bind(geo_fence_ids)
        .bind(radius_meters)
        .bind(time_window)
        .bind(weather_conditions)
        .bind(campaign_ids)
        .bind(priority)
        .bind(active)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a targeting rule.
    /// Returns the number of rows deleted (0 or 1).
    pub async fn delete(&self, rule_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_targeting_rule");
        let result = sqlx::query(
            r#"
            DELETE FROM targeting_rules WHERE rule_id = $1
            "#,
        )
        .bind(rule_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
