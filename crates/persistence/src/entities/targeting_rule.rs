//! Targeting rule entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::location::LocationType;
use domain::models::targeting_rule::{RuleAction, TargetingRule, TimeWindow};

/// Database row mapping for the targeting_rules table.
#[derive(Debug, Clone, FromRow)]
pub struct TargetingRuleEntity {
    pub id: i64,
    pub rule_id: Uuid,
    pub name: String,
    pub action: String,
    pub location_types: Vec<String>, // SQLx maps TEXT[] to Vec<String>
    pub geo_fence_ids: Vec<Uuid>,
    pub radius_meters: Option<f64>,
    /// JSONB serialization of `TimeWindow`.
    pub time_window: Option<serde_json::Value>,
    pub weather_conditions: Vec<String>,
    pub campaign_ids: Vec<Uuid>,
    pub priority: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TargetingRuleEntity> for TargetingRule {
    fn from(entity: TargetingRuleEntity) -> Self {
        Self {
            id: entity.id,
            rule_id: entity.rule_id,
            name: entity.name,
            // Constrained to include/exclude by the schema; an unexpected
            // value fails closed.
            action: RuleAction::parse(&entity.action).unwrap_or(RuleAction::Exclude),
            location_types: entity
                .location_types
                .iter()
                .filter_map(|s| LocationType::parse(s))
                .collect(),
            geo_fence_ids: entity.geo_fence_ids,
            radius_meters: entity.radius_meters,
            time_window: entity
                .time_window
                .and_then(|v| serde_json::from_value::<TimeWindow>(v).ok()),
            weather_conditions: entity.weather_conditions,
            campaign_ids: entity.campaign_ids,
            priority: entity.priority,
            active: entity.active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
