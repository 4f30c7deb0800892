//! Campaign entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::campaign::{Campaign, CampaignStatus};

/// Database row mapping for the campaigns table.
#[derive(Debug, Clone, FromRow)]
pub struct CampaignEntity {
    pub id: i64,
    pub campaign_id: Uuid,
    pub name: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CampaignEntity> for Campaign {
    fn from(entity: CampaignEntity) -> Self {
        Self {
            id: entity.id,
            campaign_id: entity.campaign_id,
            name: entity.name,
            // Constrained by the schema; an unexpected value means the
            // campaign never matches.
            status: CampaignStatus::parse(&entity.status).unwrap_or(CampaignStatus::Ended),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
