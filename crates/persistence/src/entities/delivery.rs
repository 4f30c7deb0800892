//! Ad-delivery entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::coordinates::GeoCoordinates;
use domain::models::delivery::{AdDelivery, Interaction};
use domain::models::location::LocationType;

/// Database row mapping for the ad_deliveries table.
///
/// Rows are written by the delivery subsystem; this backend only reads them
/// for insights aggregation.
#[derive(Debug, Clone, FromRow)]
pub struct DeliveryEntity {
    pub id: i64,
    pub campaign_id: Uuid,
    pub device_id: Uuid,
    pub device_type: String,
    pub location_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub impressions: i64,
    pub engagements: i64,
    pub scheduled_at: DateTime<Utc>,
    /// JSONB array of `Interaction` events.
    pub interactions: serde_json::Value,
}

impl From<DeliveryEntity> for AdDelivery {
    fn from(entity: DeliveryEntity) -> Self {
        Self {
            id: entity.id,
            campaign_id: entity.campaign_id,
            device_id: entity.device_id,
            device_type: entity.device_type,
            location_type: entity
                .location_type
                .as_deref()
                .and_then(LocationType::parse),
            coordinates: match (entity.latitude, entity.longitude) {
                (Some(lat), Some(lon)) => Some(GeoCoordinates::new(lat, lon)),
                _ => None,
            },
            impressions: entity.impressions,
            engagements: entity.engagements,
            scheduled_at: entity.scheduled_at,
            interactions: serde_json::from_value::<Vec<Interaction>>(entity.interactions)
                .unwrap_or_default(),
        }
    }
}
