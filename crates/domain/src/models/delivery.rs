//! Historical ad-delivery records.
//!
//! Read-only inputs to the performance insights aggregator. The delivery
//! subsystem owns these rows; nothing in this backend mutates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::coordinates::GeoCoordinates;
use crate::models::location::LocationType;

/// Kind of a recorded interaction event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Click,
    Conversion,
}

impl InteractionKind {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::Click => "click",
            InteractionKind::Conversion => "conversion",
        }
    }

    /// Parses from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "click" => Some(InteractionKind::Click),
            "conversion" => Some(InteractionKind::Conversion),
            _ => None,
        }
    }
}

/// A single interaction event attached to a delivery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub kind: InteractionKind,
    pub occurred_at: DateTime<Utc>,
}

/// One historical delivery of a campaign to a device.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdDelivery {
    pub id: i64,
    pub campaign_id: Uuid,
    pub device_id: Uuid,
    pub device_type: String,
    pub location_type: Option<LocationType>,
    pub coordinates: Option<GeoCoordinates>,
    pub impressions: i64,
    pub engagements: i64,
    pub scheduled_at: DateTime<Utc>,
    pub interactions: Vec<Interaction>,
}

impl AdDelivery {
    /// Number of conversion events recorded for this delivery.
    pub fn conversions(&self) -> i64 {
        self.interactions
            .iter()
            .filter(|i| i.kind == InteractionKind::Conversion)
            .count() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interaction_kind_round_trip() {
        assert_eq!(InteractionKind::parse("click"), Some(InteractionKind::Click));
        assert_eq!(
            InteractionKind::parse("conversion"),
            Some(InteractionKind::Conversion)
        );
        assert_eq!(InteractionKind::parse("view"), None);
    }

    #[test]
    fn test_conversions_counts_only_conversion_events() {
        let delivery = AdDelivery {
            id: 1,
            campaign_id: Uuid::new_v4(),
            device_id: Uuid::new_v4(),
            device_type: "kiosk".to_string(),
            location_type: Some(LocationType::Commercial),
            coordinates: None,
            impressions: 100,
            engagements: 10,
            scheduled_at: Utc::now(),
            interactions: vec![
                Interaction {
                    kind: InteractionKind::Click,
                    occurred_at: Utc::now(),
                },
                Interaction {
                    kind: InteractionKind::Conversion,
                    occurred_at: Utc::now(),
                },
                Interaction {
                    kind: InteractionKind::Conversion,
                    occurred_at: Utc::now(),
                },
            ],
        };
        assert_eq!(delivery.conversions(), 2);
    }

    #[test]
    fn test_conversions_zero_without_interactions() {
        let delivery = AdDelivery {
            id: 1,
            campaign_id: Uuid::new_v4(),
            device_id: Uuid::new_v4(),
            device_type: "billboard".to_string(),
            location_type: None,
            coordinates: None,
            impressions: 0,
            engagements: 0,
            scheduled_at: Utc::now(),
            interactions: vec![],
        };
        assert_eq!(delivery.conversions(), 0);
    }
}
