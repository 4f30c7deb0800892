//! Campaign domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Campaign lifecycle status. Only active campaigns participate in matching.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Active,
    Paused,
    Ended,
}

impl CampaignStatus {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Active => "active",
            CampaignStatus::Paused => "paused",
            CampaignStatus::Ended => "ended",
        }
    }

    /// Parses from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(CampaignStatus::Active),
            "paused" => Some(CampaignStatus::Paused),
            "ended" => Some(CampaignStatus::Ended),
            _ => None,
        }
    }
}

/// An advertising campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: i64,
    pub campaign_id: Uuid,
    pub name: String,
    pub status: CampaignStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a campaign.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
}

/// Request payload for changing a campaign's status.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCampaignStatusRequest {
    pub status: CampaignStatus,
}

/// Response payload for campaign operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignResponse {
    pub campaign_id: Uuid,
    pub name: String,
    pub status: CampaignStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Campaign> for CampaignResponse {
    fn from(campaign: Campaign) -> Self {
        Self {
            campaign_id: campaign.campaign_id,
            name: campaign.name,
            status: campaign.status,
            created_at: campaign.created_at,
            updated_at: campaign.updated_at,
        }
    }
}

/// Response for listing campaigns.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCampaignsResponse {
    pub campaigns: Vec<CampaignResponse>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_status_round_trip() {
        for status in [
            CampaignStatus::Active,
            CampaignStatus::Paused,
            CampaignStatus::Ended,
        ] {
            assert_eq!(CampaignStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(CampaignStatus::parse("draft"), None);
    }

    #[test]
    fn test_status_request_deserialization() {
        let request: UpdateCampaignStatusRequest =
            serde_json::from_str(r#"{"status": "paused"}"#).unwrap();
        assert_eq!(request.status, CampaignStatus::Paused);
    }

    #[test]
    fn test_create_campaign_request_validation() {
        let request = CreateCampaignRequest {
            name: "Summer launch".to_string(),
        };
        assert!(request.validate().is_ok());

        let empty = CreateCampaignRequest {
            name: String::new(),
        };
        assert!(empty.validate().is_err());
    }
}
