//! Device location context model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::coordinates::GeoCoordinates;
use crate::models::poi::PointOfInterest;

/// Category of the place a device is currently located at.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    Residential,
    Commercial,
    Industrial,
    Entertainment,
    Educational,
    Transit,
    Outdoor,
}

impl LocationType {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Residential => "residential",
            LocationType::Commercial => "commercial",
            LocationType::Industrial => "industrial",
            LocationType::Entertainment => "entertainment",
            LocationType::Educational => "educational",
            LocationType::Transit => "transit",
            LocationType::Outdoor => "outdoor",
        }
    }

    /// Parses from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "residential" => Some(LocationType::Residential),
            "commercial" => Some(LocationType::Commercial),
            "industrial" => Some(LocationType::Industrial),
            "entertainment" => Some(LocationType::Entertainment),
            "educational" => Some(LocationType::Educational),
            "transit" => Some(LocationType::Transit),
            "outdoor" => Some(LocationType::Outdoor),
            _ => None,
        }
    }
}

/// A device's current position and surroundings.
///
/// Ephemeral: each update overwrites the owning device's single last-known
/// location slot. No history is retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationContext {
    pub coordinates: GeoCoordinates,
    pub accuracy: Option<f64>,
    pub captured_at: DateTime<Utc>,
    pub location_name: Option<String>,
    pub location_type: Option<LocationType>,
    pub nearby_pois: Option<Vec<PointOfInterest>>,
}

/// Request payload for a device location update.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationRequest {
    pub device_id: Uuid,

    #[validate(custom(function = "shared::validation::validate_latitude"))]
    pub latitude: f64,

    #[validate(custom(function = "shared::validation::validate_longitude"))]
    pub longitude: f64,

    #[validate(custom(function = "shared::validation::validate_accuracy"))]
    pub accuracy: Option<f64>,

    /// Timestamp in milliseconds since epoch
    #[validate(custom(function = "shared::validation::validate_timestamp"))]
    pub timestamp: i64,

    #[validate(length(min = 1, max = 200, message = "Location name must be 1-200 characters"))]
    pub location_name: Option<String>,

    pub location_type: Option<LocationType>,

    pub nearby_pois: Option<Vec<PointOfInterest>>,
}

/// Result of a location update: the campaigns eligible for delivery at the
/// reported position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationUpdateResponse {
    pub device_id: Uuid,
    pub matched_geo_fence_ids: Vec<Uuid>,
    pub eligible_campaign_ids: Vec<Uuid>,
}

/// Last known location for a device.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LastLocationResponse {
    pub device_id: Uuid,
    #[serde(flatten)]
    pub context: LocationContext,
}
