//! Geo-fence domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::coordinates::GeoCoordinates;

/// Shape discriminator for a geo-fence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FenceKind {
    Circle,
    Polygon,
    Poi,
}

impl FenceKind {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FenceKind::Circle => "circle",
            FenceKind::Polygon => "polygon",
            FenceKind::Poi => "poi",
        }
    }

    /// Parses from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "circle" => Some(FenceKind::Circle),
            "polygon" => Some(FenceKind::Polygon),
            "poi" => Some(FenceKind::Poi),
            _ => None,
        }
    }
}

/// Typed geometry of a geo-fence.
///
/// Poi-anchored fences are carried in the model and schema but are never
/// evaluated by the matcher; only circle and polygon fences can contain a
/// point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FenceGeometry {
    Circle { radius_meters: f64 },
    Polygon { vertices: Vec<GeoCoordinates> },
    Poi { poi_id: Uuid },
}

impl FenceGeometry {
    pub fn kind(&self) -> FenceKind {
        match self {
            FenceGeometry::Circle { .. } => FenceKind::Circle,
            FenceGeometry::Polygon { .. } => FenceKind::Polygon,
            FenceGeometry::Poi { .. } => FenceKind::Poi,
        }
    }
}

/// A named spatial region linked to one or more campaigns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoFence {
    pub id: i64,
    pub fence_id: Uuid,
    pub name: String,
    /// Anchor point: circle center, polygon reference point, or POI anchor.
    pub center: GeoCoordinates,
    pub geometry: FenceGeometry,
    pub campaign_ids: Vec<Uuid>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

/// Request payload for creating a geo-fence.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGeoFenceRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    pub kind: FenceKind,

    #[validate(custom(function = "shared::validation::validate_latitude"))]
    pub latitude: f64,

    #[validate(custom(function = "shared::validation::validate_longitude"))]
    pub longitude: f64,

    /// Required for circle fences.
    #[validate(custom(function = "shared::validation::validate_radius"))]
    pub radius_meters: Option<f64>,

    /// Required for polygon fences, at least 3 vertices.
    pub polygon: Option<Vec<GeoCoordinates>>,

    /// Required for poi fences.
    pub poi_id: Option<Uuid>,

    #[serde(default)]
    pub campaign_ids: Vec<Uuid>,

    #[serde(default = "default_active")]
    pub active: bool,
}

impl CreateGeoFenceRequest {
    /// Builds the typed geometry, rejecting shape/field mismatches.
    pub fn geometry(&self) -> Result<FenceGeometry, String> {
        match self.kind {
            FenceKind::Circle => {
                let radius_meters = self
                    .radius_meters
                    .ok_or("Circle fences require radiusMeters")?;
                Ok(FenceGeometry::Circle { radius_meters })
            }
            FenceKind::Polygon => {
                let vertices = self
                    .polygon
                    .clone()
                    .ok_or("Polygon fences require a polygon vertex list")?;
                if vertices.len() < 3 {
                    return Err("Polygon fences require at least 3 vertices".to_string());
                }
                Ok(FenceGeometry::Polygon { vertices })
            }
            FenceKind::Poi => {
                let poi_id = self.poi_id.ok_or("Poi fences require poiId")?;
                Ok(FenceGeometry::Poi { poi_id })
            }
        }
    }
}

/// Request payload for updating a geo-fence (partial update; the shape kind
/// itself is immutable).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGeoFenceRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(custom(function = "shared::validation::validate_latitude"))]
    pub latitude: Option<f64>,

    #[validate(custom(function = "shared::validation::validate_longitude"))]
    pub longitude: Option<f64>,

    #[validate(custom(function = "shared::validation::validate_radius"))]
    pub radius_meters: Option<f64>,

    pub polygon: Option<Vec<GeoCoordinates>>,

    pub campaign_ids: Option<Vec<Uuid>>,

    pub active: Option<bool>,
}

/// Response payload for geo-fence operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoFenceResponse {
    pub fence_id: Uuid,
    pub name: String,
    pub center: GeoCoordinates,
    pub geometry: FenceGeometry,
    pub campaign_ids: Vec<Uuid>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GeoFence> for GeoFenceResponse {
    fn from(fence: GeoFence) -> Self {
        Self {
            fence_id: fence.fence_id,
            name: fence.name,
            center: fence.center,
            geometry: fence.geometry,
            campaign_ids: fence.campaign_ids,
            active: fence.active,
            created_at: fence.created_at,
            updated_at: fence.updated_at,
        }
    }
}

/// Response for listing geo-fences.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGeoFencesResponse {
    pub geo_fences: Vec<GeoFenceResponse>,
    pub total: usize,
}
