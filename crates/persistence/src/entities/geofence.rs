//! Geo-fence entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::coordinates::GeoCoordinates;
use domain::models::geofence::{FenceGeometry, GeoFence};

/// Database row mapping for the geo_fences table.
///
/// Shape-specific columns are nullable; check constraints in the schema
/// guarantee the column set matching `kind` is populated.
#[derive(Debug, Clone, FromRow)]
pub struct GeoFenceEntity {
    pub id: i64,
    pub fence_id: Uuid,
    pub name: String,
    pub kind: String,
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub radius_meters: Option<f64>,
    /// JSONB array of `{latitude, longitude}` objects for polygon fences.
    pub polygon_vertices: Option<serde_json::Value>,
    pub poi_id: Option<Uuid>,
    pub campaign_ids: Vec<Uuid>, // SQLx maps UUID[] to Vec<Uuid>
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GeoFenceEntity {
    fn geometry(&self) -> FenceGeometry {
        match self.kind.as_str() {
            "polygon" => FenceGeometry::Polygon {
                // Malformed vertex blobs decode to an empty list, which the
                // matcher treats as a non-matching fence.
                vertices: self
                    .polygon_vertices
                    .as_ref()
                    .and_then(|v| serde_json::from_value(v.clone()).ok())
                    .unwrap_or_default(),
            },
            "poi" => FenceGeometry::Poi {
                // NOT NULL for poi rows per the schema check constraint.
                poi_id: self.poi_id.unwrap_or_else(Uuid::nil),
            },
            _ => FenceGeometry::Circle {
                radius_meters: self.radius_meters.unwrap_or(0.0),
            },
        }
    }
}

impl From<GeoFenceEntity> for GeoFence {
    fn from(entity: GeoFenceEntity) -> Self {
        let geometry = entity.geometry();
        Self {
            id: entity.id,
            fence_id: entity.fence_id,
            name: entity.name,
            center: GeoCoordinates::new(entity.center_latitude, entity.center_longitude),
            geometry,
            campaign_ids: entity.campaign_ids,
            active: entity.active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle_entity() -> GeoFenceEntity {
        GeoFenceEntity {
            id: 1,
            fence_id: Uuid::new_v4(),
            name: "Downtown".to_string(),
            kind: "circle".to_string(),
            center_latitude: 40.7128,
            center_longitude: -74.0060,
            radius_meters: Some(500.0),
            polygon_vertices: None,
            poi_id: None,
            campaign_ids: vec![Uuid::new_v4()],
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_circle_entity_to_domain() {
        let entity = circle_entity();
        let fence: GeoFence = entity.clone().into();

        assert_eq!(fence.fence_id, entity.fence_id);
        assert_eq!(fence.center, GeoCoordinates::new(40.7128, -74.0060));
        assert_eq!(
            fence.geometry,
            FenceGeometry::Circle {
                radius_meters: 500.0
            }
        );
        assert_eq!(fence.campaign_ids, entity.campaign_ids);
    }

    #[test]
    fn test_polygon_entity_decodes_vertices() {
        let mut entity = circle_entity();
        entity.kind = "polygon".to_string();
        entity.radius_meters = None;
        entity.polygon_vertices = Some(serde_json::json!([
            {"latitude": 0.0, "longitude": 0.0},
            {"latitude": 0.0, "longitude": 1.0},
            {"latitude": 1.0, "longitude": 0.0}
        ]));

        let fence: GeoFence = entity.into();
        match fence.geometry {
            FenceGeometry::Polygon { vertices } => {
                assert_eq!(vertices.len(), 3);
                assert_eq!(vertices[1], GeoCoordinates::new(0.0, 1.0));
            }
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_polygon_entity_with_malformed_vertices() {
        let mut entity = circle_entity();
        entity.kind = "polygon".to_string();
        entity.polygon_vertices = Some(serde_json::json!({"not": "a list"}));

        let fence: GeoFence = entity.into();
        assert_eq!(fence.geometry, FenceGeometry::Polygon { vertices: vec![] });
    }

    #[test]
    fn test_poi_entity_to_domain() {
        let poi_id = Uuid::new_v4();
        let mut entity = circle_entity();
        entity.kind = "poi".to_string();
        entity.radius_meters = None;
        entity.poi_id = Some(poi_id);

        let fence: GeoFence = entity.into();
        assert_eq!(fence.geometry, FenceGeometry::Poi { poi_id });
    }
}
