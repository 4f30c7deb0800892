//! Point-of-interest model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::coordinates::GeoCoordinates;

/// A named place with a category, used for proximity-based targeting.
///
/// POIs are supplied by an external place-data provider; the domain only
/// carries the fields the filter/sort contract needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterest {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub coordinates: GeoCoordinates,
}

/// A POI annotated with its distance from a query point, ordered nearest
/// first.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PoiWithDistance {
    #[serde(flatten)]
    pub poi: PointOfInterest,
    pub distance_meters: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poi_serialization() {
        let poi = PointOfInterest {
            id: Uuid::new_v4(),
            name: "Central Mall".to_string(),
            category: "shopping".to_string(),
            coordinates: GeoCoordinates::new(1.0, 2.0),
        };
        let json = serde_json::to_string(&poi).unwrap();
        assert!(json.contains("\"name\":\"Central Mall\""));
        assert!(json.contains("\"category\":\"shopping\""));
    }

    #[test]
    fn test_poi_with_distance_flattens_poi_fields() {
        let entry = PoiWithDistance {
            poi: PointOfInterest {
                id: Uuid::new_v4(),
                name: "Station".to_string(),
                category: "transit".to_string(),
                coordinates: GeoCoordinates::new(0.0, 0.0),
            },
            distance_meters: 120.5,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"name\":\"Station\""));
        assert!(json.contains("\"distanceMeters\":120.5"));
    }
}
