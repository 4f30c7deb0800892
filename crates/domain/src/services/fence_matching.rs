//! Geo-fence matcher: which fences contain a point, and which campaigns
//! those fences carry.

use std::collections::HashSet;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::coordinates::GeoCoordinates;
use crate::models::geofence::{FenceGeometry, GeoFence};
use crate::services::geometry;

/// Result of matching a point against a set of geo-fences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FenceMatch {
    /// UUIDs of the fences containing the point.
    pub fence_ids: HashSet<Uuid>,
    /// Union of campaign UUIDs attached to the matching fences. Seeds the
    /// rule engine's candidate set.
    pub campaign_ids: HashSet<Uuid>,
}

/// Matches a point against the given fences.
///
/// Callers pass fences whose linked campaigns include at least one active
/// campaign; this function only performs geometry. Poi-anchored fences are
/// never evaluated. No side effects beyond diagnostics.
pub fn match_fences(point: &GeoCoordinates, fences: &[GeoFence]) -> FenceMatch {
    let mut result = FenceMatch::default();

    for fence in fences {
        let contained = match &fence.geometry {
            FenceGeometry::Circle { radius_meters } => {
                geometry::contains_circle(&fence.center, point, *radius_meters)
            }
            FenceGeometry::Polygon { vertices } => {
                if vertices.len() < 3 {
                    // Misconfigured fence: contract stays "no match", but the
                    // condition must not be silent.
                    warn!(
                        fence_id = %fence.fence_id,
                        vertices = vertices.len(),
                        "Polygon fence has fewer than 3 vertices, treating as non-match"
                    );
                }
                geometry::contains_polygon(vertices, point)
            }
            FenceGeometry::Poi { poi_id } => {
                debug!(
                    fence_id = %fence.fence_id,
                    poi_id = %poi_id,
                    "Poi-anchored fence skipped by containment matching"
                );
                false
            }
        };

        if contained {
            result.fence_ids.insert(fence.fence_id);
            result.campaign_ids.extend(fence.campaign_ids.iter().copied());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn circle_fence(fence_id: Uuid, lat: f64, lon: f64, radius: f64, campaigns: Vec<Uuid>) -> GeoFence {
        GeoFence {
            id: 0,
            fence_id,
            name: "circle".to_string(),
            center: GeoCoordinates::new(lat, lon),
            geometry: FenceGeometry::Circle {
                radius_meters: radius,
            },
            campaign_ids: campaigns,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn polygon_fence(fence_id: Uuid, vertices: Vec<GeoCoordinates>, campaigns: Vec<Uuid>) -> GeoFence {
        GeoFence {
            id: 0,
            fence_id,
            name: "polygon".to_string(),
            center: GeoCoordinates::new(0.0, 0.0),
            geometry: FenceGeometry::Polygon { vertices },
            campaign_ids: campaigns,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_circle_fence_contains_nearby_device() {
        let campaign = Uuid::new_v4();
        let fence_id = Uuid::new_v4();
        let fence = circle_fence(fence_id, 0.0, 0.0, 1000.0, vec![campaign]);

        // ~555 m north of the center
        let result = match_fences(&GeoCoordinates::new(0.005, 0.0), &[fence]);
        assert_eq!(result.fence_ids, HashSet::from([fence_id]));
        assert_eq!(result.campaign_ids, HashSet::from([campaign]));
    }

    #[test]
    fn test_circle_fence_excludes_far_device() {
        let fence = circle_fence(Uuid::new_v4(), 0.0, 0.0, 1000.0, vec![Uuid::new_v4()]);

        // ~2220 m north of the center
        let result = match_fences(&GeoCoordinates::new(0.02, 0.0), &[fence]);
        assert!(result.fence_ids.is_empty());
        assert!(result.campaign_ids.is_empty());
    }

    #[test]
    fn test_campaign_union_across_matching_fences() {
        let c1 = Uuid::new_v4();
        let c2 = Uuid::new_v4();
        let shared = Uuid::new_v4();
        let fences = vec![
            circle_fence(Uuid::new_v4(), 0.0, 0.0, 1000.0, vec![c1, shared]),
            circle_fence(Uuid::new_v4(), 0.001, 0.0, 1000.0, vec![c2, shared]),
        ];

        let result = match_fences(&GeoCoordinates::new(0.0, 0.0), &fences);
        assert_eq!(result.fence_ids.len(), 2);
        assert_eq!(result.campaign_ids, HashSet::from([c1, c2, shared]));
    }

    #[test]
    fn test_polygon_miss_does_not_contribute() {
        let inside_campaign = Uuid::new_v4();
        let outside_campaign = Uuid::new_v4();
        let circle_id = Uuid::new_v4();

        let fences = vec![
            circle_fence(circle_id, 0.0, 0.0, 1000.0, vec![inside_campaign]),
            polygon_fence(
                Uuid::new_v4(),
                vec![
                    GeoCoordinates::new(10.0, 10.0),
                    GeoCoordinates::new(10.0, 11.0),
                    GeoCoordinates::new(11.0, 11.0),
                ],
                vec![outside_campaign],
            ),
        ];

        let result = match_fences(&GeoCoordinates::new(0.0, 0.0), &fences);
        assert_eq!(result.fence_ids, HashSet::from([circle_id]));
        assert_eq!(result.campaign_ids, HashSet::from([inside_campaign]));
    }

    #[test]
    fn test_degenerate_polygon_never_matches() {
        let fence = polygon_fence(
            Uuid::new_v4(),
            vec![GeoCoordinates::new(0.0, 0.0), GeoCoordinates::new(0.0, 1.0)],
            vec![Uuid::new_v4()],
        );
        let result = match_fences(&GeoCoordinates::new(0.0, 0.5), &[fence]);
        assert!(result.fence_ids.is_empty());
    }

    #[test]
    fn test_poi_fence_never_matches() {
        let fence = GeoFence {
            id: 0,
            fence_id: Uuid::new_v4(),
            name: "poi".to_string(),
            center: GeoCoordinates::new(0.0, 0.0),
            geometry: FenceGeometry::Poi {
                poi_id: Uuid::new_v4(),
            },
            campaign_ids: vec![Uuid::new_v4()],
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        // Even a point at the fence anchor does not match a poi fence.
        let result = match_fences(&GeoCoordinates::new(0.0, 0.0), &[fence]);
        assert!(result.fence_ids.is_empty());
        assert!(result.campaign_ids.is_empty());
    }

    #[test]
    fn test_no_fences_yields_empty_match() {
        let result = match_fences(&GeoCoordinates::new(0.0, 0.0), &[]);
        assert_eq!(result, FenceMatch::default());
    }
}
