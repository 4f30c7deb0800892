//! POI locator filter/sort contract.
//!
//! Candidate POIs come from an external place-data provider; this service
//! only filters them by radius and category and orders them nearest first.

use crate::models::coordinates::GeoCoordinates;
use crate::models::poi::{PoiWithDistance, PointOfInterest};
use crate::services::geometry;

/// Filters `candidates` to those within `radius_meters` of `origin` whose
/// category is in `categories` (any category when the filter is `None` or
/// empty), sorted ascending by distance. Ties are broken by name so the
/// ordering is deterministic.
pub fn search_pois(
    origin: &GeoCoordinates,
    radius_meters: f64,
    categories: Option<&[String]>,
    candidates: Vec<PointOfInterest>,
) -> Vec<PoiWithDistance> {
    let category_filter: Option<&[String]> = match categories {
        Some(list) if !list.is_empty() => Some(list),
        _ => None,
    };

    let mut results: Vec<PoiWithDistance> = candidates
        .into_iter()
        .filter(|poi| {
            category_filter
                .map(|list| list.iter().any(|c| c == &poi.category))
                .unwrap_or(true)
        })
        .filter_map(|poi| {
            let distance_meters = geometry::distance(origin, &poi.coordinates);
            (distance_meters <= radius_meters).then_some(PoiWithDistance {
                poi,
                distance_meters,
            })
        })
        .collect();

    results.sort_by(|a, b| {
        a.distance_meters
            .total_cmp(&b.distance_meters)
            .then_with(|| a.poi.name.cmp(&b.poi.name))
    });

    results
}
