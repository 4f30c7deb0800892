//! Performance insights aggregator.
//!
//! Buckets historical delivery records by location type, device type and
//! time of day, derives engagement/conversion rates, and ranks the buckets
//! into targeting recommendations. All maps are ordered so rankings carry a
//! deterministic tie-break.

use std::collections::BTreeMap;

use chrono::Timelike;

use crate::models::coordinates::GeoCoordinates;
use crate::models::delivery::AdDelivery;
use crate::models::insights::{
    BucketStats, CampaignInsights, DeviceTargetingRecommendation, DeviceTypePerformance,
    LocationPerformance, RecommendedGeoFence, TimeOfDay,
};
use crate::models::location::LocationType;

/// Number of location-type buckets surfaced per insights query.
const TOP_LOCATIONS: usize = 5;
/// Number of device-type buckets surfaced per recommendation query.
const TOP_DEVICE_TYPES: usize = 3;
/// Number of time-of-day windows surfaced per location type.
const TOP_TIME_WINDOWS: usize = 2;

/// Chooses coordinates and a radius for a recommended geo-fence.
///
/// The production implementation perturbs a configured reference point with
/// injected randomness; it stands in for real spatial clustering of delivery
/// coordinates, which would change observable behavior and lives behind this
/// seam on purpose.
pub trait FencePlacement {
    fn place(&self, location_type: LocationType) -> (GeoCoordinates, f64);
}

fn accumulate(stats: &mut BucketStats, record: &AdDelivery) {
    stats.impressions += record.impressions;
    stats.engagements += record.engagements;
    stats.conversions += record.conversions();
}

/// Buckets records by the location type of the delivery. Records without a
/// location type do not contribute.
pub fn aggregate_by_location_type(records: &[AdDelivery]) -> BTreeMap<LocationType, BucketStats> {
    let mut buckets = BTreeMap::new();
    for record in records {
        if let Some(ty) = record.location_type {
            accumulate(buckets.entry(ty).or_default(), record);
        }
    }
    buckets
}

/// Buckets records by device type.
pub fn aggregate_by_device_type(records: &[AdDelivery]) -> BTreeMap<String, BucketStats> {
    let mut buckets: BTreeMap<String, BucketStats> = BTreeMap::new();
    for record in records {
        accumulate(buckets.entry(record.device_type.clone()).or_default(), record);
    }
    buckets
}

/// Buckets records by the time-of-day partition of their scheduled time.
pub fn aggregate_by_time_of_day(records: &[AdDelivery]) -> BTreeMap<TimeOfDay, BucketStats> {
    let mut buckets = BTreeMap::new();
    for record in records {
        let slot = TimeOfDay::from_hour(record.scheduled_at.hour());
        accumulate(buckets.entry(slot).or_default(), record);
    }
    buckets
}

/// Buckets records by location type, then by time of day within each type.
fn aggregate_time_of_day_per_location(
    records: &[AdDelivery],
) -> BTreeMap<LocationType, BTreeMap<TimeOfDay, BucketStats>> {
    let mut buckets: BTreeMap<LocationType, BTreeMap<TimeOfDay, BucketStats>> = BTreeMap::new();
    for record in records {
        if let Some(ty) = record.location_type {
            let slot = TimeOfDay::from_hour(record.scheduled_at.hour());
            accumulate(
                buckets.entry(ty).or_default().entry(slot).or_default(),
                record,
            );
        }
    }
    buckets
}

/// Location-type buckets ranked descending by conversion rate, ties broken
/// by impressions then bucket key.
fn ranked_locations(records: &[AdDelivery]) -> Vec<(LocationType, BucketStats)> {
    let mut ranked: Vec<(LocationType, BucketStats)> =
        aggregate_by_location_type(records).into_iter().collect();
    ranked.sort_by(|(a_ty, a), (b_ty, b)| {
        b.conversion_rate()
            .total_cmp(&a.conversion_rate())
            .then_with(|| b.impressions.cmp(&a.impressions))
            .then_with(|| a_ty.cmp(b_ty))
    });
    ranked
}

/// Builds the insights result for one campaign's delivery history.
///
/// Top 5 location types by conversion rate, plus one synthesized geo-fence
/// recommendation per top location type.
pub fn campaign_insights(
    records: &[AdDelivery],
    placement: &dyn FencePlacement,
) -> CampaignInsights {
    let ranked = ranked_locations(records);

    let top_performing_locations: Vec<LocationPerformance> = ranked
        .iter()
        .take(TOP_LOCATIONS)
        .map(|(ty, stats)| LocationPerformance {
            location_type: *ty,
            ctr: stats.ctr(),
            conversion_rate: stats.conversion_rate(),
            impressions: stats.impressions,
        })
        .collect();

    let recommended_geo_fences: Vec<RecommendedGeoFence> = top_performing_locations
        .iter()
        .map(|perf| {
            let (coordinates, radius_meters) = placement.place(perf.location_type);
            RecommendedGeoFence {
                name: format!("{} hotspot", perf.location_type.as_str()),
                coordinates,
                radius_meters,
                potential_reach: perf.impressions,
            }
        })
        .collect();

    CampaignInsights {
        top_performing_locations,
        recommended_geo_fences,
    }
}

/// Builds the device-targeting recommendation from global delivery history.
///
/// Top 3 device types by engagement rate, the top 2 time-of-day windows per
/// location type by engagement rate, and location types ranked by
/// conversion rate.
pub fn device_targeting_recommendation(records: &[AdDelivery]) -> DeviceTargetingRecommendation {
    let mut device_ranked: Vec<(String, BucketStats)> =
        aggregate_by_device_type(records).into_iter().collect();
    device_ranked.sort_by(|(a_ty, a), (b_ty, b)| {
        b.ctr()
            .total_cmp(&a.ctr())
            .then_with(|| b.impressions.cmp(&a.impressions))
            .then_with(|| a_ty.cmp(b_ty))
    });

    let recommended_device_types: Vec<DeviceTypePerformance> = device_ranked
        .into_iter()
        .take(TOP_DEVICE_TYPES)
        .map(|(device_type, stats)| DeviceTypePerformance {
            ctr: stats.ctr(),
            impressions: stats.impressions,
            device_type,
        })
        .collect();

    let mut time_of_day_recommendations: BTreeMap<String, Vec<TimeOfDay>> = BTreeMap::new();
    for (location_type, slots) in aggregate_time_of_day_per_location(records) {
        let mut ranked: Vec<(TimeOfDay, BucketStats)> = slots.into_iter().collect();
        ranked.sort_by(|(a_slot, a), (b_slot, b)| {
            b.ctr()
                .total_cmp(&a.ctr())
                .then_with(|| b.impressions.cmp(&a.impressions))
                .then_with(|| a_slot.cmp(b_slot))
        });
        time_of_day_recommendations.insert(
            location_type.as_str().to_string(),
            ranked
                .into_iter()
                .take(TOP_TIME_WINDOWS)
                .map(|(slot, _)| slot)
                .collect(),
        );
    }

    let location_type_recommendations: Vec<LocationType> = ranked_locations(records)
        .into_iter()
        .take(TOP_LOCATIONS)
        .map(|(ty, _)| ty)
        .collect();

    DeviceTargetingRecommendation {
        recommended_device_types,
        time_of_day_recommendations,
        location_type_recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use crate::models::delivery::{Interaction, InteractionKind};

    /// Places every fence at a fixed point with a fixed radius.
    struct FixedPlacement;

    impl FencePlacement for FixedPlacement {
        fn place(&self, _location_type: LocationType) -> (GeoCoordinates, f64) {
            (GeoCoordinates::new(50.0, 10.0), 750.0)
        }
    }

    fn delivery(
        device_type: &str,
        location_type: Option<LocationType>,
        hour: u32,
        impressions: i64,
        engagements: i64,
        conversions: usize,
    ) -> AdDelivery {
        AdDelivery {
            id: 0,
            campaign_id: Uuid::new_v4(),
            device_id: Uuid::new_v4(),
            device_type: device_type.to_string(),
            location_type,
            coordinates: None,
            impressions,
            engagements,
            scheduled_at: Utc.with_ymd_and_hms(2024, 6, 3, hour, 0, 0).unwrap(),
            interactions: std::iter::repeat(Interaction {
                kind: InteractionKind::Conversion,
                occurred_at: Utc::now(),
            })
            .take(conversions)
            .collect(),
        }
    }

    #[test]
    fn test_aggregate_by_location_type() {
        let records = vec![
            delivery("kiosk", Some(LocationType::Commercial), 10, 100, 10, 2),
            delivery("kiosk", Some(LocationType::Commercial), 14, 50, 5, 1),
            delivery("kiosk", Some(LocationType::Transit), 10, 80, 4, 0),
            delivery("kiosk", None, 10, 999, 99, 9),
        ];

        let buckets = aggregate_by_location_type(&records);
        assert_eq!(buckets.len(), 2);

        let commercial = buckets[&LocationType::Commercial];
        assert_eq!(commercial.impressions, 150);
        assert_eq!(commercial.engagements, 15);
        assert_eq!(commercial.conversions, 3);

        let transit = buckets[&LocationType::Transit];
        assert_eq!(transit.impressions, 80);
    }

    #[test]
    fn test_aggregate_by_device_type() {
        let records = vec![
            delivery("kiosk", None, 10, 100, 10, 0),
            delivery("billboard", None, 10, 200, 2, 0),
            delivery("kiosk", None, 20, 50, 5, 1),
        ];

        let buckets = aggregate_by_device_type(&records);
        assert_eq!(buckets["kiosk"].impressions, 150);
        assert_eq!(buckets["kiosk"].engagements, 15);
        assert_eq!(buckets["billboard"].impressions, 200);
    }

    #[test]
    fn test_aggregate_by_time_of_day() {
        let records = vec![
            delivery("kiosk", None, 8, 10, 1, 0),   // morning
            delivery("kiosk", None, 13, 20, 2, 0),  // afternoon
            delivery("kiosk", None, 19, 30, 3, 0),  // evening
            delivery("kiosk", None, 23, 40, 4, 0),  // night
            delivery("kiosk", None, 3, 5, 1, 0),    // night
        ];

        let buckets = aggregate_by_time_of_day(&records);
        assert_eq!(buckets[&TimeOfDay::Morning].impressions, 10);
        assert_eq!(buckets[&TimeOfDay::Afternoon].impressions, 20);
        assert_eq!(buckets[&TimeOfDay::Evening].impressions, 30);
        assert_eq!(buckets[&TimeOfDay::Night].impressions, 45);
    }

    #[test]
    fn test_campaign_insights_ranks_by_conversion_rate() {
        let records = vec![
            // transit: conversion rate 0.5
            delivery("kiosk", Some(LocationType::Transit), 10, 100, 4, 2),
            // commercial: conversion rate 0.1
            delivery("kiosk", Some(LocationType::Commercial), 10, 100, 10, 1),
            // outdoor: conversion rate 0
            delivery("kiosk", Some(LocationType::Outdoor), 10, 100, 10, 0),
        ];

        let insights = campaign_insights(&records, &FixedPlacement);
        let order: Vec<LocationType> = insights
            .top_performing_locations
            .iter()
            .map(|l| l.location_type)
            .collect();
        assert_eq!(
            order,
            vec![
                LocationType::Transit,
                LocationType::Commercial,
                LocationType::Outdoor
            ]
        );
    }

    #[test]
    fn test_campaign_insights_caps_top_locations_at_five() {
        let records = vec![
            delivery("kiosk", Some(LocationType::Residential), 10, 10, 1, 1),
            delivery("kiosk", Some(LocationType::Commercial), 10, 10, 2, 1),
            delivery("kiosk", Some(LocationType::Industrial), 10, 10, 3, 1),
            delivery("kiosk", Some(LocationType::Entertainment), 10, 10, 4, 1),
            delivery("kiosk", Some(LocationType::Educational), 10, 10, 5, 1),
            delivery("kiosk", Some(LocationType::Transit), 10, 10, 6, 1),
            delivery("kiosk", Some(LocationType::Outdoor), 10, 10, 7, 1),
        ];

        let insights = campaign_insights(&records, &FixedPlacement);
        assert_eq!(insights.top_performing_locations.len(), 5);
        assert_eq!(insights.recommended_geo_fences.len(), 5);
    }

    #[test]
    fn test_recommended_fences_use_placement_provider() {
        let records = vec![delivery("kiosk", Some(LocationType::Transit), 10, 500, 50, 5)];

        let insights = campaign_insights(&records, &FixedPlacement);
        assert_eq!(insights.recommended_geo_fences.len(), 1);
        let fence = &insights.recommended_geo_fences[0];
        assert_eq!(fence.name, "transit hotspot");
        assert_eq!(fence.coordinates, GeoCoordinates::new(50.0, 10.0));
        assert_eq!(fence.radius_meters, 750.0);
        assert_eq!(fence.potential_reach, 500);
    }

    #[test]
    fn test_empty_history_yields_empty_insights() {
        let insights = campaign_insights(&[], &FixedPlacement);
        assert!(insights.top_performing_locations.is_empty());
        assert!(insights.recommended_geo_fences.is_empty());

        let recommendation = device_targeting_recommendation(&[]);
        assert!(recommendation.recommended_device_types.is_empty());
        assert!(recommendation.time_of_day_recommendations.is_empty());
        assert!(recommendation.location_type_recommendations.is_empty());
    }

    #[test]
    fn test_device_recommendation_ranks_by_engagement_rate() {
        let records = vec![
            // billboard ctr 0.01
            delivery("billboard", Some(LocationType::Outdoor), 10, 1000, 10, 0),
            // kiosk ctr 0.2
            delivery("kiosk", Some(LocationType::Commercial), 10, 100, 20, 0),
            // tablet ctr 0.05
            delivery("tablet", Some(LocationType::Transit), 10, 200, 10, 0),
            // vehicle ctr 0.002
            delivery("vehicle", Some(LocationType::Transit), 10, 500, 1, 0),
        ];

        let recommendation = device_targeting_recommendation(&records);
        let order: Vec<&str> = recommendation
            .recommended_device_types
            .iter()
            .map(|d| d.device_type.as_str())
            .collect();
        // Top 3 only, best first.
        assert_eq!(order, vec!["kiosk", "tablet", "billboard"]);
    }

    #[test]
    fn test_time_of_day_recommendations_per_location_type() {
        let records = vec![
            // Commercial: evening ctr 0.3, morning ctr 0.1, night ctr 0.05
            delivery("kiosk", Some(LocationType::Commercial), 19, 100, 30, 0),
            delivery("kiosk", Some(LocationType::Commercial), 9, 100, 10, 0),
            delivery("kiosk", Some(LocationType::Commercial), 23, 100, 5, 0),
        ];

        let recommendation = device_targeting_recommendation(&records);
        let slots = &recommendation.time_of_day_recommendations["commercial"];
        assert_eq!(slots.as_slice(), &[TimeOfDay::Evening, TimeOfDay::Morning]);
    }

    #[test]
    fn test_rates_never_panic_on_zero_denominators() {
        let records = vec![
            delivery("kiosk", Some(LocationType::Commercial), 10, 0, 0, 0),
            delivery("billboard", Some(LocationType::Transit), 10, 0, 0, 3),
        ];

        let insights = campaign_insights(&records, &FixedPlacement);
        for location in &insights.top_performing_locations {
            assert!((0.0..=1.0).contains(&location.ctr));
            assert!((0.0..=1.0).contains(&location.conversion_rate));
        }

        let recommendation = device_targeting_recommendation(&records);
        for device in &recommendation.recommended_device_types {
            assert!((0.0..=1.0).contains(&device.ctr));
        }
    }
}
