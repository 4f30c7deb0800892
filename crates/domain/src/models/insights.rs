//! Performance insights models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::coordinates::GeoCoordinates;
use crate::models::location::LocationType;

/// Fixed time-of-day partition used when bucketing delivery history.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Partition boundaries: morning [05,12), afternoon [12,17),
    /// evening [17,22), night otherwise.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=21 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    /// Converts to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }
}

/// Accumulated counts for one aggregation bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketStats {
    pub impressions: i64,
    pub engagements: i64,
    pub conversions: i64,
}

impl BucketStats {
    /// Click-through rate: engagements / impressions, 0 when there are no
    /// impressions. Always within [0, 1].
    pub fn ctr(&self) -> f64 {
        if self.impressions <= 0 {
            return 0.0;
        }
        (self.engagements as f64 / self.impressions as f64).clamp(0.0, 1.0)
    }

    /// Conversion rate: conversions / engagements, 0 when there are no
    /// engagements. Always within [0, 1].
    pub fn conversion_rate(&self) -> f64 {
        if self.engagements <= 0 {
            return 0.0;
        }
        (self.conversions as f64 / self.engagements as f64).clamp(0.0, 1.0)
    }
}

/// Performance summary for a single location type.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocationPerformance {
    pub location_type: LocationType,
    pub ctr: f64,
    pub conversion_rate: f64,
    pub impressions: i64,
}

/// Performance summary for a single device type.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceTypePerformance {
    pub device_type: String,
    pub ctr: f64,
    pub impressions: i64,
}

/// A synthesized geo-fence suggestion derived from top-performing location
/// types.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedGeoFence {
    pub name: String,
    pub coordinates: GeoCoordinates,
    pub radius_meters: f64,
    pub potential_reach: i64,
}

/// Insights result for a single campaign.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CampaignInsights {
    pub top_performing_locations: Vec<LocationPerformance>,
    pub recommended_geo_fences: Vec<RecommendedGeoFence>,
}

/// Device-targeting recommendation result.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeviceTargetingRecommendation {
    pub recommended_device_types: Vec<DeviceTypePerformance>,
    /// Top time-of-day windows per location type, keyed by the location
    /// type's string form for a stable serialized order.
    pub time_of_day_recommendations: BTreeMap<String, Vec<TimeOfDay>>,
    pub location_type_recommendations: Vec<LocationType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_of_day_partition() {
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(11), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(16), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(21), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(22), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(4), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(0), TimeOfDay::Night);
    }

    #[test]
    fn test_ctr_zero_denominator() {
        let stats = BucketStats {
            impressions: 0,
            engagements: 5,
            conversions: 0,
        };
        assert_eq!(stats.ctr(), 0.0);
    }

    #[test]
    fn test_conversion_rate_zero_denominator() {
        let stats = BucketStats {
            impressions: 100,
            engagements: 0,
            conversions: 3,
        };
        assert_eq!(stats.conversion_rate(), 0.0);
    }

    #[test]
    fn test_rates_within_unit_interval() {
        let stats = BucketStats {
            impressions: 10,
            engagements: 25,
            conversions: 40,
        };
        // Over-counted inputs still clamp into [0, 1].
        assert_eq!(stats.ctr(), 1.0);
        assert_eq!(stats.conversion_rate(), 1.0);

        let normal = BucketStats {
            impressions: 200,
            engagements: 30,
            conversions: 6,
        };
        assert!((normal.ctr() - 0.15).abs() < 1e-12);
        assert!((normal.conversion_rate() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_time_of_day_serialization() {
        assert_eq!(
            serde_json::to_string(&TimeOfDay::Evening).unwrap(),
            "\"evening\""
        );
    }
}
