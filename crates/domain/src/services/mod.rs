//! Pure domain services: the matching engine and the insights aggregator.

pub mod fence_matching;
pub mod geometry;
pub mod insights;
pub mod poi_search;
pub mod rule_evaluation;

pub use fence_matching::{match_fences, FenceMatch};
pub use insights::{
    aggregate_by_device_type, aggregate_by_location_type, aggregate_by_time_of_day,
    campaign_insights, device_targeting_recommendation, FencePlacement,
};
pub use poi_search::search_pois;
pub use rule_evaluation::{evaluate_rules, RuleContext};
