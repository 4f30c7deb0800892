//! Domain layer for the ad-targeting backend.
//!
//! This crate contains:
//! - Domain models (GeoFence, TargetingRule, Device, Campaign, AdDelivery)
//! - The pure matching services: geometry kernel, geo-fence matcher,
//!   targeting rule engine, POI search and the performance insights
//!   aggregator
//!
//! Nothing in this crate performs I/O; persistence and transport live in
//! their own crates.

pub mod models;
pub mod services;
