//! HTTP route handlers.

pub mod campaigns;
pub mod devices;
pub mod geofences;
pub mod health;
pub mod insights;
pub mod locations;
pub mod pois;
pub mod targeting_rules;
