//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod campaign;
pub mod delivery;
pub mod device;
pub mod geofence;
pub mod targeting_rule;

pub use campaign::CampaignEntity;
pub use delivery::DeliveryEntity;
pub use device::DeviceEntity;
pub use geofence::GeoFenceEntity;
pub use targeting_rule::TargetingRuleEntity;
