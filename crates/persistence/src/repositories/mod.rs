//! Repository implementations for database operations.

pub mod campaign;
pub mod delivery;
pub mod device;
pub mod geofence;
pub mod targeting_rule;

pub use campaign::CampaignRepository;
pub use delivery::DeliveryRepository;
pub use device::DeviceRepository;
pub use geofence::GeoFenceRepository;
pub use targeting_rule::TargetingRuleRepository;
