//! Domain models.

pub mod campaign;
pub mod coordinates;
pub mod delivery;
pub mod device;
pub mod geofence;
pub mod insights;
pub mod location;
pub mod poi;
pub mod targeting_rule;

pub use campaign::{Campaign, CampaignStatus};
pub use coordinates::GeoCoordinates;
pub use delivery::{AdDelivery, Interaction, InteractionKind};
pub use device::Device;
pub use geofence::{FenceGeometry, FenceKind, GeoFence};
pub use insights::TimeOfDay;
pub use location::{LocationContext, LocationType};
pub use poi::PointOfInterest;
pub use targeting_rule::{DayOfWeek, RuleAction, TargetingRule, TimeWindow};
