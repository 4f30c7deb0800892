//! Randomized fence-placement provider.
//!
//! Chooses where a recommended geo-fence goes by perturbing a configured
//! reference point. Placeholder semantics: real spatial clustering of
//! delivery coordinates would live behind the same trait.

use rand::Rng;

use domain::models::coordinates::GeoCoordinates;
use domain::models::location::LocationType;
use domain::services::FencePlacement;

use crate::config::InsightsConfig;

/// Fence placement that jitters around a configured reference point.
#[derive(Debug, Clone)]
pub struct RandomFencePlacement {
    reference: GeoCoordinates,
    jitter_degrees: f64,
    min_radius_meters: f64,
    max_radius_meters: f64,
}

impl RandomFencePlacement {
    pub fn new(config: &InsightsConfig) -> Self {
        Self {
            reference: GeoCoordinates::new(config.reference_latitude, config.reference_longitude),
            jitter_degrees: config.placement_jitter_degrees,
            min_radius_meters: config.min_radius_meters,
            max_radius_meters: config.max_radius_meters,
        }
    }
}

impl FencePlacement for RandomFencePlacement {
    fn place(&self, _location_type: LocationType) -> (GeoCoordinates, f64) {
        let mut rng = rand::thread_rng();
        let lat_offset = rng.gen_range(-self.jitter_degrees..=self.jitter_degrees);
        let lon_offset = rng.gen_range(-self.jitter_degrees..=self.jitter_degrees);
        let radius = if self.min_radius_meters < self.max_radius_meters {
            rng.gen_range(self.min_radius_meters..=self.max_radius_meters)
        } else {
            self.min_radius_meters
        };

        (
            GeoCoordinates::new(
                (self.reference.latitude + lat_offset).clamp(-90.0, 90.0),
                (self.reference.longitude + lon_offset).clamp(-180.0, 180.0),
            ),
            radius,
        )
    }
}
