//! Geographic coordinate value type.

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair in degrees.
///
/// Latitude is expected in [-90, 90] and longitude in [-180, 180]; request
/// DTOs enforce the ranges via `shared::validation` before values reach the
/// matching services.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}
