//! POI locator handler.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use validator::Validate;

use domain::models::coordinates::GeoCoordinates;
use domain::models::poi::PoiWithDistance;
use domain::services::search_pois;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_places_lookup_failure;

/// Query parameters for the nearby-POI search.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NearbyPoisQuery {
    #[validate(custom(function = "shared::validation::validate_latitude"))]
    pub latitude: f64,

    #[validate(custom(function = "shared::validation::validate_longitude"))]
    pub longitude: f64,

    /// Search radius in meters.
    #[validate(custom(function = "shared::validation::validate_radius"))]
    pub radius: f64,

    /// Comma-separated category filter.
    pub categories: Option<String>,
}

/// Response for the nearby-POI search.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyPoisResponse {
    pub pois: Vec<PoiWithDistance>,
    pub total: usize,
}

/// Finds POIs near a point, nearest first.
///
/// Candidates come from the configured place-data provider; a provider
/// failure degrades to an empty result rather than an error.
pub async fn nearby_pois(
    State(state): State<AppState>,
    Query(query): Query<NearbyPoisQuery>,
) -> Result<Json<NearbyPoisResponse>, ApiError> {
    query.validate()?;

    let origin = GeoCoordinates::new(query.latitude, query.longitude);
    let categories: Option<Vec<String>> = query.categories.as_deref().map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect()
    });

    let candidates = match state.places.nearby(&origin, query.radius).await {
        Ok(candidates) => candidates,
        Err(err) => {
            warn!(error = %err, "Place provider lookup failed");
            record_places_lookup_failure();
            Vec::new()
        }
    };

    let pois = search_pois(&origin, query.radius, categories.as_deref(), candidates);
    let total = pois.len();

    Ok(Json(NearbyPoisResponse { pois, total }))
}
