//! Location update handler: the matching pipeline entry point.

use axum::{extract::State, Json};
use validator::Validate;

use domain::models::location::{LocationUpdateResponse, UpdateLocationRequest};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_location_update;

/// Processes one device location update.
///
/// Records the device's last known location, matches active geo-fences and
/// folds targeting rules, and returns the campaigns eligible for delivery at
/// the reported position.
pub async fn update_location(
    State(state): State<AppState>,
    Json(request): Json<UpdateLocationRequest>,
) -> Result<Json<LocationUpdateResponse>, ApiError> {
    request.validate()?;

    let response = state.matching.process_location_update(&request).await?;

    tracing::info!(
        device_id = %response.device_id,
        matched_fences = response.matched_geo_fence_ids.len(),
        eligible_campaigns = response.eligible_campaign_ids.len(),
        "Location update processed"
    );
    record_location_update();

    Ok(Json(response))
}
