//! Location-update matching pipeline.
//!
//! validate → record last location → fence match → rule fold. The pipeline
//! aborts before any geometry runs when the device is unknown or inactive.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use domain::models::geofence::{FenceGeometry, GeoFence};
use domain::models::location::{LocationContext, LocationUpdateResponse, UpdateLocationRequest};
use domain::models::targeting_rule::TargetingRule;
use domain::models::coordinates::GeoCoordinates;
use domain::services::{evaluate_rules, match_fences, RuleContext};
use persistence::repositories::{
    CampaignRepository, DeviceRepository, GeoFenceRepository, TargetingRuleRepository,
};

use crate::error::ApiError;
use crate::middleware::metrics::record_malformed_polygon;
use crate::services::clock::Clock;

/// Orchestrates one location update end to end.
#[derive(Clone)]
pub struct MatchingService {
    devices: DeviceRepository,
    fences: GeoFenceRepository,
    rules: TargetingRuleRepository,
    campaigns: CampaignRepository,
    clock: Arc<dyn Clock>,
}

impl MatchingService {
    pub fn new(pool: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self {
            devices: DeviceRepository::new(pool.clone()),
            fences: GeoFenceRepository::new(pool.clone()),
            rules: TargetingRuleRepository::new(pool.clone()),
            campaigns: CampaignRepository::new(pool),
            clock,
        }
    }

    /// Runs the full pipeline for one validated location update.
    pub async fn process_location_update(
        &self,
        request: &UpdateLocationRequest,
    ) -> Result<LocationUpdateResponse, ApiError> {
        let context = build_location_context(request)?;

        // Recorder step: unknown or inactive devices abort before geometry.
        let device = self
            .devices
            .find_by_device_id(request.device_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Device not found".to_string()))?;
        if !device.active {
            return Err(ApiError::NotFound("Device not found".to_string()));
        }

        let context_json = serde_json::to_value(&context)
            .map_err(|e| ApiError::Internal(format!("Failed to serialize location: {}", e)))?;
        let updated = self
            .devices
            .update_last_location(request.device_id, context_json)
            .await?;
        if updated == 0 {
            return Err(ApiError::NotFound("Device not found".to_string()));
        }

        let active_campaigns: HashSet<Uuid> =
            self.campaigns.active_campaign_ids().await?.into_iter().collect();

        let fence_entities = self
            .fences
            .find_active_linked_to(&active_campaigns.iter().copied().collect::<Vec<_>>())
            .await?;
        let fences: Vec<GeoFence> = fence_entities.into_iter().map(GeoFence::from).collect();
        count_malformed_polygons(&fences);

        let point = GeoCoordinates::new(request.latitude, request.longitude);
        let fence_match = match_fences(&point, &fences);

        let rule_entities = self.rules.list(false).await?;
        let rules: Vec<TargetingRule> =
            rule_entities.into_iter().map(TargetingRule::from).collect();

        let ctx = RuleContext {
            location_type: request.location_type,
            matched_fence_ids: fence_match.fence_ids.clone(),
            now: self.clock.now(),
        };
        let eligible = evaluate_rules(&fence_match.campaign_ids, &rules, &active_campaigns, &ctx);

        Ok(LocationUpdateResponse {
            device_id: request.device_id,
            matched_geo_fence_ids: sorted(fence_match.fence_ids),
            eligible_campaign_ids: sorted(eligible),
        })
    }
}

/// Builds the location context recorded on the device row.
fn build_location_context(request: &UpdateLocationRequest) -> Result<LocationContext, ApiError> {
    let captured_at = Utc
        .timestamp_millis_opt(request.timestamp)
        .single()
        .ok_or_else(|| ApiError::Validation("Timestamp out of range".to_string()))?;

    Ok(LocationContext {
        coordinates: GeoCoordinates::new(request.latitude, request.longitude),
        accuracy: request.accuracy,
        captured_at,
        location_name: request.location_name.clone(),
        location_type: request.location_type,
        nearby_pois: request.nearby_pois.clone(),
    })
}

/// Counts configured-but-degenerate polygon fences so the silent non-match
/// path stays visible.
fn count_malformed_polygons(fences: &[GeoFence]) {
    for fence in fences {
        if let FenceGeometry::Polygon { vertices } = &fence.geometry {
            if vertices.len() < 3 {
                warn!(fence_id = %fence.fence_id, "Polygon fence has fewer than 3 vertices");
                record_malformed_polygon();
            }
        }
    }
}

/// Stable response ordering for set-valued results.
fn sorted(ids: HashSet<Uuid>) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = ids.into_iter().collect();
    ids.sort();
    ids
}
