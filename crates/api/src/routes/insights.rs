//! Insights endpoint handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use domain::models::insights::{CampaignInsights, DeviceTargetingRecommendation};
use persistence::repositories::CampaignRepository;

use crate::app::AppState;
use crate::error::ApiError;

/// Returns performance insights and fence recommendations for one campaign.
pub async fn campaign_insights(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<CampaignInsights>, ApiError> {
    let repo = CampaignRepository::new(state.pool.clone());
    repo.find_by_campaign_id(campaign_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Campaign not found".to_string()))?;

    let insights = state.insights.campaign_insights(campaign_id).await;
    Ok(Json(insights))
}

/// Returns the cross-campaign device-targeting recommendation.
pub async fn device_targeting(
    State(state): State<AppState>,
) -> Result<Json<DeviceTargetingRecommendation>, ApiError> {
    let recommendation = state.insights.device_targeting().await;
    Ok(Json(recommendation))
}
