//! Campaign management handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use domain::models::campaign::{
    Campaign, CampaignResponse, CreateCampaignRequest, ListCampaignsResponse,
    UpdateCampaignStatusRequest,
};
use persistence::repositories::CampaignRepository;

use crate::app::AppState;
use crate::error::ApiError;

/// Creates a new campaign in the active state.
pub async fn create_campaign(
    State(state): State<AppState>,
    Json(request): Json<CreateCampaignRequest>,
) -> Result<(StatusCode, Json<CampaignResponse>), ApiError> {
    request.validate()?;

    let repo = CampaignRepository::new(state.pool.clone());
    let entity = repo.create(&request.name).await?;
    let campaign = Campaign::from(entity);

    tracing::info!(campaign_id = %campaign.campaign_id, "Campaign created");

    Ok((StatusCode::CREATED, Json(CampaignResponse::from(campaign))))
}

/// Returns one campaign by its public identifier.
pub async fn get_campaign(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<CampaignResponse>, ApiError> {
    let repo = CampaignRepository::new(state.pool.clone());
    let entity = repo
        .find_by_campaign_id(campaign_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Campaign not found".to_string()))?;

    Ok(Json(CampaignResponse::from(Campaign::from(entity))))
}

/// Lists all campaigns.
pub async fn list_campaigns(
    State(state): State<AppState>,
) -> Result<Json<ListCampaignsResponse>, ApiError> {
    let repo = CampaignRepository::new(state.pool.clone());
    let campaigns: Vec<CampaignResponse> = repo
        .list()
        .await?
        .into_iter()
        .map(|e| CampaignResponse::from(Campaign::from(e)))
        .collect();

    let total = campaigns.len();
    Ok(Json(ListCampaignsResponse { campaigns, total }))
}

/// Changes a campaign's lifecycle status.
pub async fn update_campaign_status(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
    Json(request): Json<UpdateCampaignStatusRequest>,
) -> Result<Json<CampaignResponse>, ApiError> {
    let repo = CampaignRepository::new(state.pool.clone());
    let entity = repo
        .update_status(campaign_id, request.status.as_str())
        .await?
        .ok_or_else(|| ApiError::NotFound("Campaign not found".to_string()))?;

    tracing::info!(
        campaign_id = %campaign_id,
        status = %request.status.as_str(),
        "Campaign status updated"
    );

    Ok(Json(CampaignResponse::from(Campaign::from(entity))))
}

/// Removes a campaign.
pub async fn delete_campaign(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = CampaignRepository::new(state.pool.clone());
    let deleted = repo.delete(campaign_id).await?;

    if deleted == 0 {
        return Err(ApiError::NotFound("Campaign not found".to_string()));
    }

    tracing::info!(campaign_id = %campaign_id, "Campaign deleted");
    Ok(StatusCode::NO_CONTENT)
}
