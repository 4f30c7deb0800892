//! Targeting rule management handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use domain::models::location::LocationType;
use domain::models::targeting_rule::{
    CreateTargetingRuleRequest, ListTargetingRulesResponse, TargetingRule, TargetingRuleResponse,
    UpdateTargetingRuleRequest,
};
use persistence::repositories::TargetingRuleRepository;

use crate::app::AppState;
use crate::error::ApiError;

/// Query parameters for listing targeting rules.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTargetingRulesQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

fn location_type_strings(types: &[LocationType]) -> Vec<String> {
    types.iter().map(|t| t.as_str().to_string()).collect()
}

fn time_window_json(
    window: &Option<domain::models::targeting_rule::TimeWindow>,
) -> Result<Option<serde_json::Value>, ApiError> {
    window
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| ApiError::Internal(format!("Failed to serialize time window: {}", e)))
}

/// Creates a new targeting rule.
pub async fn create_targeting_rule(
    State(state): State<AppState>,
    Json(request): Json<CreateTargetingRuleRequest>,
) -> Result<(StatusCode, Json<TargetingRuleResponse>), ApiError> {
    request.validate()?;

    let repo = TargetingRuleRepository::new(state.pool.clone());
    let entity = repo
        .create(
            &request.name,
            request.action.as_str(),
            &location_type_strings(&request.location_types),
            &request.geo_fence_ids,
            request.radius_meters,
            time_window_json(&request.time_window)?,
            &request.weather_conditions,
            &request.campaign_ids,
            request.priority,
            request.active,
        )
        .await?;
    let rule = TargetingRule::from(entity);

    tracing::info!(
        rule_id = %rule.rule_id,
        action = %rule.action.as_str(),
        priority = rule.priority,
        "Targeting rule created"
    );

    Ok((StatusCode::CREATED, Json(TargetingRuleResponse::from(rule))))
}

/// Returns one targeting rule by its public identifier.
pub async fn get_targeting_rule(
    State(state): State<AppState>,
    Path(rule_id): Path<Uuid>,
) -> Result<Json<TargetingRuleResponse>, ApiError> {
    let repo = TargetingRuleRepository::new(state.pool.clone());
    let entity = repo
        .find_by_rule_id(rule_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Targeting rule not found".to_string()))?;

    Ok(Json(TargetingRuleResponse::from(TargetingRule::from(
        entity,
    ))))
}

/// Lists targeting rules in evaluation order, active only by default.
pub async fn list_targeting_rules(
    State(state): State<AppState>,
    Query(query): Query<ListTargetingRulesQuery>,
) -> Result<Json<ListTargetingRulesResponse>, ApiError> {
    let repo = TargetingRuleRepository::new(state.pool.clone());
    let rules: Vec<TargetingRuleResponse> = repo
        .list(query.include_inactive)
        .await?
        .into_iter()
        .map(|e| TargetingRuleResponse::from(TargetingRule::from(e)))
        .collect();

    let total = rules.len();
    Ok(Json(ListTargetingRulesResponse { rules, total }))
}

/// Updates a targeting rule (partial update).
pub async fn update_targeting_rule(
    State(state): State<AppState>,
    Path(rule_id): Path<Uuid>,
    Json(request): Json<UpdateTargetingRuleRequest>,
) -> Result<Json<TargetingRuleResponse>, ApiError> {
    request.validate()?;

    let location_types = request.location_types.as_deref().map(location_type_strings);

    let repo = TargetingRuleRepository::new(state.pool.clone());
    let entity = repo
        .update(
            rule_id,
            request.name.as_deref(),
            request.action.map(|a| a.as_str()),
            location_types.as_deref(),
            request.geo_fence_ids.as_deref(),
            request.radius_meters,
            time_window_json(&request.time_window)?,
            request.weather_conditions.as_deref(),
            request.campaign_ids.as_deref(),
            request.priority,
            request.active,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Targeting rule not found".to_string()))?;

    tracing::info!(rule_id = %rule_id, "Targeting rule updated");

    Ok(Json(TargetingRuleResponse::from(TargetingRule::from(
        entity,
    ))))
}

/// Removes a targeting rule.
pub async fn delete_targeting_rule(
    State(state): State<AppState>,
    Path(rule_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = TargetingRuleRepository::new(state.pool.clone());
    let deleted = repo.delete(rule_id).await?;

    if deleted == 0 {
        return Err(ApiError::NotFound("Targeting rule not found".to_string()));
    }

    tracing::info!(rule_id = %rule_id, "Targeting rule deleted");
    Ok(StatusCode::NO_CONTENT)
}
