//! Geo-fence management handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use domain::models::geofence::{
    CreateGeoFenceRequest, FenceGeometry, GeoFence, GeoFenceResponse, ListGeoFencesResponse,
    UpdateGeoFenceRequest,
};
use persistence::repositories::GeoFenceRepository;

use crate::app::AppState;
use crate::error::ApiError;

/// Query parameters for listing geo-fences.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGeoFencesQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

/// Creates a new geo-fence.
pub async fn create_geofence(
    State(state): State<AppState>,
    Json(request): Json<CreateGeoFenceRequest>,
) -> Result<(StatusCode, Json<GeoFenceResponse>), ApiError> {
    request.validate()?;
    let geometry = request.geometry().map_err(ApiError::Validation)?;

    let (radius_meters, polygon_vertices, poi_id) = match &geometry {
        FenceGeometry::Circle { radius_meters } => (Some(*radius_meters), None, None),
        FenceGeometry::Polygon { vertices } => {
            let json = serde_json::to_value(vertices)
                .map_err(|e| ApiError::Internal(format!("Failed to serialize polygon: {}", e)))?;
            (None, Some(json), None)
        }
        FenceGeometry::Poi { poi_id } => (None, None, Some(*poi_id)),
    };

    let repo = GeoFenceRepository::new(state.pool.clone());
    let entity = repo
        .create(
            &request.name,
            request.kind.as_str(),
            request.latitude,
            request.longitude,
            radius_meters,
            polygon_vertices,
            poi_id,
            &request.campaign_ids,
            request.active,
        )
        .await?;
    let fence = GeoFence::from(entity);

    tracing::info!(fence_id = %fence.fence_id, kind = %request.kind.as_str(), "Geo-fence created");

    Ok((StatusCode::CREATED, Json(GeoFenceResponse::from(fence))))
}

/// Returns one geo-fence by its public identifier.
pub async fn get_geofence(
    State(state): State<AppState>,
    Path(fence_id): Path<Uuid>,
) -> Result<Json<GeoFenceResponse>, ApiError> {
    let repo = GeoFenceRepository::new(state.pool.clone());
    let entity = repo
        .find_by_fence_id(fence_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Geo-fence not found".to_string()))?;

    Ok(Json(GeoFenceResponse::from(GeoFence::from(entity))))
}

/// Lists geo-fences, active only by default.
pub async fn list_geofences(
    State(state): State<AppState>,
    Query(query): Query<ListGeoFencesQuery>,
) -> Result<Json<ListGeoFencesResponse>, ApiError> {
    let repo = GeoFenceRepository::new(state.pool.clone());
    let geo_fences: Vec<GeoFenceResponse> = repo
        .list(query.include_inactive)
        .await?
        .into_iter()
        .map(|e| GeoFenceResponse::from(GeoFence::from(e)))
        .collect();

    let total = geo_fences.len();
    Ok(Json(ListGeoFencesResponse { geo_fences, total }))
}

/// Updates a geo-fence. The shape kind is immutable; geometry fields that do
/// not belong to the fence's kind are ignored by the partial update.
pub async fn update_geofence(
    State(state): State<AppState>,
    Path(fence_id): Path<Uuid>,
    Json(request): Json<UpdateGeoFenceRequest>,
) -> Result<Json<GeoFenceResponse>, ApiError> {
    request.validate()?;

    let polygon_vertices = match &request.polygon {
        Some(vertices) => {
            if vertices.len() < 3 {
                return Err(ApiError::Validation(
                    "Polygon fences require at least 3 vertices".to_string(),
                ));
            }
            Some(
                serde_json::to_value(vertices).map_err(|e| {
                    ApiError::Internal(format!("Failed to serialize polygon: {}", e))
                })?,
            )
        }
        None => None,
    };

    let repo = GeoFenceRepository::new(state.pool.clone());
    let entity = repo
        .update(
            fence_id,
            request.name.as_deref(),
            request.latitude,
            request.longitude,
            request.radius_meters,
            polygon_vertices,
            request.campaign_ids.as_deref(),
            request.active,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Geo-fence not found".to_string()))?;

    tracing::info!(fence_id = %fence_id, "Geo-fence updated");

    Ok(Json(GeoFenceResponse::from(GeoFence::from(entity))))
}

/// Removes a geo-fence.
pub async fn delete_geofence(
    State(state): State<AppState>,
    Path(fence_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = GeoFenceRepository::new(state.pool.clone());
    let deleted = repo.delete(fence_id).await?;

    if deleted == 0 {
        return Err(ApiError::NotFound("Geo-fence not found".to_string()));
    }

    tracing::info!(fence_id = %fence_id, "Geo-fence deleted");
    Ok(StatusCode::NO_CONTENT)
}
