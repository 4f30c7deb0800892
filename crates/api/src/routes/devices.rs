//! Device registration and lookup handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use domain::models::device::{Device, DeviceResponse, RegisterDeviceRequest};
use domain::models::location::LastLocationResponse;
use persistence::repositories::DeviceRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_device_registered;

/// Registers a new device.
pub async fn register_device(
    State(state): State<AppState>,
    Json(request): Json<RegisterDeviceRequest>,
) -> Result<(StatusCode, Json<DeviceResponse>), ApiError> {
    request.validate()?;

    let repo = DeviceRepository::new(state.pool.clone());
    let entity = repo.register(&request.name, &request.device_type).await?;
    let device = Device::from(entity);

    tracing::info!(device_id = %device.device_id, device_type = %device.device_type, "Device registered");
    record_device_registered();

    Ok((StatusCode::CREATED, Json(DeviceResponse::from(device))))
}

/// Returns one device by its public identifier.
pub async fn get_device(
    State(state): State<AppState>,
    Path(device_id): Path<Uuid>,
) -> Result<Json<DeviceResponse>, ApiError> {
    let repo = DeviceRepository::new(state.pool.clone());
    let entity = repo
        .find_by_device_id(device_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Device not found".to_string()))?;

    Ok(Json(DeviceResponse::from(Device::from(entity))))
}

/// Lists all registered devices.
pub async fn list_devices(
    State(state): State<AppState>,
) -> Result<Json<Vec<DeviceResponse>>, ApiError> {
    let repo = DeviceRepository::new(state.pool.clone());
    let devices = repo
        .list()
        .await?
        .into_iter()
        .map(|e| DeviceResponse::from(Device::from(e)))
        .collect();

    Ok(Json(devices))
}

/// Returns the last known location recorded for a device.
pub async fn get_last_location(
    State(state): State<AppState>,
    Path(device_id): Path<Uuid>,
) -> Result<Json<LastLocationResponse>, ApiError> {
    let repo = DeviceRepository::new(state.pool.clone());
    let entity = repo
        .find_by_device_id(device_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Device not found".to_string()))?;

    let device = Device::from(entity);
    let context = device
        .last_location
        .ok_or_else(|| ApiError::NotFound("No location recorded for device".to_string()))?;

    Ok(Json(LastLocationResponse {
        device_id: device.device_id,
        context,
    }))
}

/// Removes a device.
pub async fn delete_device(
    State(state): State<AppState>,
    Path(device_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = DeviceRepository::new(state.pool.clone());
    let deleted = repo.delete(device_id).await?;

    if deleted == 0 {
        return Err(ApiError::NotFound("Device not found".to_string()));
    }

    tracing::info!(device_id = %device_id, "Device deleted");
    Ok(StatusCode::NO_CONTENT)
}
