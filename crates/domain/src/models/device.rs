//! Device domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::location::LocationContext;

/// An advertising device (screen, kiosk, vehicle display, ...).
///
/// A device owns exactly one last-known location slot; every location update
/// overwrites it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: i64,
    pub device_id: Uuid,
    pub name: String,
    pub device_type: String,
    pub active: bool,
    pub last_location: Option<LocationContext>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for registering a device.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDeviceRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 50, message = "Device type must be 1-50 characters"))]
    pub device_type: String,
}

/// Response payload for device operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceResponse {
    pub device_id: Uuid,
    pub name: String,
    pub device_type: String,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_location: Option<LocationContext>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Device> for DeviceResponse {
    fn from(device: Device) -> Self {
        Self {
            device_id: device.device_id,
            name: device.name,
            device_type: device.device_type,
            active: device.active,
            last_location: device.last_location,
            created_at: device.created_at,
            updated_at: device.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_device_request_validation() {
        let request = RegisterDeviceRequest {
            name: "Lobby screen".to_string(),
            device_type: "kiosk".to_string(),
        };
        assert!(request.validate().is_ok());

        let empty_name = RegisterDeviceRequest {
            name: String::new(),
            device_type: "kiosk".to_string(),
        };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_device_response_skips_absent_location() {
        let response = DeviceResponse {
            device_id: Uuid::new_v4(),
            name: "Billboard 7".to_string(),
            device_type: "billboard".to_string(),
            active: true,
            last_location: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("lastLocation"));
        assert!(json.contains("\"deviceType\":\"billboard\""));
    }
}
