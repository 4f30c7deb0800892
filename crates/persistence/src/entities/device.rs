//! Device entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::device::Device;
use domain::models::location::LocationContext;

/// Database row mapping for the devices table.
#[derive(Debug, Clone, FromRow)]
pub struct DeviceEntity {
    pub id: i64,
    pub device_id: Uuid,
    pub name: String,
    pub device_type: String,
    pub active: bool,
    /// JSONB serialization of `LocationContext`; the single last-known
    /// location slot, overwritten on every update.
    pub last_location: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DeviceEntity> for Device {
    fn from(entity: DeviceEntity) -> Self {
        Self {
            id: entity.id,
            device_id: entity.device_id,
            name: entity.name,
            device_type: entity.device_type,
            active: entity.active,
            last_location: entity
                .last_location
                .and_then(|v| serde_json::from_value::<LocationContext>(v).ok()),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::location::LocationType;

    fn create_test_device_entity() -> DeviceEntity {
        DeviceEntity {
            id: 1,
            device_id: Uuid::new_v4(),
            name: "Lobby screen".to_string(),
            device_type: "kiosk".to_string(),
            active: true,
            last_location: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_device_entity_to_domain() {
        let entity = create_test_device_entity();
        let device: Device = entity.clone().into();

        assert_eq!(device.device_id, entity.device_id);
        assert_eq!(device.device_type, "kiosk");
        assert!(device.last_location.is_none());
    }

    #[test]
    fn test_device_entity_decodes_last_location() {
        let mut entity = create_test_device_entity();
        entity.last_location = Some(serde_json::json!({
            "coordinates": {"latitude": 48.8566, "longitude": 2.3522},
            "accuracy": 12.5,
            "capturedAt": "2024-06-03T09:00:00Z",
            "locationName": "Gare du Nord",
            "locationType": "transit",
            "nearbyPois": []
        }));

        let device: Device = entity.into();
        let location = device.last_location.expect("location should decode");
        assert_eq!(location.coordinates.latitude, 48.8566);
        assert_eq!(location.location_type, Some(LocationType::Transit));
    }

    #[test]
    fn test_device_entity_drops_malformed_location() {
        let mut entity = create_test_device_entity();
        entity.last_location = Some(serde_json::json!([1, 2, 3]));

        let device: Device = entity.into();
        assert!(device.last_location.is_none());
    }
}
