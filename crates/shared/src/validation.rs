//! Common validation utilities.

use chrono::{TimeZone, Utc};
use validator::ValidationError;

/// Maximum age of a reported location timestamp in days.
const MAX_TIMESTAMP_AGE_DAYS: i64 = 7;

/// Maximum allowed future timestamp tolerance in seconds (5 minutes for clock skew).
const MAX_FUTURE_TOLERANCE_SECS: i64 = 300;

/// Validates that a latitude value is within valid range (-90 to 90).
pub fn validate_latitude(lat: f64) -> Result<(), ValidationError> {
    if (-90.0..=90.0).contains(&lat) {
        Ok(())
    } else {
        let mut err = ValidationError::new("latitude_range");
        err.message = Some("Latitude must be between -90 and 90".into());
        Err(err)
    }
}

/// Validates that a longitude value is within valid range (-180 to 180).
pub fn validate_longitude(lon: f64) -> Result<(), ValidationError> {
    if (-180.0..=180.0).contains(&lon) {
        Ok(())
    } else {
        let mut err = ValidationError::new("longitude_range");
        err.message = Some("Longitude must be between -180 and 180".into());
        Err(err)
    }
}

/// Validates that accuracy is non-negative.
pub fn validate_accuracy(accuracy: f64) -> Result<(), ValidationError> {
    if accuracy >= 0.0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("accuracy_range");
        err.message = Some("Accuracy must be non-negative".into());
        Err(err)
    }
}

/// Validates that a radius in meters is strictly positive.
pub fn validate_radius(radius_meters: f64) -> Result<(), ValidationError> {
    if radius_meters > 0.0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("radius_range");
        err.message = Some("Radius must be greater than zero".into());
        Err(err)
    }
}

/// Validates that a timestamp (in milliseconds since epoch) is within acceptable range.
/// - Must not be more than 5 minutes in the future (allows for clock skew)
/// - Must not be older than 7 days
pub fn validate_timestamp(timestamp_millis: i64) -> Result<(), ValidationError> {
    let now = Utc::now();

    let timestamp = match Utc.timestamp_millis_opt(timestamp_millis).single() {
        Some(ts) => ts,
        None => {
            let mut err = ValidationError::new("timestamp_invalid");
            err.message = Some("Invalid timestamp format".into());
            return Err(err);
        }
    };

    let future_limit = now + chrono::Duration::seconds(MAX_FUTURE_TOLERANCE_SECS);
    if timestamp > future_limit {
        let mut err = ValidationError::new("timestamp_future");
        err.message = Some("Timestamp cannot be in the future".into());
        return Err(err);
    }

    let past_limit = now - chrono::Duration::days(MAX_TIMESTAMP_AGE_DAYS);
    if timestamp < past_limit {
        let mut err = ValidationError::new("timestamp_old");
        err.message = Some("Timestamp cannot be older than 7 days".into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_latitude() {
        assert!(validate_latitude(0.0).is_ok());
        assert!(validate_latitude(90.0).is_ok());
        assert!(validate_latitude(-90.0).is_ok());
        assert!(validate_latitude(90.1).is_err());
        assert!(validate_latitude(-90.1).is_err());
    }

    #[test]
    fn test_validate_latitude_error_message() {
        let err = validate_latitude(100.0).unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Latitude must be between -90 and 90"
        );
    }

    #[test]
    fn test_validate_longitude() {
        assert!(validate_longitude(0.0).is_ok());
        assert!(validate_longitude(180.0).is_ok());
        assert!(validate_longitude(-180.0).is_ok());
        assert!(validate_longitude(180.1).is_err());
        assert!(validate_longitude(-180.1).is_err());
    }

    #[test]
    fn test_validate_longitude_error_message() {
        let err = validate_longitude(-200.0).unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Longitude must be between -180 and 180"
        );
    }

    #[test]
    fn test_validate_accuracy() {
        assert!(validate_accuracy(0.0).is_ok());
        assert!(validate_accuracy(12.5).is_ok());
        assert!(validate_accuracy(-0.1).is_err());
    }

    #[test]
    fn test_validate_radius() {
        assert!(validate_radius(1.0).is_ok());
        assert!(validate_radius(50_000.0).is_ok());
        assert!(validate_radius(0.0).is_err());
        assert!(validate_radius(-100.0).is_err());
    }

    #[test]
    fn test_validate_radius_error_message() {
        let err = validate_radius(0.0).unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Radius must be greater than zero"
        );
    }

    #[test]
    fn test_validate_timestamp_current() {
        let now_millis = Utc::now().timestamp_millis();
        assert!(validate_timestamp(now_millis).is_ok());
    }

    #[test]
    fn test_validate_timestamp_recent_past() {
        let one_day_ago = Utc::now() - chrono::Duration::days(1);
        assert!(validate_timestamp(one_day_ago.timestamp_millis()).is_ok());

        let six_days_ago = Utc::now() - chrono::Duration::days(6);
        assert!(validate_timestamp(six_days_ago.timestamp_millis()).is_ok());
    }

    #[test]
    fn test_validate_timestamp_too_old() {
        let eight_days_ago = Utc::now() - chrono::Duration::days(8);
        assert!(validate_timestamp(eight_days_ago.timestamp_millis()).is_err());
    }

    #[test]
    fn test_validate_timestamp_slight_future() {
        let one_min_future = Utc::now() + chrono::Duration::minutes(1);
        assert!(validate_timestamp(one_min_future.timestamp_millis()).is_ok());
    }

    #[test]
    fn test_validate_timestamp_too_far_future() {
        let ten_min_future = Utc::now() + chrono::Duration::minutes(10);
        assert!(validate_timestamp(ten_min_future.timestamp_millis()).is_err());
    }
}
