//! Targeting rule domain model.

use chrono::{DateTime, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::location::LocationType;

/// Whether a rule adds or removes campaigns from the candidate set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    Include,
    Exclude,
}

impl RuleAction {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleAction::Include => "include",
            RuleAction::Exclude => "exclude",
        }
    }

    /// Parses from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "include" => Some(RuleAction::Include),
            "exclude" => Some(RuleAction::Exclude),
            _ => None,
        }
    }
}

/// Day of week for time-window gating.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        }
    }

    /// Parses from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "monday" => Some(DayOfWeek::Monday),
            "tuesday" => Some(DayOfWeek::Tuesday),
            "wednesday" => Some(DayOfWeek::Wednesday),
            "thursday" => Some(DayOfWeek::Thursday),
            "friday" => Some(DayOfWeek::Friday),
            "saturday" => Some(DayOfWeek::Saturday),
            "sunday" => Some(DayOfWeek::Sunday),
            _ => None,
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

/// Time constraints on a rule: days of week and/or a daily time-of-day
/// window. Either part may be absent; an absent part never gates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub days_of_week: Vec<DayOfWeek>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

impl TimeWindow {
    /// True when the given instant satisfies every constraint present.
    ///
    /// A window with start > end wraps across midnight (22:00-05:00 matches
    /// 23:00 and 04:00 but not 12:00).
    pub fn contains(&self, moment: DateTime<Utc>) -> bool {
        use chrono::{Datelike, Timelike};

        if !self.days_of_week.is_empty() {
            let today: DayOfWeek = moment.weekday().into();
            if !self.days_of_week.contains(&today) {
                return false;
            }
        }

        let time = NaiveTime::from_hms_opt(moment.hour(), moment.minute(), moment.second())
            .unwrap_or(NaiveTime::MIN);

        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) if start > end => time >= start || time < end,
            (Some(start), Some(end)) => time >= start && time < end,
            (Some(start), None) => time >= start,
            (None, Some(end)) => time < end,
            (None, None) => true,
        }
    }
}

/// A priority-ordered, gated predicate that adds or removes campaigns from a
/// device's eligible set.
///
/// `weather_conditions` and `radius_meters` are reserved fields: parsed and
/// stored, never evaluated by the rule engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetingRule {
    pub id: i64,
    pub rule_id: Uuid,
    pub name: String,
    pub action: RuleAction,
    /// Empty list means "any location type".
    pub location_types: Vec<LocationType>,
    /// Empty list means "any geo-fence".
    pub geo_fence_ids: Vec<Uuid>,
    pub radius_meters: Option<f64>,
    pub time_window: Option<TimeWindow>,
    pub weather_conditions: Vec<String>,
    pub campaign_ids: Vec<Uuid>,
    /// Rules are folded in ascending priority order, so the
    /// highest-priority rule applies last and its effect wins.
    pub priority: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

/// Request payload for creating a targeting rule.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTargetingRuleRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    pub action: RuleAction,

    #[serde(default)]
    pub location_types: Vec<LocationType>,

    #[serde(default)]
    pub geo_fence_ids: Vec<Uuid>,

    #[validate(custom(function = "shared::validation::validate_radius"))]
    pub radius_meters: Option<f64>,

    pub time_window: Option<TimeWindow>,

    #[serde(default)]
    pub weather_conditions: Vec<String>,

    #[serde(default)]
    pub campaign_ids: Vec<Uuid>,

    pub priority: i32,

    #[serde(default = "default_active")]
    pub active: bool,
}

/// Request payload for updating a targeting rule (partial update).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTargetingRuleRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    pub action: Option<RuleAction>,

    pub location_types: Option<Vec<LocationType>>,

    pub geo_fence_ids: Option<Vec<Uuid>>,

    #[validate(custom(function = "shared::validation::validate_radius"))]
    pub radius_meters: Option<f64>,

    pub time_window: Option<TimeWindow>,

    pub weather_conditions: Option<Vec<String>>,

    pub campaign_ids: Option<Vec<Uuid>>,

    pub priority: Option<i32>,

    pub active: Option<bool>,
}

/// Response payload for targeting rule operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetingRuleResponse {
    pub rule_id: Uuid,
    pub name: String,
    pub action: RuleAction,
    pub location_types: Vec<LocationType>,
    pub geo_fence_ids: Vec<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_meters: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_window: Option<TimeWindow>,
    pub weather_conditions: Vec<String>,
    pub campaign_ids: Vec<Uuid>,
    pub priority: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TargetingRule> for TargetingRuleResponse {
    fn from(rule: TargetingRule) -> Self {
        Self {
            rule_id: rule.rule_id,
            name: rule.name,
            action: rule.action,
            location_types: rule.location_types,
            geo_fence_ids: rule.geo_fence_ids,
            radius_meters: rule.radius_meters,
            time_window: rule.time_window,
            weather_conditions: rule.weather_conditions,
            campaign_ids: rule.campaign_ids,
            priority: rule.priority,
            active: rule.active,
            created_at: rule.created_at,
            updated_at: rule.updated_at,
        }
    }
}

/// Response for listing targeting rules.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTargetingRulesResponse {
    pub rules: Vec<TargetingRuleResponse>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        // 2024-06-03 is a Monday.
        Utc.with_ymd_and_hms(2024, 6, 3, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_rule_action_round_trip() {
        assert_eq!(RuleAction::parse("include"), Some(RuleAction::Include));
        assert_eq!(RuleAction::parse("exclude"), Some(RuleAction::Exclude));
        assert_eq!(RuleAction::parse("allow"), None);
        assert_eq!(RuleAction::Include.as_str(), "include");
    }

    #[test]
    fn test_day_of_week_round_trip() {
        for day in [
            DayOfWeek::Monday,
            DayOfWeek::Tuesday,
            DayOfWeek::Wednesday,
            DayOfWeek::Thursday,
            DayOfWeek::Friday,
            DayOfWeek::Saturday,
            DayOfWeek::Sunday,
        ] {
            assert_eq!(DayOfWeek::parse(day.as_str()), Some(day));
        }
        assert_eq!(DayOfWeek::parse("someday"), None);
    }

    #[test]
    fn test_empty_window_always_contains() {
        let window = TimeWindow::default();
        assert!(window.contains(at(0, 0)));
        assert!(window.contains(at(23, 59)));
    }

    #[test]
    fn test_window_day_gate() {
        let window = TimeWindow {
            days_of_week: vec![DayOfWeek::Saturday, DayOfWeek::Sunday],
            start_time: None,
            end_time: None,
        };
        // 2024-06-03 is a Monday
        assert!(!window.contains(at(12, 0)));

        let weekday_window = TimeWindow {
            days_of_week: vec![DayOfWeek::Monday],
            start_time: None,
            end_time: None,
        };
        assert!(weekday_window.contains(at(12, 0)));
    }

    #[test]
    fn test_window_time_gate() {
        let window = TimeWindow {
            days_of_week: vec![],
            start_time: NaiveTime::from_hms_opt(9, 0, 0),
            end_time: NaiveTime::from_hms_opt(17, 0, 0),
        };
        assert!(window.contains(at(9, 0)));
        assert!(window.contains(at(12, 30)));
        assert!(!window.contains(at(17, 0)));
        assert!(!window.contains(at(8, 59)));
    }

    #[test]
    fn test_window_wraps_midnight() {
        let window = TimeWindow {
            days_of_week: vec![],
            start_time: NaiveTime::from_hms_opt(22, 0, 0),
            end_time: NaiveTime::from_hms_opt(5, 0, 0),
        };
        assert!(window.contains(at(23, 0)));
        assert!(window.contains(at(4, 59)));
        assert!(!window.contains(at(12, 0)));
        assert!(!window.contains(at(5, 0)));
    }

    #[test]
    fn test_window_open_ended() {
        let from_evening = TimeWindow {
            days_of_week: vec![],
            start_time: NaiveTime::from_hms_opt(18, 0, 0),
            end_time: None,
        };
        assert!(from_evening.contains(at(20, 0)));
        assert!(!from_evening.contains(at(9, 0)));

        let until_noon = TimeWindow {
            days_of_week: vec![],
            start_time: None,
            end_time: NaiveTime::from_hms_opt(12, 0, 0),
        };
        assert!(until_noon.contains(at(9, 0)));
        assert!(!until_noon.contains(at(13, 0)));
    }

    #[test]
    fn test_create_rule_request_deserialization() {
        let json = r#"{
            "name": "Evening commuters",
            "action": "include",
            "locationTypes": ["transit", "commercial"],
            "timeWindow": {
                "daysOfWeek": ["monday", "friday"],
                "startTime": "17:00:00",
                "endTime": "20:00:00"
            },
            "campaignIds": ["550e8400-e29b-41d4-a716-446655440000"],
            "priority": 10
        }"#;

        let request: CreateTargetingRuleRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.action, RuleAction::Include);
        assert_eq!(request.location_types.len(), 2);
        assert_eq!(request.priority, 10);
        assert!(request.active);
        let window = request.time_window.unwrap();
        assert_eq!(window.days_of_week.len(), 2);
        assert_eq!(window.start_time, NaiveTime::from_hms_opt(17, 0, 0));
    }

    #[test]
    fn test_update_rule_request_partial() {
        let json = r#"{"priority": 5}"#;
        let request: UpdateTargetingRuleRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.priority, Some(5));
        assert!(request.name.is_none());
        assert!(request.action.is_none());
    }
}
