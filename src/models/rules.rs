//! Rostering rules.
//!
//! [`RuleConfig`] collects every knob of the constraint evaluator. It is
//! built once per run (all defaults applied up front) and never mutated.
//!
//! # Defaults
//!
//! | Field | Default |
//! |-------|---------|
//! | `off_days` | none |
//! | `close_on_off_days` | `false` |
//! | `forbid_night_to_morning` | `true` |
//! | `forbid_double_shift_per_day` | `true` |
//! | `max_shifts_per_week` | 5 |
//! | `max_night_per_week` | 2 |
//! | `mode` | [`RosterMode::Normal`] |
//! | `rotation_order` | empty = the configured shift order |
//! | `rotation_strictness` | 200.0 |
//! | `night_shift_name` | `"Malam"` |
//! | `morning_shift_name` | `"Pagi"` |

use serde::{Deserialize, Serialize};

use super::ClosureCalendar;

/// Default role label of the night shift.
pub const DEFAULT_NIGHT_SHIFT: &str = "Malam";
/// Default role label of the morning shift.
pub const DEFAULT_MORNING_SHIFT: &str = "Pagi";

/// Assignment policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RosterMode {
    /// Any employee may work any shift.
    #[default]
    Normal,
    /// Each employee is steered to one shift per week, cycling by
    /// `rotation_order`.
    Rotation,
}

/// Evaluator rules for one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConfig {
    /// Plant closures.
    #[serde(flatten)]
    pub calendar: ClosureCalendar,
    /// Penalise working the night shift followed by next morning's shift.
    pub forbid_night_to_morning: bool,
    /// Penalise more than one shift per employee per day.
    pub forbid_double_shift_per_day: bool,
    /// Weekly cap on shifts per employee.
    pub max_shifts_per_week: u32,
    /// Weekly cap on night shifts per employee.
    pub max_night_per_week: u32,
    /// Assignment policy.
    pub mode: RosterMode,
    /// Shift names cycled by the rotation policy. Empty = shift order.
    pub rotation_order: Vec<String>,
    /// Penalty per assignment outside the employee's rotation target.
    pub rotation_strictness: f64,
    /// Shift playing the night role. `None` disables night rules.
    pub night_shift_name: Option<String>,
    /// Shift playing the morning role. `None` disables night-to-morning.
    pub morning_shift_name: Option<String>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            calendar: ClosureCalendar::default(),
            forbid_night_to_morning: true,
            forbid_double_shift_per_day: true,
            max_shifts_per_week: 5,
            max_night_per_week: 2,
            mode: RosterMode::Normal,
            rotation_order: Vec::new(),
            rotation_strictness: 200.0,
            night_shift_name: Some(DEFAULT_NIGHT_SHIFT.to_string()),
            morning_shift_name: Some(DEFAULT_MORNING_SHIFT.to_string()),
        }
    }
}

impl RuleConfig {
    /// Creates the default rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Closes the given weekdays.
    pub fn with_closed_weekdays(mut self, off_days: impl IntoIterator<Item = u8>) -> Self {
        self.calendar = ClosureCalendar::closing(off_days);
        self
    }

    /// Switches to rotation mode with the given shift cycle.
    pub fn with_rotation<S: Into<String>>(
        mut self,
        order: impl IntoIterator<Item = S>,
        strictness: f64,
    ) -> Self {
        self.mode = RosterMode::Rotation;
        self.rotation_order = order.into_iter().map(Into::into).collect();
        self.rotation_strictness = strictness;
        self
    }

    /// Sets the weekly caps.
    pub fn with_weekly_limits(mut self, max_shifts: u32, max_nights: u32) -> Self {
        self.max_shifts_per_week = max_shifts;
        self.max_night_per_week = max_nights;
        self
    }

    /// Sets (or clears) the night and morning role labels.
    pub fn with_shift_roles(mut self, night: Option<&str>, morning: Option<&str>) -> Self {
        self.night_shift_name = night.map(str::to_string);
        self.morning_shift_name = morning.map(str::to_string);
        self
    }

    /// Enables or disables the double-shift rule.
    pub fn with_forbid_double_shift(mut self, forbid: bool) -> Self {
        self.forbid_double_shift_per_day = forbid;
        self
    }

    /// Enables or disables the night-to-morning rule.
    pub fn with_forbid_night_to_morning(mut self, forbid: bool) -> Self {
        self.forbid_night_to_morning = forbid;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let r = RuleConfig::default();
        assert!(!r.calendar.close_on_off_days);
        assert!(r.forbid_night_to_morning);
        assert!(r.forbid_double_shift_per_day);
        assert_eq!(r.max_shifts_per_week, 5);
        assert_eq!(r.max_night_per_week, 2);
        assert_eq!(r.mode, RosterMode::Normal);
        assert!(r.rotation_order.is_empty());
        assert_eq!(r.rotation_strictness, 200.0);
        assert_eq!(r.night_shift_name.as_deref(), Some("Malam"));
        assert_eq!(r.morning_shift_name.as_deref(), Some("Pagi"));
    }

    #[test]
    fn test_builders() {
        let r = RuleConfig::new()
            .with_closed_weekdays([6])
            .with_rotation(["Pagi", "Malam"], 150.0)
            .with_shift_roles(None, Some("Pagi"));
        assert!(r.calendar.is_closed(6));
        assert_eq!(r.mode, RosterMode::Rotation);
        assert_eq!(r.rotation_order, vec!["Pagi", "Malam"]);
        assert_eq!(r.rotation_strictness, 150.0);
        assert!(r.night_shift_name.is_none());
    }

    #[test]
    fn test_serializes_camel_case_with_flat_calendar() {
        let json = serde_json::to_value(RuleConfig::new().with_closed_weekdays([5])).unwrap();
        assert_eq!(json["closeOnOffDays"], true);
        assert_eq!(json["offDays"], serde_json::json!([5]));
        assert_eq!(json["mode"], "normal");
        assert_eq!(json["maxShiftsPerWeek"], 5);
    }
}
