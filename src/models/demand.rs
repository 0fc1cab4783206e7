//! Staffing demand.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Required headcount per shift name on every open day.
///
/// Shifts without an entry require nobody.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DemandProfile {
    required: BTreeMap<String, u32>,
}

impl DemandProfile {
    /// Creates an empty profile (zero demand everywhere).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the headcount for a shift.
    pub fn with(mut self, shift: impl Into<String>, headcount: u32) -> Self {
        self.set(shift, headcount);
        self
    }

    /// Sets the headcount for a shift.
    pub fn set(&mut self, shift: impl Into<String>, headcount: u32) {
        self.required.insert(shift.into(), headcount);
    }

    /// Headcount required for `shift` (0 when absent).
    pub fn required(&self, shift: &str) -> u32 {
        self.required.get(shift).copied().unwrap_or(0)
    }

    /// Headcount per shift, aligned with `shifts`.
    pub fn for_shifts<S: AsRef<str>>(&self, shifts: &[S]) -> Vec<u32> {
        shifts.iter().map(|s| self.required(s.as_ref())).collect()
    }

    /// Iterates `(shift, headcount)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.required.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for DemandProfile {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        Self {
            required: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_shift_defaults_to_zero() {
        let d = DemandProfile::new().with("Pagi", 3);
        assert_eq!(d.required("Pagi"), 3);
        assert_eq!(d.required("Malam"), 0);
    }

    #[test]
    fn test_for_shifts_aligns_with_columns() {
        let d: DemandProfile = [("Pagi", 3), ("Malam", 2)].into_iter().collect();
        assert_eq!(d.for_shifts(&["Pagi", "Siang", "Malam"]), vec![3, 0, 2]);
    }

    #[test]
    fn test_serde_is_a_plain_map() {
        let d = DemandProfile::new().with("Pagi", 2);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#"{"Pagi":2}"#);
    }
}
