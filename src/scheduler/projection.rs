//! Per-employee day codes.
//!
//! Flattens a roster into one letter per employee per day, the layout used
//! by spreadsheet exports: the code of the shift worked that day, or the
//! off code. If someone works several shifts on one day, the last one in
//! column order wins. Days closed by the projection's calendar are always
//! the off code, whatever the grid holds.

use serde::{Deserialize, Serialize};

use crate::models::{ClosureCalendar, Roster};

/// Default code for a day off.
pub const OFF_CODE: char = 'L';

/// Day codes of one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCodeRow {
    pub employee: String,
    /// One character per day.
    pub codes: String,
}

/// Maps shift columns to single-letter codes.
///
/// # Example
///
/// ```
/// use u_roster::scheduler::DayCodeProjection;
///
/// let proj = DayCodeProjection::new(&["Pagi", "Siang", "malam"]);
/// assert_eq!(proj.code(2), 'M');
/// assert_eq!(proj.off_code(), 'L');
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCodeProjection {
    codes: Vec<char>,
    off_code: char,
    calendar: ClosureCalendar,
}

impl DayCodeProjection {
    /// Derives each code from the first letter of the shift name, uppercased.
    pub fn new<S: AsRef<str>>(shifts: &[S]) -> Self {
        let codes = shifts
            .iter()
            .map(|s| {
                s.as_ref()
                    .chars()
                    .next()
                    .and_then(|c| c.to_uppercase().next())
                    .unwrap_or('?')
            })
            .collect();
        Self {
            codes,
            off_code: OFF_CODE,
            calendar: ClosureCalendar::default(),
        }
    }

    /// Overrides the code of one shift column. Out-of-range columns are ignored.
    pub fn with_code(mut self, shift: usize, code: char) -> Self {
        if let Some(slot) = self.codes.get_mut(shift) {
            *slot = code;
        }
        self
    }

    /// Overrides the off code.
    pub fn with_off_code(mut self, code: char) -> Self {
        self.off_code = code;
        self
    }

    /// Projects closed days of `calendar` to the off code.
    pub fn with_calendar(mut self, calendar: ClosureCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Code of a shift column.
    pub fn code(&self, shift: usize) -> char {
        self.codes.get(shift).copied().unwrap_or(self.off_code)
    }

    pub fn off_code(&self) -> char {
        self.off_code
    }

    /// Projects an index-based roster. Rows follow `employees`.
    pub fn project<S: AsRef<str>>(&self, roster: &Roster, employees: &[S]) -> Vec<DayCodeRow> {
        let mut table = vec![vec![self.off_code; roster.days()]; employees.len()];
        for day in self.calendar.open_days(roster.days()) {
            for (shift, cell) in roster.day(day).iter().enumerate() {
                for id in cell {
                    if let Some(row) = table.get_mut(id.index()) {
                        row[day] = self.code(shift);
                    }
                }
            }
        }
        into_rows(employees, table)
    }

    /// Projects a named grid (`grid[day][shift] = [employee, ...]`).
    ///
    /// Names missing from `employees` are skipped.
    pub fn project_named<S: AsRef<str>>(
        &self,
        grid: &[Vec<Vec<String>>],
        employees: &[S],
    ) -> Vec<DayCodeRow> {
        let mut table = vec![vec![self.off_code; grid.len()]; employees.len()];
        for (day, cells) in grid.iter().enumerate() {
            if self.calendar.is_closed(day) {
                continue;
            }
            for (shift, cell) in cells.iter().enumerate() {
                for name in cell {
                    if let Some(i) = employees.iter().position(|e| e.as_ref() == name) {
                        table[i][day] = self.code(shift);
                    }
                }
            }
        }
        into_rows(employees, table)
    }
}

fn into_rows<S: AsRef<str>>(employees: &[S], table: Vec<Vec<char>>) -> Vec<DayCodeRow> {
    employees
        .iter()
        .zip(table)
        .map(|(e, codes)| DayCodeRow {
            employee: e.as_ref().to_string(),
            codes: codes.into_iter().collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmployeeId;

    const SHIFTS: [&str; 3] = ["Pagi", "Siang", "Malam"];

    #[test]
    fn test_project_roster() {
        let mut r = Roster::new(3, 3);
        r.assign(0, 0, [EmployeeId(0)]);
        r.assign(0, 2, [EmployeeId(1)]);
        r.assign(1, 1, [EmployeeId(0), EmployeeId(1)]);
        let rows = DayCodeProjection::new(&SHIFTS).project(&r, &["A", "B", "C"]);
        assert_eq!(rows[0], DayCodeRow { employee: "A".into(), codes: "PSL".into() });
        assert_eq!(rows[1].codes, "MSL");
        assert_eq!(rows[2].codes, "LLL");
    }

    #[test]
    fn test_last_shift_in_order_wins() {
        let mut r = Roster::new(1, 3);
        r.assign(0, 0, [EmployeeId(0)]);
        r.assign(0, 2, [EmployeeId(0)]);
        let rows = DayCodeProjection::new(&SHIFTS).project(&r, &["A"]);
        assert_eq!(rows[0].codes, "M");
    }

    #[test]
    fn test_project_named_matches_roster() {
        let mut r = Roster::new(2, 3);
        r.assign(0, 1, [EmployeeId(2)]);
        r.assign(1, 0, [EmployeeId(0), EmployeeId(2)]);
        let employees = ["A", "B", "C"];
        let proj = DayCodeProjection::new(&SHIFTS);
        let named = r.to_named(&employees);
        assert_eq!(proj.project(&r, &employees), proj.project_named(&named, &employees));
    }

    #[test]
    fn test_closed_days_project_to_off_code() {
        // Day 6 is closed, but the grid was never stamped.
        let mut r = Roster::new(8, 3);
        for day in 0..8 {
            r.assign(day, 0, [EmployeeId(0)]);
        }
        let employees = ["A"];
        let proj = DayCodeProjection::new(&SHIFTS).with_calendar(ClosureCalendar::closing([6]));
        assert_eq!(proj.project(&r, &employees)[0].codes, "PPPPPPLP");
        let named = r.to_named(&employees);
        assert_eq!(proj.project_named(&named, &employees)[0].codes, "PPPPPPLP");

        // Without the calendar the stray assignment shows through.
        let plain = DayCodeProjection::new(&SHIFTS);
        assert_eq!(plain.project(&r, &employees)[0].codes, "PPPPPPPP");
    }

    #[test]
    fn test_overrides() {
        let proj = DayCodeProjection::new(&["Early", "Late"])
            .with_code(1, 'X')
            .with_code(9, 'Z')
            .with_off_code('-');
        assert_eq!(proj.code(0), 'E');
        assert_eq!(proj.code(1), 'X');
        let rows = proj.project(&Roster::new(2, 2), &["A"]);
        assert_eq!(rows[0].codes, "--");
    }
}
