//! Roster (solution) model.
//!
//! A roster is a `days × shifts` grid whose cells hold the set of
//! employees working that shift on that day. It is the genome evolved
//! by the GA and the schedule handed back to callers.
//!
//! # Cell Representation
//! Cells store [`EmployeeId`]s sorted ascending without duplicates, so two
//! rosters with the same assignments compare equal regardless of the order
//! in which employees were drawn.

use serde::{Deserialize, Serialize};

use super::ClosureCalendar;

/// Index of an employee in the run-scoped employee table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub usize);

impl EmployeeId {
    /// Position in the employee table.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A complete shift assignment over the planning horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    days: usize,
    shifts: usize,
    /// Row-major cells: `cells[day * shifts + shift]`.
    cells: Vec<Vec<EmployeeId>>,
}

impl Roster {
    /// Creates an empty roster.
    ///
    /// # Panics
    /// If `days * shifts` overflows `usize`. Use [`Roster::try_new`] for
    /// unchecked dimensions.
    pub fn new(days: usize, shifts: usize) -> Self {
        match Self::try_new(days, shifts) {
            Some(roster) => roster,
            None => panic!("roster of {days} days x {shifts} shifts overflows usize"),
        }
    }

    /// Creates an empty roster, or `None` when the cell count overflows.
    pub fn try_new(days: usize, shifts: usize) -> Option<Self> {
        let cells = days.checked_mul(shifts)?;
        Some(Self {
            days,
            shifts,
            cells: vec![Vec::new(); cells],
        })
    }

    /// Builds a child whose days before `cut` come from `head` and whose
    /// remaining days come from `tail`. Every cell is a fresh copy.
    ///
    /// `cut` is clamped to the horizon. Both rosters must share dimensions.
    pub fn splice(head: &Roster, tail: &Roster, cut: usize) -> Self {
        debug_assert_eq!(head.days, tail.days);
        debug_assert_eq!(head.shifts, tail.shifts);
        let split = cut.min(head.days) * head.shifts;
        let mut cells = Vec::with_capacity(head.cells.len());
        cells.extend(head.cells[..split].iter().cloned());
        cells.extend(tail.cells[split..].iter().cloned());
        Self {
            days: head.days,
            shifts: head.shifts,
            cells,
        }
    }

    /// Number of days in the horizon.
    #[inline]
    pub fn days(&self) -> usize {
        self.days
    }

    /// Number of shift columns.
    #[inline]
    pub fn shift_count(&self) -> usize {
        self.shifts
    }

    #[inline]
    fn slot(&self, day: usize, shift: usize) -> usize {
        debug_assert!(day < self.days && shift < self.shifts);
        day * self.shifts + shift
    }

    /// Employees working `shift` on `day`.
    pub fn cell(&self, day: usize, shift: usize) -> &[EmployeeId] {
        &self.cells[self.slot(day, shift)]
    }

    /// All cells of one day, in shift order.
    pub fn day(&self, day: usize) -> &[Vec<EmployeeId>] {
        let start = day * self.shifts;
        &self.cells[start..start + self.shifts]
    }

    /// Replaces the employees of one cell. Duplicates are dropped.
    pub fn assign(
        &mut self,
        day: usize,
        shift: usize,
        employees: impl IntoIterator<Item = EmployeeId>,
    ) {
        let slot = self.slot(day, shift);
        let mut cell: Vec<EmployeeId> = employees.into_iter().collect();
        cell.sort_unstable();
        cell.dedup();
        self.cells[slot] = cell;
    }

    /// Empties every cell of `day`.
    pub fn clear_day(&mut self, day: usize) {
        let start = day * self.shifts;
        for cell in &mut self.cells[start..start + self.shifts] {
            cell.clear();
        }
    }

    /// Whether `employee` works `shift` on `day`.
    pub fn works(&self, day: usize, shift: usize, employee: EmployeeId) -> bool {
        self.cell(day, shift).binary_search(&employee).is_ok()
    }

    /// Number of shifts `employee` works on `day`.
    pub fn shifts_worked_on(&self, day: usize, employee: EmployeeId) -> usize {
        self.day(day)
            .iter()
            .filter(|cell| cell.binary_search(&employee).is_ok())
            .count()
    }

    /// Empties all cells on closed days. Idempotent.
    pub fn stamp_closed_days(&mut self, calendar: &ClosureCalendar) {
        if !calendar.has_closures() {
            return;
        }
        for day in 0..self.days {
            if calendar.is_closed(day) {
                self.clear_day(day);
            }
        }
    }

    /// Whether every cell on a closed day is empty.
    pub fn respects_closures(&self, calendar: &ClosureCalendar) -> bool {
        calendar
            .closed_days(self.days)
            .all(|day| self.day(day).iter().all(|cell| cell.is_empty()))
    }

    /// Total number of employee-shift assignments.
    pub fn assignment_count(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    /// Resolves ids to names: `grid[day][shift] = [name, ...]`.
    ///
    /// Ids outside the table are skipped.
    pub fn to_named<S: AsRef<str>>(&self, employees: &[S]) -> Vec<Vec<Vec<String>>> {
        (0..self.days)
            .map(|day| {
                self.day(day)
                    .iter()
                    .map(|cell| {
                        cell.iter()
                            .filter_map(|id| employees.get(id.index()))
                            .map(|name| name.as_ref().to_string())
                            .collect()
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[usize]) -> Vec<EmployeeId> {
        raw.iter().copied().map(EmployeeId).collect()
    }

    fn sample_roster() -> Roster {
        let mut r = Roster::new(7, 2);
        for day in 0..7 {
            r.assign(day, 0, ids(&[0, 1]));
            r.assign(day, 1, ids(&[2]));
        }
        r
    }

    #[test]
    fn test_assign_sorts_and_dedups() {
        let mut r = Roster::new(1, 1);
        r.assign(0, 0, ids(&[3, 1, 3, 2]));
        assert_eq!(r.cell(0, 0), ids(&[1, 2, 3]).as_slice());
        assert!(r.works(0, 0, EmployeeId(2)));
        assert!(!r.works(0, 0, EmployeeId(0)));
    }

    #[test]
    fn test_try_new_rejects_overflowing_grid() {
        assert!(Roster::try_new(usize::MAX, 2).is_none());
        let r = Roster::try_new(3, 2).unwrap();
        assert_eq!(r.days(), 3);
        assert_eq!(r.assignment_count(), 0);
    }

    #[test]
    fn test_stamp_closed_days_is_idempotent() {
        let cal = ClosureCalendar::closing([5, 6]);
        let mut r = sample_roster();
        assert!(!r.respects_closures(&cal));

        r.stamp_closed_days(&cal);
        let once = r.clone();
        r.stamp_closed_days(&cal);
        assert_eq!(r, once);
        assert!(r.respects_closures(&cal));
        assert!(r.cell(5, 0).is_empty());
        assert!(r.cell(6, 1).is_empty());
        assert_eq!(r.cell(4, 0).len(), 2);
    }

    #[test]
    fn test_stamp_without_flag_keeps_everything() {
        let mut cal = ClosureCalendar::closing([5, 6]);
        cal.close_on_off_days = false;
        let mut r = sample_roster();
        r.stamp_closed_days(&cal);
        assert_eq!(r, sample_roster());
    }

    #[test]
    fn test_splice_takes_head_then_tail() {
        let head = sample_roster();
        let tail = Roster::new(7, 2);
        let child = Roster::splice(&head, &tail, 3);
        assert_eq!(child.days(), 7);
        assert_eq!(child.shift_count(), 2);
        for day in 0..3 {
            assert_eq!(child.day(day), head.day(day));
        }
        for day in 3..7 {
            assert!(child.day(day).iter().all(|c| c.is_empty()));
        }
    }

    #[test]
    fn test_shifts_worked_on() {
        let mut r = Roster::new(1, 3);
        r.assign(0, 0, ids(&[0]));
        r.assign(0, 1, ids(&[0, 1]));
        r.assign(0, 2, ids(&[0]));
        assert_eq!(r.shifts_worked_on(0, EmployeeId(0)), 3);
        assert_eq!(r.shifts_worked_on(0, EmployeeId(1)), 1);
        assert_eq!(r.assignment_count(), 4);
    }

    #[test]
    fn test_to_named() {
        let mut r = Roster::new(1, 2);
        r.assign(0, 0, ids(&[1]));
        r.assign(0, 1, ids(&[0, 2]));
        let names = ["A", "B", "C"];
        let grid = r.to_named(&names);
        assert_eq!(grid, vec![vec![vec!["B".to_string()], vec!["A".into(), "C".into()]]]);
    }
}
