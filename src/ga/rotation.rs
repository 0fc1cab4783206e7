//! Weekly shift rotation.
//!
//! Employee `i` in week `w` is steered to
//! `rotation_order[(i + w) mod |rotation_order|]`, so each employee keeps
//! one shift for a whole week and moves one step along the cycle the next
//! week. Neighbouring employees start one step apart, spreading the staff
//! evenly over the cycle.
//!
//! The generator, the evaluator, and mutation all ask the same
//! [`RotationPolicy`], so they agree on who belongs where.

use crate::models::EmployeeId;

/// Preferred shift name for an employee in a given week.
///
/// Returns `None` only when `rotation_order` is empty.
///
/// # Example
/// ```
/// use u_roster::ga::target_shift;
///
/// let order = ["Pagi", "Siang", "Malam"];
/// assert_eq!(target_shift(0, 0, &order), Some("Pagi"));
/// assert_eq!(target_shift(1, 0, &order), Some("Siang"));
/// assert_eq!(target_shift(0, 1, &order), Some("Siang"));
/// assert_eq!(target_shift(4, 2, &order), Some("Pagi"));
/// ```
pub fn target_shift<S: AsRef<str>>(
    employee_index: usize,
    week_index: usize,
    rotation_order: &[S],
) -> Option<&str> {
    if rotation_order.is_empty() {
        return None;
    }
    let slot = (employee_index + week_index) % rotation_order.len();
    Some(rotation_order[slot].as_ref())
}

/// Rotation cycle resolved to shift columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Cycle entries; `None` where the name matches no configured shift.
    order: Vec<Option<usize>>,
}

impl RotationPolicy {
    /// Resolves `rotation_order` against the shift columns.
    ///
    /// An empty order falls back to the shift order itself.
    pub fn new<S: AsRef<str>, T: AsRef<str>>(rotation_order: &[S], shifts: &[T]) -> Self {
        let order = if rotation_order.is_empty() {
            (0..shifts.len()).map(Some).collect()
        } else {
            rotation_order
                .iter()
                .map(|name| shifts.iter().position(|s| s.as_ref() == name.as_ref()))
                .collect()
        };
        Self { order }
    }

    /// Length of the cycle.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the cycle is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Target shift column of `employee` in `week`.
    ///
    /// `None` when the cycle is empty or names an unknown shift.
    pub fn target(&self, employee: EmployeeId, week: usize) -> Option<usize> {
        if self.order.is_empty() {
            return None;
        }
        self.order[(employee.index() + week) % self.order.len()]
    }

    /// Whether `shift` is the target of `employee` in `week`.
    #[inline]
    pub fn is_target(&self, employee: EmployeeId, week: usize, shift: usize) -> bool {
        self.target(employee, week) == Some(shift)
    }

    /// Employees grouped by their target shift for `week`.
    ///
    /// `pools[shift]` lists employees in table order.
    pub fn pools(
        &self,
        week: usize,
        employee_count: usize,
        shift_count: usize,
    ) -> Vec<Vec<EmployeeId>> {
        let mut pools = vec![Vec::new(); shift_count];
        for i in 0..employee_count {
            let employee = EmployeeId(i);
            if let Some(shift) = self.target(employee, week) {
                if let Some(pool) = pools.get_mut(shift) {
                    pool.push(employee);
                }
            }
        }
        pools
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHIFTS: [&str; 3] = ["Pagi", "Siang", "Malam"];

    #[test]
    fn test_target_shift_table() {
        let order = SHIFTS;
        let expected = [
            // (employee, week, target)
            (0, 0, "Pagi"),
            (1, 0, "Siang"),
            (2, 0, "Malam"),
            (3, 0, "Pagi"),
            (0, 1, "Siang"),
            (2, 1, "Pagi"),
            (4, 2, "Pagi"),
            (5, 2, "Siang"),
        ];
        for (i, w, target) in expected {
            assert_eq!(target_shift(i, w, &order), Some(target), "employee {i} week {w}");
        }
    }

    #[test]
    fn test_target_shift_empty_order() {
        let order: [&str; 0] = [];
        assert_eq!(target_shift(3, 1, &order), None);
    }

    #[test]
    fn test_policy_matches_target_shift() {
        let policy = RotationPolicy::new(&SHIFTS, &SHIFTS);
        for i in 0..6 {
            for w in 0..4 {
                let name = target_shift(i, w, &SHIFTS).unwrap();
                let column = SHIFTS.iter().position(|s| *s == name);
                assert_eq!(policy.target(EmployeeId(i), w), column);
            }
        }
    }

    #[test]
    fn test_empty_order_defaults_to_shift_order() {
        let order: [&str; 0] = [];
        let policy = RotationPolicy::new(&order, &SHIFTS);
        assert_eq!(policy, RotationPolicy::new(&SHIFTS, &SHIFTS));
    }

    #[test]
    fn test_custom_order_with_unknown_shift() {
        let policy = RotationPolicy::new(&["Malam", "Libur"], &SHIFTS);
        assert_eq!(policy.len(), 2);
        assert_eq!(policy.target(EmployeeId(0), 0), Some(2));
        assert_eq!(policy.target(EmployeeId(1), 0), None);
        assert!(!policy.is_target(EmployeeId(1), 0, 0));
    }

    #[test]
    fn test_pools_partition_employees() {
        let policy = RotationPolicy::new(&SHIFTS, &SHIFTS);
        let pools = policy.pools(1, 5, 3);
        // week 1 shifts every employee one step along the cycle
        assert_eq!(pools[0], vec![EmployeeId(2)]);
        assert_eq!(pools[1], vec![EmployeeId(0), EmployeeId(3)]);
        assert_eq!(pools[2], vec![EmployeeId(1), EmployeeId(4)]);
    }
}
