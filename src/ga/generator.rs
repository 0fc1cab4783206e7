//! Random initial rosters.
//!
//! # Normal mode
//! Shifts of an open day are filled in column order from a pool of
//! employees not yet used that day. When the pool cannot cover a shift's
//! demand, the shift is sampled from the full employee list instead, which
//! may double-book someone; the evaluator penalises that rather than the
//! generator preventing it.
//!
//! # Rotation mode
//! Each shift first draws from the employees whose rotation target for
//! the week is that shift. A short target pool is topped up from anyone
//! still unused that day (rotation mismatch is penalised, not prevented).

use rand::Rng;

use crate::models::{ClosureCalendar, EmployeeId, Roster};

use super::sampling::sample_unique;
use super::RosterProblem;

/// Builds one random roster for `problem`. Closed days stay empty.
pub fn random_roster<R: Rng>(problem: &RosterProblem, rng: &mut R) -> Roster {
    let mut roster = Roster::new(problem.days(), problem.shift_count());
    let employees = problem.employee_ids();

    for day in 0..problem.days() {
        if problem.calendar().is_closed(day) {
            continue;
        }
        if problem.is_rotation() {
            fill_rotation_day(problem, &employees, day, &mut roster, rng);
        } else {
            fill_normal_day(problem, &employees, day, &mut roster, rng);
        }
    }

    roster.stamp_closed_days(problem.calendar());
    roster
}

fn fill_normal_day<R: Rng>(
    problem: &RosterProblem,
    employees: &[EmployeeId],
    day: usize,
    roster: &mut Roster,
    rng: &mut R,
) {
    let mut available = employees.to_vec();
    for shift in 0..problem.shift_count() {
        let need = problem.demand(shift) as usize;
        if need == 0 {
            continue;
        }
        if available.len() >= need {
            let chosen = sample_unique(&available, need, rng);
            available.retain(|e| !chosen.contains(e));
            roster.assign(day, shift, chosen);
        } else {
            roster.assign(day, shift, sample_unique(employees, need, rng));
        }
    }
}

fn fill_rotation_day<R: Rng>(
    problem: &RosterProblem,
    employees: &[EmployeeId],
    day: usize,
    roster: &mut Roster,
    rng: &mut R,
) {
    let week = ClosureCalendar::week_index(day);
    let pools = problem
        .rotation()
        .pools(week, problem.employee_count(), problem.shift_count());
    let mut used = vec![false; problem.employee_count()];

    for (shift, pool) in pools.iter().enumerate() {
        let need = problem.demand(shift) as usize;
        if need == 0 {
            continue;
        }
        let main: Vec<EmployeeId> = pool.iter().copied().filter(|e| !used[e.index()]).collect();

        let chosen = if main.len() >= need {
            sample_unique(&main, need, rng)
        } else {
            let remain = need - main.len();
            let fallback: Vec<EmployeeId> = employees
                .iter()
                .copied()
                .filter(|e| !used[e.index()] && !main.contains(e))
                .collect();
            let mut chosen = main;
            chosen.extend(sample_unique(&fallback, remain, rng));
            chosen
        };

        for e in &chosen {
            used[e.index()] = true;
        }
        roster.assign(day, shift, chosen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DemandProfile, RuleConfig};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn problem(
        days: i64,
        shifts: &[&str],
        employees: &[&str],
        demand: DemandProfile,
        rules: RuleConfig,
    ) -> RosterProblem {
        RosterProblem::new(days, names(shifts), names(employees), &demand, rules).unwrap()
    }

    #[test]
    fn test_closed_days_are_empty() {
        let p = problem(
            7,
            &["Pagi", "Siang", "Malam"],
            &["A", "B", "C", "D", "E", "F", "G", "H"],
            DemandProfile::new().with("Pagi", 3).with("Siang", 3).with("Malam", 2),
            RuleConfig::new().with_closed_weekdays([5, 6]),
        );
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..20 {
            let r = random_roster(&p, &mut rng);
            assert!(r.respects_closures(p.calendar()));
            for shift in 0..3 {
                assert!(r.cell(5, shift).is_empty());
                assert!(r.cell(6, shift).is_empty());
            }
            assert_eq!(r.cell(0, 0).len(), 3);
        }
    }

    #[test]
    fn test_exact_demand_when_staff_suffices() {
        let p = problem(
            10,
            &["Pagi"],
            &["A", "B", "C"],
            DemandProfile::new().with("Pagi", 2),
            RuleConfig::default(),
        );
        let mut rng = SmallRng::seed_from_u64(42);
        let r = random_roster(&p, &mut rng);
        for day in 0..10 {
            assert_eq!(r.cell(day, 0).len(), 2);
        }
    }

    #[test]
    fn test_normal_mode_no_double_booking_when_pool_covers_demand() {
        let p = problem(
            14,
            &["Pagi", "Siang", "Malam"],
            &["A", "B", "C", "D", "E", "F", "G", "H"],
            DemandProfile::new().with("Pagi", 3).with("Siang", 3).with("Malam", 2),
            RuleConfig::default(),
        );
        let mut rng = SmallRng::seed_from_u64(7);
        let r = random_roster(&p, &mut rng);
        for day in 0..14 {
            for e in p.employee_ids() {
                assert!(r.shifts_worked_on(day, e) <= 1);
            }
        }
    }

    #[test]
    fn test_normal_mode_short_pool_falls_back_to_full_list() {
        // 3 employees, demand 2 + 2: the second shift must reuse someone.
        let p = problem(
            1,
            &["Pagi", "Siang"],
            &["A", "B", "C"],
            DemandProfile::new().with("Pagi", 2).with("Siang", 2),
            RuleConfig::default(),
        );
        let mut rng = SmallRng::seed_from_u64(42);
        let r = random_roster(&p, &mut rng);
        assert_eq!(r.cell(0, 0).len(), 2);
        assert_eq!(r.cell(0, 1).len(), 2);
        let doubled = p
            .employee_ids()
            .into_iter()
            .filter(|&e| r.shifts_worked_on(0, e) > 1)
            .count();
        assert!(doubled >= 1);
    }

    #[test]
    fn test_rotation_mode_prefers_targets() {
        let shifts = ["Pagi", "Siang", "Malam"];
        let p = problem(
            14,
            &shifts,
            &["A", "B", "C", "D", "E", "F"],
            DemandProfile::new().with("Pagi", 2).with("Siang", 2).with("Malam", 2),
            RuleConfig::new().with_rotation(shifts, 200.0),
        );
        let mut rng = SmallRng::seed_from_u64(42);
        let r = random_roster(&p, &mut rng);
        // Each target pool holds exactly two employees, so every assignment is on target.
        for day in 0..14 {
            let week = ClosureCalendar::week_index(day);
            for shift in 0..3 {
                assert_eq!(r.cell(day, shift).len(), 2);
                for &e in r.cell(day, shift) {
                    assert!(p.rotation().is_target(e, week, shift));
                }
            }
        }
    }

    #[test]
    fn test_rotation_mode_tops_up_short_pool() {
        let shifts = ["Pagi", "Siang"];
        let p = problem(
            1,
            &shifts,
            &["A", "B", "C", "D"],
            DemandProfile::new().with("Pagi", 3),
            RuleConfig::new().with_rotation(shifts, 200.0),
        );
        let mut rng = SmallRng::seed_from_u64(42);
        let r = random_roster(&p, &mut rng);
        let cell = r.cell(0, 0);
        assert_eq!(cell.len(), 3);
        // Both Pagi-targeted employees (A, C) are always included.
        assert!(cell.contains(&EmployeeId(0)));
        assert!(cell.contains(&EmployeeId(2)));
    }

    #[test]
    fn test_same_seed_same_roster() {
        let p = problem(
            7,
            &["Pagi", "Malam"],
            &["A", "B", "C", "D"],
            DemandProfile::new().with("Pagi", 2).with("Malam", 1),
            RuleConfig::default(),
        );
        let a = random_roster(&p, &mut SmallRng::seed_from_u64(9));
        let b = random_roster(&p, &mut SmallRng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
