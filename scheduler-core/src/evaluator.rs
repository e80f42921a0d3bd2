//! Pure predicates used both to prune solver variables and to validate a
//! solved schedule after the fact. Nothing here touches the solver.

use std::collections::HashMap;

use crate::domain::{Employee, PreAssignedShift, Schedule, ShiftRequirement, TimeOffRequest};
use crate::template::week_start;

/// True if `employee` may work `weekday`/`shift_time`, i.e. it's in their
/// availability and not covered by a time-off request.
pub fn is_available(
    employee: &Employee,
    weekday: crate::domain::Weekday,
    date: chrono::NaiveDate,
    shift_time: shared::ShiftTime,
    time_off: &[TimeOffRequest],
) -> bool {
    if !employee.is_available(weekday, shift_time) {
        return false;
    }
    !time_off
        .iter()
        .any(|r| r.employee_name == employee.name && r.date == date && r.shift_time == shift_time)
}

/// Headcount and capability-floor check for one staffed slot.
pub fn satisfies_requirement(
    requirement: &ShiftRequirement,
    assigned: &[&Employee],
    relaxed: bool,
) -> bool {
    if assigned.len() as u32 != requirement.num_people {
        return false;
    }
    let leaders = assigned.iter().filter(|e| e.is_leader).count() as u32;
    let injectors = assigned.iter().filter(|e| e.can_inject).count() as u32;
    let either = assigned
        .iter()
        .filter(|e| e.is_leader_or_injector())
        .count() as u32;

    let floor = |minimum: u32| {
        if relaxed {
            ShiftRequirement::relaxed_floor(minimum)
        } else {
            minimum
        }
    };

    leaders >= floor(requirement.num_leaders)
        && injectors >= floor(requirement.num_injectors)
        && either >= floor(requirement.num_leader_or_injector)
}

/// Weekly load check for full-time employees. Part-time employees are
/// vacuously compliant. A week in which the employee has no assignments at
/// all is not checked.
pub fn satisfies_fulltime_weekly(
    schedule: &Schedule,
    employee: &Employee,
    relax_shifts: bool,
    relax_days_off: bool,
) -> bool {
    if !employee.is_fulltime {
        return true;
    }

    let mut by_week: HashMap<chrono::NaiveDate, Vec<chrono::NaiveDate>> = HashMap::new();
    for shift in schedule.get_employee_shifts(&employee.name) {
        by_week
            .entry(week_start(shift.date))
            .or_default()
            .push(shift.date);
    }

    for dates in by_week.values() {
        let total = dates.len();
        let shift_ok = if relax_shifts {
            (8..=10).contains(&total)
        } else {
            total == 10
        };
        if !shift_ok {
            return false;
        }

        let distinct_days: std::collections::BTreeSet<_> = dates.iter().collect();
        let max_days = if relax_days_off { 6 } else { 5 };
        if distinct_days.len() > max_days {
            return false;
        }
    }
    true
}

/// Strictly-less-than-`max` daily cap, default 3.
pub fn satisfies_day_limit(
    schedule: &Schedule,
    employee_name: &str,
    date: chrono::NaiveDate,
    max: usize,
) -> bool {
    let count = schedule
        .get_employee_shifts(employee_name)
        .into_iter()
        .filter(|s| s.date == date)
        .count();
    count < max
}

/// Every `PreAssignedShift` must appear in the solved schedule.
pub fn honors_pre_assignments(schedule: &Schedule, pre_assigned: &[PreAssignedShift]) -> bool {
    pre_assigned.iter().all(|p| {
        schedule
            .get_shift(p.date, p.shift_time)
            .map(|s| s.assigned_employees.iter().any(|n| n == &p.employee_name))
            .unwrap_or(false)
    })
}

/// Re-checks every hard constraint family against an already-solved
/// schedule, independent of however the solver posted them. Returns a
/// human-readable violation per failure; an empty result means the
/// schedule is sound. Intended as a sanity pass over `solve()`'s own
/// output, not a second source of truth the solver consults.
pub fn validate_schedule(
    schedule: &Schedule,
    employees: &[Employee],
    requirements: &[ShiftRequirement],
    pre_assigned: &[PreAssignedShift],
    relax_requirements: bool,
    relax_shifts: bool,
    relax_days_off: bool,
) -> Vec<String> {
    use chrono::Datelike;

    let mut violations = Vec::new();
    let by_name: HashMap<&str, &Employee> = employees.iter().map(|e| (e.name.as_str(), e)).collect();
    let by_key: HashMap<(u8, shared::ShiftTime), &ShiftRequirement> = requirements
        .iter()
        .map(|r| ((r.weekday, r.shift_time), r))
        .collect();

    for shift in &schedule.shifts {
        let weekday = shift.date.weekday().number_from_monday() as u8;
        if let Some(requirement) = by_key.get(&(weekday, shift.shift_time)) {
            let assigned: Vec<&Employee> = shift
                .assigned_employees
                .iter()
                .filter_map(|name| by_name.get(name.as_str()).copied())
                .collect();
            if !satisfies_requirement(requirement, &assigned, relax_requirements) {
                violations.push(format!(
                    "{} {} does not satisfy its requirement",
                    shift.date, shift.shift_time
                ));
            }
        }
    }

    let dates: std::collections::BTreeSet<chrono::NaiveDate> =
        schedule.shifts.iter().map(|s| s.date).collect();
    for employee in employees {
        if !satisfies_fulltime_weekly(schedule, employee, relax_shifts, relax_days_off) {
            violations.push(format!("{} violates its full-time weekly load", employee.name));
        }
        for &date in &dates {
            if !satisfies_day_limit(schedule, &employee.name, date, 3) {
                violations.push(format!("{} exceeds the daily cap on {date}", employee.name));
            }
        }
    }

    if !honors_pre_assignments(schedule, pre_assigned) {
        violations.push("a pre-assigned shift is missing from the schedule".to_string());
    }

    violations
}

/// Post-hoc preference score: +10 for exactly two shifts in a day, +0 for
/// one, -5 for three or more. Distinct from the solver's linearized
/// objective (see the solver module for why the two diverge).
pub fn preference_score(schedule: &Schedule) -> i64 {
    let mut per_employee_day: HashMap<(&str, chrono::NaiveDate), usize> = HashMap::new();
    for shift in &schedule.shifts {
        for name in &shift.assigned_employees {
            *per_employee_day
                .entry((name.as_str(), shift.date))
                .or_insert(0) += 1;
        }
    }

    per_employee_day
        .values()
        .map(|&count| match count {
            0 => 0,
            1 => 0,
            2 => 10,
            _ => -5,
        })
        .sum()
}
