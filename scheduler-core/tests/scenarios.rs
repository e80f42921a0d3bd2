use chrono::NaiveDate;
use scheduler_core::domain::{Employee, PreAssignedShift, ShiftRequirement, TimeOffRequest};
use scheduler_core::evaluator::preference_score;
use scheduler_core::{solve, RelaxationFlags, SolveRequest, SolverStatus};
use shared::ShiftTime;

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

fn available_all_week(employee: Employee) -> Employee {
    (1..=7u8).fold(employee, |e, day| e.available_on(day, ShiftTime::ALL))
}

/// S1 (corrected): three part-time employees available every shift, every
/// day, each required on every slot. Feasible, but everyone works all
/// three shifts daily, so the preference score is entirely -5 penalties.
#[test]
fn s1_minimal_feasible_all_three_shifts() {
    let employees = vec![
        available_all_week(Employee::new("A").with_leader(true).with_injector(true)),
        available_all_week(Employee::new("B").with_leader(true)),
        available_all_week(Employee::new("C").with_injector(true)),
    ];
    let mut requirements = Vec::new();
    for weekday in 1..=7u8 {
        for shift_time in ShiftTime::ALL {
            requirements.push(
                ShiftRequirement::new(weekday, shift_time, 3)
                    .with_leaders(1)
                    .with_injectors(1)
                    .with_leader_or_injector(2),
            );
        }
    }

    let (schedule, diagnostics) = solve(SolveRequest {
        employees: &employees,
        requirements: &requirements,
        time_off: &[],
        pre_assigned: &[],
        start_date: monday(),
        num_weeks: 1,
        max_time_seconds: 10.0,
        relaxations: RelaxationFlags::none(),
    })
    .unwrap();

    let schedule = schedule.expect("expected a feasible schedule");
    assert_eq!(schedule.shifts.len(), 21);
    for shift in &schedule.shifts {
        assert_eq!(shift.assigned_employees.len(), 3);
    }
    assert!(matches!(
        diagnostics.status,
        SolverStatus::Optimal | SolverStatus::Feasible
    ));
    assert_eq!(preference_score(&schedule), 3 * 7 * -5);
}

/// S2 — a pre-assignment must survive into the solved schedule.
#[test]
fn s2_pre_assignment_pinned() {
    let employees: Vec<Employee> = (1..=5)
        .map(|i| available_all_week(Employee::new(format!("E{i}"))))
        .collect();
    let mut requirements = Vec::new();
    for weekday in 1..=7u8 {
        for shift_time in ShiftTime::ALL {
            requirements.push(ShiftRequirement::new(weekday, shift_time, 2));
        }
    }
    let pre_assigned = vec![PreAssignedShift {
        employee_name: "E1".into(),
        date: monday(),
        shift_time: ShiftTime::Morning,
    }];

    let (schedule, _) = solve(SolveRequest {
        employees: &employees,
        requirements: &requirements,
        time_off: &[],
        pre_assigned: &pre_assigned,
        start_date: monday(),
        num_weeks: 1,
        max_time_seconds: 10.0,
        relaxations: RelaxationFlags::none(),
    })
    .unwrap();

    let schedule = schedule.expect("expected a feasible schedule");
    let shift = schedule.get_shift(monday(), ShiftTime::Morning).unwrap();
    assert!(shift.assigned_employees.iter().any(|n| n == "E1"));
}

/// S3 — a pre-assignment colliding with a time-off on the same slot makes
/// the strict model infeasible.
#[test]
fn s3_time_off_conflicts_with_pre_assignment() {
    let employees: Vec<Employee> = (1..=5)
        .map(|i| available_all_week(Employee::new(format!("E{i}"))))
        .collect();
    let mut requirements = Vec::new();
    for weekday in 1..=7u8 {
        for shift_time in ShiftTime::ALL {
            requirements.push(ShiftRequirement::new(weekday, shift_time, 2));
        }
    }
    let pre_assigned = vec![PreAssignedShift {
        employee_name: "E1".into(),
        date: monday(),
        shift_time: ShiftTime::Morning,
    }];
    let time_off = vec![TimeOffRequest {
        employee_name: "E1".into(),
        date: monday(),
        shift_time: ShiftTime::Morning,
    }];

    let (schedule, diagnostics) = solve(SolveRequest {
        employees: &employees,
        requirements: &requirements,
        time_off: &time_off,
        pre_assigned: &pre_assigned,
        start_date: monday(),
        num_weeks: 1,
        max_time_seconds: 10.0,
        relaxations: RelaxationFlags::none(),
    })
    .unwrap();

    assert!(schedule.is_none());
    assert_eq!(diagnostics.status, SolverStatus::Infeasible);
}

/// S4 — a leader floor with no leader in the roster is infeasible strict,
/// feasible once requirements are relaxed (1 // 2 == 0).
#[test]
fn s4_capability_infeasibility_then_relaxed() {
    let employees: Vec<Employee> = (1..=4)
        .map(|i| available_all_week(Employee::new(format!("E{i}"))))
        .collect();
    let requirements = vec![ShiftRequirement::new(1, ShiftTime::Morning, 2).with_leaders(1)];

    let (schedule, diagnostics) = solve(SolveRequest {
        employees: &employees,
        requirements: &requirements,
        time_off: &[],
        pre_assigned: &[],
        start_date: monday(),
        num_weeks: 1,
        max_time_seconds: 10.0,
        relaxations: RelaxationFlags::none(),
    })
    .unwrap();
    assert!(schedule.is_none());
    assert_eq!(diagnostics.status, SolverStatus::Infeasible);

    let (schedule, _) = solve(SolveRequest {
        employees: &employees,
        requirements: &requirements,
        time_off: &[],
        pre_assigned: &[],
        start_date: monday(),
        num_weeks: 1,
        max_time_seconds: 10.0,
        relaxations: RelaxationFlags {
            relax_requirements: true,
            ..RelaxationFlags::none()
        },
    })
    .unwrap();
    assert!(schedule.is_some());
}

/// S5 — the per-day cap of three never lets one employee cover more than
/// three shifts in a single date even under heavy demand.
#[test]
fn s5_daily_cap_enforced() {
    let employees = vec![
        available_all_week(Employee::new("E1")),
        available_all_week(Employee::new("E2")),
    ];
    let mut requirements = Vec::new();
    for weekday in 1..=7u8 {
        for shift_time in ShiftTime::ALL {
            requirements.push(ShiftRequirement::new(weekday, shift_time, 1));
        }
    }

    let (schedule, _) = solve(SolveRequest {
        employees: &employees,
        requirements: &requirements,
        time_off: &[],
        pre_assigned: &[],
        start_date: monday(),
        num_weeks: 1,
        max_time_seconds: 10.0,
        relaxations: RelaxationFlags::none(),
    })
    .unwrap();

    let schedule = schedule.expect("expected a feasible schedule");
    for employee in &employees {
        for date in schedule.shifts.iter().map(|s| s.date).collect::<std::collections::BTreeSet<_>>() {
            let count = schedule
                .get_employee_shifts(&employee.name)
                .into_iter()
                .filter(|s| s.date == date)
                .count();
            assert!(count <= 3);
        }
    }
}

/// S6 — two full-time employees cannot jointly satisfy 21 single-headcount
/// shifts a week when each must work exactly 10: total demand (21) is one
/// more than their combined capacity (20).
#[test]
fn s6_fulltime_exact_load_infeasible_until_third_employee_added() {
    let employees = vec![
        available_all_week(Employee::new("F1").with_fulltime(true)),
        available_all_week(Employee::new("F2").with_fulltime(true)),
    ];
    let mut requirements = Vec::new();
    for weekday in 1..=7u8 {
        for shift_time in ShiftTime::ALL {
            requirements.push(ShiftRequirement::new(weekday, shift_time, 1));
        }
    }

    let (schedule, diagnostics) = solve(SolveRequest {
        employees: &employees,
        requirements: &requirements,
        time_off: &[],
        pre_assigned: &[],
        start_date: monday(),
        num_weeks: 1,
        max_time_seconds: 10.0,
        relaxations: RelaxationFlags::none(),
    })
    .unwrap();
    assert!(schedule.is_none());
    assert_eq!(diagnostics.status, SolverStatus::Infeasible);

    let mut employees_with_helper = employees;
    employees_with_helper.push(available_all_week(Employee::new("P1")));

    let (schedule, _) = solve(SolveRequest {
        employees: &employees_with_helper,
        requirements: &requirements,
        time_off: &[],
        pre_assigned: &[],
        start_date: monday(),
        num_weeks: 1,
        max_time_seconds: 10.0,
        relaxations: RelaxationFlags::none(),
    })
    .unwrap();
    assert!(schedule.is_some());
}

/// Idempotence: re-solving with the output's assignments fed back in as
/// pre-assignments (and no time-off) reproduces the same assignments.
#[test]
fn idempotence_of_pre_assignment_replay() {
    let employees: Vec<Employee> = (1..=5)
        .map(|i| available_all_week(Employee::new(format!("E{i}"))))
        .collect();
    let mut requirements = Vec::new();
    for weekday in 1..=7u8 {
        for shift_time in ShiftTime::ALL {
            requirements.push(ShiftRequirement::new(weekday, shift_time, 2));
        }
    }

    let (first, _) = solve(SolveRequest {
        employees: &employees,
        requirements: &requirements,
        time_off: &[],
        pre_assigned: &[],
        start_date: monday(),
        num_weeks: 1,
        max_time_seconds: 10.0,
        relaxations: RelaxationFlags::none(),
    })
    .unwrap();
    let first = first.unwrap();

    let replayed_pre_assignments: Vec<PreAssignedShift> = first
        .shifts
        .iter()
        .flat_map(|shift| {
            shift.assigned_employees.iter().map(move |name| PreAssignedShift {
                employee_name: name.clone(),
                date: shift.date,
                shift_time: shift.shift_time,
            })
        })
        .collect();

    let (second, _) = solve(SolveRequest {
        employees: &employees,
        requirements: &requirements,
        time_off: &[],
        pre_assigned: &replayed_pre_assignments,
        start_date: monday(),
        num_weeks: 1,
        max_time_seconds: 10.0,
        relaxations: RelaxationFlags::none(),
    })
    .unwrap();
    let second = second.unwrap();

    for shift in &first.shifts {
        let mut expected = shift.assigned_employees.clone();
        expected.sort();
        let mut actual = second
            .get_shift(shift.date, shift.shift_time)
            .unwrap()
            .assigned_employees
            .clone();
        actual.sort();
        assert_eq!(expected, actual);
    }
}
