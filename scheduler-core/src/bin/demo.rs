use anyhow::Result;
use chrono::NaiveDate;
use scheduler_core::domain::{Employee, ShiftRequirement};
use scheduler_core::{solve, Diagnostics, RelaxationFlags, SolveRequest, SolverStatus};
use shared::ShiftTime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scheduler_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting scheduler-core demo...");

    let settings = scheduler_core::config::Settings::new()?;
    tracing::info!("Configuration loaded: {:?}", settings);

    let employees = vec![
        Employee::new("Amy")
            .with_leader(true)
            .with_injector(true)
            .available_on(1, ShiftTime::ALL)
            .available_on(2, ShiftTime::ALL)
            .available_on(3, ShiftTime::ALL)
            .available_on(4, ShiftTime::ALL)
            .available_on(5, ShiftTime::ALL)
            .available_on(6, ShiftTime::ALL)
            .available_on(7, ShiftTime::ALL),
        Employee::new("Ben")
            .with_leader(true)
            .available_on(1, ShiftTime::ALL)
            .available_on(2, ShiftTime::ALL)
            .available_on(3, ShiftTime::ALL)
            .available_on(4, ShiftTime::ALL)
            .available_on(5, ShiftTime::ALL),
        Employee::new("Cara")
            .with_injector(true)
            .available_on(1, ShiftTime::ALL)
            .available_on(2, ShiftTime::ALL)
            .available_on(3, ShiftTime::ALL)
            .available_on(4, ShiftTime::ALL)
            .available_on(5, ShiftTime::ALL)
            .available_on(6, ShiftTime::ALL)
            .available_on(7, ShiftTime::ALL),
    ];

    let mut requirements = Vec::new();
    for weekday in 1..=7u8 {
        for shift_time in ShiftTime::ALL {
            requirements.push(
                ShiftRequirement::new(weekday, shift_time, 2)
                    .with_leaders(1)
                    .with_injectors(1),
            );
        }
    }

    let start_date = NaiveDate::from_ymd_opt(2025, 1, 6).expect("valid date");
    let request = SolveRequest {
        employees: &employees,
        requirements: &requirements,
        time_off: &[],
        pre_assigned: &[],
        start_date,
        num_weeks: 1,
        max_time_seconds: settings.solver.max_time_seconds,
        relaxations: RelaxationFlags {
            relax_requirements: settings.solver.relax_requirements,
            relax_shifts: settings.solver.relax_shifts,
            relax_days_off: settings.solver.relax_days_off,
        },
    };

    let (schedule, diagnostics) = solve(request)?;
    report(&diagnostics);

    match schedule {
        Some(schedule) => {
            for shift in &schedule.shifts {
                tracing::info!(
                    "{} {} -> {:?}",
                    shift.date,
                    shift.shift_time,
                    shift.assigned_employees
                );
            }
            tracing::info!("preference score: {}", scheduler_core::evaluator::preference_score(&schedule));
        }
        None => tracing::warn!("no schedule produced ({:?})", diagnostics.status),
    }

    Ok(())
}

fn report(diagnostics: &Diagnostics) {
    tracing::info!(
        "status={:?} solve_time={:.3}s wall_time={:.3}s relaxations={:?}",
        diagnostics.status,
        diagnostics.solve_time_seconds(),
        diagnostics.wall_time_seconds,
        diagnostics.relaxations,
    );
    if diagnostics.status == SolverStatus::Optimal || diagnostics.status == SolverStatus::Feasible {
        for (name, count) in &diagnostics.employee_tally {
            tracing::info!("  {name}: {count} shifts");
        }
    }
}
