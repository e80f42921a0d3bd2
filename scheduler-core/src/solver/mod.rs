//! Builds the decision-variable matrix, posts every hard constraint family,
//! and drives the external constraint solver.
//!
//! `selen`'s optimizing search (`Model::maximize`) discards any incumbent
//! solution and returns `Err(Timeout)` if it cannot prove optimality in
//! time — it does not hand back a best-effort feasible assignment the way
//! a plain `Model::solve()` does. To still return a schedule when a caller
//! asks for one under a timeout, this module solves in two passes: a
//! feasibility-only pass establishes whether *any* assignment exists, and
//! only then does a second, objective-bearing pass attempt to prove
//! optimality. If the second pass times out, the first pass's assignment
//! is returned labeled `Feasible` rather than `Optimal`.

use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use selen::prelude::*;
use shared::{CoreError, CoreResult, ShiftTime};

use crate::diagnostics::{Diagnostics, RelaxationFlags, SolverStatus};
use crate::domain::{Employee, PreAssignedShift, Schedule, Shift, ShiftRequirement, TimeOffRequest};
use crate::template::{build_template, TemplateSlot};

pub struct SolveRequest<'a> {
    pub employees: &'a [Employee],
    pub requirements: &'a [ShiftRequirement],
    pub time_off: &'a [TimeOffRequest],
    pub pre_assigned: &'a [PreAssignedShift],
    pub start_date: NaiveDate,
    pub num_weeks: u32,
    pub max_time_seconds: f64,
    pub relaxations: RelaxationFlags,
}

/// Variable matrix and everything needed to materialize a solution, shared
/// between the feasibility pass and the optimizing pass so both post
/// identical hard constraints.
struct ModelBuild {
    model: Model,
    x: Vec<Vec<VarId>>,
    slots: Vec<TemplateSlot>,
}

pub fn solve(request: SolveRequest<'_>) -> CoreResult<(Option<Schedule>, Diagnostics)> {
    validate_references(&request)?;
    for req in request.requirements {
        req.validate().map_err(|reason| CoreError::InconsistentRequirement {
            weekday: req.weekday,
            shift_time: req.shift_time.to_string(),
            reason,
        })?;
    }

    let started = Instant::now();
    let time_budget = Duration::from_secs_f64(request.max_time_seconds.max(0.0));

    let feasibility = build_and_post(&request, time_budget)?;
    let feasibility_solution = match feasibility.model.solve() {
        Ok(solution) => solution,
        Err(SolverError::NoSolution { .. }) => {
            tracing::info!("strict model proved infeasible");
            return Ok((
                None,
                empty_diagnostics(SolverStatus::Infeasible, started.elapsed(), request.relaxations),
            ));
        }
        Err(SolverError::Timeout { .. }) => {
            tracing::info!("feasibility pass timed out with no proof either way");
            return Ok((
                None,
                empty_diagnostics(SolverStatus::Unknown, started.elapsed(), request.relaxations),
            ));
        }
        Err(other) => return Err(CoreError::SolverBackend(other.to_string())),
    };
    let fallback_wall_time = feasibility_solution.stats.solve_time.as_secs_f64();
    let fallback_schedule = materialize(&feasibility.slots, &feasibility.x, request.employees, &feasibility_solution);

    let remaining = time_budget.saturating_sub(started.elapsed());
    let ModelBuild { mut model, x, slots } = build_and_post(&request, remaining)?;
    let bonus_vars = post_objective(&mut model, &slots, &x, request.employees);
    let objective_var = if bonus_vars.is_empty() {
        model.int(0, 0)
    } else {
        model.sum(&bonus_vars)
    };

    let (status, schedule, wall_time_seconds) = match model.maximize(objective_var) {
        Ok(solution) => {
            let wall_time = solution.stats.solve_time.as_secs_f64();
            let schedule = materialize(&slots, &x, request.employees, &solution);
            (SolverStatus::Optimal, schedule, wall_time)
        }
        Err(SolverError::Timeout { .. }) => {
            tracing::info!("optimizing pass timed out, returning feasibility-pass schedule");
            (SolverStatus::Feasible, fallback_schedule, fallback_wall_time)
        }
        Err(SolverError::NoSolution { .. }) => {
            tracing::warn!("optimizing pass reported infeasible after feasibility pass succeeded");
            (SolverStatus::Feasible, fallback_schedule, fallback_wall_time)
        }
        Err(other) => return Err(CoreError::SolverBackend(other.to_string())),
    };

    let violations = crate::evaluator::validate_schedule(
        &schedule,
        request.employees,
        request.requirements,
        request.pre_assigned,
        request.relaxations.relax_requirements,
        request.relaxations.relax_shifts,
        request.relaxations.relax_days_off,
    );
    for violation in &violations {
        tracing::warn!("post-solution validation: {violation}");
    }

    let tally = schedule.employee_tally();
    let diagnostics = Diagnostics {
        status,
        solve_time: started.elapsed(),
        wall_time_seconds,
        num_conflicts: 0,
        num_branches: 0,
        relaxations: request.relaxations,
        valid_count: 1,
        employee_tally: tally,
    };
    Ok((Some(schedule), diagnostics))
}

fn empty_diagnostics(status: SolverStatus, solve_time: Duration, relaxations: RelaxationFlags) -> Diagnostics {
    Diagnostics {
        status,
        solve_time,
        wall_time_seconds: 0.0,
        num_conflicts: 0,
        num_branches: 0,
        relaxations,
        valid_count: 0,
        employee_tally: BTreeMap::new(),
    }
}

fn validate_references(request: &SolveRequest<'_>) -> CoreResult<()> {
    let known: std::collections::HashSet<&str> =
        request.employees.iter().map(|e| e.name.as_str()).collect();
    for t in request.time_off {
        if !known.contains(t.employee_name.as_str()) {
            return Err(CoreError::UnknownEmployeeReference(t.employee_name.clone()));
        }
    }
    for p in request.pre_assigned {
        if !known.contains(p.employee_name.as_str()) {
            return Err(CoreError::UnknownEmployeeReference(p.employee_name.clone()));
        }
    }
    Ok(())
}

fn build_and_post(request: &SolveRequest<'_>, time_budget: Duration) -> CoreResult<ModelBuild> {
    let slots = build_template(request.start_date, request.num_weeks)?;

    let config = SolverConfig::default().with_timeout_ms(time_budget.as_millis() as u64);
    let mut model = Model::with_config(config);

    let x: Vec<Vec<VarId>> = request
        .employees
        .iter()
        .map(|_| slots.iter().map(|_| model.bool()).collect())
        .collect();

    post_availability(&mut model, &slots, &x, request.employees, request.time_off);
    post_pre_assignments(&mut model, &slots, &x, request.employees, request.pre_assigned)?;
    post_headcount(&mut model, &slots, &x, request.requirements);
    post_capability_minima(
        &mut model,
        &slots,
        &x,
        request.employees,
        request.requirements,
        request.relaxations.relax_requirements,
    );
    post_daily_cap(&mut model, &slots, &x, request.employees);
    post_fulltime_weekly(
        &mut model,
        &slots,
        &x,
        request.employees,
        request.relaxations.relax_shifts,
        request.relaxations.relax_days_off,
    );

    Ok(ModelBuild { model, x, slots })
}

fn slot_dates_for_employee_day<'a>(
    slots: &'a [TemplateSlot],
    date: NaiveDate,
) -> Vec<usize> {
    slots
        .iter()
        .enumerate()
        .filter(|(_, s)| s.date == date)
        .map(|(i, _)| i)
        .collect()
}

fn post_availability(
    model: &mut Model,
    slots: &[TemplateSlot],
    x: &[Vec<VarId>],
    employees: &[Employee],
    time_off: &[TimeOffRequest],
) {
    for (e, employee) in employees.iter().enumerate() {
        for (s, slot) in slots.iter().enumerate() {
            let available = crate::evaluator::is_available(
                employee,
                slot.weekday,
                slot.date,
                slot.shift_time,
                time_off,
            );
            if !available {
                model.new(x[e][s].eq(0));
            }
        }
    }
}

fn post_pre_assignments(
    model: &mut Model,
    slots: &[TemplateSlot],
    x: &[Vec<VarId>],
    employees: &[Employee],
    pre_assigned: &[PreAssignedShift],
) -> CoreResult<()> {
    for p in pre_assigned {
        let e = employees
            .iter()
            .position(|emp| emp.name == p.employee_name)
            .ok_or_else(|| CoreError::UnknownEmployeeReference(p.employee_name.clone()))?;
        let s = slots
            .iter()
            .position(|slot| slot.date == p.date && slot.shift_time == p.shift_time);
        if let Some(s) = s {
            model.new(x[e][s].eq(1));
        }
    }
    Ok(())
}

fn post_headcount(
    model: &mut Model,
    slots: &[TemplateSlot],
    x: &[Vec<VarId>],
    requirements: &[ShiftRequirement],
) {
    let by_key: HashMap<(u8, ShiftTime), &ShiftRequirement> = requirements
        .iter()
        .map(|r| ((r.weekday, r.shift_time), r))
        .collect();

    for (s, slot) in slots.iter().enumerate() {
        let Some(req) = by_key.get(&(slot.weekday, slot.shift_time)) else {
            continue;
        };
        let column: Vec<VarId> = x.iter().map(|row| row[s]).collect();
        if column.is_empty() {
            if req.num_people == 0 {
                continue;
            }
            // No employee exists to ever staff this slot: post an
            // unsatisfiable constraint rather than silently passing.
            let zero = model.int(0, 0);
            model.new(zero.eq(req.num_people as i32));
            continue;
        }
        let total = model.sum(&column);
        model.new(total.eq(req.num_people as i32));
    }
}

fn post_capability_minima(
    model: &mut Model,
    slots: &[TemplateSlot],
    x: &[Vec<VarId>],
    employees: &[Employee],
    requirements: &[ShiftRequirement],
    relax: bool,
) {
    let by_key: HashMap<(u8, ShiftTime), &ShiftRequirement> = requirements
        .iter()
        .map(|r| ((r.weekday, r.shift_time), r))
        .collect();

    let floor = |minimum: u32| {
        if relax {
            ShiftRequirement::relaxed_floor(minimum)
        } else {
            minimum
        }
    };

    for (s, slot) in slots.iter().enumerate() {
        let Some(req) = by_key.get(&(slot.weekday, slot.shift_time)) else {
            continue;
        };

        post_pool_minimum(
            model,
            x,
            s,
            employees.iter().enumerate().filter(|(_, e)| e.is_leader).map(|(i, _)| i),
            floor(req.num_leaders),
        );
        post_pool_minimum(
            model,
            x,
            s,
            employees.iter().enumerate().filter(|(_, e)| e.can_inject).map(|(i, _)| i),
            floor(req.num_injectors),
        );
        post_pool_minimum(
            model,
            x,
            s,
            employees
                .iter()
                .enumerate()
                .filter(|(_, e)| e.is_leader_or_injector())
                .map(|(i, _)| i),
            floor(req.num_leader_or_injector),
        );
    }
}

fn post_pool_minimum(
    model: &mut Model,
    x: &[Vec<VarId>],
    slot_index: usize,
    pool: impl Iterator<Item = usize>,
    minimum: u32,
) {
    if minimum == 0 {
        return;
    }
    let vars: Vec<VarId> = pool.map(|e| x[e][slot_index]).collect();
    if vars.is_empty() {
        // No employee in this roster can ever satisfy a positive floor:
        // post an unsatisfiable constraint rather than silently passing.
        let zero = model.int(0, 0);
        model.new(zero.ge(minimum as i32));
        return;
    }
    let sum = model.sum(&vars);
    model.new(sum.ge(minimum as i32));
}

fn post_daily_cap(model: &mut Model, slots: &[TemplateSlot], x: &[Vec<VarId>], employees: &[Employee]) {
    let dates: std::collections::BTreeSet<NaiveDate> = slots.iter().map(|s| s.date).collect();
    for (e, _employee) in employees.iter().enumerate() {
        for &date in &dates {
            let day_slots = slot_dates_for_employee_day(slots, date);
            let vars: Vec<VarId> = day_slots.iter().map(|&s| x[e][s]).collect();
            if vars.is_empty() {
                continue;
            }
            let total = model.sum(&vars);
            model.new(total.le(3));
        }
    }
}

fn post_fulltime_weekly(
    model: &mut Model,
    slots: &[TemplateSlot],
    x: &[Vec<VarId>],
    employees: &[Employee],
    relax_shifts: bool,
    relax_days_off: bool,
) {
    let mut weeks: std::collections::BTreeMap<NaiveDate, Vec<NaiveDate>> = std::collections::BTreeMap::new();
    for date in slots.iter().map(|s| s.date).collect::<std::collections::BTreeSet<_>>() {
        weeks.entry(crate::template::week_start(date)).or_default().push(date);
    }

    for (e, employee) in employees.iter().enumerate() {
        if !employee.is_fulltime {
            continue;
        }
        for dates in weeks.values() {
            let week_slot_indices: Vec<usize> = slots
                .iter()
                .enumerate()
                .filter(|(_, s)| dates.contains(&s.date))
                .map(|(i, _)| i)
                .collect();
            if week_slot_indices.is_empty() {
                continue;
            }

            let week_vars: Vec<VarId> = week_slot_indices.iter().map(|&s| x[e][s]).collect();
            let total = model.sum(&week_vars);
            if relax_shifts {
                model.new(total.ge(8));
                model.new(total.le(10));
            } else {
                model.new(total.eq(10));
            }

            let mut day_indicators = Vec::with_capacity(dates.len());
            for &date in dates {
                let day_slot_indices = slot_dates_for_employee_day(slots, date);
                let day_vars: Vec<VarId> = day_slot_indices.iter().map(|&s| x[e][s]).collect();
                if day_vars.is_empty() {
                    continue;
                }
                let indicator = model.bool_or(&day_vars);
                day_indicators.push(indicator);
            }
            if day_indicators.is_empty() {
                continue;
            }
            let days_worked = model.sum(&day_indicators);
            let cap = if relax_days_off { 6 } else { 5 };
            model.new(days_worked.le(cap));
        }
    }
}

/// Posts the linearized "exactly two shifts that day" bonus and returns the
/// bonus variables (summed by the caller into the objective). The unscaled
/// sum is maximized rather than the spec's `10 * sum` — a positive
/// monotonic rescaling that doesn't change which assignment is optimal —
/// for a simpler encoding against the backend's expression-builder API.
fn post_objective(
    model: &mut Model,
    slots: &[TemplateSlot],
    x: &[Vec<VarId>],
    employees: &[Employee],
) -> Vec<VarId> {
    let mut bonus_vars = Vec::new();
    let dates: std::collections::BTreeSet<NaiveDate> = slots.iter().map(|s| s.date).collect();

    for (e, _employee) in employees.iter().enumerate() {
        for &date in &dates {
            let day_slot_indices = slot_dates_for_employee_day(slots, date);
            let n = day_slot_indices.len();
            if n < 2 {
                continue;
            }
            let day_vars: Vec<VarId> = day_slot_indices.iter().map(|&s| x[e][s]).collect();
            let daily_total = model.sum(&day_vars);
            let bonus = model.bool();

            model.new(daily_total.ge(bonus.mul(2)));
            let not_bonus = model.bool_not(bonus);
            model.new(daily_total.le(not_bonus.mul((n as i32) - 2).add(2)));

            bonus_vars.push(bonus);
        }
    }
    bonus_vars
}

fn materialize(
    slots: &[TemplateSlot],
    x: &[Vec<VarId>],
    employees: &[Employee],
    solution: &Solution,
) -> Schedule {
    let mut shifts = Vec::with_capacity(slots.len());
    for (s, slot) in slots.iter().enumerate() {
        let mut assigned = Vec::new();
        for (e, employee) in employees.iter().enumerate() {
            if is_true(solution[x[e][s]]) {
                assigned.push(employee.name.clone());
            }
        }
        shifts.push(Shift {
            date: slot.date,
            shift_time: slot.shift_time,
            assigned_employees: assigned,
        });
    }
    Schedule { shifts }
}

fn is_true(value: Val) -> bool {
    matches!(value, Val::ValI(v) if v != 0)
}
