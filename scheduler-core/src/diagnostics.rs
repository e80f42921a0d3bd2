use std::collections::BTreeMap;
use std::time::Duration;

/// Non-fatal solve outcomes. These are first-class results, not errors:
/// a caller routinely receives `Infeasible` and reacts by relaxing
/// constraints rather than treating it as a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    /// The objective was proven maximal within the time budget.
    Optimal,
    /// A satisfying assignment was found but optimality was not proven
    /// (typically because the time budget ran out during the optimizing
    /// pass after a feasible solution was already established).
    Feasible,
    /// The solver proved no assignment satisfies the posted constraints.
    Infeasible,
    /// The solver exhausted its time budget before proving feasibility or
    /// infeasibility.
    Unknown,
}

/// Which relaxations were in effect for a given solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelaxationFlags {
    pub relax_requirements: bool,
    pub relax_shifts: bool,
    pub relax_days_off: bool,
}

impl RelaxationFlags {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn any(&self) -> bool {
        self.relax_requirements || self.relax_shifts || self.relax_days_off
    }
}

/// Everything observed about a single `solve` invocation.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    pub status: SolverStatus,
    pub solve_time: Duration,
    /// Backend-internal search time, as reported by the solver's own stats
    /// rather than measured around it — distinct from `solve_time`, which
    /// also covers constraint-posting and materialization.
    pub wall_time_seconds: f64,
    pub num_conflicts: u64,
    pub num_branches: u64,
    pub relaxations: RelaxationFlags,
    pub valid_count: u32,
    pub employee_tally: BTreeMap<String, usize>,
}

impl Diagnostics {
    pub fn solve_time_seconds(&self) -> f64 {
        self.solve_time.as_secs_f64()
    }
}
