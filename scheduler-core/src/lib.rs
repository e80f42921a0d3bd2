pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod evaluator;
pub mod parsing;
pub mod solver;
pub mod template;

pub use diagnostics::{Diagnostics, RelaxationFlags, SolverStatus};
pub use domain::{Employee, PreAssignedShift, Schedule, ShiftRequirement, TimeOffRequest};
pub use evaluator::preference_score as score;
pub use solver::{solve, SolveRequest};
