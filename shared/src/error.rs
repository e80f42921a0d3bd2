use thiserror::Error;

/// Fatal, non-recoverable input errors. Solver outcomes such as `Infeasible`
/// or `Unknown` are not modeled here — see `scheduler_core::diagnostics::SolverStatus`.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("schedule must start on a Monday, got {0}")]
    InvalidStart(chrono::NaiveDate),

    #[error("reference to unknown employee: {0}")]
    UnknownEmployeeReference(String),

    #[error("inconsistent requirement for weekday {weekday}/{shift_time}: {reason}")]
    InconsistentRequirement {
        weekday: u8,
        shift_time: String,
        reason: String,
    },

    #[error("solver backend error: {0}")]
    SolverBackend(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
