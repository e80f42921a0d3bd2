use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::ShiftTime;

/// A single shift the named employee must not be assigned to.
/// A "full day off" request is expanded by the caller into one of these
/// per `ShiftTime`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeOffRequest {
    pub employee_name: String,
    pub date: NaiveDate,
    pub shift_time: ShiftTime,
}

/// A single shift the named employee must be assigned to. The caller is
/// responsible for only pre-assigning shifts the employee is, on paper,
/// available for — conflicts with availability or time-off make the model
/// infeasible rather than being silently dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreAssignedShift {
    pub employee_name: String,
    pub date: NaiveDate,
    pub shift_time: ShiftTime,
}
