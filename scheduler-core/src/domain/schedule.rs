use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::ShiftTime;
use std::collections::BTreeMap;

/// One staffed slot. `assigned_employees` lists employee names in input
/// index order (not alphabetical), matching the order the solver assigned
/// its decision variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    pub date: NaiveDate,
    pub shift_time: ShiftTime,
    pub assigned_employees: Vec<String>,
}

/// The solved output: every template slot in template order, including
/// slots with zero assignments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    pub shifts: Vec<Shift>,
}

impl Schedule {
    pub fn get_shift(&self, date: NaiveDate, shift_time: ShiftTime) -> Option<&Shift> {
        self.shifts
            .iter()
            .find(|s| s.date == date && s.shift_time == shift_time)
    }

    pub fn get_employee_shifts(&self, employee_name: &str) -> Vec<&Shift> {
        self.shifts
            .iter()
            .filter(|s| s.assigned_employees.iter().any(|n| n == employee_name))
            .collect()
    }

    /// Per-employee shift count across the whole schedule, for the
    /// diagnostics report.
    pub fn employee_tally(&self) -> BTreeMap<String, usize> {
        let mut tally = BTreeMap::new();
        for shift in &self.shifts {
            for name in &shift.assigned_employees {
                *tally.entry(name.clone()).or_insert(0) += 1;
            }
        }
        tally
    }
}
