use serde::{Deserialize, Serialize};
use shared::ShiftTime;

use super::Weekday;

/// Staffing requirement for one (weekday, shift-time) slot. Slots missing a
/// requirement are unconstrained — they may be emitted empty.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShiftRequirement {
    pub weekday: Weekday,
    pub shift_time: ShiftTime,
    pub num_people: u32,
    pub num_leaders: u32,
    pub num_injectors: u32,
    pub num_leader_or_injector: u32,
}

impl ShiftRequirement {
    pub fn new(weekday: Weekday, shift_time: ShiftTime, num_people: u32) -> Self {
        Self {
            weekday,
            shift_time,
            num_people,
            num_leaders: 0,
            num_injectors: 0,
            num_leader_or_injector: 0,
        }
    }

    pub fn with_leaders(mut self, n: u32) -> Self {
        self.num_leaders = n;
        self
    }

    pub fn with_injectors(mut self, n: u32) -> Self {
        self.num_injectors = n;
        self
    }

    pub fn with_leader_or_injector(mut self, n: u32) -> Self {
        self.num_leader_or_injector = n;
        self
    }

    /// Checks the invariants from the domain model: each capability floor
    /// must not exceed the total headcount. Violations are fatal input
    /// errors, never silently clamped.
    pub fn validate(&self) -> Result<(), String> {
        if self.num_leaders > self.num_people {
            return Err(format!(
                "num_leaders ({}) exceeds num_people ({})",
                self.num_leaders, self.num_people
            ));
        }
        if self.num_injectors > self.num_people {
            return Err(format!(
                "num_injectors ({}) exceeds num_people ({})",
                self.num_injectors, self.num_people
            ));
        }
        if self.num_leader_or_injector > self.num_people {
            return Err(format!(
                "num_leader_or_injector ({}) exceeds num_people ({})",
                self.num_leader_or_injector, self.num_people
            ));
        }

        let floor_sum = self.num_leaders + self.num_injectors + self.num_leader_or_injector;
        if floor_sum > self.num_people {
            tracing::warn!(
                weekday = self.weekday,
                shift_time = %self.shift_time,
                num_people = self.num_people,
                floor_sum,
                "capability floors for this slot sum to more than num_people; requirement is satisfiable only if employees overlap categories",
            );
        }

        Ok(())
    }

    /// Relaxed floor: `minimum // 2`, applied independently per category.
    pub fn relaxed_floor(minimum: u32) -> u32 {
        minimum / 2
    }
}
