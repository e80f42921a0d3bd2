use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use shared::ShiftTime;

use super::Weekday;

/// A roster entry. `available_shifts` maps each weekday an employee can work
/// at all to the set of shift buckets they are available for that day;
/// an absent weekday means unavailable the whole day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    pub is_leader: bool,
    pub can_inject: bool,
    pub is_fulltime: bool,
    pub available_shifts: BTreeMap<Weekday, BTreeSet<ShiftTime>>,
}

impl Employee {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_leader: false,
            can_inject: false,
            is_fulltime: false,
            available_shifts: BTreeMap::new(),
        }
    }

    pub fn with_leader(mut self, is_leader: bool) -> Self {
        self.is_leader = is_leader;
        self
    }

    pub fn with_injector(mut self, can_inject: bool) -> Self {
        self.can_inject = can_inject;
        self
    }

    pub fn with_fulltime(mut self, is_fulltime: bool) -> Self {
        self.is_fulltime = is_fulltime;
        self
    }

    pub fn available_on(mut self, weekday: Weekday, shifts: impl IntoIterator<Item = ShiftTime>) -> Self {
        self.available_shifts
            .entry(weekday)
            .or_default()
            .extend(shifts);
        self
    }

    pub fn is_available(&self, weekday: Weekday, shift_time: ShiftTime) -> bool {
        self.available_shifts
            .get(&weekday)
            .map(|set| set.contains(&shift_time))
            .unwrap_or(false)
    }

    /// True if this employee can satisfy a capability-floor category.
    pub fn is_leader_or_injector(&self) -> bool {
        self.is_leader || self.can_inject
    }
}
