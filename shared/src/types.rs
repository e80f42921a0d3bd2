use serde::{Deserialize, Serialize};

/// The three named shift buckets a day is divided into. Opaque tokens with
/// no inherent ordering beyond the canonical slot order used when emitting
/// a schedule template: Morning, Midday, Evening.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftTime {
    Morning,
    Midday,
    Evening,
}

impl ShiftTime {
    pub const ALL: [ShiftTime; 3] = [ShiftTime::Morning, ShiftTime::Midday, ShiftTime::Evening];

    /// Accepts both the Chinese source labels and their English names.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "Morning" | "早" => Some(ShiftTime::Morning),
            "Midday" | "中" => Some(ShiftTime::Midday),
            "Evening" | "晚" => Some(ShiftTime::Evening),
            _ => None,
        }
    }
}

impl std::fmt::Display for ShiftTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ShiftTime::Morning => "Morning",
            ShiftTime::Midday => "Midday",
            ShiftTime::Evening => "Evening",
        };
        f.write_str(s)
    }
}
