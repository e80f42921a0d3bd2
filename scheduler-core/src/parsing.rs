//! Decoding for the two accepted availability-string forms.
//!
//! Per-day form: `D:S,S,...;D:S,S,...` (e.g. `1:Morning,Midday;5:Morning,Evening`).
//! Legacy form: `S,S,...`, applied to every weekday 1..7.
//! Malformed entries are dropped rather than rejected: an unknown weekday
//! number or shift label is silently skipped, matching the source grammar.

use std::collections::{BTreeMap, BTreeSet};

use shared::ShiftTime;

use crate::domain::Weekday;

pub fn parse_availability(raw: &str) -> BTreeMap<Weekday, BTreeSet<ShiftTime>> {
    let raw = raw.trim();
    if raw.contains(':') {
        parse_per_day(raw)
    } else {
        parse_legacy(raw)
    }
}

fn parse_per_day(raw: &str) -> BTreeMap<Weekday, BTreeSet<ShiftTime>> {
    let mut result = BTreeMap::new();
    for entry in raw.split(';') {
        let Some((day_str, shifts_str)) = entry.split_once(':') else {
            continue;
        };
        let Ok(day_num) = day_str.trim().parse::<u8>() else {
            continue;
        };
        if !(1..=7).contains(&day_num) {
            continue;
        }
        let shifts: BTreeSet<ShiftTime> = shifts_str
            .split(',')
            .filter_map(|s| ShiftTime::parse(s.trim()))
            .collect();
        result.insert(day_num, shifts);
    }
    result
}

fn parse_legacy(raw: &str) -> BTreeMap<Weekday, BTreeSet<ShiftTime>> {
    let shifts: BTreeSet<ShiftTime> = raw
        .split(',')
        .filter_map(|s| ShiftTime::parse(s.trim()))
        .collect();
    (1..=7).map(|day| (day, shifts.clone())).collect()
}
