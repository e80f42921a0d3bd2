use chrono::{Datelike, Duration, NaiveDate, Weekday as ChronoWeekday};
use shared::{CoreError, CoreResult, ShiftTime};

use crate::domain::Weekday;

/// One empty template slot: a (date, shift-time) pair in canonical order.
#[derive(Debug, Clone, Copy)]
pub struct TemplateSlot {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub shift_time: ShiftTime,
}

/// Builds the ordered list of slots a solve covers: `num_weeks * 7 * 3`
/// slots in `(week, day_of_week, shift_time)` order, with shift-time
/// iterated Morning, Midday, Evening.
pub fn build_template(start_date: NaiveDate, num_weeks: u32) -> CoreResult<Vec<TemplateSlot>> {
    if start_date.weekday() != ChronoWeekday::Mon {
        return Err(CoreError::InvalidStart(start_date));
    }

    let mut slots = Vec::with_capacity(num_weeks as usize * 7 * 3);
    for day_offset in 0..(num_weeks as i64 * 7) {
        let date = start_date + Duration::days(day_offset);
        let weekday = date.weekday().number_from_monday() as Weekday;
        for shift_time in ShiftTime::ALL {
            slots.push(TemplateSlot {
                date,
                weekday,
                shift_time,
            });
        }
    }
    Ok(slots)
}

/// The Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday();
    date - Duration::days(offset as i64)
}
