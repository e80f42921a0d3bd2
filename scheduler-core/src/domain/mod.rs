pub mod employee;
pub mod request;
pub mod requirement;
pub mod schedule;

pub use employee::Employee;
pub use request::{PreAssignedShift, TimeOffRequest};
pub use requirement::ShiftRequirement;
pub use schedule::{Schedule, Shift};

/// 1 = Monday .. 7 = Sunday, matching `chrono::Weekday::number_from_monday()`.
pub type Weekday = u8;
