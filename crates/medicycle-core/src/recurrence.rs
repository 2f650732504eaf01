//! Recurrence evaluation.
//!
//! Pure date predicates: no clock access, no side effects. A monthly
//! schedule on a day a short month does not have simply never matches that
//! month; there is no clamping or rollover.

use chrono::{Datelike, NaiveDate};

use crate::model::{Cycle, DayOfWeek, Medicine};

/// Whether `medicine` is scheduled for `date`.
pub fn is_due(medicine: &Medicine, date: NaiveDate) -> bool {
    match &medicine.cycle {
        Cycle::Daily => true,
        Cycle::Monthly { month_day } => date.day() == u32::from(*month_day),
        Cycle::Weekly { week_days } => week_days.contains(&DayOfWeek::of(date)),
        Cycle::Unknown => false,
    }
}
