//! Weekly bucketing
//!
//! Every trade is keyed by the date of the Monday beginning the ISO week
//! containing its timestamp.

use chrono::{NaiveDate, Weekday};

use crate::values::Timestamp;

/// Date of the Monday beginning the ISO week containing `ts`.
///
/// Insensitive to the time-of-day component: everything from Monday 00:00
/// through Sunday 23:59:59 of one week maps to the same date.
pub fn week_start(ts: &Timestamp) -> NaiveDate {
    ts.date_naive().week(Weekday::Mon).first_day()
}
