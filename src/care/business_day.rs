//! Business-day resolution and period windows.
//!
//! All functions take household wall-clock time (`NaiveDateTime`). A
//! business day runs from `day_start_hour:00` to the same hour on the next
//! calendar day, so activity at 02:00 with a 06:00 start still belongs to
//! the previous date.

use chrono::{Datelike, Days, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::models::definition::Frequency;

/// Half-open `[start, end)` range of wall-clock time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Window {
    /// Inclusive start.
    pub start: NaiveDateTime,
    /// Exclusive end.
    pub end: NaiveDateTime,
}

impl Window {
    /// Whether `at` falls inside the window.
    #[must_use]
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at < self.end
    }
}

fn start_time(day_start_hour: u8) -> NaiveTime {
    NaiveTime::from_hms_opt(u32::from(day_start_hour.min(23)), 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Calendar date in effect for aggregation at `now`.
#[must_use]
pub fn business_date(now: NaiveDateTime, day_start_hour: u8) -> NaiveDate {
    let today = now.date();
    if now.hour() < u32::from(day_start_hour.min(23)) {
        today.checked_sub_days(Days::new(1)).unwrap_or(today)
    } else {
        today
    }
}

/// [`business_date`] formatted as `YYYY-MM-DD`.
#[must_use]
pub fn business_date_string(now: NaiveDateTime, day_start_hour: u8) -> String {
    business_date(now, day_start_hour)
        .format("%Y-%m-%d")
        .to_string()
}

/// Moment the current business day began.
#[must_use]
pub fn business_day_start(now: NaiveDateTime, day_start_hour: u8) -> NaiveDateTime {
    business_date(now, day_start_hour).and_time(start_time(day_start_hour))
}

/// The current business day as a 24-hour window.
#[must_use]
pub fn business_day_window(now: NaiveDateTime, day_start_hour: u8) -> Window {
    let start = business_day_start(now, day_start_hour);
    Window {
        start,
        end: shift(start, Duration::days(1)),
    }
}

/// Active period for a goal with the given frequency.
///
/// Weekly periods start on Monday and monthly periods on the first, both at
/// `day_start_hour`, measured against the business date rather than the raw
/// calendar date.
#[must_use]
pub fn period_window(frequency: Frequency, now: NaiveDateTime, day_start_hour: u8) -> Window {
    let date = business_date(now, day_start_hour);
    let at = start_time(day_start_hour);
    match frequency {
        Frequency::Daily => business_day_window(now, day_start_hour),
        Frequency::Weekly => {
            let back = Days::new(u64::from(date.weekday().num_days_from_monday()));
            let monday = date.checked_sub_days(back).unwrap_or(date);
            let start = monday.and_time(at);
            Window {
                start,
                end: shift(start, Duration::days(7)),
            }
        }
        Frequency::Monthly => {
            let first = date.with_day(1).unwrap_or(date);
            let next = first
                .checked_add_months(Months::new(1))
                .map_or(NaiveDateTime::MAX, |d| d.and_time(at));
            Window {
                start: first.and_time(at),
                end: next,
            }
        }
    }
}

fn shift(at: NaiveDateTime, by: Duration) -> NaiveDateTime {
    at.checked_add_signed(by).unwrap_or(NaiveDateTime::MAX)
}
