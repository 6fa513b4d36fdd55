//! Week numbers and weekday dates
//!
//! Week numbers ("KW") are the keys to-dos are stored under. They are computed with a formula of their own,
//! that is **not** ISO-8601: changing it would orphan every to-do stored so far.

use chrono::{Datelike, Duration, Local, NaiveDate};

use crate::timeslot::Weekday;

/// Computes week numbers and dates relative to a fixed "today"
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeekKeyResolver {
    today: NaiveDate,
}

impl WeekKeyResolver {
    /// A resolver anchored on the current local date
    pub fn today() -> Self {
        Self::anchored(Local::now().date_naive())
    }

    /// A resolver anchored on an arbitrary date
    pub fn anchored(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.today
    }

    /// The week number of the date `offset` weeks away from today
    pub fn week(&self, offset: i64) -> u32 {
        week_number(self.today + Duration::days(offset * 7))
    }

    /// The date of `day` in the week `offset` weeks away from the current one
    pub fn date_for_offset_day(&self, offset: i64, day: Weekday) -> NaiveDate {
        let days_since_monday = self.today.weekday().num_days_from_monday() as i64;
        let monday = self.today - Duration::days(days_since_monday);
        monday + Duration::days(offset * 7 + day.index() as i64)
    }

    /// The position of today in its week, Monday being 0 and Sunday 6
    pub fn current_day_index(&self) -> usize {
        self.today.weekday().num_days_from_monday() as usize
    }
}

/// `ceil((day_of_year + weekday_of_jan_1 + 1) / 7)`, where weekdays are counted from Sunday = 0
pub fn week_number(date: NaiveDate) -> u32 {
    let day_of_year = date.ordinal0();
    let first_jan = NaiveDate::from_yo_opt(date.year(), 1).unwrap_or(date);
    let weekday_of_first_jan = first_jan.weekday().num_days_from_sunday();
    (day_of_year + weekday_of_first_jan + 1 + 6) / 7
}

/// Short German date label, e.g. `06.01.`
pub fn day_label(date: NaiveDate) -> String {
    date.format("%d.%m.").to_string()
}
