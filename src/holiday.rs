//! School breaks

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HolidayError {
    #[error("holiday {name:?} ends ({end}) before it starts ({start})")]
    EndsBeforeStart { name: String, start: NaiveDate, end: NaiveDate },
    #[error("invalid date for holiday {0:?}")]
    InvalidDate(String),
}

/// A named break, covering whole days
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Holiday {
    name: String,
    /// First day, at 00:00:00.000
    start: NaiveDateTime,
    /// Last day, at 23:59:59.999
    end: NaiveDateTime,
}

impl Holiday {
    /// A break from the beginning of `first_day` to the end of `last_day`
    pub fn new(name: String, first_day: NaiveDate, last_day: NaiveDate) -> Result<Self, HolidayError> {
        if last_day < first_day {
            return Err(HolidayError::EndsBeforeStart { name, start: first_day, end: last_day });
        }
        let start = first_day.and_hms_milli_opt(0, 0, 0, 0);
        let end = last_day.and_hms_milli_opt(23, 59, 59, 999);
        match (start, end) {
            (Some(start), Some(end)) => Ok(Self { name, start, end }),
            _ => Err(HolidayError::InvalidDate(name)),
        }
    }

    pub fn name(&self) -> &str              { &self.name }
    pub fn start(&self) -> &NaiveDateTime   { &self.start }
    pub fn end(&self) -> &NaiveDateTime     { &self.end }

    pub fn contains(&self, instant: &NaiveDateTime) -> bool {
        &self.start <= instant && instant <= &self.end
    }
}


/// An ordered list of breaks
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HolidayIndex {
    holidays: Vec<Holiday>,
}

impl HolidayIndex {
    pub fn new(holidays: Vec<Holiday>) -> Self {
        Self { holidays }
    }

    /// The 2025 school breaks of Berlin
    pub fn berlin_2025() -> Result<Self, HolidayError> {
        let breaks = [
            ("Winterferien", (2025, 2, 3), (2025, 2, 8)),
            ("Osterferien", (2025, 4, 7), (2025, 4, 19)),
            ("Sommerferien", (2025, 7, 24), (2025, 9, 6)),
        ];

        let mut holidays = Vec::new();
        for (name, (y1, m1, d1), (y2, m2, d2)) in breaks.iter() {
            let first_day = NaiveDate::from_ymd_opt(*y1, *m1, *d1);
            let last_day = NaiveDate::from_ymd_opt(*y2, *m2, *d2);
            match (first_day, last_day) {
                (Some(first_day), Some(last_day)) => holidays.push(Holiday::new(name.to_string(), first_day, last_day)?),
                _ => return Err(HolidayError::InvalidDate(name.to_string())),
            }
        }
        Ok(Self::new(holidays))
    }

    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    /// The name of the first break (in list order) that contains `instant`
    pub fn is_holiday(&self, instant: &NaiveDateTime) -> Option<&str> {
        self.holidays.iter()
            .find(|holiday| holiday.contains(instant))
            .map(|holiday| holiday.name())
    }

    /// Same as [`Self::is_holiday`], for the very beginning of `date`
    pub fn is_holiday_date(&self, date: NaiveDate) -> Option<&str> {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        self.is_holiday(&midnight)
    }
}
