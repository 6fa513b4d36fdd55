//! Weekdays, school hours and the keys that address a single slot of the weekly grid

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// How many school hours a day has
pub const HOURS_PER_DAY: usize = 8;

/// The five school days of a week
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Montag,
    Dienstag,
    Mittwoch,
    Donnerstag,
    Freitag,
}

impl Weekday {
    /// Every school day, in week order
    pub const ALL: [Weekday; 5] = [
        Weekday::Montag,
        Weekday::Dienstag,
        Weekday::Mittwoch,
        Weekday::Donnerstag,
        Weekday::Freitag,
    ];

    /// Position of this day in the week, Monday being 0
    pub fn index(self) -> usize {
        match self {
            Weekday::Montag => 0,
            Weekday::Dienstag => 1,
            Weekday::Mittwoch => 2,
            Weekday::Donnerstag => 3,
            Weekday::Freitag => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Montag => "Montag",
            Weekday::Dienstag => "Dienstag",
            Weekday::Mittwoch => "Mittwoch",
            Weekday::Donnerstag => "Donnerstag",
            Weekday::Freitag => "Freitag",
        }
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Weekday {
    type Err = TimeslotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.iter()
            .find(|day| day.name() == s)
            .copied()
            .ok_or_else(|| TimeslotError::UnknownDay(s.to_string()))
    }
}


/// A school hour of a day, in `[0, HOURS_PER_DAY)`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Hour(u8);

impl Hour {
    pub fn new(hour: u8) -> Result<Self, TimeslotError> {
        if (hour as usize) < HOURS_PER_DAY {
            Ok(Self(hour))
        } else {
            Err(TimeslotError::HourOutOfRange(hour as i64))
        }
    }

    /// Every hour of a day, in increasing order
    pub fn all() -> impl Iterator<Item = Hour> {
        (0..HOURS_PER_DAY as u8).map(Hour)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The human-readable label, e.g. `1. Stunde` for the first hour
    pub fn label(self) -> String {
        format!("{}. Stunde", self.0 + 1)
    }
}

impl Display for Hour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Hour {
    type Err = TimeslotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s.parse().map_err(|_| TimeslotError::InvalidHour(s.to_string()))?;
        if value < 0 || value >= HOURS_PER_DAY as i64 {
            return Err(TimeslotError::HourOutOfRange(value));
        }
        Ok(Self(value as u8))
    }
}

impl<'de> Deserialize<'de> for Hour {
    fn deserialize<D>(deserializer: D) -> Result<Hour, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Hour::new(value).map_err(serde::de::Error::custom)
    }
}


/// Addresses one slot of the weekly grid.
///
/// Its string form is `{day}-{hour}`, e.g. `Montag-0`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeslotKey {
    day: Weekday,
    hour: Hour,
}

impl TimeslotKey {
    pub fn new(day: Weekday, hour: Hour) -> Self {
        Self { day, hour }
    }

    pub fn day(&self) -> Weekday { self.day }
    pub fn hour(&self) -> Hour   { self.hour }

    /// Every key of the week, day by day
    pub fn all() -> impl Iterator<Item = TimeslotKey> {
        Weekday::ALL.iter()
            .flat_map(|&day| Hour::all().map(move |hour| TimeslotKey::new(day, hour)))
    }
}

impl Display for TimeslotKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.day, self.hour)
    }
}

impl FromStr for TimeslotKey {
    type Err = TimeslotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, '-');
        let day = parts.next().unwrap_or_default();
        let hour = parts.next().ok_or_else(|| TimeslotError::MalformedKey(s.to_string()))?;
        Ok(Self {
            day: day.parse()?,
            hour: hour.parse()?,
        })
    }
}

/// Used to support serde: keys are stored as strings, so that they can be used as map keys
impl Serialize for TimeslotKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for TimeslotKey {
    fn deserialize<D>(deserializer: D) -> Result<TimeslotKey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}


#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeslotError {
    #[error("unknown weekday {0:?}")]
    UnknownDay(String),
    #[error("invalid hour {0:?}")]
    InvalidHour(String),
    #[error("hour {0} is outside of the school day")]
    HourOutOfRange(i64),
    #[error("malformed timeslot key {0:?}")]
    MalformedKey(String),
}
