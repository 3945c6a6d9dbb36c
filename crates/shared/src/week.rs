use std::fmt;

use serde::{Deserialize, Serialize};
use time::{Date, Duration, OffsetDateTime};

use crate::Result;

/// Monday-anchored identifier for a calendar week.
///
/// Any date within a Mon-Sun week normalizes to the same key, rendered as
/// the Monday's `YYYY-MM-DD` date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekKey(Date);

impl WeekKey {
    /// Normalize any date to the key of the week containing it.
    pub fn for_date(date: Date) -> Self {
        let days_since_monday = i64::from(date.weekday().number_days_from_monday());
        Self(date - Duration::days(days_since_monday))
    }

    /// The key of the week containing today (UTC).
    pub fn current() -> Self {
        Self::for_date(OffsetDateTime::now_utc().date())
    }

    /// Parse a `YYYY-MM-DD` string, normalizing non-Monday dates.
    pub fn parse(value: &str) -> Result<Self> {
        let Ok(date) = Date::parse(
            value,
            time::macros::format_description!("[year]-[month]-[day]"),
        ) else {
            crate::bail!("invalid week key: {value}");
        };

        Ok(Self::for_date(date))
    }

    /// The Monday this key is anchored to.
    pub fn monday(&self) -> Date {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0 + Duration::weeks(1))
    }

    pub fn previous(&self) -> Self {
        Self(self.0 - Duration::weeks(1))
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self
            .0
            .format(time::macros::format_description!("[year]-[month]-[day]"))
            .map_err(|_| fmt::Error)?;

        f.write_str(&formatted)
    }
}

impl Serialize for WeekKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for WeekKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}
