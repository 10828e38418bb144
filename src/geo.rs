//! Timezone conversion and delivery-deadline classification.
//!
//! [`AirportDirectory`] is the single immutable configuration object for
//! everything geographic: UTC offsets, continent tags, and the 2/3-day
//! deadline rule derived from them. It is constructed once at startup and
//! passed by reference into every component; there are no global lookup
//! tables. An airport code without an entry is a [`ConfigError`], never a
//! silent default.
//!
//! All elapsed-time arithmetic happens on [`UtcMinutes`], a single `i64`
//! minute count that folds the (day, wall-clock) pair into one instant, so
//! midnight wraps and cross-day arrivals need no special cases.

use crate::error::ConfigError;
use crate::model::Airport;
use chrono::{NaiveTime, Timelike};
use std::collections::HashMap;

/// Minutes in one schedule day.
pub const MINUTES_PER_DAY: i64 = 1440;

/// An instant on the common (UTC) time base, in minutes since midnight of
/// schedule day 0.
///
/// Negative values are legal: day 0 at 01:00 local in a UTC+3 zone is
/// already "before" the epoch in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UtcMinutes(pub i64);

impl UtcMinutes {
    /// The UTC schedule day this instant falls on.
    pub fn day(self) -> i64 {
        self.0.div_euclid(MINUTES_PER_DAY)
    }

    /// Minute of the UTC day, in `0..1440`.
    pub fn minute_of_day(self) -> i64 {
        self.0.rem_euclid(MINUTES_PER_DAY)
    }

    pub fn plus_minutes(self, minutes: i64) -> Self {
        Self(self.0 + minutes)
    }
}

fn minute_of(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight()) / 60
}

/// Immutable airport table with timezone and deadline classification.
#[derive(Debug, Clone)]
pub struct AirportDirectory {
    airports: HashMap<String, Airport>,
}

impl AirportDirectory {
    /// Builds the directory, rejecting duplicates and an empty table.
    pub fn new(airports: Vec<Airport>) -> Result<Self, ConfigError> {
        if airports.is_empty() {
            return Err(ConfigError::NoAirports);
        }
        let mut map = HashMap::with_capacity(airports.len());
        for airport in airports {
            if map.insert(airport.code.clone(), airport.clone()).is_some() {
                return Err(ConfigError::DuplicateAirport(airport.code));
            }
        }
        Ok(Self { airports: map })
    }

    /// Looks up an airport entry; unknown codes are a configuration error.
    pub fn get(&self, code: &str) -> Result<&Airport, ConfigError> {
        self.airports
            .get(code)
            .ok_or_else(|| ConfigError::UnknownAirport(code.to_string()))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.airports.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Converts a local wall-clock time on a schedule day to the common
    /// time base by subtracting the airport's fixed UTC offset.
    pub fn to_utc(&self, code: &str, day: u32, local: NaiveTime) -> Result<UtcMinutes, ConfigError> {
        let airport = self.get(code)?;
        Ok(UtcMinutes(
            i64::from(day) * MINUTES_PER_DAY + minute_of(local) - i64::from(airport.utc_offset_minutes),
        ))
    }

    /// Continent-tag equality of two airports.
    pub fn same_continent(&self, a: &str, b: &str) -> Result<bool, ConfigError> {
        Ok(self.get(a)?.continent == self.get(b)?.continent)
    }

    /// Maximum delivery window: 2 days within a continent, 3 days across.
    pub fn max_deadline_days(&self, origin: &str, destination: &str) -> Result<u8, ConfigError> {
        Ok(if self.same_continent(origin, destination)? {
            2
        } else {
            3
        })
    }

    /// Whole UTC days elapsed between two instants.
    ///
    /// Counts day boundaries crossed on the common time base: an order
    /// created day 1 and delivered day 2 has elapsed exactly 1.0 days
    /// regardless of the wall-clock times. The result is never negative
    /// for a well-formed (start ≤ end + same-day) pair; a route is
    /// feasible only if this value stays within `max_deadline_days`.
    pub fn elapsed_days(&self, start: UtcMinutes, end: UtcMinutes) -> f64 {
        let days = end.day() - start.day();
        debug_assert!(days >= 0, "arrival before creation: {start:?} -> {end:?}");
        days.max(0) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Continent;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn directory() -> AirportDirectory {
        AirportDirectory::new(vec![
            Airport::new("SPIM", -5, Continent::SouthAmerica),
            Airport::new("SKBO", -5, Continent::SouthAmerica),
            Airport::new("EBCI", 1, Continent::Europe),
            Airport {
                code: "VIDP".into(),
                utc_offset_minutes: 330,
                continent: Continent::Asia,
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_table_rejected() {
        let err = AirportDirectory::new(vec![]).unwrap_err();
        assert_eq!(err, ConfigError::NoAirports);
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = AirportDirectory::new(vec![
            Airport::new("SPIM", -5, Continent::SouthAmerica),
            Airport::new("SPIM", -5, Continent::SouthAmerica),
        ])
        .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateAirport("SPIM".into()));
    }

    #[test]
    fn test_unknown_airport_is_config_error() {
        let dir = directory();
        assert_eq!(
            dir.to_utc("ZZZZ", 1, t(8, 0)).unwrap_err(),
            ConfigError::UnknownAirport("ZZZZ".into())
        );
    }

    #[test]
    fn test_to_utc_negative_offset() {
        let dir = directory();
        // 08:00 local at UTC-5 is 13:00 UTC.
        let instant = dir.to_utc("SPIM", 1, t(8, 0)).unwrap();
        assert_eq!(instant.day(), 1);
        assert_eq!(instant.minute_of_day(), 13 * 60);
    }

    #[test]
    fn test_to_utc_positive_offset_wraps_backwards() {
        let dir = directory();
        // 00:30 local at UTC+1 is 23:30 UTC the previous day.
        let instant = dir.to_utc("EBCI", 1, t(0, 30)).unwrap();
        assert_eq!(instant.day(), 0);
        assert_eq!(instant.minute_of_day(), 23 * 60 + 30);
    }

    #[test]
    fn test_to_utc_half_hour_offset() {
        let dir = directory();
        // 06:00 local at UTC+5:30 is 00:30 UTC.
        let instant = dir.to_utc("VIDP", 2, t(6, 0)).unwrap();
        assert_eq!(instant.day(), 2);
        assert_eq!(instant.minute_of_day(), 30);
    }

    #[test]
    fn test_same_continent() {
        let dir = directory();
        assert!(dir.same_continent("SPIM", "SKBO").unwrap());
        assert!(!dir.same_continent("SPIM", "EBCI").unwrap());
    }

    #[test]
    fn test_deadline_classification() {
        let dir = directory();
        assert_eq!(dir.max_deadline_days("SPIM", "SKBO").unwrap(), 2);
        assert_eq!(dir.max_deadline_days("SPIM", "EBCI").unwrap(), 3);
        assert_eq!(dir.max_deadline_days("EBCI", "VIDP").unwrap(), 3);
    }

    #[test]
    fn test_elapsed_days_counts_day_boundaries() {
        let dir = directory();
        let start = dir.to_utc("SPIM", 1, t(8, 0)).unwrap();
        let same_day = dir.to_utc("SPIM", 1, t(18, 0)).unwrap();
        let next_day = dir.to_utc("SPIM", 2, t(6, 0)).unwrap();
        assert_eq!(dir.elapsed_days(start, same_day), 0.0);
        assert_eq!(dir.elapsed_days(start, next_day), 1.0);
    }

    #[test]
    fn test_elapsed_days_worked_example() {
        // Hub at UTC-5, destination at UTC+1, different continents.
        // Order created day 1 at 08:00 local; arrival day 2 at 09:40 local
        // destination time. Elapsed = 1.0 days, within the 3-day window.
        let dir = directory();
        let created = dir.to_utc("SPIM", 1, t(8, 0)).unwrap();
        let arrival = dir.to_utc("EBCI", 2, t(9, 40)).unwrap();
        let elapsed = dir.elapsed_days(created, arrival);
        assert_eq!(elapsed, 1.0);
        let deadline = dir.max_deadline_days("SPIM", "EBCI").unwrap();
        assert_eq!(f64::from(deadline) - elapsed, 2.0);
    }

    #[test]
    fn test_utc_minutes_day_split() {
        assert_eq!(UtcMinutes(-1).day(), -1);
        assert_eq!(UtcMinutes(-1).minute_of_day(), 1439);
        assert_eq!(UtcMinutes(1440).day(), 1);
        assert_eq!(UtcMinutes(1440).minute_of_day(), 0);
    }
}
