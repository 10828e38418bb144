//! Core data records.
//!
//! Airports, legs and orders are loaded once at startup and treated as
//! read-only for the entire run. Route candidates and sub-shipments are
//! transient values produced while realizing a candidate assignment.

use crate::geo::UtcMinutes;
use chrono::NaiveTime;

/// Continent tag used for deadline classification.
///
/// Same-continent deliveries get a 2-day window, cross-continent 3 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Continent {
    SouthAmerica,
    NorthAmerica,
    Europe,
    Asia,
    Africa,
    Oceania,
}

/// Static airport configuration entry.
///
/// `utc_offset_minutes` is a fixed offset from UTC (DST is out of scope);
/// minutes rather than hours so that half-hour zones (e.g. +05:30) are
/// representable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Airport {
    pub code: String,
    pub utc_offset_minutes: i32,
    pub continent: Continent,
}

impl Airport {
    pub fn new(code: impl Into<String>, utc_offset_hours: i32, continent: Continent) -> Self {
        Self {
            code: code.into(),
            utc_offset_minutes: utc_offset_hours * 60,
            continent,
        }
    }
}

/// Dense index of a leg in the network's leg table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegId(pub usize);

/// A scheduled transport segment, repeating identically every day.
///
/// Departure and arrival are local wall-clock times at the respective
/// airports; `capacity` is the quantity the leg can carry per day.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    pub origin: String,
    pub destination: String,
    pub departure: NaiveTime,
    pub arrival: NaiveTime,
    pub capacity: u32,
}

impl Leg {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure: NaiveTime,
        arrival: NaiveTime,
        capacity: u32,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            departure,
            arrival,
            capacity,
        }
    }
}

/// A time-stamped shipment order originating at one of the fixed hubs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    pub id: String,
    /// Origin hub the order was placed at.
    pub hub: String,
    pub destination: String,
    pub quantity: u32,
    /// Schedule day the order was created (local at the hub).
    pub day: u32,
    /// Local wall-clock creation time at the hub.
    pub time: NaiveTime,
}

/// How a committed route reached its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RouteTag {
    /// Single leg from the order's own hub.
    Direct,
    /// Two or three legs from the order's own hub.
    Connecting,
    /// Quantity distributed over several legs/days.
    Split,
    /// Shipped from a substitute hub under that hub's own deadline
    /// classification.
    AltHub,
}

/// One flown segment of a route: a leg on a concrete departure day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteHop {
    pub leg: LegId,
    pub day: u32,
}

/// A feasible route produced by one search call.
///
/// Replaces the delimited day/time/quantity strings of earlier systems
/// with a structured record, so nothing downstream re-parses identifiers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteCandidate {
    pub hops: Vec<RouteHop>,
    pub tag: RouteTag,
    /// Hub the route actually departs from (differs from the order's hub
    /// for `AltHub` routes).
    pub hub: String,
    pub departure: UtcMinutes,
    pub arrival: UtcMinutes,
    /// Whole days elapsed from order creation to final arrival.
    pub elapsed_days: f64,
    /// Deadline window minus elapsed days. Never negative for a feasible
    /// route.
    pub slack_days: f64,
}

impl RouteCandidate {
    pub fn hop_count(&self) -> usize {
        self.hops.len()
    }
}

/// A fragment of a split order: quantity carried by one leg on one day.
///
/// The fragments of an order must sum exactly to the order quantity; a
/// shortfall means the whole order is failed, never silently short-shipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubShipment {
    pub leg: LegId,
    pub day: u32,
    pub quantity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_airport_offset_in_minutes() {
        let lim = Airport::new("SPIM", -5, Continent::SouthAmerica);
        assert_eq!(lim.utc_offset_minutes, -300);
    }

    #[test]
    fn test_half_hour_offset_representable() {
        let delhi = Airport {
            code: "VIDP".into(),
            utc_offset_minutes: 330,
            continent: Continent::Asia,
        };
        assert_eq!(delhi.utc_offset_minutes, 330);
    }

    #[test]
    fn test_leg_construction() {
        let leg = Leg::new("SPIM", "SKBO", t(8, 40), t(12, 10), 300);
        assert_eq!(leg.origin, "SPIM");
        assert_eq!(leg.capacity, 300);
    }

    #[test]
    fn test_route_tag_equality() {
        assert_ne!(RouteTag::Direct, RouteTag::AltHub);
        assert_eq!(RouteTag::Split, RouteTag::Split);
    }
}
