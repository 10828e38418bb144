//! Read-only flight network index.
//!
//! Built once from the leg collection; every endpoint is validated against
//! the [`AirportDirectory`] at construction so a missing airport entry
//! aborts startup instead of surfacing mid-search. No mutation afterwards,
//! which is what lets the optimizer share one instance across its worker
//! pool without locks.

use crate::error::ConfigError;
use crate::geo::AirportDirectory;
use crate::model::{Leg, LegId};
use std::collections::HashMap;

/// Immutable index of legs by origin airport.
#[derive(Debug, Clone)]
pub struct FlightNetwork {
    legs: Vec<Leg>,
    by_origin: HashMap<String, Vec<LegId>>,
}

impl FlightNetwork {
    /// Indexes the legs, validating each one against the directory.
    pub fn new(legs: Vec<Leg>, directory: &AirportDirectory) -> Result<Self, ConfigError> {
        let mut by_origin: HashMap<String, Vec<LegId>> = HashMap::new();
        for (idx, leg) in legs.iter().enumerate() {
            directory.get(&leg.origin)?;
            directory.get(&leg.destination)?;
            if leg.origin == leg.destination {
                return Err(ConfigError::DegenerateLeg(leg.origin.clone()));
            }
            if leg.capacity == 0 {
                return Err(ConfigError::ZeroCapacityLeg {
                    origin: leg.origin.clone(),
                    destination: leg.destination.clone(),
                });
            }
            by_origin.entry(leg.origin.clone()).or_default().push(LegId(idx));
        }
        Ok(Self { legs, by_origin })
    }

    /// All legs departing `origin`, possibly empty.
    pub fn legs_from<'a>(&'a self, origin: &str) -> impl Iterator<Item = (LegId, &'a Leg)> + 'a {
        self.by_origin
            .get(origin)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(|&id| (id, &self.legs[id.0]))
    }

    pub fn leg(&self, id: LegId) -> &Leg {
        &self.legs[id.0]
    }

    pub fn len(&self) -> usize {
        self.legs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LegId, &Leg)> {
        self.legs.iter().enumerate().map(|(i, leg)| (LegId(i), leg))
    }
}
