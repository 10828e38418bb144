//! Per-(leg, day) capacity reservations.
//!
//! The ledger is the only mutable state in the planning core. Candidate
//! assignments never share one: each evaluation clones a snapshot and
//! reserves against its own copy, and the optimizer's single-threaded
//! control loop decides which snapshot (if any) becomes authoritative.
//! The invariant `reserved ≤ capacity` holds after every successful
//! reserve; a violating attempt returns [`CapacityError`] and changes
//! nothing.

use crate::error::CapacityError;
use crate::model::LegId;
use crate::network::FlightNetwork;
use std::collections::HashMap;

/// Reserved quantities per (leg, day). Cloning produces an independent
/// snapshot (copy-on-evaluate).
#[derive(Debug, Clone, Default)]
pub struct CapacityLedger {
    reserved: HashMap<(LegId, u32), u32>,
}

impl CapacityLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantity already reserved on `leg` for `day`.
    pub fn reserved(&self, leg: LegId, day: u32) -> u32 {
        self.reserved.get(&(leg, day)).copied().unwrap_or(0)
    }

    /// Capacity still available on `leg` for `day`.
    pub fn remaining(&self, network: &FlightNetwork, leg: LegId, day: u32) -> u32 {
        network.leg(leg).capacity.saturating_sub(self.reserved(leg, day))
    }

    /// Reserves `quantity` on `leg` for `day`.
    ///
    /// Fails without side effects if the reservation would exceed the
    /// leg's daily capacity. Callers check [`remaining`](Self::remaining)
    /// first, so a failure here indicates a defect in the caller.
    pub fn reserve(
        &mut self,
        network: &FlightNetwork,
        leg: LegId,
        day: u32,
        quantity: u32,
    ) -> Result<(), CapacityError> {
        let remaining = self.remaining(network, leg, day);
        if quantity > remaining {
            return Err(CapacityError {
                leg,
                day,
                requested: quantity,
                remaining,
            });
        }
        *self.reserved.entry((leg, day)).or_insert(0) += quantity;
        Ok(())
    }

    /// Rolls back a prior reservation exactly.
    pub fn release(&mut self, leg: LegId, day: u32, quantity: u32) {
        match self.reserved.get_mut(&(leg, day)) {
            Some(reserved) => {
                debug_assert!(*reserved >= quantity, "releasing more than reserved");
                *reserved = reserved.saturating_sub(quantity);
                if *reserved == 0 {
                    self.reserved.remove(&(leg, day));
                }
            }
            None => debug_assert!(quantity == 0, "releasing on an empty slot"),
        }
    }

    /// Total quantity reserved across all slots.
    pub fn total_reserved(&self) -> u64 {
        self.reserved.values().map(|&q| u64::from(q)).sum()
    }

    /// Iterates the non-empty (leg, day) slots.
    pub fn iter(&self) -> impl Iterator<Item = (LegId, u32, u32)> + '_ {
        self.reserved.iter().map(|(&(leg, day), &qty)| (leg, day, qty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::AirportDirectory;
    use crate::model::{Airport, Continent, Leg};
    use chrono::NaiveTime;
    use proptest::prelude::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn network() -> FlightNetwork {
        let dir = AirportDirectory::new(vec![
            Airport::new("SPIM", -5, Continent::SouthAmerica),
            Airport::new("SKBO", -5, Continent::SouthAmerica),
        ])
        .unwrap();
        FlightNetwork::new(vec![Leg::new("SPIM", "SKBO", t(8, 0), t(12, 0), 300)], &dir).unwrap()
    }

    #[test]
    fn test_reserve_and_remaining() {
        let network = network();
        let mut ledger = CapacityLedger::new();
        assert_eq!(ledger.remaining(&network, LegId(0), 1), 300);

        ledger.reserve(&network, LegId(0), 1, 200).unwrap();
        assert_eq!(ledger.remaining(&network, LegId(0), 1), 100);
        // The same leg on another day is untouched.
        assert_eq!(ledger.remaining(&network, LegId(0), 2), 300);
    }

    #[test]
    fn test_contending_orders_cannot_both_fit() {
        // 200 + 150 > 300: the second full reservation must be rejected.
        let network = network();
        let mut ledger = CapacityLedger::new();
        ledger.reserve(&network, LegId(0), 1, 200).unwrap();
        let err = ledger.reserve(&network, LegId(0), 1, 150).unwrap_err();
        assert_eq!(err.remaining, 100);
        assert_eq!(err.requested, 150);
        // Failed reserve left the ledger unchanged.
        assert_eq!(ledger.reserved(LegId(0), 1), 200);
    }

    #[test]
    fn test_release_round_trip() {
        let network = network();
        let mut ledger = CapacityLedger::new();
        ledger.reserve(&network, LegId(0), 1, 120).unwrap();
        ledger.release(LegId(0), 1, 120);
        assert_eq!(ledger.reserved(LegId(0), 1), 0);
        assert_eq!(ledger.total_reserved(), 0);
    }

    #[test]
    fn test_clone_is_independent_snapshot() {
        let network = network();
        let mut base = CapacityLedger::new();
        base.reserve(&network, LegId(0), 1, 100).unwrap();

        let mut snapshot = base.clone();
        snapshot.reserve(&network, LegId(0), 1, 150).unwrap();

        assert_eq!(base.reserved(LegId(0), 1), 100);
        assert_eq!(snapshot.reserved(LegId(0), 1), 250);
    }

    proptest! {
        /// Any interleaving of accepted reserves never drives a slot past
        /// its capacity, and reserve/release pairs cancel exactly.
        #[test]
        fn prop_reserved_never_exceeds_capacity(requests in prop::collection::vec((0u32..4, 1u32..400), 0..64)) {
            let network = network();
            let mut ledger = CapacityLedger::new();
            let mut accepted: Vec<(u32, u32)> = Vec::new();

            for (day, qty) in requests {
                if ledger.reserve(&network, LegId(0), day, qty).is_ok() {
                    accepted.push((day, qty));
                }
                for d in 0..4 {
                    prop_assert!(ledger.reserved(LegId(0), d) <= 300);
                }
            }

            for (day, qty) in accepted.into_iter().rev() {
                ledger.release(LegId(0), day, qty);
            }
            prop_assert_eq!(ledger.total_reserved(), 0);
        }
    }
}
