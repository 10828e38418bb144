//! Oversized-order splitting.
//!
//! When no single leg can carry an order, the splitter distributes it
//! over parallel legs and subsequent days: repeatedly probe the search
//! engine for the best remaining single-leg slot toward the destination,
//! allocate `min(remaining quantity, slot remaining capacity)`, and stop
//! when the order is fully covered or the deadline window is exhausted.
//!
//! Accounting is exact by construction. Fragments are single-leg routes,
//! so their quantities sum to the shipped total without double counting,
//! and a shortfall rolls back every reservation before reporting
//! [`SplitOutcome::Partial`] — an order is delivered completely or not at
//! all.

use crate::error::PlanError;
use crate::ledger::CapacityLedger;
use crate::model::{Order, SubShipment};
use crate::search::{RouteSearch, SearchRequest};

/// Split result. `Partial` means the window closed before the full
/// quantity was placed; the ledger has been rolled back and the caller
/// marks the order failed.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitOutcome {
    Complete {
        fragments: Vec<SubShipment>,
        /// Worst slack over all fragments, in whole days.
        slack_days: f64,
    },
    Partial,
}

/// Greedy splitter over the route search engine.
#[derive(Debug)]
pub struct OrderSplitter<'a> {
    search: &'a RouteSearch<'a>,
}

impl<'a> OrderSplitter<'a> {
    pub fn new(search: &'a RouteSearch<'a>) -> Self {
        Self { search }
    }

    /// Splits `order` across single-leg slots departing `hub`.
    pub fn split(
        &self,
        order: &Order,
        hub: &str,
        ledger: &mut CapacityLedger,
    ) -> Result<SplitOutcome, PlanError> {
        let network = self.search.network();
        let directory = self.search.directory();
        let created = directory.to_utc(&order.hub, order.day, order.time)?;

        // Probing with quantity 1 finds the best slot that still has any
        // room; the fragment then takes as much of that slot as it needs.
        let mut probe_req: SearchRequest = self.search.order_request(order, hub, created)?;
        probe_req.quantity = 1;

        let mut fragments: Vec<SubShipment> = Vec::new();
        let mut slack_days = f64::INFINITY;
        let mut remaining = order.quantity;

        while remaining > 0 {
            let Some(route) = self.search.probe(&probe_req, ledger, 1) else {
                break;
            };
            debug_assert_eq!(route.hops.len(), 1);
            let hop = route.hops[0];
            let quantity = ledger.remaining(network, hop.leg, hop.day).min(remaining);
            debug_assert!(quantity > 0);
            ledger
                .reserve(network, hop.leg, hop.day, quantity)
                .map_err(PlanError::from)?;
            fragments.push(SubShipment {
                leg: hop.leg,
                day: hop.day,
                quantity,
            });
            slack_days = slack_days.min(route.slack_days);
            remaining -= quantity;
        }

        if remaining > 0 {
            for fragment in &fragments {
                ledger.release(fragment.leg, fragment.day, fragment.quantity);
            }
            return Ok(SplitOutcome::Partial);
        }
        Ok(SplitOutcome::Complete {
            fragments,
            slack_days,
        })
    }
}
