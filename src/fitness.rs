//! Assignment scoring.
//!
//! A pure function of the assignment and the static network: no hidden
//! state, safe to call concurrently on independent assignments, and
//! idempotent — the same assignment always scores the same. Higher is
//! better.
//!
//! Score = Σ slack over delivered orders
//!       − `failure_penalty` × failed orders
//!       + `consolidation_bonus` × Σ per (leg, day) of (orders sharing
//!         the slot − 1).
//!
//! The consolidation term rewards packing orders onto the same flight
//! instance; the ledger invariant already caps a slot at its capacity,
//! so the bonus cannot reward overbooking.

use crate::assign::{Assignment, OrderPlan};
use crate::model::LegId;
use crate::network::FlightNetwork;
use std::collections::HashMap;

/// Weights of the score terms.
#[derive(Debug, Clone, Copy)]
pub struct FitnessWeights {
    /// Deducted once per failed order. Large relative to attainable
    /// slack so that delivering always beats failing.
    pub failure_penalty: f64,
    /// Reward per extra order sharing a (leg, day) slot.
    pub consolidation_bonus: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            failure_penalty: 10.0,
            consolidation_bonus: 0.05,
        }
    }
}

/// Scores one candidate assignment.
pub fn evaluate(
    assignment: &Assignment,
    network: &FlightNetwork,
    weights: &FitnessWeights,
) -> f64 {
    let mut score = 0.0;
    let mut sharers: HashMap<(LegId, u32), u32> = HashMap::new();

    for plan in &assignment.plans {
        match plan {
            OrderPlan::Routed(route) => {
                score += route.slack_days;
                for hop in &route.hops {
                    *sharers.entry((hop.leg, hop.day)).or_insert(0) += 1;
                }
            }
            OrderPlan::Split {
                fragments,
                slack_days,
            } => {
                score += slack_days;
                for fragment in fragments {
                    *sharers.entry((fragment.leg, fragment.day)).or_insert(0) += 1;
                }
            }
            OrderPlan::Failed => score -= weights.failure_penalty,
        }
    }

    for ((leg, _), count) in sharers {
        let capped = count.min(network.leg(leg).capacity);
        score += weights.consolidation_bonus * f64::from(capped.saturating_sub(1));
    }
    score
}
