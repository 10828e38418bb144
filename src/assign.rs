//! Candidate assignments.
//!
//! An [`Assignment`] is one full candidate solution: per order either a
//! committed route, a complete set of sub-shipments, or a failed marker.
//! It owns the private [`CapacityLedger`] snapshot its routes were
//! reserved against, so distinct candidates never interfere and the
//! optimizer can evaluate a whole generation in parallel.

use crate::ledger::CapacityLedger;
use crate::model::{Order, RouteCandidate, RouteTag, SubShipment};

/// Outcome for a single order inside an assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderPlan {
    /// Delivered over one route (direct, connecting or via an
    /// alternative hub).
    Routed(RouteCandidate),
    /// Delivered in fragments over several legs/days.
    Split {
        fragments: Vec<SubShipment>,
        /// Worst slack over the fragments, in whole days.
        slack_days: f64,
    },
    /// Could not be delivered inside its deadline window. A normal
    /// outcome; the fitness penalty accounts for it.
    Failed,
}

impl OrderPlan {
    pub fn is_failed(&self) -> bool {
        matches!(self, OrderPlan::Failed)
    }

    /// Slack in whole days, `None` for failed orders.
    pub fn slack_days(&self) -> Option<f64> {
        match self {
            OrderPlan::Routed(route) => Some(route.slack_days),
            OrderPlan::Split { slack_days, .. } => Some(*slack_days),
            OrderPlan::Failed => None,
        }
    }

    /// Route classification, `None` for failed orders.
    pub fn tag(&self) -> Option<RouteTag> {
        match self {
            OrderPlan::Routed(route) => Some(route.tag),
            OrderPlan::Split { .. } => Some(RouteTag::Split),
            OrderPlan::Failed => None,
        }
    }
}

/// One candidate solution: a plan per order plus the ledger snapshot the
/// plans are reserved in.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub plans: Vec<OrderPlan>,
    pub ledger: CapacityLedger,
}

impl Assignment {
    pub fn failed_count(&self) -> usize {
        self.plans.iter().filter(|p| p.is_failed()).count()
    }

    pub fn delivered_count(&self) -> usize {
        self.plans.len() - self.failed_count()
    }

    /// Aggregate view consumed by report/CLI collaborators.
    pub fn summary(&self, orders: &[Order]) -> AssignmentSummary {
        debug_assert_eq!(orders.len(), self.plans.len());
        let mut summary = AssignmentSummary::default();
        for (plan, order) in self.plans.iter().zip(orders) {
            match plan.tag() {
                Some(RouteTag::Direct) => summary.direct += 1,
                Some(RouteTag::Connecting) => summary.connecting += 1,
                Some(RouteTag::AltHub) => summary.alt_hub += 1,
                Some(RouteTag::Split) => summary.split += 1,
                None => summary.failed += 1,
            }
            if !plan.is_failed() {
                summary.shipped_quantity += u64::from(order.quantity);
            }
        }
        summary
    }
}

/// Per-tag counts and shipped volume of an assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentSummary {
    pub direct: usize,
    pub connecting: usize,
    pub alt_hub: usize,
    pub split: usize,
    pub failed: usize,
    pub shipped_quantity: u64,
}
