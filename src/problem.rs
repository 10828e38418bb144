//! The shared planning context.
//!
//! [`PlanningProblem`] bundles everything immutable — airport directory,
//! flight network, order book, hub list, base ledger, fitness weights —
//! and exposes the two operations both optimizer strategies consume
//! unmodified: realizing a choice vector into a full [`Assignment`] and
//! scoring it. Construction validates every referenced airport, so a
//! missing configuration entry aborts startup instead of polluting a run
//! with guesses.

use crate::assign::{Assignment, OrderPlan};
use crate::error::{ConfigError, PlanError};
use crate::fitness::{self, FitnessWeights};
use crate::geo::AirportDirectory;
use crate::ledger::CapacityLedger;
use crate::model::Order;
use crate::network::FlightNetwork;
use crate::search::{RouteSearch, SearchLimits, SearchOutcome};
use crate::split::{OrderSplitter, SplitOutcome};

/// Immutable problem instance shared by all evaluation workers.
#[derive(Debug)]
pub struct PlanningProblem {
    directory: AirportDirectory,
    network: FlightNetwork,
    orders: Vec<Order>,
    hubs: Vec<String>,
    base_ledger: CapacityLedger,
    weights: FitnessWeights,
    limits: SearchLimits,
    /// Inverse-transit desirability per (order, hub), for the ant-colony
    /// heuristic. Precomputed once against an empty ledger.
    desirability: Vec<Vec<f64>>,
}

/// Desirability assigned to a (order, hub) pair with no feasible route.
const NO_ROUTE_DESIRABILITY: f64 = 0.01;

impl PlanningProblem {
    pub fn new(
        directory: AirportDirectory,
        network: FlightNetwork,
        orders: Vec<Order>,
        hubs: Vec<String>,
    ) -> Result<Self, ConfigError> {
        if hubs.is_empty() {
            return Err(ConfigError::NoHubs);
        }
        for hub in &hubs {
            directory.get(hub)?;
        }
        for order in &orders {
            directory.get(&order.hub)?;
            directory.get(&order.destination)?;
            if order.quantity == 0 {
                return Err(ConfigError::EmptyOrder(order.id.clone()));
            }
        }

        let mut problem = Self {
            directory,
            network,
            orders,
            hubs,
            base_ledger: CapacityLedger::new(),
            weights: FitnessWeights::default(),
            limits: SearchLimits::default(),
            desirability: Vec::new(),
        };
        problem.desirability = problem.compute_desirability()?;
        Ok(problem)
    }

    /// Replaces the fitness weights.
    pub fn with_weights(mut self, weights: FitnessWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Starts every candidate from pre-existing reservations.
    pub fn with_base_ledger(mut self, ledger: CapacityLedger) -> Self {
        self.base_ledger = ledger;
        self
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn hubs(&self) -> &[String] {
        &self.hubs
    }

    pub fn network(&self) -> &FlightNetwork {
        &self.network
    }

    pub fn directory(&self) -> &AirportDirectory {
        &self.directory
    }

    pub fn weights(&self) -> &FitnessWeights {
        &self.weights
    }

    /// Number of orders, i.e. the gene count of a candidate.
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Number of hub alternatives per order, i.e. the gene domain.
    pub fn alternatives(&self) -> usize {
        self.hubs.len()
    }

    /// Heuristic desirability of routing `order` via hub alternative
    /// `choice` (inverse transit time; small floor when unroutable).
    pub fn desirability(&self, order: usize, choice: usize) -> f64 {
        self.desirability[order][choice]
    }

    /// Realizes a choice vector (one hub alternative per order) into a
    /// full assignment against a private clone of the base ledger.
    ///
    /// Per order: route search from the chosen hub (falling through the
    /// alternative hubs), then the splitter for quantities no single leg
    /// carries, then the failed marker. Search and split failures are
    /// normal outcomes; only configuration or ledger-invariant defects
    /// escape as errors.
    pub fn realize(&self, choices: &[usize]) -> Result<Assignment, PlanError> {
        assert_eq!(
            choices.len(),
            self.orders.len(),
            "one choice per order required"
        );
        let search = RouteSearch::with_limits(&self.network, &self.directory, self.limits)?;
        let splitter = OrderSplitter::new(&search);
        let mut ledger = self.base_ledger.clone();
        let mut plans = Vec::with_capacity(self.orders.len());

        for (order, &choice) in self.orders.iter().zip(choices) {
            let plan = match search.search_order(order, &self.hubs, choice, &mut ledger)? {
                SearchOutcome::Found(route) => OrderPlan::Routed(route),
                SearchOutcome::Exhausted => {
                    match splitter.split(order, &self.hubs[choice], &mut ledger)? {
                        SplitOutcome::Complete {
                            fragments,
                            slack_days,
                        } => OrderPlan::Split {
                            fragments,
                            slack_days,
                        },
                        SplitOutcome::Partial => OrderPlan::Failed,
                    }
                }
            };
            plans.push(plan);
        }
        Ok(Assignment { plans, ledger })
    }

    /// Scores an assignment. Pure; see [`fitness::evaluate`].
    pub fn evaluate(&self, assignment: &Assignment) -> f64 {
        fitness::evaluate(assignment, &self.network, &self.weights)
    }

    /// Realize-and-score in one step.
    pub fn score(&self, choices: &[usize]) -> Result<f64, PlanError> {
        let assignment = self.realize(choices)?;
        Ok(self.evaluate(&assignment))
    }

    fn compute_desirability(&self) -> Result<Vec<Vec<f64>>, ConfigError> {
        let search = RouteSearch::with_limits(&self.network, &self.directory, self.limits)?;
        let empty = CapacityLedger::new();
        let mut table = Vec::with_capacity(self.orders.len());
        for order in &self.orders {
            let created = self.directory.to_utc(&order.hub, order.day, order.time)?;
            let mut row = Vec::with_capacity(self.hubs.len());
            for hub in &self.hubs {
                if hub == &order.destination {
                    row.push(NO_ROUTE_DESIRABILITY);
                    continue;
                }
                let mut req = search.order_request(order, hub, created)?;
                req.quantity = 1;
                let eta = match search.probe(&req, &empty, self.limits.max_hops) {
                    Some(route) => {
                        let transit_days = (route.arrival.0 - created.0) as f64 / 1440.0;
                        1.0 / (1.0 + transit_days.max(0.0))
                    }
                    None => NO_ROUTE_DESIRABILITY,
                };
                row.push(eta);
            }
            table.push(row);
        }
        Ok(table)
    }
}

/// Shared test fixture, reachable from the strategy tests as
/// `PlanningProblem::fixture()`.
#[cfg(test)]
impl PlanningProblem {
    /// Two hubs (Lima, Baku), two destinations, enough legs for direct,
    /// alternative-hub and split outcomes.
    pub(crate) fn fixture() -> Self {
        use crate::model::{Airport, Continent, Leg};
        use chrono::NaiveTime;

        let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        let order = |id: &str, hub: &str, dest: &str, qty: u32| Order {
            id: id.into(),
            hub: hub.into(),
            destination: dest.into(),
            quantity: qty,
            day: 1,
            time: t(8, 0),
        };

        let directory = AirportDirectory::new(vec![
            Airport::new("SPIM", -5, Continent::SouthAmerica),
            Airport::new("UBBB", 3, Continent::Asia),
            Airport::new("SKBO", -5, Continent::SouthAmerica),
            Airport::new("EBCI", 1, Continent::Europe),
        ])
        .unwrap();
        let network = FlightNetwork::new(
            vec![
                Leg::new("SPIM", "SKBO", t(10, 0), t(14, 0), 300),
                Leg::new("SPIM", "EBCI", t(8, 40), t(9, 40), 250),
                Leg::new("UBBB", "EBCI", t(9, 0), t(12, 0), 200),
                Leg::new("UBBB", "SKBO", t(7, 0), t(21, 0), 150),
            ],
            &directory,
        )
        .unwrap();
        let orders = vec![
            order("O1", "SPIM", "SKBO", 120),
            order("O2", "SPIM", "EBCI", 80),
            order("O3", "UBBB", "EBCI", 60),
        ];
        PlanningProblem::new(
            directory,
            network,
            orders,
            vec!["SPIM".into(), "UBBB".into()],
        )
        .unwrap()
    }
}
