//! Constraint-aware route search.
//!
//! Depth-first search over the flight network, bounded to three hops and
//! to distinct airports, under two simultaneous hard constraints: every
//! hop must have remaining daily capacity for the full quantity, and the
//! cumulative elapsed time from order creation must stay within the
//! deadline classification. Among feasible routes the engine keeps the
//! one with **maximum slack** (deadline − elapsed days), preferring fewer
//! hops and then earlier arrival on ties.
//!
//! The search is split into a read-only probe and an atomic commit:
//! probing never touches the ledger, so alternative hubs can be compared
//! before anything is reserved, and a failed search leaves no partial
//! reservation behind.

use crate::error::{CapacityError, ConfigError, PlanError};
use crate::geo::{AirportDirectory, UtcMinutes, MINUTES_PER_DAY};
use crate::ledger::CapacityLedger;
use crate::model::{Order, RouteCandidate, RouteHop, RouteTag};
use crate::network::FlightNetwork;

/// Fixed timing constants of the search.
#[derive(Debug, Clone, Copy)]
pub struct SearchLimits {
    /// Maximum number of legs in a route.
    pub max_hops: usize,
    /// Minutes between order availability and the earliest departure.
    pub preparation_minutes: i64,
    /// Minimum minutes between arrival and the next departure.
    pub connection_minutes: i64,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_hops: 3,
            preparation_minutes: 30,
            connection_minutes: 30,
        }
    }
}

/// One route request against the engine.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub origin: String,
    pub destination: String,
    pub quantity: u32,
    /// Order creation instant; elapsed time is measured from here.
    pub created: UtcMinutes,
    /// Instant the goods become available at the origin. The preparation
    /// buffer is applied on top of this.
    pub earliest: UtcMinutes,
    /// Delivery window in whole days (2 same-continent, 3 across).
    pub deadline_days: u8,
}

/// Search result. `Exhausted` is a normal, non-fatal outcome: the caller
/// marks the order failed and the fitness penalty does the rest.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(RouteCandidate),
    Exhausted,
}

/// Per-leg schedule on the common time base, precomputed at construction
/// so the search hot path never performs a fallible directory lookup.
#[derive(Debug, Clone, Copy)]
struct LegSchedule {
    /// Departure minute relative to midnight UTC of the departure day.
    /// May fall outside `0..1440` for large offsets.
    departure_offset: i64,
    /// Flight duration in minutes, in `1..=1440`.
    duration: i64,
}

/// The route search engine. Borrows the immutable network and directory;
/// safe to share across evaluation workers.
#[derive(Debug)]
pub struct RouteSearch<'a> {
    network: &'a FlightNetwork,
    directory: &'a AirportDirectory,
    limits: SearchLimits,
    schedule: Vec<LegSchedule>,
}

impl<'a> RouteSearch<'a> {
    pub fn new(
        network: &'a FlightNetwork,
        directory: &'a AirportDirectory,
    ) -> Result<Self, ConfigError> {
        Self::with_limits(network, directory, SearchLimits::default())
    }

    pub fn with_limits(
        network: &'a FlightNetwork,
        directory: &'a AirportDirectory,
        limits: SearchLimits,
    ) -> Result<Self, ConfigError> {
        let mut schedule = Vec::with_capacity(network.len());
        for (_, leg) in network.iter() {
            let origin_offset = i64::from(directory.get(&leg.origin)?.utc_offset_minutes);
            let dest_offset = i64::from(directory.get(&leg.destination)?.utc_offset_minutes);
            let departure_offset = minute_of(leg.departure) - origin_offset;
            let arrival_offset = minute_of(leg.arrival) - dest_offset;
            // Local times only pin the schedule modulo 24h; a leg whose
            // arrival "precedes" its departure in UTC lands the next day.
            let mut duration = (arrival_offset - departure_offset).rem_euclid(MINUTES_PER_DAY);
            if duration == 0 {
                duration = MINUTES_PER_DAY;
            }
            schedule.push(LegSchedule {
                departure_offset,
                duration,
            });
        }
        Ok(Self {
            network,
            directory,
            limits,
            schedule,
        })
    }

    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    pub fn network(&self) -> &'a FlightNetwork {
        self.network
    }

    pub fn directory(&self) -> &'a AirportDirectory {
        self.directory
    }

    /// Finds the best feasible route and reserves its capacity in
    /// `ledger`. On `Exhausted` the ledger is left untouched.
    pub fn search(
        &self,
        req: &SearchRequest,
        ledger: &mut CapacityLedger,
    ) -> Result<SearchOutcome, CapacityError> {
        match self.probe(req, ledger, self.limits.max_hops) {
            Some(candidate) => {
                self.commit(&candidate, req.quantity, ledger)?;
                Ok(SearchOutcome::Found(candidate))
            }
            None => Ok(SearchOutcome::Exhausted),
        }
    }

    /// Routes one order, trying the preferred hub first and falling back
    /// to the remaining hubs, each under its own deadline classification.
    /// A route departing from a substitute hub is tagged [`RouteTag::AltHub`].
    pub fn search_order(
        &self,
        order: &Order,
        hubs: &[String],
        preferred: usize,
        ledger: &mut CapacityLedger,
    ) -> Result<SearchOutcome, PlanError> {
        let created = self
            .directory
            .to_utc(&order.hub, order.day, order.time)?;

        let preferred_hub = &hubs[preferred];
        if preferred_hub != &order.destination {
            let req = self.order_request(order, preferred_hub, created)?;
            if let Some(mut candidate) = self.probe(&req, ledger, self.limits.max_hops) {
                if candidate.hub != order.hub {
                    candidate.tag = RouteTag::AltHub;
                }
                self.commit(&candidate, order.quantity, ledger)?;
                return Ok(SearchOutcome::Found(candidate));
            }
        }

        // Alternative-hub detour: compare the other hubs' best routes
        // before reserving anything, keep the one with most slack.
        let mut best: Option<RouteCandidate> = None;
        for (idx, hub) in hubs.iter().enumerate() {
            if idx == preferred || hub == &order.destination {
                continue;
            }
            let req = self.order_request(order, hub, created)?;
            if let Some(mut candidate) = self.probe(&req, ledger, self.limits.max_hops) {
                if candidate.hub != order.hub {
                    candidate.tag = RouteTag::AltHub;
                }
                if better(&candidate, best.as_ref()) {
                    best = Some(candidate);
                }
            }
        }

        match best {
            Some(candidate) => {
                self.commit(&candidate, order.quantity, ledger)?;
                Ok(SearchOutcome::Found(candidate))
            }
            None => Ok(SearchOutcome::Exhausted),
        }
    }

    /// Builds the search request for `order` departing from `hub`.
    pub fn order_request(
        &self,
        order: &Order,
        hub: &str,
        created: UtcMinutes,
    ) -> Result<SearchRequest, ConfigError> {
        Ok(SearchRequest {
            origin: hub.to_string(),
            destination: order.destination.clone(),
            quantity: order.quantity,
            created,
            earliest: created,
            deadline_days: self.directory.max_deadline_days(hub, &order.destination)?,
        })
    }

    /// Read-only search for the best feasible route; never reserves.
    pub(crate) fn probe(
        &self,
        req: &SearchRequest,
        ledger: &CapacityLedger,
        max_hops: usize,
    ) -> Option<RouteCandidate> {
        if req.origin == req.destination || !self.directory.contains(&req.origin) {
            return None;
        }
        let mut best = None;
        let mut visited = vec![req.origin.as_str()];
        let mut path = Vec::with_capacity(max_hops);
        self.dfs(
            &req.origin,
            req.earliest.plus_minutes(self.limits.preparation_minutes),
            req,
            ledger,
            max_hops,
            &mut visited,
            &mut path,
            None,
            &mut best,
        );
        best
    }

    #[allow(clippy::too_many_arguments)]
    fn dfs<'s>(
        &'s self,
        current: &str,
        min_departure: UtcMinutes,
        req: &'s SearchRequest,
        ledger: &CapacityLedger,
        max_hops: usize,
        visited: &mut Vec<&'s str>,
        path: &mut Vec<RouteHop>,
        first_departure: Option<UtcMinutes>,
        best: &mut Option<RouteCandidate>,
    ) {
        if path.len() >= max_hops {
            return;
        }
        let deadline = f64::from(req.deadline_days);
        let latest_day = req.created.day() + i64::from(req.deadline_days);

        for (leg_id, leg) in self.network.legs_from(current) {
            let is_final = leg.destination == req.destination;
            if !is_final && visited.iter().any(|&v| v == leg.destination) {
                continue;
            }
            let sched = self.schedule[leg_id.0];

            // The same leg repeats every day; try each departure day in
            // the window. Days outside it cannot arrive in time.
            let first_day = (min_departure.day() - 1).max(0);
            for day in first_day..=latest_day {
                let departure = UtcMinutes(day * MINUTES_PER_DAY + sched.departure_offset);
                if departure < min_departure {
                    continue;
                }
                let arrival = departure.plus_minutes(sched.duration);
                let elapsed = self.directory.elapsed_days(req.created, arrival);
                if elapsed > deadline {
                    break; // later days are only worse
                }
                let day = day as u32;
                if ledger.remaining(self.network, leg_id, day) < req.quantity {
                    continue;
                }

                path.push(RouteHop { leg: leg_id, day });
                let departed = first_departure.unwrap_or(departure);

                if is_final {
                    let candidate = RouteCandidate {
                        hops: path.clone(),
                        tag: if path.len() == 1 {
                            RouteTag::Direct
                        } else {
                            RouteTag::Connecting
                        },
                        hub: req.origin.clone(),
                        departure: departed,
                        arrival,
                        elapsed_days: elapsed,
                        slack_days: deadline - elapsed,
                    };
                    if better(&candidate, best.as_ref()) {
                        *best = Some(candidate);
                    }
                } else if elapsed < deadline {
                    // A stop on the last window day leaves no room for
                    // the remaining legs.
                    let dest = leg.destination.as_str();
                    visited.push(dest);
                    self.dfs(
                        dest,
                        arrival.plus_minutes(self.limits.connection_minutes),
                        req,
                        ledger,
                        max_hops,
                        visited,
                        path,
                        Some(departed),
                        best,
                    );
                    visited.pop();
                }
                path.pop();
            }
        }
    }

    /// Reserves every hop of a committed route. All-or-nothing: a failed
    /// hop rolls back the preceding ones before the error propagates.
    fn commit(
        &self,
        candidate: &RouteCandidate,
        quantity: u32,
        ledger: &mut CapacityLedger,
    ) -> Result<(), CapacityError> {
        for (idx, hop) in candidate.hops.iter().enumerate() {
            if let Err(err) = ledger.reserve(self.network, hop.leg, hop.day, quantity) {
                for done in &candidate.hops[..idx] {
                    ledger.release(done.leg, done.day, quantity);
                }
                return Err(err);
            }
        }
        Ok(())
    }
}

/// Route preference order: most slack, then fewest hops, then earliest
/// arrival.
fn better(candidate: &RouteCandidate, best: Option<&RouteCandidate>) -> bool {
    match best {
        None => true,
        Some(best) => {
            if candidate.slack_days != best.slack_days {
                candidate.slack_days > best.slack_days
            } else if candidate.hop_count() != best.hop_count() {
                candidate.hop_count() < best.hop_count()
            } else {
                candidate.arrival < best.arrival
            }
        }
    }
}

fn minute_of(time: chrono::NaiveTime) -> i64 {
    use chrono::Timelike;
    i64::from(time.num_seconds_from_midnight()) / 60
}
