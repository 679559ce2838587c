//! Capacity-aware trip splitting.
//!
//! Turns a demand vector and a vehicle capacity into an ordered list of
//! trips. Two policies are available: keep the input order, or greedily
//! chase the nearest unfulfilled point through a travel-cost matrix.
//!
//! Both policies are myopic heuristics. They never backtrack and make no
//! claim of minimal trip count or minimal total travel cost.

use std::collections::HashSet;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::matrix::CostMatrix;

/// How demand is partitioned into trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitPolicy {
    /// Serve points in input order, never reordering.
    FixedOrder,
    /// Greedy nearest-neighbor selection over the cost matrix.
    NearestNext,
}

/// One vehicle's assigned stops, depot to depot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    /// Demand-point indices in visit order; each index appears at most once.
    pub stops: Vec<usize>,
    /// Units allocated per stop, parallel to `stops`.
    pub deliveries: Vec<u32>,
    /// Total units carried, never above the capacity the trip was built for.
    pub load: u32,
}

impl Trip {
    /// Whether the trip has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Units allocated to `point` on this trip, 0 if it is not visited.
    pub fn delivery_for(&self, point: usize) -> u32 {
        self.stops
            .iter()
            .position(|&stop| stop == point)
            .map_or(0, |i| self.deliveries[i])
    }
}

/// Accumulates one trip, collapsing repeated partial allocations to the
/// same point into a single stop entry.
struct TripBuilder {
    stops: Vec<usize>,
    deliveries: Vec<u32>,
    load: u32,
    visited: HashSet<usize>,
}

impl TripBuilder {
    fn new() -> Self {
        TripBuilder {
            stops: Vec::new(),
            deliveries: Vec::new(),
            load: 0,
            visited: HashSet::new(),
        }
    }

    fn allocate(&mut self, point: usize, units: u32) {
        if self.visited.insert(point) {
            self.stops.push(point);
            self.deliveries.push(units);
        } else {
            let i = self
                .stops
                .iter()
                .position(|&stop| stop == point)
                .expect("visited point must be a stop");
            self.deliveries[i] += units;
        }
        self.load += units;
    }

    fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    fn finish(self) -> Trip {
        Trip {
            stops: self.stops,
            deliveries: self.deliveries,
            load: self.load,
        }
    }
}

/// Split demands into trips without reordering.
///
/// Keeps a running trip with remaining capacity. A point whose demand
/// exceeds what is left is served partially and the remainder carries over
/// to the next trip, so a single point may span several trips.
pub fn split_fixed_order(demands: &[u32], capacity: u32) -> Vec<Trip> {
    let capacity = capacity.max(1);
    let mut remaining: Vec<u32> = demands.to_vec();
    let mut trips = Vec::new();
    let mut builder = TripBuilder::new();
    let mut capacity_left = capacity;

    for point in 0..remaining.len() {
        while remaining[point] > 0 {
            if capacity_left == 0 {
                if !builder.is_empty() {
                    trips.push(builder.finish());
                }
                builder = TripBuilder::new();
                capacity_left = capacity;
            }

            let take = remaining[point].min(capacity_left);
            builder.allocate(point, take);
            remaining[point] -= take;
            capacity_left -= take;
        }
    }

    if !builder.is_empty() {
        trips.push(builder.finish());
    }

    trips
}

/// Split demands into trips by greedy nearest-neighbor selection.
///
/// `matrix` must cover the depot at index 0 and demand point `i` at index
/// `i + 1`. Each trip starts at the depot with full capacity and repeatedly
/// serves the cheapest reachable point with demand left, ties going to the
/// lower index. When no candidate is reachable from the current position
/// the trip ends early; a fresh trip that cannot reach anything ends the
/// whole split, dropping the unreachable remainder.
pub fn split_nearest_next(matrix: &CostMatrix, demands: &[u32], capacity: u32) -> Vec<Trip> {
    let capacity = capacity.max(1);
    let mut remaining: Vec<u32> = demands.to_vec();
    let mut trips = Vec::new();

    while remaining.iter().any(|&r| r > 0) {
        let mut builder = TripBuilder::new();
        let mut capacity_left = capacity;
        let mut current = 0; // depot row

        while capacity_left > 0 && remaining.iter().any(|&r| r > 0) {
            let point = match nearest_candidate(matrix, &remaining, current) {
                Some(point) => point,
                None => {
                    debug!("no reachable candidate from row {}, closing trip", current);
                    break;
                }
            };

            let take = remaining[point].min(capacity_left);
            builder.allocate(point, take);
            remaining[point] -= take;
            capacity_left -= take;
            current = point + 1;
        }

        if builder.is_empty() {
            let dropped: u32 = remaining.iter().sum();
            warn!("{} unit(s) unreachable from the depot, dropped from the plan", dropped);
            break;
        }
        trips.push(builder.finish());
    }

    trips
}

/// The cheapest point with remaining demand reachable from matrix row
/// `from`, ties broken by the first index.
fn nearest_candidate(matrix: &CostMatrix, remaining: &[u32], from: usize) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (point, &left) in remaining.iter().enumerate() {
        if left == 0 {
            continue;
        }
        let cost = matrix.get(from, point + 1);
        if !cost.is_finite() {
            continue;
        }
        match best {
            Some((_, best_cost)) if cost >= best_cost => {}
            _ => best = Some((point, cost)),
        }
    }

    best.map(|(point, _)| point)
}
