//! # trip_split
//!
//! Capacity-aware trip planning for depot-based pickup and delivery.
//!
//! Given a depot, a per-vehicle capacity limit and a list of demand
//! points, the planner partitions demand into trips that respect the
//! capacity, resolves a visit order per trip and produces per-trip cost
//! summaries. The result does not depend on the external travel-cost
//! service being reachable: a haversine estimator and synthesized
//! straight-line routes stand in whenever it fails.
//!
//! The splitting heuristics are greedy and myopic. They make no claim of
//! optimality; they exist to produce serviceable trips quickly.

pub mod config;
pub mod matrix;
pub mod oracle;
pub mod problem;
pub mod render;
pub mod split;
pub mod store;
pub mod summary;
pub mod utils;

use log::{debug, info};
use thiserror::Error;

use crate::config::PlannerConfig;
use crate::oracle::{costs_with_fallback, DistanceOracle, HaversineEstimator};
use crate::problem::{Coordinate, DemandPoint, PlanRequest};
use crate::render::{NoRouteService, RenderedTrip, RouteService, TripRenderer};
use crate::split::{split_fixed_order, split_nearest_next, SplitPolicy};
use crate::store::{RouteSink, TripSummaryStore};

/// Errors surfaced to the caller of [`Planner::plan`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// No demand point had a positive quantity after filtering.
    #[error("add at least one demand point with a positive quantity")]
    NoDemandPoints,
}

/// Identifies one planning run for stale-result detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunId(u64);

/// Counts reported back after a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanReport {
    /// Number of trips produced.
    pub trips: usize,
    /// Stop entries summed over all trips; a point split across trips
    /// counts once per trip it appears in.
    pub stops_with_repeats: usize,
}

/// A planning session: travel-cost oracle, optional exact router, render
/// sink and the current run's summaries.
///
/// This is the explicit context object for one map view; nothing is kept
/// in ambient state. Starting a new run invalidates everything from the
/// prior one, and a completion carrying a stale [`RunId`] is rejected
/// (last run wins).
pub struct Planner<O, R, K>
where
    O: DistanceOracle,
    R: RouteService,
    K: RouteSink,
{
    pub oracle: O,
    pub router: Option<R>,
    pub sink: K,
    pub config: PlannerConfig,
    store: TripSummaryStore,
    generation: u64,
}

impl<O, K> Planner<O, NoRouteService, K>
where
    O: DistanceOracle,
    K: RouteSink,
{
    /// Create a session with no exact routing service; every trip renders
    /// through the straight-line fallback.
    pub fn without_router(oracle: O, sink: K, config: PlannerConfig) -> Self {
        Planner::new(oracle, None, sink, config)
    }
}

impl<O, R, K> Planner<O, R, K>
where
    O: DistanceOracle,
    R: RouteService,
    K: RouteSink,
{
    /// Create a new planning session.
    pub fn new(oracle: O, router: Option<R>, sink: K, config: PlannerConfig) -> Self {
        Planner {
            oracle,
            router,
            sink,
            config,
            store: TripSummaryStore::new(),
            generation: 0,
        }
    }

    /// Run one planning pass to completion.
    ///
    /// Splits demand per the request's policy, renders every trip
    /// independently and installs the summaries in ascending trip order.
    /// Oracle and per-trip routing failures degrade to estimates; only an
    /// empty demand list is an error.
    pub fn plan(&mut self, request: &PlanRequest) -> Result<PlanReport, PlanError> {
        let run = self.begin_run();

        let points = filter_points(&request.points);
        if points.is_empty() {
            return Err(PlanError::NoDemandPoints);
        }
        let demands: Vec<u32> = points.iter().map(|p| p.demand).collect();

        let trips = match request.policy {
            SplitPolicy::FixedOrder => split_fixed_order(&demands, request.capacity),
            SplitPolicy::NearestNext => {
                let matrix_points = matrix_points(request.depot, &points);
                let estimator = HaversineEstimator::new(self.config.fallback_speed_mps);
                let matrix = costs_with_fallback(&self.oracle, &estimator, &matrix_points);
                split_nearest_next(&matrix, &demands, request.capacity)
            }
        };

        // Manual order forbids service-side reordering.
        let prefer_optimized =
            self.config.prefer_optimized_order && request.policy == SplitPolicy::NearestNext;

        let service = self.router.as_ref().map(|r| r as &dyn RouteService);
        let renderer = TripRenderer::new(service, &self.config);
        let rendered: Vec<RenderedTrip> = trips
            .iter()
            .enumerate()
            .map(|(idx, trip)| renderer.render(trip, idx + 1, request.depot, &points, prefer_optimized))
            .collect();

        let report = PlanReport {
            trips: rendered.len(),
            stops_with_repeats: rendered.iter().map(|r| r.visit_order.len()).sum(),
        };

        self.commit_run(run, rendered);
        info!(
            "planned {} trip(s) covering {} stop entries",
            report.trips, report.stops_with_repeats
        );

        Ok(report)
    }

    /// Start a new run: advance the generation and clear all prior state,
    /// visuals included.
    pub fn begin_run(&mut self) -> RunId {
        self.generation += 1;
        self.store.clear(&mut self.sink);
        RunId(self.generation)
    }

    /// Install a finished run's rendered trips.
    ///
    /// Draws each path on the sink and installs the summaries in ascending
    /// trip-number order regardless of the order renders completed in.
    /// Returns `false` and installs nothing when `run` has been superseded
    /// by a newer [`Planner::begin_run`].
    pub fn commit_run(&mut self, run: RunId, mut rendered: Vec<RenderedTrip>) -> bool {
        if run.0 != self.generation {
            debug!("discarding results of superseded run {}", run.0);
            return false;
        }

        rendered.sort_by_key(|r| r.trip_number);

        let mut entries = Vec::with_capacity(rendered.len());
        for trip in rendered {
            let handle = self.sink.draw(&trip.path, &trip.summary.color);
            entries.push((trip.summary, handle));
        }
        self.store.replace_all(&mut self.sink, entries);

        true
    }

    /// The current run's summaries in ascending trip order.
    pub fn store(&self) -> &TripSummaryStore {
        &self.store
    }

    /// Make exactly one trip visible (1-based), hiding all others.
    pub fn show_only(&mut self, trip_number: usize) {
        self.store.show_only(&mut self.sink, trip_number);
    }

    /// Make every trip visible.
    pub fn show_all(&mut self) {
        self.store.show_all(&mut self.sink);
    }

    /// Remove all visuals and summaries.
    pub fn clear(&mut self) {
        self.store.clear(&mut self.sink);
    }

    /// The current run's report as human-readable text.
    pub fn report_text(&self) -> String {
        utils::write_report(self.store.summaries())
    }
}

/// Keep only points with positive demand, defaulting empty names the way
/// the input form does.
fn filter_points(points: &[DemandPoint]) -> Vec<DemandPoint> {
    let mut kept = Vec::new();
    for point in points {
        if point.demand == 0 {
            continue;
        }
        let mut point = point.clone();
        if point.name.is_empty() {
            point.name = format!("L{}", kept.len() + 1);
        }
        kept.push(point);
    }
    kept
}

/// Depot first, then the demand points in order.
fn matrix_points(depot: Coordinate, points: &[DemandPoint]) -> Vec<Coordinate> {
    let mut all = Vec::with_capacity(points.len() + 1);
    all.push(depot);
    all.extend(points.iter().map(|p| p.coordinate));
    all
}
