//! Trip rendering: resolve each trip to a concrete visit order, drawable
//! path and cost breakdown, falling back to a synthesized straight-line
//! route whenever the exact routing service fails.

use itertools::Itertools;
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::PlannerConfig;
use crate::problem::{Coordinate, DemandPoint};
use crate::split::Trip;
use crate::summary::{StopSummary, TripSummary};
use crate::utils::{format_miles, format_minutes};

/// Errors from the exact routing service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteServiceError {
    /// The service is not present in this environment.
    #[error("routing service unavailable")]
    Unavailable,
    /// The service found no route through the requested stops.
    #[error("no route found through the requested stops")]
    NoRoute,
    /// The service answered with a failure status or a malformed payload.
    #[error("routing service returned a bad response: {0}")]
    BadStatus(String),
}

/// One leg of a resolved route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub distance_m: f64,
    pub duration_s: f64,
}

/// A depot-to-depot route resolved by the routing service.
///
/// `waypoint_order` is a permutation of the submitted stop positions.
/// `legs` has one entry per hop; the last leg returns to the depot, so a
/// well-formed reply carries `stops.len() + 1` legs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRoute {
    pub waypoint_order: Vec<usize>,
    pub legs: Vec<RouteLeg>,
}

/// Exact depot-to-depot routing with optional stop reordering.
pub trait RouteService {
    fn route(
        &self,
        depot: Coordinate,
        stops: &[Coordinate],
        optimize: bool,
    ) -> Result<ServiceRoute, RouteServiceError>;
}

/// Stand-in for an absent routing service; every request fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRouteService;

impl RouteService for NoRouteService {
    fn route(
        &self,
        _depot: Coordinate,
        _stops: &[Coordinate],
        _optimize: bool,
    ) -> Result<ServiceRoute, RouteServiceError> {
        Err(RouteServiceError::Unavailable)
    }
}

/// A trip resolved to a concrete visit order, path and summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedTrip {
    /// 1-based trip number within the run.
    pub trip_number: usize,
    /// Demand-point indices in final visit order.
    pub visit_order: Vec<usize>,
    /// Depot, stops in visit order, depot.
    pub path: Vec<Coordinate>,
    pub summary: TripSummary,
}

/// Resolves trips independently of one another.
pub struct TripRenderer<'a> {
    service: Option<&'a dyn RouteService>,
    config: &'a PlannerConfig,
}

impl<'a> TripRenderer<'a> {
    /// Create a renderer over an optional routing service.
    pub fn new(service: Option<&'a dyn RouteService>, config: &'a PlannerConfig) -> Self {
        TripRenderer { service, config }
    }

    /// Render one trip.
    ///
    /// With a service present the route is requested depot-to-depot through
    /// all stops; `prefer_optimized` lets the service pick the waypoint
    /// order. Any failure, including a malformed reply, falls back to the
    /// synthesized straight-line route and never affects other trips.
    pub fn render(
        &self,
        trip: &Trip,
        trip_number: usize,
        depot: Coordinate,
        points: &[DemandPoint],
        prefer_optimized: bool,
    ) -> RenderedTrip {
        let stop_coords: Vec<Coordinate> =
            trip.stops.iter().map(|&i| points[i].coordinate).collect();

        if let Some(service) = self.service {
            match service.route(depot, &stop_coords, prefer_optimized) {
                Ok(route) => {
                    match self.from_service(trip, trip_number, depot, points, &stop_coords, &route)
                    {
                        Ok(rendered) => return rendered,
                        Err(err) => warn!(
                            "trip {}: discarding malformed service route: {}",
                            trip_number, err
                        ),
                    }
                }
                Err(err) => warn!(
                    "trip {}: routing service failed, using straight-line route: {}",
                    trip_number, err
                ),
            }
        }

        self.synthesize(trip, trip_number, depot, points)
    }

    /// Build the rendered trip from a service reply, validating its shape.
    fn from_service(
        &self,
        trip: &Trip,
        trip_number: usize,
        depot: Coordinate,
        points: &[DemandPoint],
        stop_coords: &[Coordinate],
        route: &ServiceRoute,
    ) -> Result<RenderedTrip, RouteServiceError> {
        let n = trip.stops.len();

        if !is_permutation(&route.waypoint_order, n) {
            return Err(RouteServiceError::BadStatus(format!(
                "waypoint order is not a permutation of {} stops",
                n
            )));
        }
        if route.legs.len() != n + 1 {
            return Err(RouteServiceError::BadStatus(format!(
                "expected {} legs, got {}",
                n + 1,
                route.legs.len()
            )));
        }

        let visit_order: Vec<usize> = route.waypoint_order.iter().map(|&k| trip.stops[k]).collect();

        let mut path = Vec::with_capacity(n + 2);
        path.push(depot);
        path.extend(route.waypoint_order.iter().map(|&k| stop_coords[k]));
        path.push(depot);

        let summary = self.build_summary(trip_number, &visit_order, points, &route.legs);

        Ok(RenderedTrip {
            trip_number,
            visit_order,
            path,
            summary,
        })
    }

    /// Build the straight-line fallback: stops in trip order, legs priced
    /// by haversine distance at the assumed fallback speed.
    fn synthesize(
        &self,
        trip: &Trip,
        trip_number: usize,
        depot: Coordinate,
        points: &[DemandPoint],
    ) -> RenderedTrip {
        let visit_order = trip.stops.clone();

        let mut path = Vec::with_capacity(visit_order.len() + 2);
        path.push(depot);
        path.extend(visit_order.iter().map(|&i| points[i].coordinate));
        path.push(depot);

        let legs: Vec<RouteLeg> = path
            .iter()
            .tuple_windows()
            .map(|(from, to)| {
                let meters = from.distance_to(to);
                RouteLeg {
                    distance_m: meters,
                    duration_s: meters / self.config.fallback_speed_mps,
                }
            })
            .collect();

        let summary = self.build_summary(trip_number, &visit_order, points, &legs);

        RenderedTrip {
            trip_number,
            visit_order,
            path,
            summary,
        }
    }

    /// Aggregate legs into a summary. `legs` covers every hop including the
    /// final return to the depot.
    fn build_summary(
        &self,
        trip_number: usize,
        visit_order: &[usize],
        points: &[DemandPoint],
        legs: &[RouteLeg],
    ) -> TripSummary {
        let mut stops = Vec::with_capacity(visit_order.len());
        let mut total_meters = 0.0;
        let mut total_seconds = 0.0;

        for (&point, leg) in visit_order.iter().zip(legs) {
            stops.push(StopSummary {
                name: points[point].name.clone(),
                distance_text: format_miles(leg.distance_m),
                duration_text: format_minutes(leg.duration_s),
            });
            total_meters += leg.distance_m;
            total_seconds += leg.duration_s;
        }

        let return_leg = legs[legs.len() - 1];
        total_meters += return_leg.distance_m;
        total_seconds += return_leg.duration_s;

        TripSummary {
            trip_number,
            color: self.config.color_for(trip_number).to_string(),
            stops,
            total_meters,
            total_seconds,
            return_distance_text: format_miles(return_leg.distance_m),
            return_duration_text: format_minutes(return_leg.duration_s),
        }
    }
}

/// Whether `order` is a permutation of `0..n`.
fn is_permutation(order: &[usize], n: usize) -> bool {
    if order.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &k in order {
        if k >= n || seen[k] {
            return false;
        }
        seen[k] = true;
    }
    true
}
