//! Input data model for trip planning.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::split::SplitPolicy;

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Errors from coordinate construction and parsing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    /// Latitude outside the [-90, 90] degree range.
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    /// Longitude outside the [-180, 180] degree range.
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    /// Text that does not parse as a "lat, lng" pair.
    #[error("expected \"lat, lng\" with two finite numbers")]
    Unparseable,
}

/// A point on the globe in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Create a coordinate, checking the degree ranges.
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange(lat));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(CoordinateError::LongitudeOutOfRange(lng));
        }
        Ok(Coordinate { lat, lng })
    }

    /// Great-circle distance to another coordinate, in meters.
    ///
    /// Spherical law of haversines over the mean Earth radius.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();

        let h = (d_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    /// Parse "lat, lng" text as typed into a location field.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        let lat = parts.next().ok_or(CoordinateError::Unparseable)?;
        let lng = parts.next().ok_or(CoordinateError::Unparseable)?;
        if parts.next().is_some() {
            return Err(CoordinateError::Unparseable);
        }

        let lat: f64 = lat.trim().parse().map_err(|_| CoordinateError::Unparseable)?;
        let lng: f64 = lng.trim().parse().map_err(|_| CoordinateError::Unparseable)?;
        if !lat.is_finite() || !lng.is_finite() {
            return Err(CoordinateError::Unparseable);
        }

        Coordinate::new(lat, lng)
    }
}

/// A location requiring some quantity of goods picked up or delivered.
///
/// Identity is positional: trips refer to demand points by their index in
/// the planning request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandPoint {
    pub name: String,
    pub coordinate: Coordinate,
    pub demand: u32,
}

impl DemandPoint {
    /// Create a new demand point.
    pub fn new<S: Into<String>>(name: S, coordinate: Coordinate, demand: u32) -> Self {
        DemandPoint {
            name: name.into(),
            coordinate,
            demand,
        }
    }
}

/// Coerce a raw capacity value from user input: floor, then clamp to >= 1.
pub fn coerce_capacity(raw: f64) -> u32 {
    if !raw.is_finite() {
        return 1;
    }
    raw.floor().max(1.0) as u32
}

/// Coerce a raw quantity value from user input: floor, then clamp to >= 0.
pub fn coerce_quantity(raw: f64) -> u32 {
    if !raw.is_finite() {
        return 0;
    }
    raw.floor().max(0.0) as u32
}

/// One planning invocation's input.
///
/// Supplied fresh per run; the planner keeps no state between requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// The fixed start and end location of every trip.
    pub depot: Coordinate,
    /// Maximum cumulative demand a single trip may carry.
    pub capacity: u32,
    /// Demand points in input order. Zero-demand points are dropped during
    /// planning.
    pub points: Vec<DemandPoint>,
    /// How demand is partitioned into trips.
    pub policy: SplitPolicy,
}

impl PlanRequest {
    /// Create a new request. The capacity is clamped to at least 1.
    pub fn new(
        depot: Coordinate,
        capacity: u32,
        points: Vec<DemandPoint>,
        policy: SplitPolicy,
    ) -> Self {
        PlanRequest {
            depot,
            capacity: capacity.max(1),
            points,
            policy,
        }
    }
}
