//! Travel-cost oracles: the external matrix service contract and the
//! haversine fallback estimator.

use log::warn;
use thiserror::Error;

use crate::matrix::CostMatrix;
use crate::problem::Coordinate;

/// Assumed average speed for fallback estimates, in meters per second.
/// 11.11 m/s is roughly 40 km/h of city driving.
pub const FALLBACK_SPEED_MPS: f64 = 11.11;

/// Errors from the network-backed travel-cost service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    /// The service is not present in this environment.
    #[error("distance service unavailable")]
    Unavailable,
    /// The service did not answer in time.
    #[error("distance service timed out")]
    Timeout,
    /// The service answered with a failure status or a malformed payload.
    #[error("distance service returned a bad response: {0}")]
    BadStatus(String),
}

/// Source of pairwise travel costs for a set of coordinates.
///
/// Implementations return an n x n [`CostMatrix`] in the order of `points`,
/// with a zero diagonal. Unreachable pairs carry `f64::INFINITY`.
pub trait DistanceOracle {
    fn compute_costs(&self, points: &[Coordinate]) -> Result<CostMatrix, OracleError>;
}

/// Straight-line travel-cost estimator.
///
/// Divides great-circle distance by an assumed speed. It never fails and
/// never produces an unreachable pair, which makes it the fallback when
/// the network-backed oracle is down.
#[derive(Debug, Clone)]
pub struct HaversineEstimator {
    /// Assumed average speed in meters per second.
    pub speed_mps: f64,
}

impl Default for HaversineEstimator {
    fn default() -> Self {
        HaversineEstimator {
            speed_mps: FALLBACK_SPEED_MPS,
        }
    }
}

impl HaversineEstimator {
    /// Create an estimator with the given assumed speed.
    pub fn new(speed_mps: f64) -> Self {
        HaversineEstimator { speed_mps }
    }

    /// Estimate the full cost matrix for `points`.
    pub fn costs(&self, points: &[Coordinate]) -> CostMatrix {
        let n = points.len();
        let mut matrix = CostMatrix::new(n);

        for i in 0..n {
            for j in 0..n {
                if i != j {
                    let meters = points[i].distance_to(&points[j]);
                    matrix.set(i, j, meters / self.speed_mps);
                }
            }
        }

        matrix
    }
}

impl DistanceOracle for HaversineEstimator {
    fn compute_costs(&self, points: &[Coordinate]) -> Result<CostMatrix, OracleError> {
        Ok(self.costs(points))
    }
}

/// Query `oracle`, falling back to `fallback` estimates on any failure.
///
/// The fallback is a degraded result, not an error: the failure is logged
/// and the planning run continues with straight-line estimates.
pub fn costs_with_fallback(
    oracle: &dyn DistanceOracle,
    fallback: &HaversineEstimator,
    points: &[Coordinate],
) -> CostMatrix {
    match oracle.compute_costs(points) {
        Ok(matrix) => matrix,
        Err(err) => {
            warn!(
                "distance service failed, falling back to haversine estimates: {}",
                err
            );
            fallback.costs(points)
        }
    }
}
