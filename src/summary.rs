//! Per-trip cost summaries derived from a planning run.

use serde::{Deserialize, Serialize};

use crate::utils::METERS_PER_MILE;

/// One stop's display line within a trip summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopSummary {
    pub name: String,
    pub distance_text: String,
    pub duration_text: String,
}

/// Cost breakdown of a single rendered trip.
///
/// Recomputed on every planning run and fully replaced by the next run,
/// never persisted. The return-to-depot leg is always included in the
/// totals and carried as its own display line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripSummary {
    /// 1-based position of the trip within the run.
    pub trip_number: usize,
    /// Display color cycled from the palette.
    pub color: String,
    /// Per-stop lines in visit order.
    pub stops: Vec<StopSummary>,
    /// Total distance in meters, return leg included.
    pub total_meters: f64,
    /// Total duration in seconds, return leg included.
    pub total_seconds: f64,
    /// Display text for the final leg back to the depot.
    pub return_distance_text: String,
    pub return_duration_text: String,
}

impl TripSummary {
    /// Total distance in miles, as shown in the trip header.
    pub fn total_miles(&self) -> f64 {
        self.total_meters / METERS_PER_MILE
    }

    /// Total duration in whole minutes, as shown in the trip header.
    pub fn total_minutes(&self) -> i64 {
        (self.total_seconds / 60.0).round() as i64
    }
}
