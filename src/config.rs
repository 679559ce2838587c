//! Configuration for a planning session.

use serde::{Deserialize, Serialize};

use crate::oracle::FALLBACK_SPEED_MPS;

/// Route colors cycled by trip number.
pub const DEFAULT_PALETTE: [&str; 6] = [
    "#4285F4", "#34A853", "#FBBC05", "#EA4335", "#A142F4", "#00ACC1",
];

/// Settings shared by every run of a [`crate::Planner`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Colors assigned by `(trip_number - 1) mod palette length`.
    pub palette: Vec<String>,
    /// Assumed speed for straight-line fallbacks, in meters per second.
    pub fallback_speed_mps: f64,
    /// Allow the routing service to reorder stops when the split policy
    /// permits it.
    pub prefer_optimized_order: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            fallback_speed_mps: FALLBACK_SPEED_MPS,
            prefer_optimized_order: true,
        }
    }
}

impl PlannerConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        PlannerConfig::default()
    }

    /// Set the route color palette.
    pub fn with_palette(mut self, palette: Vec<String>) -> Self {
        self.palette = palette;
        self
    }

    /// Set the assumed fallback speed in meters per second.
    pub fn with_fallback_speed(mut self, speed_mps: f64) -> Self {
        self.fallback_speed_mps = speed_mps;
        self
    }

    /// Allow or forbid service-side stop reordering.
    pub fn with_prefer_optimized_order(mut self, prefer: bool) -> Self {
        self.prefer_optimized_order = prefer;
        self
    }

    /// Display color for a 1-based trip number.
    pub fn color_for(&self, trip_number: usize) -> &str {
        if self.palette.is_empty() {
            return "#000000";
        }
        &self.palette[trip_number.saturating_sub(1) % self.palette.len()]
    }
}
