//! Session store for rendered trip summaries and their map visuals.

use serde::{Deserialize, Serialize};

use crate::problem::Coordinate;
use crate::summary::TripSummary;

/// Opaque identifier of one trip's visual representation in the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualHandle(pub u64);

/// The route-rendering sink: draws an ordered path and controls its
/// visibility. The surrounding application implements this over its map
/// layer.
pub trait RouteSink {
    /// Draw a depot-to-depot path in the given color and return its handle.
    fn draw(&mut self, path: &[Coordinate], color: &str) -> VisualHandle;
    /// Show or hide a previously drawn path.
    fn set_visible(&mut self, handle: VisualHandle, visible: bool);
    /// Remove a previously drawn path.
    fn remove(&mut self, handle: VisualHandle);
}

/// Holds the current run's summaries and their visual handles.
///
/// Trip numbers are 1-based positions in the list installed by
/// [`TripSummaryStore::replace_all`]; entries are kept in ascending
/// trip-number order.
#[derive(Default)]
pub struct TripSummaryStore {
    summaries: Vec<TripSummary>,
    handles: Vec<VisualHandle>,
}

impl TripSummaryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        TripSummaryStore::default()
    }

    /// Drop all prior state and install the new entries.
    pub fn replace_all(
        &mut self,
        sink: &mut dyn RouteSink,
        entries: Vec<(TripSummary, VisualHandle)>,
    ) {
        self.clear(sink);
        for (summary, handle) in entries {
            self.summaries.push(summary);
            self.handles.push(handle);
        }
    }

    /// Make exactly one trip visible (1-based), hiding all others.
    pub fn show_only(&self, sink: &mut dyn RouteSink, trip_number: usize) {
        for (idx, &handle) in self.handles.iter().enumerate() {
            sink.set_visible(handle, idx + 1 == trip_number);
        }
    }

    /// Make every trip visible.
    pub fn show_all(&self, sink: &mut dyn RouteSink) {
        for &handle in &self.handles {
            sink.set_visible(handle, true);
        }
    }

    /// Remove every visual representation and empty the store.
    pub fn clear(&mut self, sink: &mut dyn RouteSink) {
        for handle in self.handles.drain(..) {
            sink.remove(handle);
        }
        self.summaries.clear();
    }

    /// Summaries in ascending trip-number order.
    pub fn summaries(&self) -> &[TripSummary] {
        &self.summaries
    }

    /// The summary for a 1-based trip number, if present.
    pub fn get(&self, trip_number: usize) -> Option<&TripSummary> {
        trip_number
            .checked_sub(1)
            .and_then(|idx| self.summaries.get(idx))
    }

    /// Number of stored trips.
    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    /// Whether the store holds no trips.
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}
