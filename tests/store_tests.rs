//! Tests for the trip summary store and its sink interactions.

use std::collections::HashMap;

use trip_split::problem::Coordinate;
use trip_split::store::{RouteSink, TripSummaryStore, VisualHandle};
use trip_split::summary::TripSummary;

/// Sink that records drawn paths, visibility and removals.
#[derive(Default)]
struct RecordingSink {
    next_id: u64,
    drawn: Vec<(usize, String)>,
    visible: HashMap<u64, bool>,
    removed: Vec<u64>,
}

impl RouteSink for RecordingSink {
    fn draw(&mut self, path: &[Coordinate], color: &str) -> VisualHandle {
        self.next_id += 1;
        self.drawn.push((path.len(), color.to_string()));
        self.visible.insert(self.next_id, true);
        VisualHandle(self.next_id)
    }

    fn set_visible(&mut self, handle: VisualHandle, visible: bool) {
        if let Some(entry) = self.visible.get_mut(&handle.0) {
            *entry = visible;
        }
    }

    fn remove(&mut self, handle: VisualHandle) {
        self.visible.remove(&handle.0);
        self.removed.push(handle.0);
    }
}

fn summary(trip_number: usize) -> TripSummary {
    TripSummary {
        trip_number,
        color: "#4285F4".to_string(),
        stops: Vec::new(),
        total_meters: 1000.0,
        total_seconds: 90.0,
        return_distance_text: "0.6 mi".to_string(),
        return_duration_text: "2 min".to_string(),
    }
}

/// Install `count` trips, returning their handles.
fn install(store: &mut TripSummaryStore, sink: &mut RecordingSink, count: usize) -> Vec<u64> {
    let entries: Vec<(TripSummary, VisualHandle)> = (1..=count)
        .map(|n| {
            let handle = sink.draw(&[], "#4285F4");
            (summary(n), handle)
        })
        .collect();
    let ids: Vec<u64> = entries.iter().map(|(_, h)| h.0).collect();
    store.replace_all(sink, entries);
    ids
}

#[test]
fn test_show_only_hides_the_rest() {
    let mut store = TripSummaryStore::new();
    let mut sink = RecordingSink::default();
    let ids = install(&mut store, &mut sink, 3);

    store.show_only(&mut sink, 2);

    assert_eq!(sink.visible[&ids[0]], false);
    assert_eq!(sink.visible[&ids[1]], true);
    assert_eq!(sink.visible[&ids[2]], false);
}

#[test]
fn test_show_all_restores_visibility() {
    let mut store = TripSummaryStore::new();
    let mut sink = RecordingSink::default();
    let ids = install(&mut store, &mut sink, 3);

    store.show_only(&mut sink, 2);
    store.show_all(&mut sink);

    for id in ids {
        assert_eq!(sink.visible[&id], true);
    }
}

#[test]
fn test_show_only_out_of_range_hides_all() {
    let mut store = TripSummaryStore::new();
    let mut sink = RecordingSink::default();
    let ids = install(&mut store, &mut sink, 2);

    store.show_only(&mut sink, 5);

    for id in ids {
        assert_eq!(sink.visible[&id], false);
    }
}

#[test]
fn test_clear_removes_everything() {
    let mut store = TripSummaryStore::new();
    let mut sink = RecordingSink::default();
    let ids = install(&mut store, &mut sink, 3);

    store.clear(&mut sink);

    assert!(store.is_empty());
    assert_eq!(sink.removed, ids);
    assert!(sink.visible.is_empty());
}

#[test]
fn test_replace_all_removes_prior_visuals() {
    let mut store = TripSummaryStore::new();
    let mut sink = RecordingSink::default();
    let first = install(&mut store, &mut sink, 2);
    let _second = install(&mut store, &mut sink, 1);

    assert_eq!(store.len(), 1);
    for id in first {
        assert!(sink.removed.contains(&id));
    }
}

#[test]
fn test_get_is_one_based() {
    let mut store = TripSummaryStore::new();
    let mut sink = RecordingSink::default();
    install(&mut store, &mut sink, 2);

    assert_eq!(store.get(1).map(|s| s.trip_number), Some(1));
    assert_eq!(store.get(2).map(|s| s.trip_number), Some(2));
    assert!(store.get(0).is_none());
    assert!(store.get(3).is_none());
}

#[test]
fn test_new_store_is_empty() {
    let store = TripSummaryStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert!(store.summaries().is_empty());
}
