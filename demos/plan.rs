//! Plan trips for a small demo scenario from the command line.
//!
//! Runs the planner over a handful of pickup points around a fixed depot,
//! printing the drawn routes and the per-trip report. Without a routing
//! service every trip uses the straight-line fallback.

use clap::Parser;

use trip_split::config::PlannerConfig;
use trip_split::oracle::HaversineEstimator;
use trip_split::problem::{coerce_capacity, Coordinate, DemandPoint, PlanRequest};
use trip_split::split::SplitPolicy;
use trip_split::store::{RouteSink, VisualHandle};
use trip_split::Planner;

#[derive(Parser)]
#[command(about = "Split demo pickups into capacity-bounded trips")]
struct Args {
    /// Vehicle capacity in units.
    #[arg(long, default_value_t = 15.0)]
    capacity: f64,

    /// Keep pickups in input order instead of greedy nearest-next.
    #[arg(long)]
    manual_order: bool,

    /// Print the summaries as JSON instead of the text report.
    #[arg(long)]
    json: bool,
}

/// Render sink that narrates draw calls to stdout.
struct ConsoleSink {
    next_id: u64,
}

impl RouteSink for ConsoleSink {
    fn draw(&mut self, path: &[Coordinate], color: &str) -> VisualHandle {
        self.next_id += 1;
        println!("drawing route {} ({} waypoints, {})", self.next_id, path.len(), color);
        VisualHandle(self.next_id)
    }

    fn set_visible(&mut self, handle: VisualHandle, visible: bool) {
        println!("route {} -> {}", handle.0, if visible { "shown" } else { "hidden" });
    }

    fn remove(&mut self, handle: VisualHandle) {
        println!("route {} removed", handle.0);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    // A depot in downtown San Francisco with pickups spread around it.
    let depot: Coordinate = "37.7793, -122.4193".parse()?;
    let points = vec![
        DemandPoint::new("Ferry Building", Coordinate::new(37.7956, -122.3936)?, 10),
        DemandPoint::new("Mission Dolores", Coordinate::new(37.7614, -122.4270)?, 10),
        DemandPoint::new("Golden Gate Park", Coordinate::new(37.7694, -122.4862)?, 10),
        DemandPoint::new("Coit Tower", Coordinate::new(37.8024, -122.4058)?, 5),
    ];

    let policy = if args.manual_order {
        SplitPolicy::FixedOrder
    } else {
        SplitPolicy::NearestNext
    };
    let request = PlanRequest::new(depot, coerce_capacity(args.capacity), points, policy);

    let mut planner = Planner::without_router(
        HaversineEstimator::default(),
        ConsoleSink { next_id: 0 },
        PlannerConfig::default(),
    );

    let report = planner.plan(&request)?;
    println!(
        "Trips: {} • Stops (with repeats across trips): {}",
        report.trips, report.stops_with_repeats
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(planner.store().summaries())?);
    } else {
        print!("{}", planner.report_text());
    }

    Ok(())
}
