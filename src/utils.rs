//! Display formatting and plain-text reporting for trip summaries.

use crate::summary::TripSummary;

/// Meters per statute mile.
pub const METERS_PER_MILE: f64 = 1609.34;

/// Format a distance in meters as miles with one decimal, e.g. "3.2 mi".
pub fn format_miles(meters: f64) -> String {
    format!("{:.1} mi", meters / METERS_PER_MILE)
}

/// Format a duration in seconds as whole minutes, e.g. "12 min".
pub fn format_minutes(seconds: f64) -> String {
    format!("{} min", (seconds / 60.0).round() as i64)
}

/// Render ordered summaries as the human-readable route report.
///
/// One block per trip: a header with the totals, a line per stop, and the
/// return-to-depot line.
pub fn write_report(summaries: &[TripSummary]) -> String {
    let mut out = String::new();

    for summary in summaries {
        out.push_str(&format!(
            "Trip {} — {} • {}\n",
            summary.trip_number,
            format_miles(summary.total_meters),
            format_minutes(summary.total_seconds),
        ));

        for stop in &summary.stops {
            out.push_str(&format!(
                "  {} — {} • {}\n",
                stop.name, stop.distance_text, stop.duration_text,
            ));
        }

        out.push_str(&format!(
            "  Return to depot — {} • {}\n",
            summary.return_distance_text, summary.return_duration_text,
        ));
    }

    out
}
