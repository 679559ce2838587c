//! Tests for the input data model: coordinates, parsing and coercion.

use trip_split::problem::{
    coerce_capacity, coerce_quantity, Coordinate, CoordinateError, DemandPoint, PlanRequest,
};
use trip_split::split::SplitPolicy;

#[test]
fn test_coordinate_range_checks() {
    assert!(Coordinate::new(45.0, 90.0).is_ok());
    assert!(Coordinate::new(-90.0, 180.0).is_ok());

    assert_eq!(
        Coordinate::new(91.0, 0.0),
        Err(CoordinateError::LatitudeOutOfRange(91.0))
    );
    assert_eq!(
        Coordinate::new(0.0, -180.5),
        Err(CoordinateError::LongitudeOutOfRange(-180.5))
    );
    assert!(Coordinate::new(f64::NAN, 0.0).is_err());
}

#[test]
fn test_parse_lat_lng_text() {
    let c: Coordinate = "37.7793, -122.4193".parse().expect("parses");
    assert!((c.lat - 37.7793).abs() < 1e-9);
    assert!((c.lng + 122.4193).abs() < 1e-9);

    // Whitespace-tolerant.
    let c: Coordinate = "  1 ,  2  ".parse().expect("parses");
    assert_eq!((c.lat, c.lng), (1.0, 2.0));
}

#[test]
fn test_parse_rejects_garbage() {
    assert_eq!(
        "somewhere".parse::<Coordinate>(),
        Err(CoordinateError::Unparseable)
    );
    assert_eq!("1".parse::<Coordinate>(), Err(CoordinateError::Unparseable));
    assert_eq!(
        "1, 2, 3".parse::<Coordinate>(),
        Err(CoordinateError::Unparseable)
    );
    assert_eq!(
        "abc, def".parse::<Coordinate>(),
        Err(CoordinateError::Unparseable)
    );
}

#[test]
fn test_parse_rejects_out_of_range() {
    assert_eq!(
        "91, 0".parse::<Coordinate>(),
        Err(CoordinateError::LatitudeOutOfRange(91.0))
    );
}

#[test]
fn test_display_matches_input_form() {
    let c = Coordinate::new(37.5, -122.25).expect("valid");
    assert_eq!(c.to_string(), "37.500000, -122.250000");
}

#[test]
fn test_distance_to_self_is_zero() {
    let c = Coordinate::new(36.1, -115.1).expect("valid");
    assert!(c.distance_to(&c) < 1e-6);
}

#[test]
fn test_coerce_capacity() {
    assert_eq!(coerce_capacity(15.0), 15);
    assert_eq!(coerce_capacity(7.9), 7);
    assert_eq!(coerce_capacity(0.0), 1);
    assert_eq!(coerce_capacity(-5.0), 1);
    assert_eq!(coerce_capacity(f64::NAN), 1);
    assert_eq!(coerce_capacity(f64::INFINITY), 1);
}

#[test]
fn test_coerce_quantity() {
    assert_eq!(coerce_quantity(10.0), 10);
    assert_eq!(coerce_quantity(3.7), 3);
    assert_eq!(coerce_quantity(-2.5), 0);
    assert_eq!(coerce_quantity(f64::NAN), 0);
}

#[test]
fn test_plan_request_clamps_capacity() {
    let depot = Coordinate::new(0.0, 0.0).expect("valid");
    let points = vec![DemandPoint::new("A", depot, 5)];

    let request = PlanRequest::new(depot, 0, points, SplitPolicy::FixedOrder);
    assert_eq!(request.capacity, 1);
}
