//! Tests for units module

use nearline::units::*;

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

#[test]
fn test_meters_to_latitude_degrees_at_equator() {
    let degrees = meters_to_latitude_degrees(METERS_PER_DEGREE_AT_EQUATOR / 2.0, 0.0);
    assert!(approx_eq(degrees, 0.5, 0.00001));
}

#[test]
fn test_meters_to_latitude_degrees_at_60_degrees() {
    // cos(60°) = 0.5, so half the meters cover the same degrees
    let degrees = meters_to_latitude_degrees(METERS_PER_DEGREE_AT_EQUATOR / 4.0, 60.0);
    assert!(approx_eq(degrees, 0.5, 0.00001));
}

#[test]
fn test_latitude_degrees_to_meters_at_equator() {
    let meters = latitude_degrees_to_meters(0.5, 0.0);
    assert!(approx_eq(meters, METERS_PER_DEGREE_AT_EQUATOR / 2.0, 1.0));
}

#[test]
fn test_latitude_degrees_to_meters_at_60_degrees() {
    let meters = latitude_degrees_to_meters(0.5, 60.0);
    assert!(approx_eq(meters, METERS_PER_DEGREE_AT_EQUATOR / 4.0, 1.0));
}

#[test]
fn test_meters_to_longitude_degrees() {
    let degrees = meters_to_longitude_degrees(METERS_PER_DEGREE_AT_EQUATOR);
    assert!(approx_eq(degrees, 1.0, 0.00001));
}

#[test]
fn test_longitude_degrees_to_meters() {
    let meters = longitude_degrees_to_meters(1.0);
    assert!(approx_eq(meters, METERS_PER_DEGREE_AT_EQUATOR, 0.001));
}

#[test]
fn test_latitude_round_trip() {
    let meters = 1234.5;
    let degrees = meters_to_latitude_degrees(meters, 45.0);
    assert!(approx_eq(
        latitude_degrees_to_meters(degrees, 45.0),
        meters,
        0.001
    ));
}
