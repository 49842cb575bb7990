//! Meter/degree conversion helpers.
//!
//! These back the metric buffering of bounding boxes: a buffer radius in
//! meters has to become a longitude delta and a latitude delta in degrees.
//! The conversions use a fixed equatorial constant and simple cosine
//! scaling — good enough for pruning, not an exact geodesic model.

/// Meters spanned by one degree of longitude at the equator.
pub const METERS_PER_DEGREE_AT_EQUATOR: f64 = 111_111.0;

/// Convert a metric distance to a latitude delta in degrees.
///
/// The conversion is scaled by `cos(latitude)`, so the same distance yields
/// a larger delta farther from the equator. Callers buffering a bounding
/// box must evaluate this at the corner farthest from the equator — the
/// more equatorward corner would under-buffer.
pub fn meters_to_latitude_degrees(meters: f64, latitude: f64) -> f64 {
    let meters_per_degree = METERS_PER_DEGREE_AT_EQUATOR * latitude.to_radians().cos();
    meters / meters_per_degree
}

/// Convert a metric distance to a longitude delta in degrees.
pub fn meters_to_longitude_degrees(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE_AT_EQUATOR
}

/// Convert a latitude delta in degrees back to meters at the given latitude.
pub fn latitude_degrees_to_meters(latitude_degrees: f64, latitude: f64) -> f64 {
    let meters_per_degree = METERS_PER_DEGREE_AT_EQUATOR * latitude.to_radians().cos();
    meters_per_degree * latitude_degrees
}

/// Convert a longitude delta in degrees back to meters.
pub fn longitude_degrees_to_meters(longitude_degrees: f64) -> f64 {
    METERS_PER_DEGREE_AT_EQUATOR * longitude_degrees
}
