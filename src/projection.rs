//! Closest-point-on-path geometry primitive.
//!
//! The index core never computes exact distances itself; it asks an
//! injected [`PathProjector`] for the closest point on a sub-polyline and
//! the metric distance to it. [`GeoProjector`] is the stock implementation
//! built on the `geo` crate; tests inject fakes to exercise the resolver
//! contract in isolation.

use geo::{Closest, ClosestPoint, Coord, HaversineDistance, Line, Point};

use crate::error::{NearlineError, Result};
use crate::GpsPoint;

/// The closest point on a path to some query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathProjection {
    /// The closest point on the path.
    pub point: GpsPoint,
    /// Distance from the query point to `point`, in meters.
    pub distance_m: f64,
    /// Index of the segment containing `point`, local to the projected path.
    pub segment_offset: usize,
}

/// Capability to project a query point onto a polyline.
///
/// Implementations must be deterministic and must pick the first closest
/// point when ties occur. Distances are meters, always — this crate never
/// mixes units across the projector boundary.
pub trait PathProjector {
    /// Closest point on `path` (≥2 points) to `query_pt`.
    ///
    /// Returns [`NearlineError::InvalidPathInput`] for a path with fewer
    /// than 2 points.
    fn project(&self, path: &[GpsPoint], query_pt: &GpsPoint) -> Result<PathProjection>;
}

/// Stock projector backed by the `geo` crate.
///
/// Finds the planar closest point on each segment, measures the haversine
/// distance to it, and keeps the strict minimum so that the first closest
/// segment wins ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoProjector;

impl PathProjector for GeoProjector {
    fn project(&self, path: &[GpsPoint], query_pt: &GpsPoint) -> Result<PathProjection> {
        if path.len() < 2 {
            return Err(NearlineError::InvalidPathInput {
                point_count: path.len(),
                minimum_required: 2,
            });
        }
        let query = Point::new(query_pt.longitude, query_pt.latitude);
        let mut best: Option<PathProjection> = None;
        for (segment_offset, pair) in path.windows(2).enumerate() {
            let line = Line::new(to_coord(&pair[0]), to_coord(&pair[1]));
            let closest = match line.closest_point(&query) {
                Closest::Intersection(pt) | Closest::SinglePoint(pt) => pt,
                // Degenerate segment; either endpoint is as close as any.
                Closest::Indeterminate => Point::new(pair[0].longitude, pair[0].latitude),
            };
            let distance_m = query.haversine_distance(&closest);
            if best.as_ref().map_or(true, |b| distance_m < b.distance_m) {
                best = Some(PathProjection {
                    point: GpsPoint::new(closest.y(), closest.x()),
                    distance_m,
                    segment_offset,
                });
            }
        }
        // A path of >=2 points always has at least one segment.
        best.ok_or(NearlineError::InvalidPathInput {
            point_count: path.len(),
            minimum_required: 2,
        })
    }
}

fn to_coord(pt: &GpsPoint) -> Coord {
    Coord {
        x: pt.longitude,
        y: pt.latitude,
    }
}
