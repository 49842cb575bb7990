//! # Nearline
//!
//! Fast "which segments of this polyline pass near point P?" queries for
//! GPS tracks.
//!
//! This library provides:
//! - A hierarchical bounding-box index over a polyline's segments
//! - Prune-then-verify close-segment queries with a metric distance threshold
//! - Metric bounding-box buffering with latitude-aware degree conversion
//! - A pluggable closest-point geometry primitive (stock impl on `geo`)
//!
//! ## Features
//!
//! - **`parallel`** - Batch queries across many points with rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use nearline::{find_close_segments, GeoProjector, GpsPoint, SpatialIndex};
//!
//! let path = vec![
//!     GpsPoint::new(0.0, 0.0),
//!     GpsPoint::new(0.0, 1.0),
//!     GpsPoint::new(0.0, 2.0),
//! ];
//!
//! let index = SpatialIndex::build(&path, 32).unwrap();
//!
//! // ~111 m north of the first segment's midpoint
//! let query = GpsPoint::new(0.001, 0.5);
//! let close = find_close_segments(&path, &index, &query, Some(200.0), &GeoProjector).unwrap();
//!
//! assert_eq!(close.len(), 1);
//! assert_eq!(close[0].segment_index, 0);
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{NearlineError, Result};

// Meter/degree conversion helpers
pub mod units;
pub use units::METERS_PER_DEGREE_AT_EQUATOR;

// Bounding-box arithmetic (union, metric buffering, intersection)
pub mod bbox;
pub use bbox::{BboxAccumulator, BoundingBox};

// Hierarchical segment index (build + pruned traversal)
pub mod index;
pub use index::{IndexNode, SpatialIndex, DEFAULT_MAX_UNINDEXED_LENGTH};

// Closest-point geometry primitive
pub mod projection;
pub use projection::{GeoProjector, PathProjection, PathProjector};

// Exact close-segment resolution
pub mod resolve;
#[cfg(feature = "parallel")]
pub use resolve::find_close_segments_batch;
pub use resolve::find_close_segments;

// ============================================================================
// Core Types
// ============================================================================

/// A GPS coordinate with latitude and longitude.
///
/// # Example
/// ```
/// use nearline::GpsPoint;
/// let point = GpsPoint::new(51.5074, -0.1278); // London
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsPoint {
    /// Create a new GPS point.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// A contiguous, inclusive range of segment indices on one polyline.
///
/// Segment `i` is the edge between points `i` and `i + 1`, so a range
/// `[start, end]` touches points `start..=end + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentRange {
    pub start: usize,
    pub end: usize,
}

/// One segment matched by a close-segment query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CloseSegment {
    /// Index of the matched segment in the original polyline.
    pub segment_index: usize,
    /// Distance from the query point to the path, in meters.
    pub distance_to_path: f64,
    /// The closest point on the matched segment.
    pub point_on_segment: GpsPoint,
}

// ============================================================================
// Flat-Buffer Input
// ============================================================================

/// Decode a flat `[lat, lng, lat, lng, ...]` buffer into GPS points.
///
/// This is the most efficient way to hand a polyline across an FFI
/// boundary. An odd-length buffer fails with
/// [`NearlineError::UnsupportedQueryShape`].
pub fn points_from_flat(flat_coords: &[f64]) -> Result<Vec<GpsPoint>> {
    if flat_coords.len() % 2 != 0 {
        return Err(NearlineError::UnsupportedQueryShape {
            len: flat_coords.len(),
        });
    }
    Ok(flat_coords
        .chunks_exact(2)
        .map(|chunk| GpsPoint::new(chunk[0], chunk[1]))
        .collect())
}

/// Decode a single `[lat, lng]` query point from a flat buffer.
///
/// Anything but exactly one pair fails with
/// [`NearlineError::UnsupportedQueryShape`].
pub fn point_from_flat(flat_coords: &[f64]) -> Result<GpsPoint> {
    match flat_coords {
        [lat, lng] => Ok(GpsPoint::new(*lat, *lng)),
        _ => Err(NearlineError::UnsupportedQueryShape {
            len: flat_coords.len(),
        }),
    }
}
