//! Axis-aligned geographic bounding boxes.
//!
//! Boxes use simple planar math and do not account for crossing the 180th
//! meridian. The field convention throughout the crate is named min/max
//! pairs with x = longitude and y = latitude.

use serde::{Deserialize, Serialize};

use crate::error::{NearlineError, Result};
use crate::units::{meters_to_latitude_degrees, meters_to_longitude_degrees};
use crate::GpsPoint;

/// An immutable axis-aligned bounding box over GPS coordinates.
///
/// Invariant: `min_lng <= max_lng` and `min_lat <= max_lat`. Every
/// operation that grows a box takes component-wise min/max rather than
/// assigning raw values, so the invariant holds for any box produced by
/// this crate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Degenerate box at a single point (`min == max` on both axes).
    pub fn from_point(pt: &GpsPoint) -> Self {
        Self {
            min_lng: pt.longitude,
            min_lat: pt.latitude,
            max_lng: pt.longitude,
            max_lat: pt.latitude,
        }
    }

    /// Degenerate box at a point, buffered outward by a metric radius.
    ///
    /// A zero or negative `buffer_meters` yields the unbuffered box.
    pub fn from_point_buffered(pt: &GpsPoint, buffer_meters: f64) -> Self {
        let bbox = Self::from_point(pt);
        if buffer_meters > 0.0 {
            bbox.buffered(buffer_meters)
        } else {
            bbox
        }
    }

    /// Box of the first point, extended by the rest.
    ///
    /// Returns [`NearlineError::InvalidBoundingBoxInput`] for an empty slice.
    pub fn from_points(points: &[GpsPoint]) -> Result<Self> {
        let (first, rest) = points
            .split_first()
            .ok_or(NearlineError::InvalidBoundingBoxInput)?;
        let mut acc = BboxAccumulator::new(first);
        for pt in rest {
            acc.extend(pt);
        }
        Ok(acc.finish())
    }

    /// Smallest box containing both `self` and `other`.
    ///
    /// Commutative, associative, and idempotent.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min_lng: self.min_lng.min(other.min_lng),
            min_lat: self.min_lat.min(other.min_lat),
            max_lng: self.max_lng.max(other.max_lng),
            max_lat: self.max_lat.max(other.max_lat),
        }
    }

    /// Buffer the box outward by a metric radius.
    ///
    /// The longitude bounds grow by a fixed equatorial delta; the latitude
    /// bounds grow by a cos-scaled delta evaluated at the corner farthest
    /// from the equator. This over-approximates the true metric buffer,
    /// which is what pruning needs: the buffered intersection test must
    /// never reject a true match, and may admit false positives that the
    /// exact distance check filters out later.
    pub fn buffered(&self, meters: f64) -> Self {
        let farthest_latitude = self.min_lat.abs().max(self.max_lat.abs());
        let delta_lat = meters_to_latitude_degrees(meters, farthest_latitude);
        let delta_lng = meters_to_longitude_degrees(meters);
        Self {
            min_lng: self.min_lng - delta_lng,
            min_lat: self.min_lat - delta_lat,
            max_lng: self.max_lng + delta_lng,
            max_lat: self.max_lat + delta_lat,
        }
    }

    /// Axis-aligned overlap test, optionally buffered.
    ///
    /// With `buffer_meters > 0` the test runs against `self` buffered by
    /// that radius. Boxes that merely touch count as intersecting.
    pub fn intersects(&self, other: &Self, buffer_meters: f64) -> bool {
        if buffer_meters > 0.0 {
            return self.buffered(buffer_meters).intersects(other, 0.0);
        }
        let overlaps_longitude = self.max_lng >= other.min_lng && self.min_lng <= other.max_lng;
        if !overlaps_longitude {
            return false;
        }
        self.max_lat >= other.min_lat && self.min_lat <= other.max_lat
    }

    /// Overlap test against a single point, treated as a degenerate box.
    pub fn intersects_point(&self, pt: &GpsPoint, buffer_meters: f64) -> bool {
        self.intersects(&Self::from_point(pt), buffer_meters)
    }

    /// Whether `other` lies entirely within `self`.
    pub fn contains(&self, other: &Self) -> bool {
        self.min_lng <= other.min_lng
            && self.min_lat <= other.min_lat
            && self.max_lng >= other.max_lng
            && self.max_lat >= other.max_lat
    }
}

/// Mutable bounds accumulator used while scanning points.
///
/// Used during index construction only; the finished [`BoundingBox`]
/// handed out by the tree is immutable.
#[derive(Debug)]
pub struct BboxAccumulator {
    min_lng: f64,
    min_lat: f64,
    max_lng: f64,
    max_lat: f64,
}

impl BboxAccumulator {
    /// Start accumulating from a single point.
    pub fn new(pt: &GpsPoint) -> Self {
        Self {
            min_lng: pt.longitude,
            min_lat: pt.latitude,
            max_lng: pt.longitude,
            max_lat: pt.latitude,
        }
    }

    /// Grow the bounds to include another point.
    pub fn extend(&mut self, pt: &GpsPoint) {
        self.min_lng = self.min_lng.min(pt.longitude);
        self.min_lat = self.min_lat.min(pt.latitude);
        self.max_lng = self.max_lng.max(pt.longitude);
        self.max_lat = self.max_lat.max(pt.latitude);
    }

    /// Finish accumulation, producing the immutable box.
    pub fn finish(self) -> BoundingBox {
        BoundingBox {
            min_lng: self.min_lng,
            min_lat: self.min_lat,
            max_lng: self.max_lng,
            max_lat: self.max_lat,
        }
    }
}
