//! Exact close-segment resolution over index query candidates.
//!
//! This is the verify half of the prune-then-verify design: the index
//! admits candidate segment ranges cheaply, then each candidate's
//! sub-polyline is handed to the [`PathProjector`] for an exact
//! closest-point distance and filtered against the requested threshold.

use log::trace;

use crate::error::{NearlineError, Result};
use crate::index::SpatialIndex;
use crate::projection::PathProjector;
use crate::{CloseSegment, GpsPoint};

/// Find segments of `path` passing within `query_distance` meters of
/// `query_pt`, using `index` to prune and `projector` to verify.
///
/// `index` must have been built from this same `path`. Each candidate
/// range contributes at most one [`CloseSegment`] (the projector returns
/// the single globally closest point on the range's sub-polyline), and
/// results keep the index's head-then-tail range order — no deduplication
/// or sorting is applied. Without a `query_distance`, every candidate
/// range's closest point is returned unfiltered.
pub fn find_close_segments<P: PathProjector>(
    path: &[GpsPoint],
    index: &SpatialIndex,
    query_pt: &GpsPoint,
    query_distance: Option<f64>,
    projector: &P,
) -> Result<Vec<CloseSegment>> {
    if path.len() < 2 {
        return Err(NearlineError::InvalidPathInput {
            point_count: path.len(),
            minimum_required: 2,
        });
    }

    let mut close_segments = Vec::new();
    let Some(ranges) = index.find_ranges(query_pt, query_distance) else {
        trace!("query pruned at the root, no candidate ranges");
        return Ok(close_segments);
    };

    for range in &ranges {
        // Segment range [start, end] spans points start..=end + 1.
        let coords = path.get(range.start..=range.end + 1).ok_or(
            NearlineError::InvalidPathInput {
                point_count: path.len(),
                minimum_required: range.end + 2,
            },
        )?;
        let projection = projector.project(coords, query_pt)?;
        if query_distance.map_or(true, |limit| projection.distance_m <= limit) {
            close_segments.push(CloseSegment {
                segment_index: range.start + projection.segment_offset,
                distance_to_path: projection.distance_m,
                point_on_segment: projection.point,
            });
        }
    }

    trace!(
        "resolved {} close segments from {} candidate ranges",
        close_segments.len(),
        ranges.len()
    );
    Ok(close_segments)
}

/// Resolve many query points against one index in parallel.
///
/// Legal without synchronization because the tree is immutable once built;
/// the polyline must not be mutated while queries run.
#[cfg(feature = "parallel")]
pub fn find_close_segments_batch<P: PathProjector + Sync>(
    path: &[GpsPoint],
    index: &SpatialIndex,
    query_pts: &[GpsPoint],
    query_distance: Option<f64>,
    projector: &P,
) -> Result<Vec<Vec<CloseSegment>>> {
    use rayon::prelude::*;

    query_pts
        .par_iter()
        .map(|query_pt| find_close_segments(path, index, query_pt, query_distance, projector))
        .collect()
}
