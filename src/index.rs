//! Hierarchical bounding-box index over a polyline's segments.
//!
//! The index is a near-balanced binary tree built once from a polyline and
//! read-only thereafter. Each node covers a contiguous, inclusive segment
//! range `[start, end]`; leaves store the bounding box of all points the
//! range touches, internal nodes store the union of their children's boxes.
//! Queries walk the tree, pruning subtrees whose (optionally buffered) box
//! cannot contain a match.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::bbox::{BboxAccumulator, BoundingBox};
use crate::error::{NearlineError, Result};
use crate::{GpsPoint, SegmentRange};

/// Default number of segments a leaf may cover before it is split.
///
/// Trades leaf-scan cost against tree-descent cost.
pub const DEFAULT_MAX_UNINDEXED_LENGTH: usize = 32;

/// A node of the spatial index tree.
///
/// The two variants make the "head without tail" state of loosely typed
/// index representations unrepresentable: an internal node always has
/// exactly two children whose ranges are contiguous, non-overlapping, and
/// together equal the parent's range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IndexNode {
    /// An unsplit run of segments indexed by a single bounding box.
    Leaf {
        bbox: BoundingBox,
        start: usize,
        end: usize,
    },
    /// A split range: `head` covers `[start, mid]`, `tail` covers
    /// `[mid + 1, end]`, and `bbox` is the union of their boxes.
    Internal {
        bbox: BoundingBox,
        start: usize,
        end: usize,
        head: Box<IndexNode>,
        tail: Box<IndexNode>,
    },
}

impl IndexNode {
    /// Bounding box of every point touched by this node's range.
    pub fn bbox(&self) -> &BoundingBox {
        match self {
            Self::Leaf { bbox, .. } | Self::Internal { bbox, .. } => bbox,
        }
    }

    /// First segment index covered by this node.
    pub fn start(&self) -> usize {
        match self {
            Self::Leaf { start, .. } | Self::Internal { start, .. } => *start,
        }
    }

    /// Last segment index covered by this node (inclusive).
    pub fn end(&self) -> usize {
        match self {
            Self::Leaf { end, .. } | Self::Internal { end, .. } => *end,
        }
    }

    /// The inclusive segment range covered by this node.
    pub fn range(&self) -> SegmentRange {
        SegmentRange {
            start: self.start(),
            end: self.end(),
        }
    }

    /// Candidate segment ranges whose bounding box admits the query point.
    ///
    /// Returns `None` when this subtree is pruned — distinctly from
    /// `Some(vec![])`, which never occurs: a match always carries at least
    /// one range. At internal nodes the children are queried recursively
    /// and present results concatenated in head-then-tail order; when both
    /// children prune, the node prunes too, which can happen even after
    /// the node's own box test passed because the buffer delta differs
    /// per box.
    ///
    /// The box test is conservative: buffering over-approximates, so a
    /// returned range may contain no segment that is geometrically close.
    /// Exact filtering is the resolver's job.
    pub fn find_ranges(
        &self,
        query_pt: &GpsPoint,
        query_distance: f64,
    ) -> Option<Vec<SegmentRange>> {
        if !self.bbox().intersects_point(query_pt, query_distance) {
            return None;
        }
        match self {
            Self::Leaf { .. } => Some(vec![self.range()]),
            Self::Internal { head, tail, .. } => {
                let head_ranges = head.find_ranges(query_pt, query_distance);
                let tail_ranges = tail.find_ranges(query_pt, query_distance);
                match (head_ranges, tail_ranges) {
                    (None, None) => None,
                    (Some(ranges), None) | (None, Some(ranges)) => Some(ranges),
                    (Some(mut ranges), Some(tail_ranges)) => {
                        ranges.extend(tail_ranges);
                        Some(ranges)
                    }
                }
            }
        }
    }

    /// Leaf ranges of this subtree in left-to-right order.
    ///
    /// For any well-formed tree these form an exact partition of the root's
    /// range: no gaps, no overlaps, no repeats.
    pub fn leaf_ranges(&self) -> Vec<SegmentRange> {
        let mut ranges = Vec::new();
        self.collect_leaf_ranges(&mut ranges);
        ranges
    }

    fn collect_leaf_ranges(&self, out: &mut Vec<SegmentRange>) {
        match self {
            Self::Leaf { .. } => out.push(self.range()),
            Self::Internal { head, tail, .. } => {
                head.collect_leaf_ranges(out);
                tail.collect_leaf_ranges(out);
            }
        }
    }
}

/// A spatial index over one polyline, built once and read-only thereafter.
///
/// The tree stores bounding-box corners and segment indices into the
/// original polyline, never copies of its coordinates. The polyline is
/// logically frozen for the tree's lifetime: queries take `&self` and may
/// run concurrently from multiple threads without synchronization, but the
/// results are only meaningful against the unmutated point sequence the
/// index was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialIndex {
    root: IndexNode,
    segment_count: usize,
}

impl SpatialIndex {
    /// Build an index over every segment of `points`.
    ///
    /// Returns [`NearlineError::InvalidPathInput`] when `points` has fewer
    /// than 2 points (zero segments).
    pub fn build(points: &[GpsPoint], max_unindexed_length: usize) -> Result<Self> {
        if points.len() < 2 {
            return Err(NearlineError::InvalidPathInput {
                point_count: points.len(),
                minimum_required: 2,
            });
        }
        Self::build_range(points, max_unindexed_length, 0, points.len() - 2)
    }

    /// Build an index over the segment sub-range `[start, end]` of `points`.
    pub fn build_range(
        points: &[GpsPoint],
        max_unindexed_length: usize,
        start: usize,
        end: usize,
    ) -> Result<Self> {
        if points.len() < 2 || start > end || end > points.len() - 2 {
            return Err(NearlineError::InvalidPathInput {
                point_count: points.len(),
                minimum_required: end + 2,
            });
        }
        let root = build_node(points, max_unindexed_length.max(1), start, end);
        let segment_count = end - start + 1;
        debug!(
            "built spatial index over {} segments (max unindexed length {})",
            segment_count, max_unindexed_length
        );
        Ok(Self {
            root,
            segment_count,
        })
    }

    /// The root node of the tree.
    pub fn root(&self) -> &IndexNode {
        &self.root
    }

    /// Number of segments covered by the index.
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Candidate segment ranges near a query point.
    ///
    /// With a `query_distance` (meters), each node's box is buffered by
    /// that radius before the overlap test; without one, the raw boxes are
    /// tested. `None` means the whole tree was pruned.
    pub fn find_ranges(
        &self,
        query_pt: &GpsPoint,
        query_distance: Option<f64>,
    ) -> Option<Vec<SegmentRange>> {
        self.root.find_ranges(query_pt, query_distance.unwrap_or(0.0))
    }
}

/// Recursive midpoint split. Ranges shorter than `max_unindexed_length`
/// become leaves scanned point by point; longer ranges split at
/// `floor((start + end) / 2)`.
fn build_node(
    points: &[GpsPoint],
    max_unindexed_length: usize,
    start: usize,
    end: usize,
) -> IndexNode {
    if end - start >= max_unindexed_length {
        let mid = (start + end) / 2;
        let head = build_node(points, max_unindexed_length, start, mid);
        let tail = build_node(points, max_unindexed_length, mid + 1, end);
        IndexNode::Internal {
            bbox: head.bbox().union(tail.bbox()),
            start,
            end,
            head: Box::new(head),
            tail: Box::new(tail),
        }
    } else {
        // Segment range [start, end] touches points start..=end + 1.
        let mut acc = BboxAccumulator::new(&points[start]);
        for pt in &points[start + 1..=end + 1] {
            acc.extend(pt);
        }
        IndexNode::Leaf {
            bbox: acc.finish(),
            start,
            end,
        }
    }
}
