//! Tests for index build and traversal

use nearline::{
    BoundingBox, GpsPoint, IndexNode, NearlineError, SegmentRange, SpatialIndex,
    DEFAULT_MAX_UNINDEXED_LENGTH,
};

fn bbox(min_lng: f64, min_lat: f64, max_lng: f64, max_lat: f64) -> BoundingBox {
    BoundingBox {
        min_lng,
        min_lat,
        max_lng,
        max_lat,
    }
}

fn sample_path() -> Vec<GpsPoint> {
    vec![
        GpsPoint::new(0.0, 0.0),
        GpsPoint::new(0.0, 1.0),
        GpsPoint::new(0.0, 2.0),
        GpsPoint::new(1.0, 3.0),
        GpsPoint::new(1.0, 4.0),
    ]
}

/// Two same-size quadrants, head upper left, tail lower right.
fn quadrant_index() -> IndexNode {
    IndexNode::Internal {
        bbox: bbox(-10.0, -10.0, 10.0, 10.0),
        start: 0,
        end: 100,
        head: Box::new(IndexNode::Leaf {
            bbox: bbox(-10.0, 0.0, 0.0, 10.0),
            start: 0,
            end: 50,
        }),
        tail: Box::new(IndexNode::Leaf {
            bbox: bbox(0.0, -10.0, 10.0, 0.0),
            start: 51,
            end: 100,
        }),
    }
}

#[test]
fn test_short_path_builds_a_single_leaf() {
    let index = SpatialIndex::build(&sample_path(), DEFAULT_MAX_UNINDEXED_LENGTH).unwrap();
    assert_eq!(index.segment_count(), 4);
    assert_eq!(
        *index.root(),
        IndexNode::Leaf {
            bbox: bbox(0.0, 0.0, 4.0, 1.0),
            start: 0,
            end: 3,
        }
    );
}

#[test]
fn test_long_path_splits_at_midpoint() {
    let index = SpatialIndex::build(&sample_path(), 2).unwrap();
    assert_eq!(
        *index.root(),
        IndexNode::Internal {
            bbox: bbox(0.0, 0.0, 4.0, 1.0),
            start: 0,
            end: 3,
            head: Box::new(IndexNode::Leaf {
                bbox: bbox(0.0, 0.0, 2.0, 0.0),
                start: 0,
                end: 1,
            }),
            tail: Box::new(IndexNode::Leaf {
                bbox: bbox(2.0, 0.0, 4.0, 1.0),
                start: 2,
                end: 3,
            }),
        }
    );
}

#[test]
fn test_build_fails_with_fewer_than_two_points() {
    let one = vec![GpsPoint::new(0.0, 0.0)];
    assert_eq!(
        SpatialIndex::build(&one, DEFAULT_MAX_UNINDEXED_LENGTH),
        Err(NearlineError::InvalidPathInput {
            point_count: 1,
            minimum_required: 2,
        })
    );
    assert!(SpatialIndex::build(&[], DEFAULT_MAX_UNINDEXED_LENGTH).is_err());
}

#[test]
fn test_build_range_sub_range() {
    let index = SpatialIndex::build_range(&sample_path(), DEFAULT_MAX_UNINDEXED_LENGTH, 1, 2)
        .unwrap();
    assert_eq!(index.segment_count(), 2);
    // Segments [1, 2] touch points 1..=3
    assert_eq!(
        *index.root(),
        IndexNode::Leaf {
            bbox: bbox(1.0, 0.0, 3.0, 1.0),
            start: 1,
            end: 2,
        }
    );
}

#[test]
fn test_build_range_rejects_bad_bounds() {
    let path = sample_path();
    assert!(SpatialIndex::build_range(&path, 32, 2, 1).is_err());
    assert!(SpatialIndex::build_range(&path, 32, 0, 4).is_err());
}

#[test]
fn test_leaf_ranges_partition_the_root_range() {
    let path: Vec<GpsPoint> = (0..200)
        .map(|i| GpsPoint::new((i % 7) as f64 * 0.01, i as f64 * 0.001))
        .collect();
    let index = SpatialIndex::build(&path, 8).unwrap();

    let leaves = index.root().leaf_ranges();
    assert!(!leaves.is_empty());
    assert_eq!(leaves[0].start, 0);
    assert_eq!(leaves.last().unwrap().end, 198);
    for pair in leaves.windows(2) {
        // Contiguous, no gaps or overlaps
        assert_eq!(pair[1].start, pair[0].end + 1);
    }
}

#[test]
fn test_build_is_deterministic() {
    let path: Vec<GpsPoint> = (0..100)
        .map(|i| GpsPoint::new(51.5 + i as f64 * 0.0001, -0.12 + i as f64 * 0.0002))
        .collect();
    let a = SpatialIndex::build(&path, 4).unwrap();
    let b = SpatialIndex::build(&path, 4).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_find_ranges_prunes_outside_point() {
    let index = quadrant_index();
    assert_eq!(index.find_ranges(&GpsPoint::new(11.0, 0.0), 0.0), None);
}

#[test]
fn test_find_ranges_matches_head_only() {
    let index = quadrant_index();
    let ranges = index.find_ranges(&GpsPoint::new(5.0, -5.0), 0.0);
    assert_eq!(ranges, Some(vec![SegmentRange { start: 0, end: 50 }]));
}

#[test]
fn test_find_ranges_matches_tail_only() {
    let index = quadrant_index();
    let ranges = index.find_ranges(&GpsPoint::new(-5.0, 5.0), 0.0);
    assert_eq!(ranges, Some(vec![SegmentRange { start: 51, end: 100 }]));
}

#[test]
fn test_find_ranges_absent_when_both_children_prune() {
    // The lower-left quadrant is inside the root box but in neither child
    let index = quadrant_index();
    assert_eq!(index.find_ranges(&GpsPoint::new(-5.0, -5.0), 0.0), None);
}

#[test]
fn test_find_ranges_buffered_boundary_within_distance() {
    // Just outside the head's top-left corner, within 150 m
    let index = quadrant_index();
    let ranges = index.find_ranges(&GpsPoint::new(10.001, -10.001), 150.0);
    assert_eq!(ranges, Some(vec![SegmentRange { start: 0, end: 50 }]));
}

#[test]
fn test_find_ranges_buffered_boundary_outside_distance() {
    let index = quadrant_index();
    assert_eq!(index.find_ranges(&GpsPoint::new(10.001, -10.001), 80.0), None);
}

#[test]
fn test_find_ranges_buffered_tail_boundary() {
    let index = quadrant_index();
    let ranges = index.find_ranges(&GpsPoint::new(0.0, 10.001), 120.0);
    assert_eq!(ranges, Some(vec![SegmentRange { start: 51, end: 100 }]));
    assert_eq!(index.find_ranges(&GpsPoint::new(0.0, 10.001), 80.0), None);
}

#[test]
fn test_spatial_index_find_ranges_end_to_end() {
    let index = SpatialIndex::build(&sample_path(), 2).unwrap();

    // On the head's segments
    let ranges = index.find_ranges(&GpsPoint::new(0.0, 1.0), None);
    assert_eq!(ranges, Some(vec![SegmentRange { start: 0, end: 1 }]));

    // Far away, no buffer
    assert_eq!(index.find_ranges(&GpsPoint::new(20.0, 20.0), None), None);

    // Head-then-tail order when both match
    let ranges = index.find_ranges(&GpsPoint::new(0.0, 2.0), Some(200.0));
    assert_eq!(
        ranges,
        Some(vec![
            SegmentRange { start: 0, end: 1 },
            SegmentRange { start: 2, end: 3 },
        ])
    );
}
