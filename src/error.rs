//! Unified error handling for the nearline library.
//!
//! All errors are caller-input errors: they are detected eagerly and
//! surfaced immediately. There is no retry concept — every operation in
//! this crate is deterministic, synchronous computation, so any failure
//! is a programming or input error, never a transient condition. Nothing
//! is logged or swallowed internally; reporting is the caller's
//! responsibility.

use thiserror::Error;

/// Errors produced by index construction and queries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NearlineError {
    /// A bounding box was requested from an empty point sequence.
    #[error("cannot build a bounding box from an empty point sequence")]
    InvalidBoundingBoxInput,

    /// A path with too few points was supplied. A polyline needs at least
    /// 2 points to have a segment.
    #[error("path has {point_count} points, but at least {minimum_required} are required")]
    InvalidPathInput {
        point_count: usize,
        minimum_required: usize,
    },

    /// A flat coordinate buffer did not decode to lat/lng pairs.
    #[error("flat coordinate buffer of length {len} does not decode to lat/lng pairs")]
    UnsupportedQueryShape { len: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NearlineError>;
