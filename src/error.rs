// Copyright 2025 Lars Brubaker
// License: MIT
//
// Error type for the polygon containers and the clip entry points.
//
// The sweep itself never fails: every variant here is a precondition
// violation raised by a container or by operation-code parsing.

use thiserror::Error;

/// Result type for clipping operations.
pub type Result<T> = std::result::Result<T, ClipError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipError {
    /// A single-contour query was made on a polygon holding several contours.
    #[error("{operation} requires a polygon with at most one contour")]
    ComplexPolygon { operation: &'static str },

    /// Inner polygons cannot be added to a polygon that is itself a hole.
    #[error("cannot add inner polygons to a polygon flagged as a hole")]
    HoleComposition,

    /// A simple polygon holds exactly one contour.
    #[error("a simple polygon cannot hold a second contour")]
    SimplePolygonOverflow,

    /// An operation code that names no clip operation.
    #[error("unknown clip operation: {0:?}")]
    UnknownOperation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_violation() {
        let e = ClipError::ComplexPolygon { operation: "is_hole" };
        assert_eq!(e.to_string(), "is_hole requires a polygon with at most one contour");
        let e = ClipError::UnknownOperation("nand".into());
        assert_eq!(e.to_string(), "unknown clip operation: \"nand\"");
    }
}
