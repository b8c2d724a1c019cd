// Copyright 2025 Lars Brubaker
// License: MIT
//
// Per-edge sweep state and the constant tables that drive vertex
// classification at scan-beam boundaries and edge crossings.
//
// Bits are kept as u8 0/1 values so the quadrant formulas can mix XOR with
// AND/OR directly.

/// Index of the left side / the above-boundary slot.
pub const LEFT: usize = 0;
pub const RIGHT: usize = 1;
pub const ABOVE: usize = 0;
pub const BELOW: usize = 1;
/// Input polygon roles, used to index per-role arrays.
pub const CLIP: usize = 0;
pub const SUBJ: usize = 1;

/// Position of an active edge inside a bundle of coincident edges.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BundleState {
    #[default]
    Unbundled,
    /// Rightmost edge of a bundle; carries the bundle's flags.
    BundleHead,
    /// Absorbed into the next edge to the right.
    BundleTail,
}

/// Horizontal edge state of one input polygon while walking the AET.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum HState {
    #[default]
    NoHorizontal,
    BottomHorizontal,
    TopHorizontal,
}

use HState::{BottomHorizontal as BH, NoHorizontal as NH, TopHorizontal as TH};

// Columns: ABOVE L/R, BELOW L/R, CROSS L/R.
const NEXT_H_STATE: [[HState; 6]; 3] = [
    /* NH */ [BH, TH, TH, BH, NH, NH],
    /* BH */ [NH, NH, NH, NH, TH, TH],
    /* TH */ [NH, NH, NH, NH, BH, BH],
];

impl HState {
    /// Transition for an edge with the 2-bit `exists` code (ABOVE | BELOW<<1,
    /// nonzero) given the parity after the edge.
    #[inline]
    pub fn next(self, exists: u8, parity: u8) -> HState {
        debug_assert!((1..=3).contains(&exists) && parity <= 1);
        NEXT_H_STATE[self as usize][(((exists - 1) << 1) + parity) as usize]
    }

    #[inline]
    pub fn bit(self) -> u8 {
        (self != HState::NoHorizontal) as u8
    }
}

/// Topological role of an output vertex, from the occupancy of the four
/// quadrants around it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum VertexType {
    /// NUL: empty, non-intersection.
    Empty = 0,
    /// EMX: external maximum.
    ExternalMaximum,
    /// ELI: external left intermediate.
    ExternalLeftIntermediate,
    /// TED: top edge.
    TopEdge,
    /// ERI: external right intermediate.
    ExternalRightIntermediate,
    /// RED: right edge.
    RightEdge,
    /// IMM: internal maximum and minimum.
    InternalMaximumAndMinimum,
    /// IMN: internal minimum.
    InternalMinimum,
    /// EMN: external minimum.
    ExternalMinimum,
    /// EMM: external maximum and minimum.
    ExternalMaximumAndMinimum,
    /// LED: left edge.
    LeftEdge,
    /// ILI: internal left intermediate.
    InternalLeftIntermediate,
    /// BED: bottom edge.
    BottomEdge,
    /// IRI: internal right intermediate.
    InternalRightIntermediate,
    /// IMX: internal maximum.
    InternalMaximum,
    /// FUL: full, non-intersection.
    Full,
}

const VERTEX_TYPES: [VertexType; 16] = {
    use VertexType::*;
    [
        Empty,
        ExternalMaximum,
        ExternalLeftIntermediate,
        TopEdge,
        ExternalRightIntermediate,
        RightEdge,
        InternalMaximumAndMinimum,
        InternalMinimum,
        ExternalMinimum,
        ExternalMaximumAndMinimum,
        LeftEdge,
        InternalLeftIntermediate,
        BottomEdge,
        InternalRightIntermediate,
        InternalMaximum,
        Full,
    ]
};

impl VertexType {
    /// Classify from quadrant bits packed as `tr + tl*2 + br*4 + bl*8`.
    #[inline]
    pub fn classify(tr: u8, tl: u8, br: u8, bl: u8) -> VertexType {
        VERTEX_TYPES[(tr + (tl << 1) + (br << 2) + (bl << 3)) as usize]
    }
}
