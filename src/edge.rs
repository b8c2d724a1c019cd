// Copyright 2025 Lars Brubaker
// License: MIT
//
// Edge table and local minimum table (LMT).
//
// Every contour is reduced to its "optimal" vertices, then cut into bounds:
// monotone chains of edges rising from a local minimum to the next local
// maximum, once walking the contour forward and once walking it backward.
// Each bound is a run of consecutive edges in the arena linked by succ/pred,
// and its first edge is threaded into the LMT bucket for its bottom y.
//
// All pointers are u32 indices into `EdgeTable::edges`, INVALID meaning null.

use crate::geom::{Point, Real};
use crate::polygon::ContourAccess;
use crate::scanbeam::ScanBeamTree;
use crate::sweep::{BundleState, CLIP, LEFT, SUBJ};

pub const INVALID: u32 = u32::MAX;

/// Index into EdgeTable::edges
pub type EdgeIdx = u32;
/// Index into the output builder's polygon arena
pub type PolyIdx = u32;

/// One directed edge of an input contour, as seen by the sweep.
#[derive(Clone, Debug)]
pub struct EdgeNode {
    /// Lower endpoint (bot.y < top.y).
    pub bot: Point,
    pub top: Point,
    /// x at the bottom of the current scan-beam.
    pub xb: Real,
    /// x at the top of the current scan-beam.
    pub xt: Real,
    /// dx/dy.
    pub dx: Real,
    /// CLIP or SUBJ.
    pub kind: usize,
    /// Output contour linked above / below the current boundary.
    pub outp: [PolyIdx; 2],
    /// bundle[ABOVE|BELOW][CLIP|SUBJ]
    pub bundle: [[u8; 2]; 2],
    /// Bundle side (LEFT/RIGHT) per role.
    pub bside: [u8; 2],
    pub bstate: [BundleState; 2],
    /// AET neighbours.
    pub prev: EdgeIdx,
    pub next: EdgeIdx,
    /// Previous/next edge of the same bound.
    pub pred: EdgeIdx,
    pub succ: EdgeIdx,
    /// Next bound in the same LMT bucket.
    pub next_bound: EdgeIdx,
}

impl Default for EdgeNode {
    fn default() -> Self {
        EdgeNode {
            bot: Point::default(),
            top: Point::default(),
            xb: 0.0,
            xt: 0.0,
            dx: 0.0,
            kind: SUBJ,
            outp: [INVALID; 2],
            bundle: [[0; 2]; 2],
            bside: [LEFT as u8; 2],
            bstate: [BundleState::Unbundled; 2],
            prev: INVALID,
            next: INVALID,
            pred: INVALID,
            succ: INVALID,
            next_bound: INVALID,
        }
    }
}

/// One LMT bucket: all bounds whose lowest vertex sits at `y`.
#[derive(Clone, Debug)]
pub struct LmtNode {
    pub y: Real,
    /// Head of the bound list, sorted by bot.x then dx.
    pub first_bound: EdgeIdx,
}

/// Buckets in ascending y.
#[derive(Clone, Debug, Default)]
pub struct LocalMinTable {
    pub nodes: Vec<LmtNode>,
}

impl LocalMinTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Position of the bucket for `y`, creating it in order if needed.
    fn bound_list(&mut self, y: Real) -> usize {
        let pos = self.nodes.partition_point(|n| n.y < y);
        if pos == self.nodes.len() || self.nodes[pos].y != y {
            self.nodes.insert(pos, LmtNode { y, first_bound: INVALID });
        }
        pos
    }

    /// Thread bound `e` into the bucket for its bottom y, keeping the list
    /// ordered by bottom x then slope. Equal keys go after existing bounds.
    pub fn insert_bound(&mut self, edges: &mut [EdgeNode], e: EdgeIdx) {
        let bucket = self.bound_list(edges[e as usize].bot.y);
        let (bx, bdx) = (edges[e as usize].bot.x, edges[e as usize].dx);
        let goes_before = |n: &EdgeNode| bx < n.bot.x || (bx == n.bot.x && bdx < n.dx);

        let head = self.nodes[bucket].first_bound;
        if head == INVALID || goes_before(&edges[head as usize]) {
            edges[e as usize].next_bound = head;
            self.nodes[bucket].first_bound = e;
            return;
        }
        let mut b = head;
        loop {
            let nb = edges[b as usize].next_bound;
            if nb == INVALID || goes_before(&edges[nb as usize]) {
                edges[e as usize].next_bound = nb;
                edges[b as usize].next_bound = e;
                return;
            }
            b = nb;
        }
    }
}

/// Arena holding every edge built for one clip call.
#[derive(Clone, Debug, Default)]
pub struct EdgeTable {
    pub edges: Vec<EdgeNode>,
}

/// Contour vertices whose y differs from at least one neighbour's. Interior
/// points of horizontal runs are dropped.
pub fn optimal_vertices<C: ContourAccess>(contour: &C) -> Vec<Point> {
    let n = contour.num_points();
    (0..n)
        .filter(|&i| {
            let y = contour.y(i);
            contour.y(prev_index(i, n)) != y || contour.y(next_index(i, n)) != y
        })
        .map(|i| Point::new(contour.x(i), contour.y(i)))
        .collect()
}

#[inline]
fn prev_index(i: usize, n: usize) -> usize {
    (i + n - 1) % n
}

#[inline]
fn next_index(i: usize, n: usize) -> usize {
    (i + 1) % n
}

#[inline]
fn fwd_min(v: &[Point], i: usize) -> bool {
    let n = v.len();
    v[prev_index(i, n)].y >= v[i].y && v[next_index(i, n)].y > v[i].y
}

#[inline]
fn not_fmax(v: &[Point], i: usize) -> bool {
    v[next_index(i, v.len())].y > v[i].y
}

#[inline]
fn rev_min(v: &[Point], i: usize) -> bool {
    let n = v.len();
    v[prev_index(i, n)].y > v[i].y && v[next_index(i, n)].y >= v[i].y
}

#[inline]
fn not_rmax(v: &[Point], i: usize) -> bool {
    v[prev_index(i, v.len())].y > v[i].y
}

impl EdgeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Build the bounds of one contour, insert them into the LMT and record
    /// every retained vertex y in the scan-beam tree.
    ///
    /// `clip_side` seeds `bside[CLIP]` (RIGHT for difference).
    pub fn add_contour<C: ContourAccess>(
        &mut self,
        contour: &C,
        kind: usize,
        clip_side: u8,
        lmt: &mut LocalMinTable,
        sbtree: &mut ScanBeamTree,
    ) {
        let verts = optimal_vertices(contour);
        for v in &verts {
            sbtree.insert(v.y);
        }
        let n = verts.len();

        // Forward pass
        for min in 0..n {
            if fwd_min(&verts, min) {
                let mut num_edges = 1;
                let mut max = next_index(min, n);
                while not_fmax(&verts, max) {
                    num_edges += 1;
                    max = next_index(max, n);
                }
                let e = self.push_bound(&verts, min, num_edges, next_index, kind, clip_side);
                lmt.insert_bound(&mut self.edges, e);
            }
        }

        // Reverse pass
        for min in 0..n {
            if rev_min(&verts, min) {
                let mut num_edges = 1;
                let mut max = prev_index(min, n);
                while not_rmax(&verts, max) {
                    num_edges += 1;
                    max = prev_index(max, n);
                }
                let e = self.push_bound(&verts, min, num_edges, prev_index, kind, clip_side);
                lmt.insert_bound(&mut self.edges, e);
            }
        }
    }

    /// Append `num_edges` chained edges starting at vertex `min`, stepping
    /// through `verts` with `step`. Returns the first edge.
    fn push_bound(
        &mut self,
        verts: &[Point],
        min: usize,
        num_edges: usize,
        step: fn(usize, usize) -> usize,
        kind: usize,
        clip_side: u8,
    ) -> EdgeIdx {
        let n = verts.len();
        let first = self.edges.len() as EdgeIdx;
        let mut v = min;
        for i in 0..num_edges {
            let bot = verts[v];
            v = step(v, n);
            let top = verts[v];
            let idx = first + i as EdgeIdx;
            let mut e = EdgeNode {
                bot,
                top,
                xb: bot.x,
                dx: (top.x - bot.x) / (top.y - bot.y),
                kind,
                pred: if i > 0 { idx - 1 } else { INVALID },
                succ: if i + 1 < num_edges { idx + 1 } else { INVALID },
                ..EdgeNode::default()
            };
            e.bside[CLIP] = clip_side;
            e.bside[SUBJ] = LEFT as u8;
            self.edges.push(e);
        }
        first
    }
}
