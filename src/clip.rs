// Copyright 2025 Lars Brubaker
// License: MIT
//
// Boolean operations between two polygons: intersection, union, exclusive-or
// and difference, by Vatti's scan-beam sweep.
//
// Both inputs are cut into bounds (see edge.rs) and swept bottom to top. At
// every scan-beam boundary the active edges are bundled, the four quadrants
// around each edge are classified against the operation, and the resulting
// vertex type decides how output contours grow, merge or start. Inside a
// beam, crossing edges are resolved the same way at the crossing point.
//
// All sweep state lives in per-call arenas. The only write to the inputs
// re-arms contours the caller marked non-contributing, which sit out one
// build. Bounding-box pruning is kept in a per-call mask instead.

mod intersect;
mod output;

use std::fmt;
use std::str::FromStr;

use log::{debug, trace, warn};

use crate::aet::ActiveEdgeTable;
use crate::edge::{EdgeIdx, EdgeNode, EdgeTable, LocalMinTable, PolyIdx, INVALID};
use crate::error::{ClipError, Result};
use crate::geom::{eq, Real, Rect};
use crate::polygon::{ContourAccess, PolygonAccess};
use crate::scanbeam::ScanBeamTree;
use crate::sweep::{BundleState, HState, VertexType, ABOVE, BELOW, CLIP, LEFT, RIGHT, SUBJ};

use self::intersect::{build_intersection_table, ItNode};
use self::output::OutputBuilder;

// ─────────────────────────────── Public types ──────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Subject with the clip area removed.
    Difference,
    Intersection,
    Xor,
    Union,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::Difference => "difference",
            Operation::Intersection => "intersection",
            Operation::Xor => "xor",
            Operation::Union => "union",
        }
    }

    /// Combine per-polygon occupancy bits into one.
    #[inline]
    fn join(self, clip: u8, subj: u8) -> u8 {
        match self {
            Operation::Difference | Operation::Intersection => clip & subj,
            Operation::Xor => clip ^ subj,
            Operation::Union => clip | subj,
        }
    }

    /// Whether an edge at a scan-beam boundary can emit output, given the
    /// `exists` codes, the parity to its left and the horizontal state bits.
    fn is_contributing(self, exists: [u8; 2], parity: [u8; 2], horiz: [u8; 2]) -> bool {
        let (ec, es) = (exists[CLIP] != 0, exists[SUBJ] != 0);
        let (pc, ps) = (parity[CLIP] != 0, parity[SUBJ] != 0);
        let (hc, hs) = (horiz[CLIP] != 0, horiz[SUBJ] != 0);
        match self {
            Operation::Difference | Operation::Intersection => {
                (ec && (ps || hs)) || (es && (pc || hc)) || (ec && es && pc == ps)
            }
            Operation::Xor => ec || es,
            Operation::Union => {
                (ec && (!ps || hs)) || (es && (!pc || hc)) || (ec && es && pc == ps)
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = ClipError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "int" | "intersection" => Ok(Operation::Intersection),
            "union" => Ok(Operation::Union),
            "xor" => Ok(Operation::Xor),
            "diff" | "difference" => Ok(Operation::Difference),
            _ => Err(ClipError::UnknownOperation(s.to_string())),
        }
    }
}

/// Classic GPC operation codes.
impl TryFrom<u8> for Operation {
    type Error = ClipError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Operation::Difference),
            1 => Ok(Operation::Intersection),
            2 => Ok(Operation::Xor),
            3 => Ok(Operation::Union),
            _ => Err(ClipError::UnknownOperation(code.to_string())),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClipOption {
    /// Skip contours whose bounding box cannot touch the other polygon
    /// (intersection and difference only). On by default.
    ContourPruning,
    /// Export each contour in the reverse of its default vertex order.
    ReverseContours,
}

// ─────────────────────────────── Clipper ─────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Clipper {
    contour_pruning: bool,
    reverse_contours: bool,
}

impl Default for Clipper {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipper {
    pub fn new() -> Self {
        Clipper { contour_pruning: true, reverse_contours: false }
    }

    pub fn set_option(&mut self, option: ClipOption, value: bool) {
        match option {
            ClipOption::ContourPruning => self.contour_pruning = value,
            ClipOption::ReverseContours => self.reverse_contours = value,
        }
    }

    pub fn option(&self, option: ClipOption) -> bool {
        match option {
            ClipOption::ContourPruning => self.contour_pruning,
            ClipOption::ReverseContours => self.reverse_contours,
        }
    }

    /// Apply `op` to `subject` and `clip`, building the result as a new `P`.
    ///
    /// Result contours are ordered non-holes first, then holes. Fails only if
    /// the result cannot be stored in `P` (e.g. several contours into a
    /// simple `Contour`).
    pub fn clip<P: PolygonAccess>(&self, op: Operation, subject: &P, clip: &P) -> Result<P> {
        debug!(
            "clip {}: {} subject contours, {} clip contours",
            op,
            subject.num_inner_polygons(),
            clip.num_inner_polygons()
        );

        if trivially_empty(op, subject.is_empty(), clip.is_empty()) {
            debug!("clip {}: trivially empty result", op);
            return Ok(P::default());
        }

        let (subj_mask, clip_mask) = self.contributing_masks(op, subject, clip);

        let clip_side = (if op == Operation::Difference { RIGHT } else { LEFT }) as u8;
        let mut table = EdgeTable::new();
        let mut lmt = LocalMinTable::new();
        let mut sbtree = ScanBeamTree::new();
        load_contours(subject, &subj_mask, SUBJ, clip_side, &mut table, &mut lmt, &mut sbtree);
        load_contours(clip, &clip_mask, CLIP, clip_side, &mut table, &mut lmt, &mut sbtree);

        if lmt.is_empty() {
            debug!("clip {}: no contributing edges", op);
            return Ok(P::default());
        }

        let sbt = sbtree.build_sbt();
        let mut sweep = Sweep::new(op, table.edges);
        sweep.run(&lmt, &sbt);

        let result: P = sweep.out.into_result(self.reverse_contours)?;
        let holes = (0..result.num_inner_polygons())
            .filter(|&i| result.inner_polygon(i).is_hole())
            .count();
        debug!(
            "clip {}: {} contours ({} holes) from {} edges over {} scan-beams",
            op,
            result.num_inner_polygons(),
            holes,
            sweep.edges.len(),
            sbt.len()
        );
        Ok(result)
    }

    /// Per-contour flags for which contours enter the edge table.
    fn contributing_masks<P: PolygonAccess>(
        &self,
        op: Operation,
        subject: &P,
        clip: &P,
    ) -> (Vec<bool>, Vec<bool>) {
        let mut subj_mask = contributing_flags(subject);
        let mut clip_mask = contributing_flags(clip);

        let prunable = matches!(op, Operation::Intersection | Operation::Difference);
        if self.contour_pruning && prunable && !subject.is_empty() && !clip.is_empty() {
            let s_boxes = contour_bounds(subject);
            let c_boxes = contour_bounds(clip);
            let mut pruned = 0;

            for (c, cb) in c_boxes.iter().enumerate() {
                if clip_mask[c] && !s_boxes.iter().any(|sb| sb.overlaps(cb)) {
                    clip_mask[c] = false;
                    pruned += 1;
                }
            }
            if op == Operation::Intersection {
                for (s, sb) in s_boxes.iter().enumerate() {
                    if subj_mask[s] && !c_boxes.iter().any(|cb| cb.overlaps(sb)) {
                        subj_mask[s] = false;
                        pruned += 1;
                    }
                }
            }
            if pruned > 0 {
                debug!("contour pruning: {} contours cannot contribute to {}", pruned, op);
            }
        }
        (subj_mask, clip_mask)
    }
}

/// Shorthand for `Clipper::new().clip(op, subject, clip)`.
pub fn clip<P: PolygonAccess>(op: Operation, subject: &P, clip: &P) -> Result<P> {
    Clipper::new().clip(op, subject, clip)
}

// ─────────────────────────── Helper functions ─────────────────────────────────

fn trivially_empty(op: Operation, subject_empty: bool, clip_empty: bool) -> bool {
    (subject_empty && clip_empty)
        || (subject_empty && matches!(op, Operation::Intersection | Operation::Difference))
        || (clip_empty && op == Operation::Intersection)
}

fn contributing_flags<P: PolygonAccess>(polygon: &P) -> Vec<bool> {
    (0..polygon.num_inner_polygons())
        .map(|i| polygon.inner_polygon(i).is_contributing())
        .collect()
}

fn contour_bounds<P: PolygonAccess>(polygon: &P) -> Vec<Rect> {
    (0..polygon.num_inner_polygons())
        .map(|i| polygon.inner_polygon(i).bounds())
        .collect()
}

fn load_contours<P: PolygonAccess>(
    polygon: &P,
    mask: &[bool],
    kind: usize,
    clip_side: u8,
    table: &mut EdgeTable,
    lmt: &mut LocalMinTable,
    sbtree: &mut ScanBeamTree,
) {
    for (i, &keep) in mask.iter().enumerate() {
        let contour = polygon.inner_polygon(i);
        if !contour.is_contributing() {
            // Skipped for this build only.
            contour.set_contributing(true);
        } else if keep {
            table.add_contour(contour, kind, clip_side, lmt, sbtree);
        }
    }
}

// ─────────────────────────────── Sweep ───────────────────────────────────────

struct Sweep {
    op: Operation,
    edges: Vec<EdgeNode>,
    aet: ActiveEdgeTable,
    out: OutputBuilder,
    /// Whether the sweep position is inside each polygon.
    parity: [u8; 2],
}

impl Sweep {
    fn new(op: Operation, edges: Vec<EdgeNode>) -> Self {
        let mut parity = [LEFT as u8; 2];
        // Difference treats the clip polygon as inverted.
        if op == Operation::Difference {
            parity[CLIP] = RIGHT as u8;
        }
        Sweep { op, edges, aet: ActiveEdgeTable::new(), out: OutputBuilder::new(), parity }
    }

    #[inline]
    fn edge(&self, e: EdgeIdx) -> &EdgeNode {
        &self.edges[e as usize]
    }

    #[inline]
    fn edge_mut(&mut self, e: EdgeIdx) -> &mut EdgeNode {
        &mut self.edges[e as usize]
    }

    fn run(&mut self, lmt: &LocalMinTable, sbt: &[Real]) {
        let mut local_min = lmt.nodes.iter().peekable();
        for (i, &yb) in sbt.iter().enumerate() {
            let yt = sbt.get(i + 1).copied();

            if let Some(node) = local_min.next_if(|n| n.y == yb) {
                self.add_local_minimum(node.first_bound);
            }

            self.bundle_edges(yb);
            self.process_boundary(yb);
            self.remove_terminated(yb, yt);

            if let Some(yt) = yt {
                let it = build_intersection_table(&self.edges, &self.aet, yt - yb);
                trace!(
                    "beam [{}, {}]: {} active edges, {} crossings",
                    yb,
                    yt,
                    self.aet.len(&self.edges),
                    it.len()
                );
                for node in &it {
                    self.resolve_crossing(node, yb);
                }
                self.advance(yt);
            }
        }
    }

    // ─────── Scan-beam boundary ──────────────────────────────────────────────

    fn add_local_minimum(&mut self, first_bound: EdgeIdx) {
        let mut e = first_bound;
        while e != INVALID {
            let next = self.edge(e).next_bound;
            self.aet.insert(&mut self.edges, e);
            e = next;
        }
    }

    fn reset_above(&mut self, e: EdgeIdx, yb: Real) {
        let edge = self.edge_mut(e);
        let kind = edge.kind;
        edge.bundle[ABOVE][kind] = (edge.top.y != yb) as u8;
        edge.bundle[ABOVE][1 - kind] = 0;
        edge.bstate[ABOVE] = BundleState::Unbundled;
    }

    /// Merge coincident edges continuing above `yb` into bundles. The
    /// rightmost edge becomes the head and carries the combined flags.
    fn bundle_edges(&mut self, yb: Real) {
        let mut e0 = self.aet.top_node;
        if e0 == INVALID {
            return;
        }
        self.reset_above(e0, yb);

        let mut ne = self.edge(e0).next;
        while ne != INVALID {
            self.reset_above(ne, yb);
            let kind = self.edge(ne).kind;
            if self.edge(ne).bundle[ABOVE][kind] != 0 {
                let (tail, head) = (self.edge(e0), self.edge(ne));
                if eq(tail.xb, head.xb) && eq(tail.dx, head.dx) && tail.top.y != yb {
                    let carried = tail.bundle[ABOVE];
                    let head = self.edge_mut(ne);
                    head.bundle[ABOVE][kind] ^= carried[kind];
                    head.bundle[ABOVE][1 - kind] = carried[1 - kind];
                    head.bstate[ABOVE] = BundleState::BundleHead;
                    let tail = self.edge_mut(e0);
                    tail.bundle[ABOVE] = [0, 0];
                    tail.bstate[ABOVE] = BundleState::BundleTail;
                }
                e0 = ne;
            }
            ne = self.edge(ne).next;
        }
    }

    /// Classify every edge at `yb` and emit the vertices it implies.
    fn process_boundary(&mut self, yb: Real) {
        let op = self.op;
        let mut horiz = [HState::NoHorizontal; 2];
        // Contour currently open along the boundary and x of its last vertex.
        let mut cf: PolyIdx = INVALID;
        let mut px = -Real::MAX;

        let mut e = self.aet.top_node;
        while e != INVALID {
            let (bundle, next) = (self.edge(e).bundle, self.edge(e).next);
            let exists = [
                bundle[ABOVE][CLIP] + (bundle[BELOW][CLIP] << 1),
                bundle[ABOVE][SUBJ] + (bundle[BELOW][SUBJ] << 1),
            ];

            if exists != [0, 0] {
                let parity = self.parity;
                self.edge_mut(e).bside = parity;

                let h = [horiz[CLIP].bit(), horiz[SUBJ].bit()];
                let contributing = op.is_contributing(exists, parity, h);
                let (pc, ps) = (parity[CLIP], parity[SUBJ]);
                let br = op.join(pc, ps);
                let bl = op.join(pc ^ bundle[ABOVE][CLIP], ps ^ bundle[ABOVE][SUBJ]);
                let tr = op.join(pc ^ h[CLIP], ps ^ h[SUBJ]);
                let tl = op.join(
                    pc ^ h[CLIP] ^ bundle[BELOW][CLIP],
                    ps ^ h[SUBJ] ^ bundle[BELOW][SUBJ],
                );

                for k in [CLIP, SUBJ] {
                    self.parity[k] ^= bundle[ABOVE][k];
                    if exists[k] != 0 {
                        horiz[k] = horiz[k].next(exists[k], self.parity[k]);
                    }
                }

                if contributing {
                    let vclass = VertexType::classify(tr, tl, br, bl);
                    self.emit_boundary_vertex(e, vclass, yb, &mut cf, &mut px);
                }
            }
            e = next;
        }
    }

    fn emit_boundary_vertex(
        &mut self,
        e: EdgeIdx,
        vclass: VertexType,
        yb: Real,
        cf: &mut PolyIdx,
        px: &mut Real,
    ) {
        use VertexType::*;

        let xb = self.edge(e).xb;
        let below = self.edge(e).outp[BELOW];
        match vclass {
            ExternalMinimum | InternalMinimum => {
                let p = self.out.add_local_min(xb, yb);
                self.edge_mut(e).outp[ABOVE] = p;
                *px = xb;
                *cf = p;
            }
            ExternalRightIntermediate => {
                if xb != *px {
                    self.out.add_right(*cf, xb, yb);
                    *px = xb;
                }
                self.edge_mut(e).outp[ABOVE] = *cf;
                *cf = INVALID;
            }
            ExternalLeftIntermediate => {
                self.out.add_left(below, xb, yb);
                *px = xb;
                *cf = below;
            }
            ExternalMaximum => {
                if xb != *px {
                    self.out.add_left(*cf, xb, yb);
                    *px = xb;
                }
                self.out.merge_right(*cf, below);
                *cf = INVALID;
            }
            InternalLeftIntermediate => {
                if xb != *px {
                    self.out.add_left(*cf, xb, yb);
                    *px = xb;
                }
                self.edge_mut(e).outp[ABOVE] = *cf;
                *cf = INVALID;
            }
            InternalRightIntermediate => {
                self.out.add_right(below, xb, yb);
                *px = xb;
                *cf = below;
                self.edge_mut(e).outp[BELOW] = INVALID;
            }
            InternalMaximum => {
                if xb != *px {
                    self.out.add_right(*cf, xb, yb);
                    *px = xb;
                }
                self.out.merge_left(*cf, below);
                *cf = INVALID;
                self.edge_mut(e).outp[BELOW] = INVALID;
            }
            InternalMaximumAndMinimum => {
                if xb != *px {
                    self.out.add_right(*cf, xb, yb);
                    *px = xb;
                }
                self.out.merge_left(*cf, below);
                let p = self.out.add_local_min(xb, yb);
                let edge = self.edge_mut(e);
                edge.outp[BELOW] = INVALID;
                edge.outp[ABOVE] = p;
                *cf = p;
            }
            ExternalMaximumAndMinimum => {
                if xb != *px {
                    self.out.add_left(*cf, xb, yb);
                    *px = xb;
                }
                self.out.merge_right(*cf, below);
                let p = self.out.add_local_min(xb, yb);
                let edge = self.edge_mut(e);
                edge.outp[BELOW] = INVALID;
                edge.outp[ABOVE] = p;
                *cf = p;
            }
            LeftEdge => {
                if self.edge(e).bot.y == yb {
                    self.out.add_left(below, xb, yb);
                }
                self.edge_mut(e).outp[ABOVE] = below;
                *px = xb;
            }
            RightEdge => {
                if self.edge(e).bot.y == yb {
                    self.out.add_right(below, xb, yb);
                }
                self.edge_mut(e).outp[ABOVE] = below;
                *px = xb;
            }
            Empty | TopEdge | BottomEdge | Full => {}
        }
    }

    /// Drop edges ending at `yb`; project the rest to `yt`.
    fn remove_terminated(&mut self, yb: Real, yt: Option<Real>) {
        let mut e = self.aet.top_node;
        while e != INVALID {
            let next = self.edge(e).next;
            if self.edge(e).top.y == yb {
                let prev = self.edge(e).prev;
                self.aet.remove(&mut self.edges, e);

                // A finished bundle head hands its output to the tail below it.
                if self.edge(e).bstate[BELOW] == BundleState::BundleHead
                    && prev != INVALID
                    && self.edge(prev).bstate[BELOW] == BundleState::BundleTail
                {
                    let outp = self.edge(e).outp[BELOW];
                    let before = self.edge(prev).prev;
                    let p = self.edge_mut(prev);
                    p.outp[BELOW] = outp;
                    p.bstate[BELOW] = BundleState::Unbundled;
                    if before != INVALID && self.edge(before).bstate[BELOW] == BundleState::BundleTail {
                        self.edge_mut(prev).bstate[BELOW] = BundleState::BundleHead;
                    }
                }
            } else if let Some(yt) = yt {
                let edge = self.edge_mut(e);
                edge.xt = if edge.top.y == yt {
                    edge.top.x
                } else {
                    edge.bot.x + edge.dx * (yt - edge.bot.y)
                };
            }
            e = next;
        }
    }

    // ─────── Scan-beam interior ──────────────────────────────────────────────

    fn resolve_crossing(&mut self, node: &ItNode, yb: Real) {
        let [e0, e1] = node.ie;
        let b0 = self.edge(e0).bundle[ABOVE];
        let b1 = self.edge(e1).bundle[ABOVE];

        if b0 != [0, 0] && b1 != [0, 0] {
            self.emit_crossing_vertex(e0, e1, node.point.x, node.point.y + yb);
        }

        // Each edge now lies on the other side of the other's polygon.
        for k in [CLIP, SUBJ] {
            if b0[k] != 0 {
                self.edge_mut(e1).bside[k] ^= 1;
            }
            if b1[k] != 0 {
                self.edge_mut(e0).bside[k] ^= 1;
            }
        }

        self.aet.swap_bundles(&mut self.edges, e0, e1);
    }

    fn emit_crossing_vertex(&mut self, e0: EdgeIdx, e1: EdgeIdx, ix: Real, iy: Real) {
        use VertexType::*;

        let op = self.op;
        let (a, b) = (self.edge(e0), self.edge(e1));
        let (p, q) = (a.outp[ABOVE], b.outp[ABOVE]);
        let (b0, b1) = (a.bundle[ABOVE], b.bundle[ABOVE]);
        let inside = |k: usize| -> u8 {
            ((b0[k] != 0 && a.bside[k] == 0)
                || (b1[k] != 0 && b.bside[k] != 0)
                || (b0[k] == 0 && b1[k] == 0 && a.bside[k] != 0 && b.bside[k] != 0)) as u8
        };
        let (ic, is) = (inside(CLIP), inside(SUBJ));

        let tr = op.join(ic, is);
        let tl = op.join(ic ^ b1[CLIP], is ^ b1[SUBJ]);
        let br = op.join(ic ^ b0[CLIP], is ^ b0[SUBJ]);
        let bl = op.join(ic ^ b1[CLIP] ^ b0[CLIP], is ^ b1[SUBJ] ^ b0[SUBJ]);

        let vclass = VertexType::classify(tr, tl, br, bl);
        let linked = |needed: &[PolyIdx]| {
            let ok = needed.iter().all(|&o| o != INVALID);
            if !ok {
                warn!("{:?} crossing at ({}, {}) has no output contour", vclass, ix, iy);
            }
            ok
        };

        match vclass {
            ExternalMinimum | InternalMinimum => {
                let n = self.out.add_local_min(ix, iy);
                self.set_above(e0, e1, n, n);
            }
            ExternalRightIntermediate => {
                if linked(&[p]) {
                    self.out.add_right(p, ix, iy);
                    self.set_above(e0, e1, INVALID, p);
                }
            }
            ExternalLeftIntermediate => {
                if linked(&[q]) {
                    self.out.add_left(q, ix, iy);
                    self.set_above(e0, e1, q, INVALID);
                }
            }
            ExternalMaximum => {
                if linked(&[p, q]) {
                    self.out.add_left(p, ix, iy);
                    self.out.merge_right(p, q);
                    self.set_above(e0, e1, INVALID, INVALID);
                }
            }
            InternalLeftIntermediate => {
                if linked(&[p]) {
                    self.out.add_left(p, ix, iy);
                    self.set_above(e0, e1, INVALID, p);
                }
            }
            InternalRightIntermediate => {
                if linked(&[q]) {
                    self.out.add_right(q, ix, iy);
                    self.set_above(e0, e1, q, INVALID);
                }
            }
            InternalMaximum => {
                if linked(&[p, q]) {
                    self.out.add_right(p, ix, iy);
                    self.out.merge_left(p, q);
                    self.set_above(e0, e1, INVALID, INVALID);
                }
            }
            InternalMaximumAndMinimum => {
                if linked(&[p, q]) {
                    self.out.add_right(p, ix, iy);
                    self.out.merge_left(p, q);
                    let n = self.out.add_local_min(ix, iy);
                    self.set_above(e0, e1, n, n);
                }
            }
            ExternalMaximumAndMinimum => {
                if linked(&[p, q]) {
                    self.out.add_left(p, ix, iy);
                    self.out.merge_right(p, q);
                    let n = self.out.add_local_min(ix, iy);
                    self.set_above(e0, e1, n, n);
                }
            }
            _ => {}
        }
    }

    #[inline]
    fn set_above(&mut self, e0: EdgeIdx, e1: EdgeIdx, o0: PolyIdx, o1: PolyIdx) {
        self.edge_mut(e0).outp[ABOVE] = o0;
        self.edge_mut(e1).outp[ABOVE] = o1;
    }

    /// Roll ABOVE state into BELOW for the next beam, replacing edges that
    /// end at `yt` by their successor in the bound.
    fn advance(&mut self, yt: Real) {
        let mut e = self.aet.top_node;
        while e != INVALID {
            let edge = self.edge(e);
            let (next, succ) = (edge.next, edge.succ);
            let (outp, bstate, bundle) = (edge.outp[ABOVE], edge.bstate[ABOVE], edge.bundle[ABOVE]);

            if edge.top.y == yt && succ != INVALID {
                let s = self.edge_mut(succ);
                s.outp[BELOW] = outp;
                s.bstate[BELOW] = bstate;
                s.bundle[BELOW] = bundle;
                self.aet.replace(&mut self.edges, e, succ);
            } else {
                let edge = self.edge_mut(e);
                edge.outp[BELOW] = outp;
                edge.bstate[BELOW] = bstate;
                edge.bundle[BELOW] = bundle;
                edge.xb = edge.xt;
            }
            self.edge_mut(e).outp[ABOVE] = INVALID;
            e = next;
        }
    }
}
