// Copyright 2025 Lars Brubaker
// License: MIT
//
// Output contour assembly for the Clipper.
//
// Partial contours grow as vertex lists open at both ends. When the sweep
// closes two partial contours against each other their lists are spliced
// and every node that resolved to the absorbed contour is redirected to the
// survivor's proxy (union-find style), the absorbed node going inactive.

use log::warn;

use crate::edge::{PolyIdx, INVALID};
use crate::error::Result;
use crate::geom::{Point, Real};
use crate::polygon::PolygonAccess;
use crate::sweep::{LEFT, RIGHT};

type VertIdx = u32;

#[derive(Clone, Debug)]
struct VertexNode {
    x: Real,
    y: Real,
    next: VertIdx,
}

#[derive(Clone, Debug)]
struct PolygonNode {
    /// Zero when dead; after counting, the number of vertices.
    active: usize,
    hole: bool,
    /// Left and right ends of the vertex list.
    v: [VertIdx; 2],
    proxy: PolyIdx,
}

/// Every partial contour created during one clip call.
#[derive(Clone, Debug, Default)]
pub(crate) struct OutputBuilder {
    polygons: Vec<PolygonNode>,
    vertices: Vec<VertexNode>,
}

impl OutputBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn new_vertex(&mut self, x: Real, y: Real) -> VertIdx {
        let idx = self.vertices.len() as VertIdx;
        self.vertices.push(VertexNode { x, y, next: INVALID });
        idx
    }

    #[inline]
    fn proxy(&self, p: PolyIdx) -> usize {
        self.polygons[p as usize].proxy as usize
    }

    /// Start a new contour at (x, y).
    pub(crate) fn add_local_min(&mut self, x: Real, y: Real) -> PolyIdx {
        let nv = self.new_vertex(x, y);
        let idx = self.polygons.len() as PolyIdx;
        self.polygons.push(PolygonNode { active: 1, hole: false, v: [nv, nv], proxy: idx });
        idx
    }

    pub(crate) fn add_left(&mut self, p: PolyIdx, x: Real, y: Real) {
        if p == INVALID {
            warn!("add_left at ({}, {}) without an output contour", x, y);
            return;
        }
        let pp = self.proxy(p);
        let nv = self.new_vertex(x, y);
        self.vertices[nv as usize].next = self.polygons[pp].v[LEFT];
        self.polygons[pp].v[LEFT] = nv;
    }

    pub(crate) fn add_right(&mut self, p: PolyIdx, x: Real, y: Real) {
        if p == INVALID {
            warn!("add_right at ({}, {}) without an output contour", x, y);
            return;
        }
        let pp = self.proxy(p);
        let nv = self.new_vertex(x, y);
        let right = self.polygons[pp].v[RIGHT];
        self.vertices[right as usize].next = nv;
        self.polygons[pp].v[RIGHT] = nv;
    }

    /// Splice p's list onto the left end of q's; q's contour becomes a hole.
    pub(crate) fn merge_left(&mut self, p: PolyIdx, q: PolyIdx) {
        if p == INVALID || q == INVALID {
            warn!("merge_left with a missing output contour");
            return;
        }
        let (pp, qp) = (self.proxy(p), self.proxy(q));
        self.polygons[qp].hole = true;
        if pp != qp {
            let p_right = self.polygons[pp].v[RIGHT];
            self.vertices[p_right as usize].next = self.polygons[qp].v[LEFT];
            self.polygons[qp].v[LEFT] = self.polygons[pp].v[LEFT];
            self.redirect(pp, qp);
        }
    }

    /// Splice p's list onto the right end of q's; q's contour becomes external.
    pub(crate) fn merge_right(&mut self, p: PolyIdx, q: PolyIdx) {
        if p == INVALID || q == INVALID {
            warn!("merge_right with a missing output contour");
            return;
        }
        let (pp, qp) = (self.proxy(p), self.proxy(q));
        self.polygons[qp].hole = false;
        if pp != qp {
            let q_right = self.polygons[qp].v[RIGHT];
            self.vertices[q_right as usize].next = self.polygons[pp].v[LEFT];
            self.polygons[qp].v[RIGHT] = self.polygons[pp].v[RIGHT];
            self.redirect(pp, qp);
        }
    }

    fn redirect(&mut self, from: usize, to: usize) {
        for node in self.polygons.iter_mut() {
            if node.proxy as usize == from {
                node.active = 0;
                node.proxy = to as PolyIdx;
            }
        }
    }

    fn contour_len(&self, p: usize) -> usize {
        let mut n = 0;
        let mut v = self.polygons[self.proxy(p as PolyIdx)].v[LEFT];
        while v != INVALID {
            n += 1;
            v = self.vertices[v as usize].next;
        }
        n
    }

    /// Record vertex counts in `active`, killing contours of two or fewer
    /// vertices. Returns the number of surviving contours.
    pub(crate) fn count_contours(&mut self) -> usize {
        let mut nc = 0;
        for p in 0..self.polygons.len() {
            if self.polygons[p].active == 0 {
                continue;
            }
            let nv = self.contour_len(p);
            if nv > 2 {
                self.polygons[p].active = nv;
                nc += 1;
            } else {
                self.polygons[p].active = 0;
            }
        }
        nc
    }

    /// Surviving contours, newest first, each walked from its left end.
    pub(crate) fn contours(&mut self) -> Vec<(Vec<Point>, bool)> {
        let mut out = Vec::with_capacity(self.count_contours());
        for p in (0..self.polygons.len()).rev() {
            let node = &self.polygons[p];
            if node.active == 0 {
                continue;
            }
            let proxy = &self.polygons[node.proxy as usize];
            let mut points = Vec::with_capacity(node.active);
            let mut v = proxy.v[LEFT];
            while v != INVALID {
                let vn = &self.vertices[v as usize];
                points.push(Point::new(vn.x, vn.y));
                v = vn.next;
            }
            out.push((points, proxy.hole));
        }
        out
    }

    /// Export into a fresh `P`, non-holes first then holes.
    pub(crate) fn into_result<P: PolygonAccess>(mut self, reverse_contours: bool) -> Result<P> {
        let contours = self.contours();
        let mut result = P::default();
        let (outer, holes): (Vec<_>, Vec<_>) = contours.into_iter().partition(|(_, hole)| !hole);
        for (mut points, hole) in outer.into_iter().chain(holes) {
            if reverse_contours {
                points.reverse();
            }
            result.push_contour(points, hole)?;
        }
        Ok(result)
    }
}
