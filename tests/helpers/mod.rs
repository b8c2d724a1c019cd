// Copyright 2025 Lars Brubaker
// Shared test utilities for gpc-rust tests.

#![allow(dead_code)]

use gpc_rust::{Contour, Point, Polygon, Real};

/// Counter-clockwise axis-aligned rectangle.
pub fn rect(x: Real, y: Real, w: Real, h: Real) -> Vec<(Real, Real)> {
    vec![(x, y), (x + w, y), (x + w, y + h), (x, y + h)]
}

pub fn square(x: Real, y: Real, s: Real) -> Polygon {
    Polygon::from_points(rect(x, y, s, s))
}

pub fn rect_polygon(x: Real, y: Real, w: Real, h: Real) -> Polygon {
    Polygon::from_points(rect(x, y, w, h))
}

/// One polygon holding every ring given, none flagged as a hole.
pub fn polygon(rings: &[Vec<(Real, Real)>]) -> Polygon {
    let mut p = Polygon::new();
    for ring in rings {
        p.add_inner_polygon(Contour::from_points(ring.iter().copied()))
            .unwrap();
    }
    p
}

/// Outer ring with one hole ring.
pub fn with_hole(outer: Vec<(Real, Real)>, hole: Vec<(Real, Real)>) -> Polygon {
    let mut p = Polygon::from_points(outer);
    let mut h = Contour::from_points(hole);
    h.set_is_hole(true);
    p.add_inner_polygon(h).unwrap();
    p
}

pub fn contour(p: &Polygon, index: usize) -> &Contour {
    p.inner_polygon(index)
        .unwrap_or_else(|| panic!("no contour {} in result with {}", index, p.num_inner_polygons()))
}

/// Vertices of a contour sorted lexicographically, for order-independent checks.
pub fn sorted_vertices(c: &Contour) -> Vec<(Real, Real)> {
    let mut v: Vec<(Real, Real)> = c.points().iter().map(|p| (p.x, p.y)).collect();
    v.sort_by(|a, b| a.partial_cmp(b).unwrap());
    v
}

pub fn has_vertex(p: &Polygon, x: Real, y: Real) -> bool {
    p.inner_polygons()
        .any(|c| c.points().iter().any(|v| *v == Point::new(x, y)))
}

pub fn hole_count(p: &Polygon) -> usize {
    p.inner_polygons().filter(|c| c.is_hole()).count()
}

/// Structural checks every clip result must pass.
pub fn verify_valid_output(p: &Polygon) {
    let mut seen_hole = false;
    for (i, c) in p.inner_polygons().enumerate() {
        assert!(
            c.num_points() >= 3,
            "contour {} has only {} vertices",
            i,
            c.num_points()
        );
        for v in c.points() {
            assert!(v.x.is_finite() && v.y.is_finite(), "contour {} has vertex {}", i, v);
        }
        if c.is_hole() {
            seen_hole = true;
        } else {
            assert!(!seen_hole, "non-hole contour {} follows a hole", i);
        }
    }
}
