// Copyright 2025 Lars Brubaker
// The four boolean operations on overlapping, disjoint, nested and identical inputs.

mod helpers;

use approx::assert_relative_eq;
use gpc_rust::{clip, Clipper, Operation, Point, Polygon, Rect};

use helpers::{contour, has_vertex, hole_count, rect, rect_polygon, sorted_vertices, square, verify_valid_output};

/// 4x4 at the origin and 4x4 at (2,2): overlap 2x2.
fn offset_squares() -> (Polygon, Polygon) {
    (square(0.0, 0.0, 4.0), square(2.0, 2.0, 4.0))
}

fn run(op: Operation, a: &Polygon, b: &Polygon) -> Polygon {
    let result = Clipper::new().clip(op, a, b).unwrap();
    verify_valid_output(&result);
    result
}

// ─────── Offset squares ─────────────────────────────────────────────────────

#[test]
fn intersection_of_offset_squares() {
    let (a, b) = offset_squares();
    let r = run(Operation::Intersection, &a, &b);
    assert_eq!(r.num_inner_polygons(), 1);
    assert_relative_eq!(r.area(), 4.0);
    assert_eq!(r.bounds(), Rect::new(2.0, 2.0, 4.0, 4.0));
    assert!(!contour(&r, 0).is_hole());
    assert_eq!(
        sorted_vertices(contour(&r, 0)),
        vec![(2.0, 2.0), (2.0, 4.0), (4.0, 2.0), (4.0, 4.0)]
    );
}

#[test]
fn union_of_offset_squares() {
    let (a, b) = offset_squares();
    let r = run(Operation::Union, &a, &b);
    assert_eq!(r.num_inner_polygons(), 1);
    assert!(!contour(&r, 0).is_hole());
    assert_eq!(contour(&r, 0).num_points(), 8);
    assert_relative_eq!(r.area(), 28.0);
    assert_eq!(r.bounds(), Rect::new(0.0, 0.0, 6.0, 6.0));
}

#[test]
fn xor_of_offset_squares() {
    let (a, b) = offset_squares();
    let r = run(Operation::Xor, &a, &b);
    assert_eq!(r.num_inner_polygons(), 2);
    assert_eq!(hole_count(&r), 0);
    assert_relative_eq!(r.area(), 24.0);
    // The shared 2x2 is outside both pieces.
    assert!(!r.inner_polygons().any(|c| c.contains_point(Point::new(3.0, 3.0))));
}

#[test]
fn difference_of_offset_squares() {
    let (a, b) = offset_squares();
    let r = run(Operation::Difference, &a, &b);
    assert_eq!(r.num_inner_polygons(), 1);
    assert_eq!(contour(&r, 0).num_points(), 6);
    assert_relative_eq!(r.area(), 12.0);
    assert!(r.contains_point(Point::new(1.0, 1.0)));
    assert!(!r.contains_point(Point::new(3.0, 3.0)));
}

#[test]
fn difference_removes_clip_from_subject() {
    let strip = rect_polygon(0.0, 0.0, 8.0, 2.0);
    let block = square(0.0, 0.0, 2.0);
    let r = run(Operation::Difference, &strip, &block);
    assert_relative_eq!(r.area(), 12.0);
    assert_eq!(r.bounds(), Rect::new(2.0, 0.0, 8.0, 2.0));
    // The block lies inside the strip, so nothing of it survives.
    let r = run(Operation::Difference, &block, &strip);
    assert!(r.is_empty());
}

#[test]
fn difference_with_clip_inside_strip_splits_it() {
    let strip = rect_polygon(0.0, 0.0, 8.0, 2.0);
    let r = run(Operation::Difference, &strip, &square(3.0, 0.0, 2.0));
    assert_eq!(r.num_inner_polygons(), 2);
    assert_relative_eq!(r.area(), 12.0);
    for c in r.inner_polygons() {
        assert_relative_eq!(c.area(), 6.0);
    }
}

// ─────── Algebraic relations ────────────────────────────────────────────────

#[test]
fn symmetric_operations_commute() {
    let pairs = [
        offset_squares(),
        (square(0.0, 0.0, 2.0), square(2.0, 0.0, 2.0)),
        (
            Polygon::from_points([(0.0, 0.0), (6.0, 0.0), (3.0, 5.0)]),
            rect_polygon(1.0, 1.0, 6.0, 2.0),
        ),
    ];
    for (a, b) in &pairs {
        for op in [Operation::Intersection, Operation::Union, Operation::Xor] {
            let ab = run(op, a, b).area();
            let ba = run(op, b, a).area();
            assert_relative_eq!(ab, ba, epsilon = 1e-9);
        }
    }
}

#[test]
fn inclusion_exclusion_triangle_and_rectangle() {
    let tri = Polygon::from_points([(0.0, 0.0), (6.0, 0.0), (3.0, 5.0)]);
    let bar = rect_polygon(1.0, 1.0, 6.0, 2.0);
    let i = run(Operation::Intersection, &tri, &bar).area();
    let u = run(Operation::Union, &tri, &bar).area();
    let x = run(Operation::Xor, &tri, &bar).area();
    let d = run(Operation::Difference, &tri, &bar).area();
    assert_relative_eq!(u + i, tri.area() + bar.area(), epsilon = 1e-9);
    assert_relative_eq!(x, u - i, epsilon = 1e-9);
    assert_relative_eq!(d, tri.area() - i, epsilon = 1e-9);
}

// ─────── Disjoint, nested, identical ─────────────────────────────────────────

#[test]
fn disjoint_inputs() {
    let a = square(0.0, 0.0, 5.0);
    let b = square(10.0, 10.0, 1.0);
    assert!(run(Operation::Intersection, &a, &b).is_empty());

    let u = run(Operation::Union, &a, &b);
    assert_eq!(u.num_inner_polygons(), 2);
    assert_relative_eq!(u.area(), 26.0);

    let x = run(Operation::Xor, &a, &b);
    assert_relative_eq!(x.area(), 26.0);

    let d = run(Operation::Difference, &a, &b);
    assert_eq!(d.num_inner_polygons(), 1);
    assert_eq!(sorted_vertices(contour(&d, 0)), vec![(0.0, 0.0), (0.0, 5.0), (5.0, 0.0), (5.0, 5.0)]);
}

#[test]
fn nested_inputs() {
    let big = square(0.0, 0.0, 4.0);
    let small = square(1.0, 1.0, 2.0);

    let i = run(Operation::Intersection, &big, &small);
    assert_eq!(sorted_vertices(contour(&i, 0)), vec![(1.0, 1.0), (1.0, 3.0), (3.0, 1.0), (3.0, 3.0)]);

    let u = run(Operation::Union, &big, &small);
    assert_eq!(u.num_inner_polygons(), 1);
    assert_relative_eq!(u.area(), 16.0);

    let x = run(Operation::Xor, &big, &small);
    assert_eq!(x.num_inner_polygons(), 2);
    assert_eq!(hole_count(&x), 1);
    assert_relative_eq!(x.area(), 12.0);

    assert!(run(Operation::Difference, &small, &big).is_empty());
}

#[test]
fn identical_inputs() {
    let a = square(0.0, 0.0, 3.0);
    assert_relative_eq!(run(Operation::Intersection, &a, &a).area(), 9.0);
    assert_relative_eq!(run(Operation::Union, &a, &a).area(), 9.0);
    assert!(run(Operation::Xor, &a, &a).is_empty());
    assert!(run(Operation::Difference, &a, &a).is_empty());
}

#[test]
fn shared_edge_union_merges() {
    let r = run(Operation::Union, &square(0.0, 0.0, 2.0), &square(2.0, 0.0, 2.0));
    assert_eq!(r.num_inner_polygons(), 1);
    assert_relative_eq!(r.area(), 8.0);
    assert_eq!(sorted_vertices(contour(&r, 0)), vec![(0.0, 0.0), (0.0, 2.0), (4.0, 0.0), (4.0, 2.0)]);
}

#[test]
fn crossing_bars_union() {
    let horizontal = Polygon::from_points(rect(0.0, 2.0, 6.0, 2.0));
    let vertical = Polygon::from_points(rect(2.0, 0.0, 2.0, 6.0));
    let r = run(Operation::Union, &horizontal, &vertical);
    assert_eq!(r.num_inner_polygons(), 1);
    assert_eq!(contour(&r, 0).num_points(), 12);
    assert_relative_eq!(r.area(), 20.0);
}

#[test]
fn slanted_edges_cross_inside_a_beam() {
    let a = Polygon::from_points([(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)]);
    let b = Polygon::from_points([(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)]);
    let r = run(Operation::Intersection, &a, &b);
    assert_relative_eq!(r.area(), 4.0);
    assert!(has_vertex(&r, 2.0, 2.0));
}

#[test]
fn orientation_of_inputs_does_not_matter() {
    let ccw = square(0.0, 0.0, 4.0);
    let mut ring = rect(0.0, 0.0, 4.0, 4.0);
    ring.reverse();
    let cw = Polygon::from_points(ring);
    let b = square(2.0, 2.0, 4.0);
    assert_relative_eq!(run(Operation::Intersection, &cw, &b).area(), 4.0);
    assert_relative_eq!(run(Operation::Union, &cw, &b).area(), run(Operation::Union, &ccw, &b).area());
}

// ─────── Entry points ───────────────────────────────────────────────────────

#[test]
fn polygon_methods_match_engine() {
    let (a, b) = offset_squares();
    assert_relative_eq!(a.intersection(&b).unwrap().area(), 4.0);
    assert_relative_eq!(a.union(&b).unwrap().area(), 28.0);
    assert_relative_eq!(a.xor(&b).unwrap().area(), 24.0);
    assert_relative_eq!(a.difference(&b).unwrap().area(), 12.0);
    let via_fn: Polygon = clip(Operation::Difference, &a, &b).unwrap();
    assert_eq!(via_fn, a.difference(&b).unwrap());
}

#[test]
fn inputs_are_not_modified() {
    let (a, b) = offset_squares();
    let (a0, b0) = (a.clone(), b.clone());
    for op in [Operation::Difference, Operation::Intersection, Operation::Xor, Operation::Union] {
        run(op, &a, &b);
    }
    assert_eq!(a, a0);
    assert_eq!(b, b0);
}
