// Copyright 2025 Lars Brubaker
// License: MIT
//
// Geometric primitives shared by the clipper.
//
// Coordinates are IEEE doubles. Equality is exact everywhere except the
// bundling and crossing tests of the sweep, which go through `eq`.

pub type Real = f64;

/// Tolerance used when comparing x positions and slopes of active edges.
pub const EPSILON: Real = 2.2204460492503131e-16;

/// Returns true if `a` and `b` are within `EPSILON` of each other.
#[inline]
pub fn eq(a: Real, b: Real) -> bool {
    (a - b).abs() <= EPSILON
}

/// A 2D point.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: Real,
    pub y: Real,
}

impl Point {
    #[inline]
    pub const fn new(x: Real, y: Real) -> Self {
        Point { x, y }
    }
}

impl From<(Real, Real)> for Point {
    fn from((x, y): (Real, Real)) -> Self {
        Point { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned bounding rectangle.
///
/// The default rectangle is empty (min > max) so that including the first
/// point snaps it to that point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub min_x: Real,
    pub min_y: Real,
    pub max_x: Real,
    pub max_y: Real,
}

impl Rect {
    pub const fn new(min_x: Real, min_y: Real, max_x: Real, max_y: Real) -> Self {
        Rect { min_x, min_y, max_x, max_y }
    }

    pub const fn empty() -> Self {
        Rect {
            min_x: Real::INFINITY,
            min_y: Real::INFINITY,
            max_x: Real::NEG_INFINITY,
            max_y: Real::NEG_INFINITY,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Grow the rectangle to contain `p`.
    pub fn include(&mut self, p: Point) {
        if p.x < self.min_x { self.min_x = p.x; }
        if p.x > self.max_x { self.max_x = p.x; }
        if p.y < self.min_y { self.min_y = p.y; }
        if p.y > self.max_y { self.max_y = p.y; }
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Closed-interval overlap test on both axes. Touching rectangles overlap;
    /// an empty rectangle overlaps nothing.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.max_x < other.min_x || self.min_x > other.max_x)
            && !(self.max_y < other.min_y || self.min_y > other.max_y)
    }

    pub fn width(&self) -> Real {
        if self.is_empty() { 0.0 } else { self.max_x - self.min_x }
    }

    pub fn height(&self) -> Real {
        if self.is_empty() { 0.0 } else { self.max_y - self.min_y }
    }
}

impl Default for Rect {
    fn default() -> Self {
        Rect::empty()
    }
}

/// Signed area of a closed ring (positive when counter-clockwise).
pub fn signed_area(points: &[Point]) -> Real {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    area * 0.5
}

/// Even-odd ray cast. Points exactly on the boundary may land either way.
pub fn ring_contains(points: &[Point], p: Point) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
