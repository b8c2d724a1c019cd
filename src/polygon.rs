// Copyright 2025 Lars Brubaker
// License: MIT
//
// Polygon containers and the access traits the clip engine is generic over.
//
// The engine only ever reads contours through `ContourAccess` and builds its
// result through `PolygonAccess::push_contour` on a `Default` instance, so a
// caller picks the result representation statically by choosing `P`.

use std::cell::Cell;

use crate::clip::{Clipper, Operation};
use crate::error::{ClipError, Result};
use crate::geom::{ring_contains, signed_area, Point, Real, Rect};

/// Read access to one closed contour.
pub trait ContourAccess {
    fn num_points(&self) -> usize;
    fn x(&self, index: usize) -> Real;
    fn y(&self, index: usize) -> Real;
    fn is_hole(&self) -> bool;

    /// A contour reporting `false` is left out of the next clip only; the
    /// engine then sets the flag back with `set_contributing(true)`.
    fn is_contributing(&self) -> bool {
        true
    }

    /// Called by the engine to re-arm a skipped contour. Containers without
    /// a contributing flag can ignore it.
    fn set_contributing(&self, _contributing: bool) {}

    fn bounds(&self) -> Rect {
        let mut r = Rect::empty();
        for i in 0..self.num_points() {
            r.include(Point::new(self.x(i), self.y(i)));
        }
        r
    }
}

/// A collection of contours that can be clipped and can receive a result.
///
/// `Default` must produce an empty polygon of the same kind.
pub trait PolygonAccess: Default {
    type Inner: ContourAccess;

    fn num_inner_polygons(&self) -> usize;
    fn inner_polygon(&self, index: usize) -> &Self::Inner;

    fn is_empty(&self) -> bool {
        self.num_inner_polygons() == 0
    }

    /// Append a finished contour. Used only when exporting a clip result.
    fn push_contour(&mut self, points: Vec<Point>, hole: bool) -> Result<()>;
}

// ─────────────────────────────── Contour ──────────────────────────────────────

/// A simple polygon: one ordered ring of vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    points: Vec<Point>,
    hole: bool,
    contributing: Cell<bool>,
}

impl Default for Contour {
    fn default() -> Self {
        Contour { points: Vec::new(), hole: false, contributing: Cell::new(true) }
    }
}

impl Contour {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points<I, T>(points: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Point>,
    {
        Contour {
            points: points.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn add_point(&mut self, x: Real, y: Real) {
        self.points.push(Point::new(x, y));
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn point(&self, index: usize) -> Point {
        self.points[index]
    }

    pub fn is_hole(&self) -> bool {
        self.hole
    }

    pub fn set_is_hole(&mut self, hole: bool) {
        self.hole = hole;
    }

    pub fn is_contributing(&self) -> bool {
        self.contributing.get()
    }

    /// Clear to leave this contour out of the next clip it takes part in.
    pub fn set_contributing(&self, contributing: bool) {
        self.contributing.set(contributing);
    }

    pub fn bounds(&self) -> Rect {
        let mut r = Rect::empty();
        for &p in &self.points {
            r.include(p);
        }
        r
    }

    /// Signed shoelace area; positive for counter-clockwise rings.
    pub fn signed_area(&self) -> Real {
        signed_area(&self.points)
    }

    /// Unsigned enclosed area.
    pub fn area(&self) -> Real {
        self.signed_area().abs()
    }

    pub fn contains_point(&self, p: Point) -> bool {
        ring_contains(&self.points, p)
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl ContourAccess for Contour {
    fn num_points(&self) -> usize {
        self.points.len()
    }
    fn x(&self, index: usize) -> Real {
        self.points[index].x
    }
    fn y(&self, index: usize) -> Real {
        self.points[index].y
    }
    fn is_hole(&self) -> bool {
        self.hole
    }
    fn is_contributing(&self) -> bool {
        self.contributing.get()
    }
    fn set_contributing(&self, contributing: bool) {
        self.contributing.set(contributing);
    }
    fn bounds(&self) -> Rect {
        Contour::bounds(self)
    }
}

impl PolygonAccess for Contour {
    type Inner = Contour;

    fn num_inner_polygons(&self) -> usize {
        if self.points.is_empty() { 0 } else { 1 }
    }

    fn inner_polygon(&self, index: usize) -> &Contour {
        assert_eq!(index, 0, "a simple polygon has a single contour");
        self
    }

    fn push_contour(&mut self, points: Vec<Point>, hole: bool) -> Result<()> {
        if !self.points.is_empty() {
            return Err(ClipError::SimplePolygonOverflow);
        }
        self.points = points;
        self.hole = hole;
        Ok(())
    }
}

// ─────────────────────────────── Polygon ──────────────────────────────────────

/// A polygon made of any number of contours, some of which may be holes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    contours: Vec<Contour>,
    hole: bool,
}

impl Polygon {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single-contour polygon.
    pub fn from_points<I, T>(points: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Point>,
    {
        Polygon { contours: vec![Contour::from_points(points)], hole: false }
    }

    /// Add a point to the first contour, creating it if needed.
    pub fn add_point(&mut self, x: Real, y: Real) {
        if self.contours.is_empty() {
            self.contours.push(Contour::new());
        }
        self.contours[0].add_point(x, y);
    }

    pub fn add_inner_polygon(&mut self, contour: Contour) -> Result<()> {
        if self.hole && !self.contours.is_empty() {
            return Err(ClipError::HoleComposition);
        }
        self.contours.push(contour);
        Ok(())
    }

    pub fn num_inner_polygons(&self) -> usize {
        self.contours.len()
    }

    pub fn inner_polygon(&self, index: usize) -> Option<&Contour> {
        self.contours.get(index)
    }

    pub fn inner_polygons(&self) -> impl Iterator<Item = &Contour> {
        self.contours.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    pub fn is_hole(&self) -> Result<bool> {
        if self.contours.len() > 1 {
            return Err(ClipError::ComplexPolygon { operation: "is_hole" });
        }
        Ok(self.hole)
    }

    pub fn set_is_hole(&mut self, hole: bool) -> Result<()> {
        if self.contours.len() > 1 {
            return Err(ClipError::ComplexPolygon { operation: "set_is_hole" });
        }
        self.hole = hole;
        Ok(())
    }

    /// Set the contributing flag of contour `index`. Returns `None` if there
    /// is no such contour.
    pub fn set_contributing(&mut self, index: usize, contributing: bool) -> Option<()> {
        self.contours.get(index)?.set_contributing(contributing);
        Some(())
    }

    /// Bounding rectangle over every contour.
    pub fn bounds(&self) -> Rect {
        self.contours
            .iter()
            .fold(Rect::empty(), |acc, c| acc.union(&c.bounds()))
    }

    /// Enclosed area: non-hole contours count positive, holes negative.
    pub fn area(&self) -> Real {
        self.contours
            .iter()
            .map(|c| if c.is_hole() { -c.area() } else { c.area() })
            .sum()
    }

    /// Inside the first contour and outside every hole.
    pub fn contains_point(&self, p: Point) -> bool {
        match self.contours.first() {
            Some(outer) if outer.contains_point(p) => !self
                .contours
                .iter()
                .any(|c| c.is_hole() && c.contains_point(p)),
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.contours.clear();
    }

    pub fn intersection(&self, other: &Polygon) -> Result<Polygon> {
        Clipper::new().clip(Operation::Intersection, self, other)
    }

    pub fn union(&self, other: &Polygon) -> Result<Polygon> {
        Clipper::new().clip(Operation::Union, self, other)
    }

    pub fn xor(&self, other: &Polygon) -> Result<Polygon> {
        Clipper::new().clip(Operation::Xor, self, other)
    }

    /// `self` with the area of `other` removed.
    pub fn difference(&self, other: &Polygon) -> Result<Polygon> {
        Clipper::new().clip(Operation::Difference, self, other)
    }
}

impl PolygonAccess for Polygon {
    type Inner = Contour;

    fn num_inner_polygons(&self) -> usize {
        self.contours.len()
    }

    fn inner_polygon(&self, index: usize) -> &Contour {
        &self.contours[index]
    }

    fn push_contour(&mut self, points: Vec<Point>, hole: bool) -> Result<()> {
        let mut contour = Contour::from_points(points);
        contour.set_is_hole(hole);
        self.add_inner_polygon(contour)
    }
}

impl std::fmt::Display for Polygon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, c) in self.contours.iter().enumerate() {
            write!(f, "InnerPoly({}).hole={}", i, c.is_hole())?;
            for p in c.points() {
                write!(f, " {}", p)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
