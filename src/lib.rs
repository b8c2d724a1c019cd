// gpc-rust: Pure Rust polygon clipper (intersection, union, xor, difference)
// Copyright 2025 Lars Brubaker
// License: MIT

pub mod aet;
pub mod clip;
pub mod edge;
pub mod error;
pub mod geom;
pub mod polygon;
pub mod scanbeam;
pub mod sweep;

pub use clip::{clip, ClipOption, Clipper, Operation};
pub use error::{ClipError, Result};
pub use geom::{Point, Real, Rect};
pub use polygon::{Contour, ContourAccess, Polygon, PolygonAccess};
