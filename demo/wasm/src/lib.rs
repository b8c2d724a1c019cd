// Copyright 2025 Lars Brubaker
// WASM bindings for gpc-rust

use gpc_rust::{ClipOption, Clipper, Contour, Operation, Polygon};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main_js() {
    console_error_panic_hook::set_once();
}

/// A stateful clipper: contours are accumulated into a subject and a clip
/// polygon, then combined with `execute`.
#[wasm_bindgen]
pub struct ClipperJs {
    inner: Clipper,
    subject: Polygon,
    clip: Polygon,
    result: Polygon,
}

#[wasm_bindgen]
impl ClipperJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ClipperJs {
        ClipperJs {
            inner: Clipper::new(),
            subject: Polygon::new(),
            clip: Polygon::new(),
            result: Polygon::new(),
        }
    }

    /// Add a subject contour from a flat [x0,y0, x1,y1, ...] array.
    /// Returns false if the polygon refused it.
    pub fn add_subject(&mut self, vertices: &[f64]) -> bool {
        self.subject.add_inner_polygon(contour(vertices)).is_ok()
    }

    /// Add a clip contour from a flat [x0,y0, x1,y1, ...] array.
    /// Returns false if the polygon refused it.
    pub fn add_clip(&mut self, vertices: &[f64]) -> bool {
        self.clip.add_inner_polygon(contour(vertices)).is_ok()
    }

    /// Set an option (0 = ContourPruning, 1 = ReverseContours).
    pub fn set_option(&mut self, option: u32, value: bool) {
        let opt = match option {
            0 => ClipOption::ContourPruning,
            1 => ClipOption::ReverseContours,
            _ => return,
        };
        self.inner.set_option(opt, value);
    }

    /// Run one operation and return true on success.
    /// op: 0=Difference 1=Intersection 2=Xor 3=Union
    pub fn execute(&mut self, op: u8) -> bool {
        let Ok(op) = Operation::try_from(op) else {
            return false;
        };
        match self.inner.clip(op, &self.subject, &self.clip) {
            Ok(result) => {
                self.result = result;
                true
            }
            Err(_) => false,
        }
    }

    /// Drop both inputs and the last result.
    pub fn clear(&mut self) {
        self.subject.clear();
        self.clip.clear();
        self.result.clear();
    }

    pub fn contour_count(&self) -> u32 {
        self.result.num_inner_polygons() as u32
    }

    /// Per-contour header [n0,hole0, n1,hole1, ...]: vertex count then 1 for holes.
    pub fn get_contours(&self) -> Vec<u32> {
        header(&self.result)
    }

    /// Flat vertex positions of every result contour, in contour order.
    pub fn get_vertices(&self) -> Vec<f64> {
        flatten(&self.result)
    }
}

impl Default for ClipperJs {
    fn default() -> Self {
        Self::new()
    }
}

fn contour(vertices: &[f64]) -> Contour {
    Contour::from_points(vertices.chunks_exact(2).map(|v| (v[0], v[1])))
}

fn header(p: &Polygon) -> Vec<u32> {
    p.inner_polygons()
        .flat_map(|c| [c.num_points() as u32, c.is_hole() as u32])
        .collect()
}

fn flatten(p: &Polygon) -> Vec<f64> {
    p.inner_polygons()
        .flat_map(|c| c.points().iter().flat_map(|v| [v.x, v.y]))
        .collect()
}

/// Convenience: clip two single-contour polygons given as flat vertex arrays.
/// Returns the per-contour header followed by the flat vertices, both as f64:
/// [count, n0,hole0, ..., x0,y0, ...]. An unknown op returns an empty array.
#[wasm_bindgen]
pub fn clip_polygons(op: u8, subject: &[f64], clip: &[f64]) -> Vec<f64> {
    let mut c = ClipperJs::new();
    if !c.add_subject(subject) || !c.add_clip(clip) || !c.execute(op) {
        return Vec::new();
    }
    let mut out = vec![c.contour_count() as f64];
    out.extend(c.get_contours().into_iter().map(f64::from));
    out.extend(c.get_vertices());
    out
}
