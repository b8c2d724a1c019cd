// Copyright 2025 Lars Brubaker
// License: MIT
//
// Scan-beam tree: an unbalanced binary search tree of every distinct y at
// which the topology of the active edges may change. Duplicate insertions
// collapse onto the existing node. Once both input polygons have been
// loaded the tree is flattened in order into the ascending scan-beam table.
//
// Nodes live in a Vec arena; child links are u32 indices with INVALID as null.
// Insertion and flattening are iterative, so pathological inputs cannot
// exhaust the stack.

use crate::geom::Real;

pub const INVALID: u32 = u32::MAX;

#[derive(Clone, Debug)]
struct SbNode {
    y: Real,
    less: u32,
    more: u32,
}

#[derive(Clone, Debug, Default)]
pub struct ScanBeamTree {
    nodes: Vec<SbNode>,
}

impl ScanBeamTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct y values recorded.
    pub fn entries(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Record `y`. Returns false if it was already present.
    pub fn insert(&mut self, y: Real) -> bool {
        let new_idx = self.nodes.len() as u32;
        if self.nodes.is_empty() {
            self.nodes.push(SbNode { y, less: INVALID, more: INVALID });
            return true;
        }
        let mut node = 0usize;
        loop {
            let n = &self.nodes[node];
            let child = if y < n.y {
                n.less
            } else if y > n.y {
                n.more
            } else {
                return false;
            };
            if child == INVALID {
                if y < self.nodes[node].y {
                    self.nodes[node].less = new_idx;
                } else {
                    self.nodes[node].more = new_idx;
                }
                self.nodes.push(SbNode { y, less: INVALID, more: INVALID });
                return true;
            }
            node = child as usize;
        }
    }

    /// In-order flattening into the ascending scan-beam table.
    pub fn build_sbt(&self) -> Vec<Real> {
        let mut sbt = Vec::with_capacity(self.nodes.len());
        if self.nodes.is_empty() {
            return sbt;
        }
        let mut stack: Vec<u32> = Vec::new();
        let mut node = 0u32;
        loop {
            while node != INVALID {
                stack.push(node);
                node = self.nodes[node as usize].less;
            }
            match stack.pop() {
                Some(n) => {
                    sbt.push(self.nodes[n as usize].y);
                    node = self.nodes[n as usize].more;
                }
                None => break,
            }
        }
        sbt
    }
}
