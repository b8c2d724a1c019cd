// Copyright 2025 Lars Brubaker
// License: MIT
//
// Active edge table (AET): the edges currently cut by the sweep line, kept
// as a doubly-linked list ordered by xb then dx.
//
// The list threads through the prev/next fields of the edges themselves,
// so every operation takes the edge arena. `top_node` is INVALID when empty.

use crate::edge::{EdgeIdx, EdgeNode, INVALID};
use crate::sweep::{BundleState, ABOVE};

#[derive(Clone, Debug)]
pub struct ActiveEdgeTable {
    pub top_node: EdgeIdx,
}

impl Default for ActiveEdgeTable {
    fn default() -> Self {
        ActiveEdgeTable { top_node: INVALID }
    }
}

impl ActiveEdgeTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.top_node == INVALID
    }

    /// Insert `e` before the first edge it sorts strictly below (xb, then dx).
    /// Ties go after the existing edges.
    pub fn insert(&mut self, edges: &mut [EdgeNode], e: EdgeIdx) {
        let (xb, dx) = (edges[e as usize].xb, edges[e as usize].dx);
        let mut prev = INVALID;
        let mut node = self.top_node;
        while node != INVALID {
            let n = &edges[node as usize];
            if xb < n.xb || (xb == n.xb && dx < n.dx) {
                break;
            }
            prev = node;
            node = n.next;
        }
        self.link(edges, e, prev, node);
    }

    /// Link `e` between `prev` and `next` (either may be INVALID).
    fn link(&mut self, edges: &mut [EdgeNode], e: EdgeIdx, prev: EdgeIdx, next: EdgeIdx) {
        edges[e as usize].prev = prev;
        edges[e as usize].next = next;
        if prev == INVALID {
            self.top_node = e;
        } else {
            edges[prev as usize].next = e;
        }
        if next != INVALID {
            edges[next as usize].prev = e;
        }
    }

    /// Unlink `e`. Its own prev/next are left intact so a walk in progress
    /// can continue from it.
    pub fn remove(&mut self, edges: &mut [EdgeNode], e: EdgeIdx) {
        let prev = edges[e as usize].prev;
        let next = edges[e as usize].next;
        if prev == INVALID {
            self.top_node = next;
        } else {
            edges[prev as usize].next = next;
        }
        if next != INVALID {
            edges[next as usize].prev = prev;
        }
    }

    /// Put `new` in the slot occupied by `old`.
    pub fn replace(&mut self, edges: &mut [EdgeNode], old: EdgeIdx, new: EdgeIdx) {
        let prev = edges[old as usize].prev;
        let next = edges[old as usize].next;
        self.link(edges, new, prev, next);
    }

    /// Exchange the bundle headed by `e0` with the bundle headed by `e1`, its
    /// right-hand neighbour, after the two have crossed. A bundle's tails sit
    /// directly left of its head and travel with it.
    pub fn swap_bundles(&mut self, edges: &mut [EdgeNode], e0: EdgeIdx, e1: EdgeIdx) {
        let mut prev = edges[e0 as usize].prev;
        let next = edges[e1 as usize].next;
        if next != INVALID {
            edges[next as usize].prev = e0;
        }

        if edges[e0 as usize].bstate[ABOVE] == BundleState::BundleHead {
            while prev != INVALID {
                prev = edges[prev as usize].prev;
                if prev == INVALID || edges[prev as usize].bstate[ABOVE] != BundleState::BundleTail {
                    break;
                }
            }
        }

        // First edge of e1's bundle.
        let e1_first = edges[e0 as usize].next;
        if prev == INVALID {
            let top = self.top_node;
            edges[top as usize].prev = e1;
            edges[e1 as usize].next = top;
            self.top_node = e1_first;
        } else {
            let e0_first = edges[prev as usize].next;
            edges[e0_first as usize].prev = e1;
            edges[e1 as usize].next = e0_first;
            edges[prev as usize].next = e1_first;
        }
        edges[e1_first as usize].prev = prev;
        let after_e1 = edges[e1 as usize].next;
        edges[after_e1 as usize].prev = e1;
        edges[e0 as usize].next = next;
    }

    pub fn len(&self, edges: &[EdgeNode]) -> usize {
        let mut n = 0;
        let mut e = self.top_node;
        while e != INVALID {
            n += 1;
            e = edges[e as usize].next;
        }
        n
    }

    /// Edge indices left to right.
    pub fn to_vec(&self, edges: &[EdgeNode]) -> Vec<EdgeIdx> {
        let mut out = Vec::new();
        let mut e = self.top_node;
        while e != INVALID {
            out.push(e);
            e = edges[e as usize].next;
        }
        out
    }
}
