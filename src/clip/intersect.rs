// Copyright 2025 Lars Brubaker
// License: MIT
//
// Crossings inside a scan-beam.
//
// Edges are fed left to right (by xb) into the sorted-edge table (ST),
// which is kept ordered by xt. An incoming edge whose xt is smaller than
// that of an ST entry must cross it somewhere inside the beam; each such
// pair becomes an intersection table (IT) node, ordered by height.

use crate::aet::ActiveEdgeTable;
use crate::edge::{EdgeIdx, EdgeNode, INVALID};
use crate::geom::{Point, Real, EPSILON};
use crate::sweep::{BundleState, ABOVE, CLIP, SUBJ};

/// One crossing. `ie[0]` is left of `ie[1]` at the bottom of the beam.
/// `point.y` is measured from the bottom of the beam.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ItNode {
    pub ie: [EdgeIdx; 2],
    pub point: Point,
}

/// All crossings between bundle heads in the AET over a beam of height `dy`,
/// lowest first. Crossings at equal height keep discovery order.
pub(crate) fn build_intersection_table(
    edges: &[EdgeNode],
    aet: &ActiveEdgeTable,
    dy: Real,
) -> Vec<ItNode> {
    let mut it = Vec::new();
    // Oldest entry first; the walk starts from the back.
    let mut st: Vec<EdgeIdx> = Vec::new();

    let mut e = aet.top_node;
    while e != INVALID {
        let edge = &edges[e as usize];
        if edge.bstate[ABOVE] == BundleState::BundleHead
            || edge.bundle[ABOVE][CLIP] != 0
            || edge.bundle[ABOVE][SUBJ] != 0
        {
            add_st_edge(edges, &mut st, &mut it, e, dy);
        }
        e = edge.next;
    }
    it
}

fn add_st_edge(edges: &[EdgeNode], st: &mut Vec<EdgeIdx>, it: &mut Vec<ItNode>, e: EdgeIdx, dy: Real) {
    let edge = &edges[e as usize];
    let mut pos = st.len();
    while pos > 0 {
        let s = &edges[st[pos - 1] as usize];
        let den = (s.xt - s.xb) - (edge.xt - edge.xb);
        if edge.xt >= s.xt || edge.dx == s.dx || den.abs() <= EPSILON {
            break;
        }
        let r = (edge.xb - s.xb) / den;
        let x = s.xb + r * (s.xt - s.xb);
        let y = r * dy;
        add_intersection(it, st[pos - 1], e, x, y);
        pos -= 1;
    }
    st.insert(pos, e);
}

fn add_intersection(it: &mut Vec<ItNode>, e0: EdgeIdx, e1: EdgeIdx, x: Real, y: Real) {
    let pos = it.partition_point(|n| n.point.y <= y);
    it.insert(pos, ItNode { ie: [e0, e1], point: Point::new(x, y) });
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// A subject edge spanning the beam [0, dy] from xb to xt.
    fn beam_edge(xb: Real, xt: Real, dy: Real) -> EdgeNode {
        let mut e = EdgeNode {
            bot: Point::new(xb, 0.0),
            top: Point::new(xt, dy),
            xb,
            xt,
            dx: (xt - xb) / dy,
            ..EdgeNode::default()
        };
        e.bundle[ABOVE][SUBJ] = 1;
        e
    }

    fn active(edges: &mut [EdgeNode]) -> ActiveEdgeTable {
        let mut aet = ActiveEdgeTable::new();
        for e in 0..edges.len() as EdgeIdx {
            aet.insert(edges, e);
        }
        aet
    }

    #[test]
    fn parallel_edges_do_not_cross() {
        let mut edges = vec![beam_edge(0.0, 1.0, 2.0), beam_edge(3.0, 4.0, 2.0)];
        let aet = active(&mut edges);
        assert!(build_intersection_table(&edges, &aet, 2.0).is_empty());
    }

    #[test]
    fn single_crossing() {
        let mut edges = vec![beam_edge(0.0, 2.0, 2.0), beam_edge(2.0, 0.0, 2.0)];
        let aet = active(&mut edges);
        let it = build_intersection_table(&edges, &aet, 2.0);
        assert_eq!(it.len(), 1);
        assert_eq!(it[0].ie, [0, 1]);
        assert_relative_eq!(it[0].point.x, 1.0);
        assert_relative_eq!(it[0].point.y, 1.0);
    }

    #[test]
    fn crossings_sorted_by_height() {
        // Three edges fanning through each other at different heights.
        let mut edges = vec![
            beam_edge(0.0, 6.0, 6.0),
            beam_edge(2.0, 0.0, 6.0),
            beam_edge(4.0, -1.0, 6.0),
        ];
        let aet = active(&mut edges);
        let it = build_intersection_table(&edges, &aet, 6.0);
        assert_eq!(it.len(), 3);
        assert!(it.windows(2).all(|w| w[0].point.y <= w[1].point.y));
        // Edge 0 meets edge 1 first, at y = 1.5; edges 1 and 2 meet last.
        assert_eq!(it[0].ie, [0, 1]);
        assert_relative_eq!(it[0].point.y, 1.5);
        assert_eq!(it[1].ie, [0, 2]);
        assert_eq!(it[2].ie, [1, 2]);
        assert_relative_eq!(it[2].point.y, 4.0);
    }

    #[test]
    fn empty_edges_are_ignored() {
        let mut edges = vec![beam_edge(0.0, 2.0, 2.0), beam_edge(2.0, 0.0, 2.0)];
        edges[1].bundle[ABOVE][SUBJ] = 0;
        let aet = active(&mut edges);
        assert!(build_intersection_table(&edges, &aet, 2.0).is_empty());
    }
}
