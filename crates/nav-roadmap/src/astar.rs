//! A* over the roadmap.
//!
//! The heuristic is the straight-line distance to the goal vertex.  Every
//! edge weight is itself the straight-line distance between its endpoints, so
//! the heuristic is admissible and consistent and a vertex never needs to be
//! reopened once closed.

use nav_core::VertexId;

use crate::graph::Vertex;
use crate::heap::OpenSet;
use crate::scratch::SearchScratch;

/// Run A* from `start` to `end`.
///
/// Returns the vertex sequence `start ..= end`, or `None` if the open set
/// empties before `end` is reached.  Both ids must be valid indices into
/// `vertices`.
pub(crate) fn search(
    vertices: &[Vertex],
    scratch:  &mut SearchScratch,
    start:    VertexId,
    end:      VertexId,
) -> Option<Vec<VertexId>> {
    let goal_pos = vertices[end.index()].pos();
    let heuristic = |v: VertexId| vertices[v.index()].pos().distance(goal_pos);

    let mut open = OpenSet::new(scratch, vertices.len());
    let h0 = heuristic(start);
    open.set_g(start, 0.0);
    open.set_h(start, h0);
    open.push(start, h0);

    while let Some(current) = open.pop() {
        if current == end {
            return Some(reconstruct(&open, start, end, vertices.len()));
        }

        let g_current = open.g(current);
        for edge in vertices[current.index()].edges() {
            let next = edge.neighbor;
            if open.is_closed(next) {
                continue;
            }

            let in_open = open.is_open(next);
            if !in_open {
                // First sighting: h is computed once and cached.
                open.set_h(next, heuristic(next));
            }

            let tentative_g = g_current + edge.distance;
            if tentative_g < open.g(next) {
                open.set_came_from(next, current);
                open.set_g(next, tentative_g);
                let f = tentative_g + open.h(next);
                if in_open {
                    open.set_f(next, f);
                } else {
                    open.push(next, f);
                }
            }
        }
    }

    None
}

/// Walk predecessor links from `end` back to `start`.
fn reconstruct(open: &OpenSet<'_>, start: VertexId, end: VertexId, limit: usize) -> Vec<VertexId> {
    let mut route = vec![end];
    let mut cur = end;
    while cur != start && route.len() <= limit {
        cur = open.came_from(cur);
        debug_assert!(cur.is_valid(), "broken predecessor chain");
        route.push(cur);
    }
    route.reverse();
    route
}
