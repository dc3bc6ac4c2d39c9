//! Roadmap graph representation and builder.
//!
//! # Data layout
//!
//! Vertices live in one dense `Vec` indexed by `VertexId`.  Each vertex owns
//! a boxed slice of half-edges whose length equals the degree it declared at
//! load time; an edge stores the neighbour's `VertexId` and the precomputed
//! Euclidean distance between the endpoints.  Nothing refers to a vertex by
//! address, so the graph can be shared freely once built.
//!
//! The graph is immutable after [`RoadmapGraphBuilder::build`].  The only
//! interior mutability is the A* [`ScratchPool`], which hands each concurrent
//! search its own block of working memory.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over vertex positions drives
//! [`RoadmapGraph::closest_vertex`]: candidates are visited in increasing
//! distance, so the expensive visibility test runs only on vertices that
//! could still beat the current best.

use std::fmt;

use log::{error, info, warn};
use rstar::{AABB, PointDistance, RTree, RTreeObject};

use nav_core::{NavConfig, SpatialQuery, Vec2, VertexId};

use crate::astar;
use crate::path::RoadmapPath;
use crate::scratch::{ScratchPool, SearchScratch};
use crate::{RoadmapError, RoadmapResult};

// ── Vertex / Edge ─────────────────────────────────────────────────────────────

/// Directed half-edge owned by its source vertex.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Edge {
    /// The vertex this half-edge leads to.
    pub neighbor: VertexId,
    /// Euclidean distance between the two endpoints.
    pub distance: f32,
}

/// A roadmap vertex: position plus a fixed-size list of outgoing half-edges.
#[derive(Clone, Debug)]
pub struct Vertex {
    id:    VertexId,
    pos:   Vec2,
    edges: Box<[Edge]>,
}

impl Vertex {
    #[inline]
    pub fn id(&self) -> VertexId {
        self.id
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Number of outgoing half-edges (equals the declared degree).
    #[inline]
    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// Strength of the visibility test used to attach an arbitrary point to the
/// roadmap.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Clearance {
    /// The link only has to be traversible.
    Partial,
    /// The link needs unobstructed line of sight at the agent's radius.
    Full,
}

// ── R-tree vertex entry ───────────────────────────────────────────────────────

#[derive(Clone)]
struct VertexEntry {
    point: [f32; 2],
    id:    VertexId,
}

impl RTreeObject for VertexEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for VertexEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── RoadmapGraph ──────────────────────────────────────────────────────────────

/// Static, immutable roadmap topology and geometry.
///
/// Do not construct directly; use [`RoadmapGraphBuilder`] or one of the
/// `load_*` functions.
pub struct RoadmapGraph {
    vertices:    Vec<Vertex>,
    /// Number of undirected edges loaded (each installed two half-edges).
    edge_count:  usize,
    spatial_idx: RTree<VertexEntry>,
    scratch:     ScratchPool,
}

impl fmt::Debug for RoadmapGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoadmapGraph")
            .field("vertices", &self.vertices.len())
            .field("edges", &self.edge_count)
            .field("search_contexts", &self.scratch.contexts())
            .finish()
    }
}

impl RoadmapGraph {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    // ── Vertex access ─────────────────────────────────────────────────────

    #[inline]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// The pool of A* working-memory blocks owned by this graph.
    pub fn scratch_pool(&self) -> &ScratchPool {
        &self.scratch
    }

    /// A fresh scratch block sized for this graph, for callers that manage
    /// their own per-worker memory and use [`shortest_path_in`](Self::shortest_path_in).
    pub fn new_scratch(&self) -> SearchScratch {
        SearchScratch::new(self.vertex_count())
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Nearest vertex to `point` whose link to `point` passes the `clearance`
    /// test at `radius`.
    ///
    /// Among equally distant qualifying vertices the lowest id wins, which is
    /// what a linear scan keeping only strict improvements would return.
    /// Returns `None` if the graph is empty or no vertex qualifies.
    pub fn closest_vertex<Q: SpatialQuery + ?Sized>(
        &self,
        point:     Vec2,
        radius:    f32,
        clearance: Clearance,
        query:     &Q,
    ) -> Option<VertexId> {
        let probe = [point.x, point.y];
        let mut best: Option<(f32, VertexId)> = None;

        for entry in self.spatial_idx.nearest_neighbor_iter(&probe) {
            let dist_sq = entry.distance_2(&probe);
            if let Some((best_sq, best_id)) = best {
                if dist_sq > best_sq {
                    break;
                }
                // Equidistant: only a lower id may displace the incumbent.
                if entry.id > best_id {
                    continue;
                }
            }
            let pos = self.vertices[entry.id.index()].pos;
            let clear = match clearance {
                Clearance::Full    => query.is_visible(point, pos, radius),
                Clearance::Partial => query.is_traversible(point, pos, radius),
            };
            if clear {
                best = Some((dist_sq, entry.id));
            }
        }

        best.map(|(_, id)| id)
    }

    // ── Search ────────────────────────────────────────────────────────────

    /// Shortest path between two vertices, using a scratch block borrowed
    /// from this graph's pool.
    pub fn shortest_path(&self, start: VertexId, end: VertexId) -> RoadmapResult<RoadmapPath> {
        self.check_vertex(start)?;
        self.check_vertex(end)?;
        self.scratch
            .with_scratch(|scratch| self.search_with(scratch, start, end))
    }

    /// Shortest path between two vertices using caller-owned scratch memory.
    ///
    /// `scratch` is resized if it was built for a different graph.
    pub fn shortest_path_in(
        &self,
        scratch: &mut SearchScratch,
        start:   VertexId,
        end:     VertexId,
    ) -> RoadmapResult<RoadmapPath> {
        self.check_vertex(start)?;
        self.check_vertex(end)?;
        self.search_with(scratch, start, end)
    }

    fn search_with(
        &self,
        scratch: &mut SearchScratch,
        start:   VertexId,
        end:     VertexId,
    ) -> RoadmapResult<RoadmapPath> {
        match astar::search(&self.vertices, scratch, start, end) {
            Some(route) => {
                let waypoints = route.iter().map(|v| self.vertices[v.index()].pos).collect();
                Ok(RoadmapPath::new(route, waypoints))
            }
            None => {
                warn!("unable to find a roadmap path from {start} to {end}");
                Err(RoadmapError::NoRoute { from: start, to: end })
            }
        }
    }

    #[inline]
    fn check_vertex(&self, id: VertexId) -> RoadmapResult<()> {
        if id.index() < self.vertices.len() {
            Ok(())
        } else {
            Err(RoadmapError::VertexNotFound(id))
        }
    }
}

// ── RoadmapGraphBuilder ───────────────────────────────────────────────────────

/// Construct a [`RoadmapGraph`] incrementally, then call [`build`](Self::build).
///
/// Vertices declare their degree up front.  Each [`add_edge`](Self::add_edge)
/// installs a half-edge on both endpoints at their next free slot; adding
/// more edges than a vertex declared fails immediately, and `build` fails if
/// any vertex ends up short.  A failed builder yields no graph.
///
/// # Example
///
/// ```
/// use nav_core::{NavConfig, Vec2};
/// use nav_roadmap::RoadmapGraphBuilder;
///
/// let mut b = RoadmapGraphBuilder::new();
/// let a = b.add_vertex(1, Vec2::new(0.0, 0.0));
/// let c = b.add_vertex(1, Vec2::new(3.0, 4.0));
/// b.add_edge(a, c).unwrap();
/// let graph = b.build(&NavConfig::default()).unwrap();
/// assert_eq!(graph.vertex_count(), 2);
/// assert_eq!(graph.vertex(a).unwrap().edges()[0].distance, 5.0);
/// ```
#[derive(Default)]
pub struct RoadmapGraphBuilder {
    positions:  Vec<Vec2>,
    degrees:    Vec<usize>,
    slots:      Vec<Vec<Edge>>,
    edge_count: usize,
}

impl RoadmapGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for the declared vertex count.
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            positions:  Vec::with_capacity(vertices),
            degrees:    Vec::with_capacity(vertices),
            slots:      Vec::with_capacity(vertices),
            edge_count: 0,
        }
    }

    /// Declare a vertex with `degree` edge slots and return its id
    /// (sequential from 0).
    pub fn add_vertex(&mut self, degree: usize, pos: Vec2) -> VertexId {
        let id = VertexId(self.positions.len() as u32);
        self.positions.push(pos);
        self.degrees.push(degree);
        // `degree` may come straight from a file; slots grow as edges arrive.
        self.slots.push(Vec::new());
        id
    }

    /// Add an undirected edge: a half-edge on `from` toward `to` and one on
    /// `to` toward `from`, both carrying the endpoints' Euclidean distance.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId) -> RoadmapResult<()> {
        let edge = self.edge_count + 1;
        for v in [from, to] {
            if v.index() >= self.positions.len() {
                return Err(RoadmapError::UnknownVertex {
                    edge,
                    vertex:       v.index(),
                    vertex_count: self.positions.len(),
                });
            }
        }

        let distance = self.positions[from.index()].distance(self.positions[to.index()]);
        self.install(from, Edge { neighbor: to, distance })?;
        self.install(to, Edge { neighbor: from, distance })?;
        self.edge_count += 1;
        Ok(())
    }

    fn install(&mut self, at: VertexId, edge: Edge) -> RoadmapResult<()> {
        let declared = self.degrees[at.index()];
        let slots = &mut self.slots[at.index()];
        if slots.len() >= declared {
            error!(
                "{at} declared to have {declared} edges; attempting to add edge number {}",
                slots.len() + 1
            );
            return Err(RoadmapError::DegreeExceeded {
                vertex:    at,
                declared,
                attempted: slots.len() + 1,
            });
        }
        slots.push(edge);
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Validate degrees and produce the immutable graph.
    ///
    /// Every vertex whose assigned edge count falls short of its declared
    /// degree is logged; the first one is returned as the error.
    pub fn build(self, config: &NavConfig) -> RoadmapResult<RoadmapGraph> {
        config.validate()?;

        if let Some(i) = self.positions.iter().position(|p| !p.is_finite()) {
            let vertex = VertexId(i as u32);
            error!("{vertex} has a non-finite position {}", self.positions[i]);
            return Err(RoadmapError::Parse(format!("{vertex} has a non-finite position")));
        }

        let mut first_mismatch = None;
        for (i, (slots, &declared)) in self.slots.iter().zip(&self.degrees).enumerate() {
            if slots.len() != declared {
                let vertex = VertexId(i as u32);
                error!(
                    "{vertex} declared to have {declared} edges; only {} assigned",
                    slots.len()
                );
                if first_mismatch.is_none() {
                    first_mismatch = Some(RoadmapError::DegreeMismatch {
                        vertex,
                        declared,
                        assigned: slots.len(),
                    });
                }
            }
        }
        if let Some(err) = first_mismatch {
            error!("roadmap edges are improperly configured; no roadmap produced");
            return Err(err);
        }

        let vertices: Vec<Vertex> = self
            .positions
            .iter()
            .zip(self.slots)
            .enumerate()
            .map(|(i, (&pos, slots))| Vertex {
                id:    VertexId(i as u32),
                pos,
                edges: slots.into_boxed_slice(),
            })
            .collect();

        let entries: Vec<VertexEntry> = vertices
            .iter()
            .map(|v| VertexEntry { point: [v.pos.x, v.pos.y], id: v.id })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        let contexts = config
            .search_contexts
            .unwrap_or_else(rayon::current_num_threads)
            .max(1);
        let scratch = ScratchPool::new(vertices.len(), contexts);

        info!(
            "loaded roadmap: {} vertices, {} edges; A* scratch cached for {} search contexts",
            vertices.len(),
            self.edge_count,
            contexts
        );

        Ok(RoadmapGraph {
            vertices,
            edge_count: self.edge_count,
            spatial_idx,
            scratch,
        })
    }
}
