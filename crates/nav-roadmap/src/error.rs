//! Roadmap error type.

use thiserror::Error;

use nav_core::{NavError, Vec2, VertexId};

/// Errors produced by `nav-roadmap`.
///
/// The first group is structural and only arises while loading; a load that
/// hits any of them produces no graph.  The second group is the steady-state
/// "no path" outcome of a query and is expected in crowded or disconnected
/// scenes.
#[derive(Debug, Error)]
pub enum RoadmapError {
    // ── Load-time structure ───────────────────────────────────────────────
    #[error("roadmap parse error: {0}")]
    Parse(String),

    /// `edge` is the 1-based edge record number.
    #[error("edge {edge} references vertex {vertex}, but only {vertex_count} vertices are declared")]
    UnknownVertex {
        edge:         usize,
        vertex:       usize,
        vertex_count: usize,
    },

    #[error("{vertex} declared {declared} edges; attempted to add edge number {attempted}")]
    DegreeExceeded {
        vertex:    VertexId,
        declared:  usize,
        attempted: usize,
    },

    #[error("{vertex} declared {declared} edges; only {assigned} assigned")]
    DegreeMismatch {
        vertex:   VertexId,
        declared: usize,
        assigned: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] NavError),

    // ── Query-time ────────────────────────────────────────────────────────
    #[error("no roadmap vertex is reachable from agent position {0}")]
    NoStartVertex(Vec2),

    #[error("no roadmap vertex has clear sight of goal position {0}")]
    NoGoalVertex(Vec2),

    #[error("no roadmap path from {from} to {to}")]
    NoRoute { from: VertexId, to: VertexId },

    #[error("{0} not found in roadmap")]
    VertexNotFound(VertexId),

    #[error("path update requested for a goal that does not move")]
    GoalNotMoving,
}

impl RoadmapError {
    /// `true` for the "no path" family.  Callers keep the agent idle or retry
    /// later rather than treat it as a fault.
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            RoadmapError::NoStartVertex(_)
                | RoadmapError::NoGoalVertex(_)
                | RoadmapError::NoRoute { .. }
        )
    }
}

pub type RoadmapResult<T> = Result<T, RoadmapError>;
