//! Agent-level path planning.
//!
//! # Pluggability
//!
//! The navigator calls planning through the [`PathPlanner`] trait, so tests
//! and applications can substitute instrumented or alternative planners
//! without touching the cache logic.  The default [`RoadmapPlanner`] binds a
//! shared [`RoadmapGraph`] to a visibility oracle.

use std::sync::Arc;

use log::warn;

use nav_core::{Agent, GoalRef, NavConfig, PrefVelocity, SpatialQuery};

use crate::graph::{Clearance, RoadmapGraph};
use crate::path::{RoadmapPath, Steering};
use crate::{RoadmapError, RoadmapResult};

// ── PathUpdate ────────────────────────────────────────────────────────────────

/// Outcome of revalidating a path toward a moving goal.
#[derive(Debug)]
pub enum PathUpdate {
    /// The goal is still visible from the path's last waypoint; keep the path.
    Unchanged,
    /// A fresh search produced a replacement.
    Replaced(RoadmapPath),
}

// ── PathPlanner trait ─────────────────────────────────────────────────────────

/// Plans and follows paths for individual agents.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`: one planner serves every worker
/// thread that updates agents.
pub trait PathPlanner: Send + Sync {
    /// Connect the agent and the goal to the roadmap and search between them.
    /// The returned path is tagged with `goal`.
    fn find_path(&self, agent: &Agent, goal: &GoalRef) -> RoadmapResult<RoadmapPath>;

    /// Revalidate `path` after its (moving) goal relocated.
    ///
    /// Fails with [`RoadmapError::GoalNotMoving`] if the path's goal is absent
    /// or does not move, and with the usual "no path" errors if a replacement
    /// was needed but could not be found.
    fn update_path_for_moving_goal(
        &self,
        agent: &Agent,
        path:  &RoadmapPath,
    ) -> RoadmapResult<PathUpdate>;

    /// Advance `path` for the agent's current position and write the resulting
    /// preferred velocity.
    fn steer(&self, agent: &Agent, path: &mut RoadmapPath, out: &mut PrefVelocity) -> Steering;
}

// ── RoadmapPlanner ────────────────────────────────────────────────────────────

/// [`PathPlanner`] over a shared roadmap and a visibility oracle.
pub struct RoadmapPlanner<Q> {
    graph:       Arc<RoadmapGraph>,
    query:       Q,
    degenerate:  f32,
}

impl<Q: SpatialQuery> RoadmapPlanner<Q> {
    pub fn new(graph: Arc<RoadmapGraph>, query: Q) -> Self {
        Self {
            graph,
            query,
            degenerate: NavConfig::default().degenerate_distance,
        }
    }

    /// Override the "arrived" threshold used by steering.
    pub fn with_degenerate_distance(mut self, distance: f32) -> Self {
        self.degenerate = distance;
        self
    }

    pub fn graph(&self) -> &Arc<RoadmapGraph> {
        &self.graph
    }

    pub fn query(&self) -> &Q {
        &self.query
    }
}

impl<Q: SpatialQuery> PathPlanner for RoadmapPlanner<Q> {
    fn find_path(&self, agent: &Agent, goal: &GoalRef) -> RoadmapResult<RoadmapPath> {
        let Some(start) =
            self.graph.closest_vertex(agent.pos, agent.radius, Clearance::Partial, &self.query)
        else {
            warn!("{}: no roadmap vertex reachable from {}", agent.id, agent.pos);
            return Err(RoadmapError::NoStartVertex(agent.pos));
        };

        let centroid = goal.centroid();
        let Some(end) =
            self.graph.closest_vertex(centroid, agent.radius, Clearance::Full, &self.query)
        else {
            warn!("{}: no roadmap vertex can see goal at {}", agent.id, centroid);
            return Err(RoadmapError::NoGoalVertex(centroid));
        };

        Ok(self.graph.shortest_path(start, end)?.with_goal(Arc::clone(goal)))
    }

    fn update_path_for_moving_goal(
        &self,
        agent: &Agent,
        path:  &RoadmapPath,
    ) -> RoadmapResult<PathUpdate> {
        let goal = match path.goal() {
            Some(goal) if goal.moves() => goal,
            _ => return Err(RoadmapError::GoalNotMoving),
        };

        let last = path.final_waypoint();
        if self.query.is_visible(last, goal.centroid(), agent.radius) {
            Ok(PathUpdate::Unchanged)
        } else {
            self.find_path(agent, goal).map(PathUpdate::Replaced)
        }
    }

    fn steer(&self, agent: &Agent, path: &mut RoadmapPath, out: &mut PrefVelocity) -> Steering {
        path.set_pref_direction(agent, &self.query, self.degenerate, out)
    }
}
