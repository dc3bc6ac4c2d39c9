//! `RoadmapNavigator`: roadmap-following velocity component.
//!
//! # Cache lifecycle
//!
//! 1. First `get_preferred_velocity` for an agent misses the cache; the
//!    planner searches and the result is inserted, success or failure.
//! 2. Later calls reuse the entry.  A cached path is steered; a cached
//!    failure returns [`VelocityError::Unreachable`] without searching again.
//! 3. `on_goal_changed` with a moving goal revalidates (and possibly
//!    replaces) the path, or retries a cached failure.
//! 4. `on_agent_exit` drops the entry.
//!
//! Requests with a goal other than the one an entry was computed for replace
//! the entry with a fresh search.

use std::path::Path;
use std::sync::Arc;

use log::debug;

use nav_core::{Agent, AgentId, GoalRef, NavConfig, PrefVelocity, SpatialQuery};
use nav_roadmap::{PathPlanner, PathUpdate, RoadmapPlanner, RoadmapRegistry, Steering};

use crate::cache::{CacheEntry, EntryHandle, PathCache};
use crate::{VelocityComponent, VelocityError, VelocityResult, ZeroVelocity};

/// Velocity component that walks agents along roadmap paths.
///
/// # Type parameter
///
/// `P` is the planner, normally a [`RoadmapPlanner`].  Tests substitute
/// instrumented planners.
pub struct RoadmapNavigator<P: PathPlanner> {
    planner: P,
    cache:   PathCache,
}

impl<P: PathPlanner> RoadmapNavigator<P> {
    pub fn new(planner: P) -> Self {
        Self { planner, cache: PathCache::new() }
    }

    pub fn planner(&self) -> &P {
        &self.planner
    }

    pub fn cache(&self) -> &PathCache {
        &self.cache
    }

    /// Steer `agent` along its cached path toward `goal`, searching first on
    /// a cache miss.
    ///
    /// On failure `out` is set to zero velocity.  The first failure reports
    /// the planner's error; later calls report [`VelocityError::Unreachable`]
    /// from the cache.
    pub fn get_preferred_velocity(
        &self,
        agent: &Agent,
        goal:  &GoalRef,
        out:   &mut PrefVelocity,
    ) -> VelocityResult<Steering> {
        let result = self.steer_cached(agent, goal, out);
        if result.is_err() {
            ZeroVelocity::write(agent, out);
        }
        result
    }

    fn steer_cached(
        &self,
        agent: &Agent,
        goal:  &GoalRef,
        out:   &mut PrefVelocity,
    ) -> VelocityResult<Steering> {
        let handle = match self.cache.get(agent.id) {
            Some(handle) if handle.lock().targets(goal) => handle,
            Some(_) => {
                debug!("{}: goal differs from cached entry; searching again", agent.id);
                self.populate(agent, goal)?
            }
            None => self.populate(agent, goal)?,
        };

        let mut entry = handle.lock();
        match &mut *entry {
            CacheEntry::Ready(path) => Ok(self.planner.steer(agent, path, out)),
            CacheEntry::Unreachable { .. } => Err(VelocityError::Unreachable(agent.id)),
        }
    }

    /// Search and insert the outcome.  The map's write lock is only taken
    /// for the insertion itself.
    fn populate(&self, agent: &Agent, goal: &GoalRef) -> VelocityResult<EntryHandle> {
        match self.planner.find_path(agent, goal) {
            Ok(path) => {
                debug!("{}: cached roadmap path of {} waypoints", agent.id, path.waypoint_count());
                Ok(self.cache.insert(agent.id, CacheEntry::Ready(path)))
            }
            Err(source) => {
                self.cache.insert(agent.id, CacheEntry::Unreachable { goal: Arc::clone(goal) });
                Err(VelocityError::PathNotFound { agent: agent.id, source })
            }
        }
    }

    /// The agent's goal was updated while it stays in this component's state.
    ///
    /// Whether anything happens depends on the goal the entry was computed
    /// for, not on `goal`.  An entry for a static goal keeps its path; a
    /// different goal object is picked up by the next
    /// [`get_preferred_velocity`](Self::get_preferred_velocity).  For a moving
    /// goal the cached path is revalidated and replaced when the goal has
    /// left the sight of its last waypoint; a cached failure is retried.
    /// Agents without an entry are left alone.
    pub fn on_goal_changed(&self, agent: &Agent, goal: &GoalRef) -> VelocityResult<()> {
        let Some(handle) = self.cache.get(agent.id) else {
            return Ok(());
        };

        let mut entry = handle.lock();
        if !entry.goal().is_some_and(|cached| cached.moves()) {
            return Ok(());
        }
        let outcome = match &*entry {
            CacheEntry::Ready(path) if entry.targets(goal) => {
                self.planner.update_path_for_moving_goal(agent, path)
            }
            _ => self.planner.find_path(agent, goal).map(PathUpdate::Replaced),
        };

        match outcome {
            Ok(PathUpdate::Unchanged) => Ok(()),
            Ok(PathUpdate::Replaced(path)) => {
                debug!("{}: replaced path toward moving goal", agent.id);
                *entry = CacheEntry::Ready(path);
                Ok(())
            }
            Err(source) => {
                *entry = CacheEntry::Unreachable { goal: Arc::clone(goal) };
                Err(VelocityError::PathNotFound { agent: agent.id, source })
            }
        }
    }

    /// Drop the agent's entry.  Returns `false` (and changes nothing) if the
    /// agent had none.
    pub fn on_agent_exit(&self, agent: AgentId) -> bool {
        let removed = self.cache.remove(agent).is_some();
        if removed {
            debug!("{agent}: evicted cached path");
        }
        removed
    }
}

impl<Q: SpatialQuery> RoadmapNavigator<RoadmapPlanner<Q>> {
    /// Navigator over the roadmap file at `path`, shared through the
    /// process-wide [`RoadmapRegistry`].
    pub fn from_file(path: impl AsRef<Path>, query: Q, config: &NavConfig) -> VelocityResult<Self> {
        Self::from_registry(RoadmapRegistry::global(), path, query, config)
    }

    /// Like [`from_file`](Self::from_file) with an explicit registry.
    pub fn from_registry(
        registry: &RoadmapRegistry,
        path:     impl AsRef<Path>,
        query:    Q,
        config:   &NavConfig,
    ) -> VelocityResult<Self> {
        let graph = registry.get_or_load(path, config)?;
        let planner = RoadmapPlanner::new(graph, query)
            .with_degenerate_distance(config.degenerate_distance);
        Ok(Self::new(planner))
    }
}

impl<P: PathPlanner> VelocityComponent for RoadmapNavigator<P> {
    fn name(&self) -> &'static str {
        "roadmap"
    }

    fn on_exit(&self, agent: &Agent) {
        self.on_agent_exit(agent.id);
    }

    fn set_pref_velocity(
        &self,
        agent: &Agent,
        goal:  &GoalRef,
        out:   &mut PrefVelocity,
    ) -> VelocityResult<()> {
        self.get_preferred_velocity(agent, goal, out).map(|_| ())
    }

    fn update_goal(&self, agent: &Agent, goal: &GoalRef) -> VelocityResult<()> {
        self.on_goal_changed(agent, goal)
    }
}
