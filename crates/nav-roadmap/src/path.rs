//! Roadmap paths and visibility-driven path following.
//!
//! A [`RoadmapPath`] is the immutable waypoint sequence produced by one A*
//! run plus two pieces of traversal state:
//!
//! - the **target index**, which may run one past the last waypoint, meaning
//!   "head straight for the goal's target point";
//! - the **last valid position**, the most recent agent position from which
//!   the current target was visible.  Steering falls back to it when the
//!   target is lost from sight.
//!
//! [`RoadmapPath::steer`] string-pulls greedily: every call skips ahead to
//! the farthest waypoint that is directly visible from the agent.

use std::fmt;

use nav_core::{Agent, GoalRef, PrefVelocity, SpatialQuery, Vec2, VertexId};

/// Result of one steering step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Steering {
    /// Unit direction toward `target`, or zero when the agent is already there.
    pub direction: Vec2,
    /// Point the agent is walking toward.
    pub target: Vec2,
}

/// A roadmap path plus its traversal state.
#[derive(Clone)]
pub struct RoadmapPath {
    vertices:   Box<[VertexId]>,
    waypoints:  Box<[Vec2]>,
    goal:       Option<GoalRef>,
    target:     usize,
    last_valid: Vec2,
}

impl RoadmapPath {
    /// Build a path from the vertex route of a search and the matching
    /// waypoint positions.  The path targets its first waypoint and has no goal.
    ///
    /// `vertices` and `waypoints` must have the same non-zero length.
    pub(crate) fn new(vertices: Vec<VertexId>, waypoints: Vec<Vec2>) -> Self {
        debug_assert_eq!(vertices.len(), waypoints.len());
        debug_assert!(!waypoints.is_empty());
        let last_valid = waypoints.first().copied().unwrap_or(Vec2::ZERO);
        Self {
            vertices:  vertices.into_boxed_slice(),
            waypoints: waypoints.into_boxed_slice(),
            goal:      None,
            target:    0,
            last_valid,
        }
    }

    /// Tag the path with the goal it leads to.
    pub fn with_goal(mut self, goal: GoalRef) -> Self {
        self.goal = Some(goal);
        self
    }

    /// Start traversal at waypoint `index`.  Indices past the end are clamped
    /// to `waypoint_count()`, the "head for the goal" position.
    pub fn with_target_index(mut self, index: usize) -> Self {
        self.target = index.min(self.waypoints.len());
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn goal(&self) -> Option<&GoalRef> {
        self.goal.as_ref()
    }

    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    pub fn waypoint(&self, i: usize) -> Option<Vec2> {
        self.waypoints.get(i).copied()
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    /// Roadmap vertices the waypoints were taken from, in order.
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Index of the current target; equals `waypoint_count()` once the path
    /// has handed over to the goal.
    pub fn target_index(&self) -> usize {
        self.target
    }

    /// `true` once the agent is heading directly for the goal.
    pub fn is_past_end(&self) -> bool {
        self.target >= self.waypoints.len()
    }

    pub fn last_valid(&self) -> Vec2 {
        self.last_valid
    }

    /// The last roadmap waypoint.
    pub fn final_waypoint(&self) -> Vec2 {
        self.waypoints.last().copied().unwrap_or(self.last_valid)
    }

    /// Total edge distance along the waypoints.
    pub fn length(&self) -> f32 {
        self.waypoints.windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    // ── Steering ──────────────────────────────────────────────────────────

    /// Advance the target as far as visibility allows and return the
    /// direction the agent should take.
    ///
    /// Displacements shorter than `degenerate` produce a zero direction and
    /// leave the target untouched.
    pub fn steer<Q: SpatialQuery + ?Sized>(
        &mut self,
        agent:      &Agent,
        query:      &Q,
        degenerate: f32,
    ) -> Steering {
        let pos = agent.pos;
        let radius = agent.radius;
        let count = self.waypoints.len();

        let final_target = match &self.goal {
            Some(goal) => goal.target_point(pos, radius),
            None => self.final_waypoint(),
        };

        let mut visible = if self.target < count {
            query.is_visible(pos, self.waypoints[self.target], radius)
        } else {
            query.is_visible(pos, final_target, radius)
        };

        // Skip every waypoint that is already in sight.
        let mut next = self.target + 1;
        while next < count && query.is_visible(pos, self.waypoints[next], radius) {
            self.target = next;
            visible = true;
            next += 1;
        }

        if count > 0 && self.target == count - 1 && query.is_visible(pos, final_target, radius) {
            self.target = count;
            visible = true;
        }

        let target = if !visible {
            self.last_valid
        } else if self.target < count {
            self.last_valid = pos;
            self.waypoints[self.target]
        } else {
            self.last_valid = pos;
            final_target
        };

        let direction = (target - pos)
            .normalized_or_degenerate(degenerate)
            .unwrap_or(Vec2::ZERO);

        Steering { direction, target }
    }

    /// [`steer`](Self::steer), written into a preferred-velocity sink at the
    /// agent's preferred speed.
    pub fn set_pref_direction<Q: SpatialQuery + ?Sized>(
        &mut self,
        agent:      &Agent,
        query:      &Q,
        degenerate: f32,
        out:        &mut PrefVelocity,
    ) -> Steering {
        let steering = self.steer(agent, query, degenerate);
        out.set_single(steering.direction);
        out.set_target(steering.target);
        out.set_speed(agent.pref_speed);
        steering
    }
}

impl fmt::Debug for RoadmapPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoadmapPath")
            .field("vertices", &self.vertices)
            .field("waypoints", &self.waypoints)
            .field("has_goal", &self.goal.is_some())
            .field("target", &self.target)
            .field("last_valid", &self.last_valid)
            .finish()
    }
}
