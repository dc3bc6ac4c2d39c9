//! Goal regions as seen by the navigation layer.
//!
//! Goal geometry belongs to the behaviour layer; navigation only needs three
//! answers from a goal: where its centroid is, which point an agent standing
//! at `q` should walk toward, and whether the goal can move.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::Vec2;

/// Contract every goal region exposes to the navigation layer.
///
/// Implementations must be `Send + Sync`: the same goal is queried from
/// every worker thread that updates an agent pursuing it.
pub trait Goal: Send + Sync {
    /// Representative point of the region.  Roadmap searches connect the goal
    /// to the vertex nearest this point.
    fn centroid(&self) -> Vec2;

    /// The point an agent at `query` with body `radius` should head for.
    fn target_point(&self, _query: Vec2, _radius: f32) -> Vec2 {
        self.centroid()
    }

    /// `true` if the region can relocate over time.  Paths toward moving goals
    /// are revalidated when the goal changes.
    fn moves(&self) -> bool {
        false
    }
}

/// Shared handle to a goal.  Paths keep one so steering can query the goal's
/// current target point.
pub type GoalRef = Arc<dyn Goal>;

impl fmt::Debug for dyn Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Goal")
            .field("centroid", &self.centroid())
            .field("moves", &self.moves())
            .finish()
    }
}

// ── PointGoal ─────────────────────────────────────────────────────────────────

/// A fixed point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointGoal(pub Vec2);

impl Goal for PointGoal {
    fn centroid(&self) -> Vec2 {
        self.0
    }
}

// ── CircleGoal ────────────────────────────────────────────────────────────────

/// A fixed disk.  Agents aim for the nearest point at which their whole body
/// fits inside the disk.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CircleGoal {
    pub center: Vec2,
    pub radius: f32,
}

impl CircleGoal {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl Goal for CircleGoal {
    fn centroid(&self) -> Vec2 {
        self.center
    }

    fn target_point(&self, query: Vec2, radius: f32) -> Vec2 {
        let slack = self.radius - radius;
        if slack <= 0.0 {
            return self.center;
        }
        let disp = query - self.center;
        let dist_sq = disp.length_sq();
        if dist_sq < slack * slack {
            query
        } else {
            self.center + disp * (slack / dist_sq.sqrt())
        }
    }
}

// ── MovingGoal ────────────────────────────────────────────────────────────────

/// A point goal whose position is driven from outside (e.g. by following
/// another agent).  Reads and writes go through `&self` so one handle can be
/// shared between the driver and every path that targets it.
#[derive(Debug, Default)]
pub struct MovingGoal {
    pos: RwLock<Vec2>,
}

impl MovingGoal {
    pub fn new(pos: Vec2) -> Self {
        Self { pos: RwLock::new(pos) }
    }

    /// Relocate the goal.
    pub fn set_position(&self, pos: Vec2) {
        *self.pos.write() = pos;
    }
}

impl Goal for MovingGoal {
    fn centroid(&self) -> Vec2 {
        *self.pos.read()
    }

    fn moves(&self) -> bool {
        true
    }
}
