//! Per-agent kinematic snapshot consumed by the navigation layer.

use crate::{AgentId, Vec2};

/// What the navigation layer needs to know about one agent at one instant.
///
/// The simulation owns the authoritative agent state; it hands the
/// navigator a copy each time it asks for a preferred velocity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Agent {
    /// Stable id.  Path caches are keyed on this.
    pub id: AgentId,
    /// Current world-space position.
    pub pos: Vec2,
    /// Body radius, used as the clearance for every visibility query.
    pub radius: f32,
    /// Preferred walking speed (world units per second).
    pub pref_speed: f32,
}

impl Agent {
    #[inline]
    pub fn new(id: AgentId, pos: Vec2, radius: f32, pref_speed: f32) -> Self {
        Self { id, pos, radius, pref_speed }
    }

    /// Copy of `self` relocated to `pos`.
    #[inline]
    pub fn at(self, pos: Vec2) -> Self {
        Self { pos, ..self }
    }
}
