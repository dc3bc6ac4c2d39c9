//! Preferred-velocity output sink.
//!
//! Velocity components describe what an agent would like to do as a range of
//! acceptable directions (left/right extent plus a preferred direction), a
//! speed, and the point being walked toward.  The roadmap navigator only
//! ever writes the single-direction form.

use crate::Vec2;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PrefVelocity {
    /// Left-most acceptable direction (unit length, or zero).
    pub left: Vec2,
    /// Right-most acceptable direction (unit length, or zero).
    pub right: Vec2,
    /// Direction the agent would most like to take (unit length, or zero).
    pub preferred: Vec2,
    /// Desired speed along `preferred`.
    pub speed: f32,
    /// Point the agent is currently walking toward.
    pub target: Vec2,
}

impl PrefVelocity {
    /// Collapse the span to a single direction.
    #[inline]
    pub fn set_single(&mut self, dir: Vec2) {
        self.left = dir;
        self.right = dir;
        self.preferred = dir;
    }

    #[inline]
    pub fn set_span(&mut self, left: Vec2, right: Vec2, preferred: Vec2) {
        self.left = left;
        self.right = right;
        self.preferred = preferred;
    }

    #[inline]
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    #[inline]
    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    /// `preferred * speed`.
    #[inline]
    pub fn preferred_velocity(&self) -> Vec2 {
        self.preferred * self.speed
    }

    /// `true` when the span covers more than a single direction.
    #[inline]
    pub fn has_area(&self) -> bool {
        self.left != self.right
    }
}
