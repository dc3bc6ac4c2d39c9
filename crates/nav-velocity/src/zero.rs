//! A velocity component that keeps agents where they are.

use nav_core::{Agent, GoalRef, PrefVelocity, Vec2};

use crate::{VelocityComponent, VelocityResult};

/// A [`VelocityComponent`] that always asks for zero velocity.
///
/// Useful as a placeholder in tests or for states in which agents wait.
/// The navigator also writes this output for agents with no path.
pub struct ZeroVelocity;

impl ZeroVelocity {
    /// Zero direction and speed, targeting the agent's own position.
    pub fn write(agent: &Agent, out: &mut PrefVelocity) {
        out.set_single(Vec2::ZERO);
        out.set_speed(0.0);
        out.set_target(agent.pos);
    }
}

impl VelocityComponent for ZeroVelocity {
    fn name(&self) -> &'static str {
        "zero"
    }

    fn set_pref_velocity(
        &self,
        agent: &Agent,
        _goal: &GoalRef,
        out:   &mut PrefVelocity,
    ) -> VelocityResult<()> {
        Self::write(agent, out);
        Ok(())
    }
}
