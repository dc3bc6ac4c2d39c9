//! The `VelocityComponent` trait: the seam the behaviour state machine drives.

use nav_core::{Agent, GoalRef, PrefVelocity};

use crate::VelocityResult;

/// Computes an agent's preferred velocity while it sits in one behaviour
/// state.
///
/// The state machine calls [`on_enter`][Self::on_enter] when an agent enters
/// the owning state, [`set_pref_velocity`][Self::set_pref_velocity] once per
/// step, [`update_goal`][Self::update_goal] when the agent's goal changes
/// while it stays in the state, and [`on_exit`][Self::on_exit] when it
/// leaves.  An agent may pass through a state within one step without ever
/// reaching `set_pref_velocity`, so `on_exit` must tolerate agents it has
/// never seen.
///
/// # Thread safety
///
/// Agents are updated in parallel, so implementations must be
/// `Send + Sync`.  Calls concerning one agent are never concurrent with each
/// other.
pub trait VelocityComponent: Send + Sync {
    /// Short identifier used in log lines.
    fn name(&self) -> &'static str;

    /// Default: nothing to prepare.
    fn on_enter(&self, _agent: &Agent) {}

    /// Release per-agent state.  Default: nothing to release.
    fn on_exit(&self, _agent: &Agent) {}

    /// Write the agent's preferred velocity toward `goal` into `out`.
    fn set_pref_velocity(
        &self,
        agent: &Agent,
        goal:  &GoalRef,
        out:   &mut PrefVelocity,
    ) -> VelocityResult<()>;

    /// React to the agent's goal having changed.  Default: no-op.
    fn update_goal(&self, _agent: &Agent, _goal: &GoalRef) -> VelocityResult<()> {
        Ok(())
    }
}
