//! Velocity component error type.

use nav_core::AgentId;
use nav_roadmap::RoadmapError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VelocityError {
    #[error("{agent} was unable to find a roadmap path to its goal: {source}")]
    PathNotFound {
        agent:  AgentId,
        source: RoadmapError,
    },

    #[error("{0} has no roadmap path to its goal (cached failure)")]
    Unreachable(AgentId),

    #[error(transparent)]
    Roadmap(#[from] RoadmapError),
}

impl VelocityError {
    /// `true` when the agent simply has nowhere to go.  The owning state
    /// machine decides whether and when to retry.
    pub fn is_unreachable(&self) -> bool {
        match self {
            VelocityError::PathNotFound { source, .. } => source.is_unreachable(),
            VelocityError::Unreachable(_) => true,
            VelocityError::Roadmap(e) => e.is_unreachable(),
        }
    }
}

pub type VelocityResult<T> = Result<T, VelocityError>;
