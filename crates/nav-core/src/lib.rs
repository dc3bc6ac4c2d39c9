//! `nav-core`: foundational types for the crowd navigation workspace.
//!
//! Every other `nav-*` crate depends on this one.  It has no `nav-*`
//! dependencies and keeps its external ones small (`thiserror`,
//! `parking_lot`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`ids`]      | `AgentId`, `VertexId`                                     |
//! | [`geo`]      | `Vec2` planar vector                                      |
//! | [`agent`]    | `Agent`, the per-agent kinematic snapshot                 |
//! | [`goal`]     | `Goal` trait, `PointGoal`, `CircleGoal`, `MovingGoal`     |
//! | [`query`]    | `SpatialQuery` visibility oracle, `OpenSpace`, `SegmentObstacles` |
//! | [`velocity`] | `PrefVelocity` preferred-velocity output sink            |
//! | [`config`]   | `NavConfig`                                               |
//! | [`error`]    | `NavError`, `NavResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, `Vec2`, `NavConfig`. |

pub mod agent;
pub mod config;
pub mod error;
pub mod geo;
pub mod goal;
pub mod ids;
pub mod query;
pub mod velocity;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use agent::Agent;
pub use config::NavConfig;
pub use error::{NavError, NavResult};
pub use geo::Vec2;
pub use goal::{CircleGoal, Goal, GoalRef, MovingGoal, PointGoal};
pub use ids::{AgentId, VertexId};
pub use query::{OpenSpace, Segment, SegmentObstacles, SpatialQuery};
pub use velocity::PrefVelocity;
