//! Navigation configuration.

use crate::geo::DEGENERATE_LENGTH;
use crate::{NavError, NavResult};

/// Tunables shared by roadmap search and path following.
///
/// Typically loaded from a JSON file by the application crate (with the
/// `serde` feature) and handed to the roadmap loader.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavConfig {
    /// Number of independent A* scratch blocks to allocate.  `None` sizes the
    /// pool to the Rayon thread count so every worker has its own block.
    pub search_contexts: Option<usize>,

    /// Agent-to-target displacements shorter than this count as "arrived":
    /// steering emits a zero direction instead of normalising.
    pub degenerate_distance: f32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            search_contexts:     None,
            degenerate_distance: DEGENERATE_LENGTH,
        }
    }
}

impl NavConfig {
    /// Reject values that would make search or steering meaningless.
    pub fn validate(&self) -> NavResult<()> {
        if self.search_contexts == Some(0) {
            return Err(NavError::Config("search_contexts must be at least 1".into()));
        }
        if !(self.degenerate_distance.is_finite() && self.degenerate_distance > 0.0) {
            return Err(NavError::Config(format!(
                "degenerate_distance must be finite and positive, got {}",
                self.degenerate_distance
            )));
        }
        Ok(())
    }
}
