//! The per-agent path cache.
//!
//! # Locking
//!
//! One `RwLock` guards the map itself:
//!
//! - lookups take the **read** lock just long enough to clone the entry
//!   handle;
//! - insertion and removal take the **write** lock;
//! - no method holds the read guard while acquiring the write guard, so
//!   there is never a lock upgrade.
//!
//! Each entry sits behind its own `Mutex`.  Calls for one agent are
//! serialised by the caller, so that mutex is uncontended; it exists so a
//! path can be steered (mutated) while only the map's read lock was taken.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use nav_core::{AgentId, GoalRef};
use nav_roadmap::RoadmapPath;

#[cfg(feature = "fx-hash")]
type AgentMap<V> = rustc_hash::FxHashMap<AgentId, V>;

#[cfg(not(feature = "fx-hash"))]
type AgentMap<V> = std::collections::HashMap<AgentId, V>;

// ── CacheEntry ────────────────────────────────────────────────────────────────

/// What the cache knows about one agent.
#[derive(Debug)]
pub enum CacheEntry {
    /// A path the agent is following.
    Ready(RoadmapPath),
    /// The last search toward `goal` failed.  It is not repeated until the
    /// entry is evicted or the goal moves.
    Unreachable { goal: GoalRef },
}

impl CacheEntry {
    /// The goal this entry was computed for.
    pub fn goal(&self) -> Option<&GoalRef> {
        match self {
            CacheEntry::Ready(path) => path.goal(),
            CacheEntry::Unreachable { goal } => Some(goal),
        }
    }

    /// `true` if the entry was computed for this very goal object.
    pub fn targets(&self, goal: &GoalRef) -> bool {
        self.goal().is_some_and(|g| Arc::ptr_eq(g, goal))
    }

    pub fn path(&self) -> Option<&RoadmapPath> {
        match self {
            CacheEntry::Ready(path) => Some(path),
            CacheEntry::Unreachable { .. } => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, CacheEntry::Ready(_))
    }
}

/// Shared handle to one agent's entry.
pub type EntryHandle = Arc<Mutex<CacheEntry>>;

// ── PathCache ─────────────────────────────────────────────────────────────────

/// Concurrent `AgentId → CacheEntry` map.  At most one entry per agent.
#[derive(Default)]
pub struct PathCache {
    entries: RwLock<AgentMap<EntryHandle>>,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone the handle for `agent` under the read lock.
    pub fn get(&self, agent: AgentId) -> Option<EntryHandle> {
        self.entries.read().get(&agent).cloned()
    }

    /// Insert (or replace) the entry for `agent` under the write lock and
    /// return its handle.
    pub fn insert(&self, agent: AgentId, entry: CacheEntry) -> EntryHandle {
        let handle = Arc::new(Mutex::new(entry));
        self.entries.write().insert(agent, Arc::clone(&handle));
        handle
    }

    /// Remove the entry for `agent`, if any, under the write lock.
    pub fn remove(&self, agent: AgentId) -> Option<EntryHandle> {
        self.entries.write().remove(&agent)
    }

    pub fn contains(&self, agent: AgentId) -> bool {
        self.entries.read().contains_key(&agent)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Sorted ids of every cached agent.
    pub fn agents(&self) -> Vec<AgentId> {
        let mut ids: Vec<AgentId> = self.entries.read().keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
