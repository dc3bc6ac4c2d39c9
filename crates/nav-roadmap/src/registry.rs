//! Shared roadmap resources.
//!
//! Several navigators in one simulation often reference the same roadmap
//! file.  [`RoadmapRegistry`] parses each file once and hands out clones of
//! one `Arc<RoadmapGraph>`, keyed by canonical path.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use log::debug;
use parking_lot::Mutex;

use nav_core::NavConfig;

use crate::graph::RoadmapGraph;
use crate::RoadmapResult;

#[derive(Default)]
pub struct RoadmapRegistry {
    graphs: Mutex<HashMap<PathBuf, Arc<RoadmapGraph>>>,
}

impl RoadmapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry.
    pub fn global() -> &'static RoadmapRegistry {
        static GLOBAL: OnceLock<RoadmapRegistry> = OnceLock::new();
        GLOBAL.get_or_init(RoadmapRegistry::new)
    }

    /// Return the graph loaded from `path`, loading it on first request.
    ///
    /// `config` only applies to the first load of a given file.  Parsing
    /// happens outside the registry lock; if two threads race on the same
    /// file, the first graph inserted wins and both receive it.
    pub fn get_or_load(
        &self,
        path:   impl AsRef<Path>,
        config: &NavConfig,
    ) -> RoadmapResult<Arc<RoadmapGraph>> {
        let key = std::fs::canonicalize(path.as_ref())?;

        if let Some(graph) = self.graphs.lock().get(&key) {
            debug!("roadmap {} already loaded", key.display());
            return Ok(Arc::clone(graph));
        }

        let loaded = Arc::new(RoadmapGraph::load_file(&key, config)?);
        let mut graphs = self.graphs.lock();
        Ok(Arc::clone(graphs.entry(key).or_insert(loaded)))
    }

    /// Drop the registry's handle to `path`.  Navigators already holding the
    /// graph keep it alive.
    pub fn evict(&self, path: impl AsRef<Path>) -> bool {
        match std::fs::canonicalize(path.as_ref()) {
            Ok(key) => self.graphs.lock().remove(&key).is_some(),
            Err(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        self.graphs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.lock().is_empty()
    }
}
