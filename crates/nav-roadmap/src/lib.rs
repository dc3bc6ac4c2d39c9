//! `nav-roadmap`: roadmap graph, A* search, and path following.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`graph`]    | `RoadmapGraph` (dense vertices + R-tree), `RoadmapGraphBuilder`, `Clearance` |
//! | `loader`     | `RoadmapGraph::load_str` / `load_reader` / `load_file`    |
//! | [`scratch`]  | `SearchScratch`, `ScratchPool`                            |
//! | `heap`       | flat-array A* open set                                    |
//! | `astar`      | the search itself                                         |
//! | [`path`]     | `RoadmapPath`, `Steering`                                 |
//! | [`planner`]  | `PathPlanner` trait, `RoadmapPlanner`, `PathUpdate`       |
//! | [`registry`] | `RoadmapRegistry`: one shared graph per roadmap file      |
//! | [`error`]    | `RoadmapError`, `RoadmapResult<T>`                        |
//!
//! # Concurrency
//!
//! A built graph is immutable and `Sync`.  Searches never lock the graph:
//! each in-flight search borrows its own `SearchScratch` from the graph's
//! [`ScratchPool`], or uses one the caller owns via
//! [`RoadmapGraph::shortest_path_in`].
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Forwards to `nav-core/serde`.                                |

mod astar;
pub mod error;
pub mod graph;
mod heap;
mod loader;
pub mod path;
pub mod planner;
pub mod registry;
pub mod scratch;


pub use error::{RoadmapError, RoadmapResult};
pub use graph::{Clearance, Edge, RoadmapGraph, RoadmapGraphBuilder, Vertex};
pub use path::{RoadmapPath, Steering};
pub use planner::{PathPlanner, PathUpdate, RoadmapPlanner};
pub use registry::RoadmapRegistry;
pub use scratch::{ScratchPool, SearchScratch};
