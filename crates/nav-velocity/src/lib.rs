//! `nav-velocity`: velocity components and the per-agent path cache.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`component`] | `VelocityComponent` trait                                  |
//! | [`cache`]     | `PathCache` (RW-locked agent → entry map), `CacheEntry`    |
//! | [`navigator`] | `RoadmapNavigator<P>`: roadmap-following component         |
//! | [`zero`]      | `ZeroVelocity`: stand-still component                      |
//! | [`error`]     | `VelocityError`, `VelocityResult<T>`                       |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | Uses `rustc_hash::FxHashMap` for the path cache.           |

pub mod cache;
pub mod component;
pub mod error;
pub mod navigator;
pub mod zero;


pub use cache::{CacheEntry, EntryHandle, PathCache};
pub use component::VelocityComponent;
pub use error::{VelocityError, VelocityResult};
pub use navigator::RoadmapNavigator;
pub use zero::ZeroVelocity;
