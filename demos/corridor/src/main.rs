//! corridor: agents cross from one room to another around a dividing wall.
//!
//! The scene is a 20 × 10 box split by a wall at x = 10 that leaves a gap
//! above y = 7.  Agents spawn in the left room and head for a circular goal
//! in the right room, following the roadmap in `data/corridor.roadmap`.
//!
//! ```text
//! cargo run -p corridor [-- <roadmap> [<nav-config.json>]]
//! ```
//!
//! Set `RUST_LOG=debug` to see per-agent cache activity.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use nav_core::{Agent, AgentId, CircleGoal, GoalRef, NavConfig, PrefVelocity, SegmentObstacles, Vec2};
use nav_velocity::{RoadmapNavigator, VelocityComponent};

// ── Constants ─────────────────────────────────────────────────────────────────

const AGENT_COUNT:  usize = 200;
const SEED:         u64   = 42;
const TIME_STEP:    f32   = 0.1;
const MAX_STEPS:    usize = 1_000;
const LOG_INTERVAL: usize = 100;
const AGENT_RADIUS: f32   = 0.3;

// ── Scene ─────────────────────────────────────────────────────────────────────

fn obstacles() -> SegmentObstacles {
    let mut walls = SegmentObstacles::new();
    walls.push_polygon(&[
        Vec2::new(0.0, 0.0),
        Vec2::new(20.0, 0.0),
        Vec2::new(20.0, 10.0),
        Vec2::new(0.0, 10.0),
    ]);
    // Dividing wall; the gap is above its top end.
    walls.push(Vec2::new(10.0, 0.0), Vec2::new(10.0, 7.0));
    walls
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Status {
    Walking,
    Arrived,
    Stuck,
}

struct Walker {
    agent:  Agent,
    status: Status,
}

fn spawn(count: usize, seed: u64) -> Vec<Walker> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let pos = Vec2::new(rng.gen_range(1.0..8.0), rng.gen_range(1.0..6.0));
            let pref_speed = rng.gen_range(1.1..1.5);
            Walker {
                agent:  Agent::new(AgentId(i as u32), pos, AGENT_RADIUS, pref_speed),
                status: Status::Walking,
            }
        })
        .collect()
}

fn load_config(path: Option<PathBuf>) -> Result<NavConfig> {
    let Some(path) = path else {
        return Ok(NavConfig::default());
    };
    let file = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
    let config: NavConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let roadmap = args
        .next()
        .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data/corridor.roadmap")));
    let config = load_config(args.next())?;

    println!("=== corridor: roadmap navigation ===");
    println!("Agents: {AGENT_COUNT}  |  Seed: {SEED}  |  dt: {TIME_STEP} s");
    println!();

    // 1. Scene and navigator.
    let walls = Arc::new(obstacles());
    let navigator = RoadmapNavigator::from_file(&roadmap, Arc::clone(&walls), &config)
        .with_context(|| format!("loading roadmap {}", roadmap.display()))?;
    let component: &dyn VelocityComponent = &navigator;
    println!(
        "Roadmap: {} vertices, {} edges  |  obstacles: {} segments",
        navigator.planner().graph().vertex_count(),
        navigator.planner().graph().edge_count(),
        walls.len()
    );

    let goal_region = CircleGoal::new(Vec2::new(17.0, 3.0), 1.5);
    let goal: GoalRef = Arc::new(goal_region);

    // 2. Agents.
    let mut walkers = spawn(AGENT_COUNT, SEED);
    for w in &walkers {
        component.on_enter(&w.agent);
    }

    // 3. Step until everyone has arrived or given up.
    let t0 = Instant::now();
    let mut steps = 0;
    while steps < MAX_STEPS && walkers.iter().any(|w| w.status == Status::Walking) {
        walkers.par_iter_mut().filter(|w| w.status == Status::Walking).for_each(|w| {
            if w.agent.pos.distance(goal_region.center) <= goal_region.radius {
                w.status = Status::Arrived;
                component.on_exit(&w.agent);
                return;
            }

            let mut pref = PrefVelocity::default();
            match component.set_pref_velocity(&w.agent, &goal, &mut pref) {
                Ok(()) => w.agent.pos += pref.preferred_velocity() * TIME_STEP,
                Err(e) if e.is_unreachable() => w.status = Status::Stuck,
                Err(e) => {
                    warn!("{}: {e}", w.agent.id);
                    w.status = Status::Stuck;
                }
            }
        });

        steps += 1;
        if steps % LOG_INTERVAL == 0 {
            info!(
                "step {steps}: {} walking, {} arrived, {} cached paths",
                walkers.iter().filter(|w| w.status == Status::Walking).count(),
                walkers.iter().filter(|w| w.status == Status::Arrived).count(),
                navigator.cache().len()
            );
        }
    }
    let elapsed = t0.elapsed();

    // 4. Summary.
    let count = |s: Status| walkers.iter().filter(|w| w.status == s).count();
    println!();
    println!("Finished after {steps} steps ({:.1} s simulated) in {:.3} s", steps as f32 * TIME_STEP, elapsed.as_secs_f64());
    println!("{:<10} {:>6}", "Status", "Agents");
    println!("{}", "-".repeat(17));
    println!("{:<10} {:>6}", "arrived", count(Status::Arrived));
    println!("{:<10} {:>6}", "walking", count(Status::Walking));
    println!("{:<10} {:>6}", "stuck", count(Status::Stuck));
    println!("Paths still cached: {}", navigator.cache().len());

    Ok(())
}
