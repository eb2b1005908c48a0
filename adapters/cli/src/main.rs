#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Path Defence match.
//!
//! Drives the fixed-step game loop over a built-in demo map and prints a
//! match report composed from the same scene description windowed backends
//! consume.

use anyhow::Context;
use clap::Parser;
use path_defence_core::{DotEffect, Position, RemovalReason, TileCoord, WELCOME_BANNER};
use path_defence_game::{Config, GameLoop};
use path_defence_rendering::{compose_scene, Color, Scene};
use path_defence_system_spawning as spawning;
use path_defence_system_tower_combat::TowerSpec;
use path_defence_world::{query, PathMap};
use rand::Rng;

const GRID_LINE_COLOR: Color = Color::from_rgb_u8(64, 64, 64);

/// Command-line options for a headless match.
#[derive(Debug, Parser)]
#[command(name = "path-defence", about = "Runs a headless Path Defence match")]
struct Args {
    /// Number of fixed simulation steps to run.
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Tick delta fed to each step.
    #[arg(long, default_value_t = 1.0)]
    delta: f32,

    /// Spawn scheduler seed; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Ticks between enemy spawns.
    #[arg(long, default_value_t = 8.0)]
    spawn_interval: f32,

    /// Lives the player starts with.
    #[arg(long, default_value_t = 10)]
    lives: u32,
}

/// Entry point for the Path Defence command-line interface.
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    log::info!("starting match with seed {seed}");

    let map = demo_map().context("demo map failed validation")?;
    let mut game = GameLoop::new(
        map,
        Config::new(
            args.lives,
            0,
            spawning::Config::new(args.spawn_interval, seed),
            demo_towers(),
        ),
    );

    println!("{WELCOME_BANNER}");

    let mut tally = RemovalTally::default();
    let mut elapsed = 0;
    for _ in 0..args.ticks {
        if !game.is_running() {
            break;
        }
        let outcome = game.tick(args.delta);
        tally.absorb(&outcome.removals);
        elapsed += 1;
    }
    game.stop();

    let scene = compose_scene(
        game.path_map(),
        &query::enemy_view(game.enemies()),
        game.data().lives(),
        game.data().resources(),
        GRID_LINE_COLOR,
    );
    print_report(&scene, &tally, elapsed, seed);

    Ok(())
}

/// Snaking three-leg route across a 12x8 grid.
fn demo_map() -> Result<PathMap, path_defence_world::PathMapError> {
    let mut waypoints = Vec::new();
    for column in 0..=5 {
        waypoints.push(TileCoord::new(column, 5));
    }
    for row in (2..5).rev() {
        waypoints.push(TileCoord::new(5, row));
    }
    for column in 6..12 {
        waypoints.push(TileCoord::new(column, 2));
    }
    PathMap::new(12, 8, 32.0, waypoints)
}

/// Fixed roster covering the first leg and the final corner.
fn demo_towers() -> Vec<TowerSpec> {
    vec![
        TowerSpec::new(Position::new(96.0, 128.0), 96.0, 20, 6.0),
        TowerSpec::new(Position::new(224.0, 96.0), 80.0, 8, 4.0).with_dot(DotEffect::new(2, 5)),
    ]
}

#[derive(Debug, Default)]
struct RemovalTally {
    arrived: u32,
    killed: u32,
    offscreen: u32,
}

impl RemovalTally {
    fn absorb(&mut self, removals: &[path_defence_core::Removal]) {
        for removal in removals {
            match removal.reason {
                RemovalReason::ReachedDestination => self.arrived += 1,
                RemovalReason::Killed => self.killed += 1,
                RemovalReason::Offscreen => self.offscreen += 1,
            }
        }
    }
}

fn print_report(scene: &Scene, tally: &RemovalTally, elapsed: u32, seed: u64) {
    println!("match report (seed {seed}, {elapsed} ticks)");
    println!(
        "  map: {}x{} tiles, {} waypoints",
        scene.tile_grid.columns,
        scene.tile_grid.rows,
        scene.tile_grid.route.len()
    );
    println!(
        "  lives: {}  resources: {}  enemies on map: {}",
        scene.hud.lives, scene.hud.resources, scene.hud.enemy_count
    );
    println!(
        "  removals: {} killed, {} arrived, {} offscreen",
        tally.killed, tally.arrived, tally.offscreen
    );
    let verdict = if scene.hud.lives == 0 {
        "defeat"
    } else {
        "holding"
    };
    println!("  verdict: {verdict}");
}
