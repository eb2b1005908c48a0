#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting enemy spawn
//! requests.
//!
//! The scheduler converts elapsed simulation ticks into zero or more spawn
//! requests per tick and selects archetypes with a seeded RNG, so identical
//! seeds replay identical waves.

use path_defence_core::EnemyKind;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    spawn_interval_ticks: f32,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided spawn cadence and seed.
    #[must_use]
    pub const fn new(spawn_interval_ticks: f32, rng_seed: u64) -> Self {
        Self {
            spawn_interval_ticks,
            rng_seed,
        }
    }
}

/// Pure system that deterministically emits spawn requests.
#[derive(Clone, Debug)]
pub struct Spawning {
    spawn_interval_ticks: f32,
    accumulator: f32,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            spawn_interval_ticks: config.spawn_interval_ticks,
            accumulator: 0.0,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Accumulates elapsed ticks and emits one spawn request per elapsed
    /// interval. A non-positive interval disables spawning entirely.
    pub fn handle(&mut self, delta_ticks: f32, out: &mut Vec<EnemyKind>) {
        if self.spawn_interval_ticks <= 0.0 {
            return;
        }

        self.accumulator += delta_ticks.max(0.0);
        while self.accumulator >= self.spawn_interval_ticks {
            self.accumulator -= self.spawn_interval_ticks;
            out.push(self.next_kind());
        }
    }

    fn next_kind(&mut self) -> EnemyKind {
        let index = self.rng.gen_range(0..EnemyKind::ALL.len());
        EnemyKind::ALL[index]
    }
}
