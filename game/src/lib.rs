#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-step orchestration of the Path Defence simulation.
//!
//! The [`GameLoop`] owns every piece of per-match state: the path map, the
//! enemy manager, the spawning and tower combat systems, and the player's
//! lives and resources. Each [`GameLoop::tick`] call runs one simulation
//! step in a fixed order, so identical inputs replay identical matches.

use path_defence_core::{EnemyKind, TickOutcome};
use path_defence_system_spawning::{self as spawning, Spawning};
use path_defence_system_tower_combat::{AttackCommand, TowerCombat, TowerSpec};
use path_defence_world::{query, EnemyManager, PathMap};

/// Player-facing match state: remaining lives and spendable resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameData {
    lives: u32,
    resources: u32,
}

impl GameData {
    /// Lives remaining before defeat.
    #[must_use]
    pub const fn lives(&self) -> u32 {
        self.lives
    }

    /// Resources earned from kills.
    #[must_use]
    pub const fn resources(&self) -> u32 {
        self.resources
    }
}

/// Initial match parameters.
#[derive(Clone, Debug)]
pub struct Config {
    starting_lives: u32,
    starting_resources: u32,
    spawning: spawning::Config,
    towers: Vec<TowerSpec>,
}

impl Config {
    /// Creates a match configuration.
    #[must_use]
    pub fn new(
        starting_lives: u32,
        starting_resources: u32,
        spawning: spawning::Config,
        towers: Vec<TowerSpec>,
    ) -> Self {
        Self {
            starting_lives,
            starting_resources,
            spawning,
            towers,
        }
    }
}

/// Owns the full simulation state and advances it one fixed step at a time.
#[derive(Debug)]
pub struct GameLoop {
    map: PathMap,
    enemies: EnemyManager,
    spawning: Spawning,
    combat: TowerCombat,
    data: GameData,
    running: bool,
    spawn_requests: Vec<EnemyKind>,
    attacks: Vec<AttackCommand>,
}

impl GameLoop {
    /// Creates a running game loop over the provided map.
    #[must_use]
    pub fn new(map: PathMap, config: Config) -> Self {
        Self {
            map,
            enemies: EnemyManager::new(),
            spawning: Spawning::new(config.spawning),
            combat: TowerCombat::new(config.towers),
            data: GameData {
                lives: config.starting_lives,
                resources: config.starting_resources,
            },
            running: true,
            spawn_requests: Vec::new(),
            attacks: Vec::new(),
        }
    }

    /// Advances the simulation by `delta_ticks` fixed-step ticks.
    ///
    /// Runs, in order: spawning, tower targeting, damage application, then
    /// the enemy update that moves, classifies, and removes. Lives and
    /// resources change exactly once per tick from the returned
    /// [`TickOutcome`]. A stopped loop is inert and returns an empty
    /// outcome.
    pub fn tick(&mut self, delta_ticks: f32) -> TickOutcome {
        if !self.running {
            return TickOutcome::default();
        }
        let delta_ticks = delta_ticks.max(0.0);

        self.spawn_requests.clear();
        self.spawning.handle(delta_ticks, &mut self.spawn_requests);
        for kind in self.spawn_requests.drain(..) {
            let _ = self.enemies.spawn(kind, &self.map);
        }

        self.attacks.clear();
        let view = query::enemy_view(&self.enemies);
        self.combat.handle(delta_ticks, &view, &mut self.attacks);
        for attack in self.attacks.drain(..) {
            let _ = self.enemies.apply_damage(attack.target, attack.damage);
            if let Some(dot) = attack.dot {
                let _ = self.enemies.apply_dot(attack.target, dot);
            }
        }

        let outcome = self.enemies.update(delta_ticks, &self.map);
        self.data.lives = self.data.lives.saturating_sub(outcome.lives_lost);
        self.data.resources = self.data.resources.saturating_add(outcome.resources_gained);
        if self.data.lives == 0 {
            self.running = false;
        }

        outcome
    }

    /// Halts the loop; subsequent ticks become no-ops.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Reports whether ticks still advance the simulation.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Current lives and resources.
    #[must_use]
    pub const fn data(&self) -> GameData {
        self.data
    }

    /// The map this match is played on.
    #[must_use]
    pub fn path_map(&self) -> &PathMap {
        &self.map
    }

    /// The live enemy set, for snapshot queries.
    #[must_use]
    pub fn enemies(&self) -> &EnemyManager {
        &self.enemies
    }
}
