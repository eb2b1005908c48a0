#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative enemy state management for Path Defence.
//!
//! The [`EnemyManager`] exclusively owns every live enemy. External
//! collaborators (towers, effects, presentation) work with per-tick
//! snapshots from [`query`] and route damage through id-addressed calls;
//! no mutable enemy reference ever leaves this crate.

mod enemy;
mod path;

pub use path::{PathMap, PathMapError};

use path_defence_core::{
    DamageOutcome, DeathBehavior, Direction, DotEffect, EnemyId, EnemyKind, Position, TickOutcome,
};

use crate::enemy::Enemy;

/// Owner and per-tick driver of the live enemy set.
///
/// Enemies are stored in insertion order and identifiers are allocated
/// monotonically, so iteration is stable and replays are deterministic.
#[derive(Debug, Default)]
pub struct EnemyManager {
    enemies: Vec<Enemy>,
    next_id: u32,
}

impl EnemyManager {
    /// Creates an empty manager with a reset identifier counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live enemies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    /// Reports whether no enemies are alive or awaiting removal.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Creates a new enemy of `kind` at the map's spawn waypoint.
    pub fn spawn(&mut self, kind: EnemyKind, map: &PathMap) -> EnemyId {
        let id = self.allocate_id();
        self.enemies.push(Enemy::spawned(id, kind, map));
        id
    }

    /// Applies direct damage to the identified enemy.
    ///
    /// Returns `None` when the enemy no longer exists. Damage to a dead but
    /// not yet removed enemy reports [`DamageOutcome::AlreadyDead`].
    pub fn apply_damage(&mut self, id: EnemyId, amount: u32) -> Option<DamageOutcome> {
        self.enemy_mut(id).map(|enemy| enemy.damage(amount))
    }

    /// Installs or refreshes a damage-over-time effect on the identified
    /// enemy. Returns `false` when the enemy no longer exists.
    pub fn apply_dot(&mut self, id: EnemyId, effect: DotEffect) -> bool {
        match self.enemy_mut(id) {
            Some(enemy) => {
                enemy.apply_dot(effect);
                true
            }
            None => false,
        }
    }

    /// Advances every enemy one simulation step and removes the departed.
    ///
    /// Per enemy, in stable order: damage-over-time, then movement and path
    /// progress (dead enemies keep their last position), then exactly one
    /// classification: arrived, killed, offscreen, or still live. Split
    /// death behaviours append their children after the pass so the new
    /// enemies join the next tick in insertion order.
    pub fn update(&mut self, delta_ticks: f32, map: &PathMap) -> TickOutcome {
        let delta_ticks = delta_ticks.max(0.0);
        let mut outcome = TickOutcome::default();

        for enemy in &mut self.enemies {
            enemy.apply_damage_over_time();
            if enemy.alive {
                enemy.step(delta_ticks, map);
                enemy.update_path_progress(map);
            }
        }

        let mut kept = Vec::with_capacity(self.enemies.len());
        let mut births: Vec<Birth> = Vec::new();
        for enemy in self.enemies.drain(..) {
            if enemy.is_at_destination(map) {
                outcome.record_arrival(enemy.id);
            } else if !enemy.alive {
                outcome.record_kill(enemy.id, enemy.kind.reward());
                if let DeathBehavior::Split { child, count } = enemy.kind.death_behavior() {
                    for _ in 0..count {
                        births.push(Birth {
                            kind: child,
                            position: enemy.position,
                            path_index: enemy.path_index,
                            direction: enemy.direction,
                        });
                    }
                }
            } else if enemy.is_offscreen(map) {
                outcome.record_offscreen(enemy.id);
            } else {
                kept.push(enemy);
            }
        }
        self.enemies = kept;

        for birth in births {
            let id = self.allocate_id();
            self.enemies.push(Enemy::split_child(
                id,
                birth.kind,
                birth.position,
                birth.path_index,
                birth.direction,
            ));
        }

        outcome
    }

    fn allocate_id(&mut self) -> EnemyId {
        let id = EnemyId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    fn enemy_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|enemy| enemy.id == id)
    }
}

#[derive(Clone, Copy, Debug)]
struct Birth {
    kind: EnemyKind,
    position: Position,
    path_index: usize,
    direction: Direction,
}

/// Query functions that provide read-only access to the enemy set.
pub mod query {
    use path_defence_core::{Direction, EnemyId, EnemyKind, Health, Position};

    use super::EnemyManager;

    /// Captures a read-only view of the live enemies.
    #[must_use]
    pub fn enemy_view(manager: &EnemyManager) -> EnemyView {
        let mut snapshots: Vec<EnemySnapshot> = manager
            .enemies
            .iter()
            .map(|enemy| EnemySnapshot {
                id: enemy.id,
                kind: enemy.kind,
                position: enemy.position,
                direction: enemy.direction,
                health: enemy.health,
                max_health: enemy.kind.base_health(),
                alive: enemy.alive,
                path_index: enemy.path_index,
                dot_ticks_remaining: enemy.dot_ticks_remaining,
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        EnemyView { snapshots }
    }

    /// Read-only snapshot describing every enemy in the live set.
    ///
    /// A view is valid for the duration of the tick that produced it;
    /// holders must not assume an enemy survives the next update.
    #[derive(Clone, Debug, Default)]
    pub struct EnemyView {
        snapshots: Vec<EnemySnapshot>,
    }

    impl EnemyView {
        /// Iterator over the captured snapshots in identifier order.
        pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
            self.snapshots.iter()
        }

        /// Number of captured snapshots.
        #[must_use]
        pub fn len(&self) -> usize {
            self.snapshots.len()
        }

        /// Reports whether the view is empty.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.snapshots.is_empty()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<EnemySnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single enemy's state.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct EnemySnapshot {
        /// Unique identifier assigned by the manager.
        pub id: EnemyId,
        /// Archetype of the enemy.
        pub kind: EnemyKind,
        /// Continuous pixel position.
        pub position: Position,
        /// Current travel direction.
        pub direction: Direction,
        /// Remaining hit points.
        pub health: Health,
        /// Hit points the enemy spawned with.
        pub max_health: Health,
        /// Whether the enemy is still alive.
        pub alive: bool,
        /// Waypoint index the enemy most recently departed from.
        pub path_index: usize,
        /// Ticks of damage-over-time still pending.
        pub dot_ticks_remaining: u32,
    }
}
