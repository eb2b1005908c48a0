#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that emits attack commands for towers with a ready cooldown.
//!
//! The system never mutates enemies directly. Each tick it reads an enemy
//! snapshot view, picks a target per ready tower, and queues commands the
//! game loop routes through the enemy manager.

use path_defence_core::{DotEffect, EnemyId, Position};
use path_defence_world::query::EnemyView;

/// Static description of a tower placed on the map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerSpec {
    position: Position,
    range: f32,
    damage: u32,
    cooldown_ticks: f32,
    dot: Option<DotEffect>,
}

impl TowerSpec {
    /// Creates a tower dealing instant damage only.
    #[must_use]
    pub const fn new(position: Position, range: f32, damage: u32, cooldown_ticks: f32) -> Self {
        Self {
            position,
            range,
            damage,
            cooldown_ticks,
            dot: None,
        }
    }

    /// Attaches a damage-over-time payload to every hit.
    #[must_use]
    pub const fn with_dot(mut self, dot: DotEffect) -> Self {
        self.dot = Some(dot);
        self
    }

    /// Pixel position of the tower.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Targeting radius in pixels.
    #[must_use]
    pub const fn range(&self) -> f32 {
        self.range
    }
}

/// Damage instruction addressed to a single enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackCommand {
    /// Enemy the tower fired at.
    pub target: EnemyId,
    /// Instant damage to apply.
    pub damage: u32,
    /// Optional damage-over-time effect to install on the target.
    pub dot: Option<DotEffect>,
}

#[derive(Clone, Debug)]
struct TowerState {
    spec: TowerSpec,
    ready_in: f32,
}

/// Tower combat system that tracks cooldowns and queues attack commands.
#[derive(Clone, Debug, Default)]
pub struct TowerCombat {
    towers: Vec<TowerState>,
}

impl TowerCombat {
    /// Creates a combat system with the provided tower roster. All towers
    /// start ready to fire.
    #[must_use]
    pub fn new(towers: Vec<TowerSpec>) -> Self {
        Self {
            towers: towers
                .into_iter()
                .map(|spec| TowerState {
                    spec,
                    ready_in: 0.0,
                })
                .collect(),
        }
    }

    /// Number of towers in the roster.
    #[must_use]
    pub fn len(&self) -> usize {
        self.towers.len()
    }

    /// Reports whether the roster is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.towers.is_empty()
    }

    /// Advances cooldowns by `delta_ticks` and emits one [`AttackCommand`]
    /// per ready tower with a living enemy in range.
    ///
    /// Targeting picks the nearest living enemy; distance ties resolve to the
    /// lower id because the view is id-ordered.
    pub fn handle(&mut self, delta_ticks: f32, enemies: &EnemyView, out: &mut Vec<AttackCommand>) {
        let delta = delta_ticks.max(0.0);
        for tower in &mut self.towers {
            tower.ready_in = (tower.ready_in - delta).max(0.0);
            if tower.ready_in > 0.0 {
                continue;
            }
            if let Some(target) = nearest_living(&tower.spec, enemies) {
                out.push(AttackCommand {
                    target,
                    damage: tower.spec.damage,
                    dot: tower.spec.dot,
                });
                tower.ready_in = tower.spec.cooldown_ticks;
            }
        }
    }
}

fn nearest_living(spec: &TowerSpec, enemies: &EnemyView) -> Option<EnemyId> {
    let mut best: Option<(f32, EnemyId)> = None;
    for snapshot in enemies.iter() {
        if !snapshot.alive {
            continue;
        }
        let distance = spec.position.distance_to(snapshot.position);
        if distance > spec.range {
            continue;
        }
        // Strictly-less keeps the first (lowest-id) enemy on equal distance.
        if best.map_or(true, |(closest, _)| distance < closest) {
            best = Some((distance, snapshot.id));
        }
    }
    best.map(|(_, id)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use path_defence_core::{EnemyKind, TileCoord};
    use path_defence_world::{query, EnemyManager, PathMap};

    const TILE: f32 = 32.0;

    fn eastward_map() -> PathMap {
        PathMap::new(
            6,
            3,
            TILE,
            vec![
                TileCoord::new(0, 0),
                TileCoord::new(1, 0),
                TileCoord::new(2, 0),
                TileCoord::new(3, 0),
                TileCoord::new(4, 0),
            ],
        )
        .expect("valid path")
    }

    #[test]
    fn targets_the_nearest_living_enemy() {
        let map = eastward_map();
        let mut manager = EnemyManager::new();
        let near = manager.spawn(EnemyKind::Grunt, &map);
        let _far = manager.spawn(EnemyKind::Grunt, &map);

        let outcome = manager.update(1.0, &map);
        assert!(outcome.removals.is_empty());

        let mut combat = TowerCombat::new(vec![TowerSpec::new(
            Position::new(0.0, 0.0),
            200.0,
            15,
            4.0,
        )]);
        let mut out = Vec::new();
        combat.handle(0.0, &query::enemy_view(&manager), &mut out);

        // Both sit equidistant after one shared step, so the lower id wins.
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].target, near);
        assert_eq!(out[0].damage, 15);
        assert_eq!(out[0].dot, None);
    }

    #[test]
    fn cooldown_suppresses_fire_until_it_elapses() {
        let map = eastward_map();
        let mut manager = EnemyManager::new();
        let _ = manager.spawn(EnemyKind::Carrier, &map);
        let view = query::enemy_view(&manager);

        let mut combat = TowerCombat::new(vec![TowerSpec::new(
            Position::new(0.0, 0.0),
            100.0,
            5,
            3.0,
        )]);
        let mut out = Vec::new();

        combat.handle(0.0, &view, &mut out);
        assert_eq!(out.len(), 1, "tower starts ready");

        combat.handle(1.0, &view, &mut out);
        combat.handle(1.0, &view, &mut out);
        assert_eq!(out.len(), 1, "still cooling down");

        combat.handle(1.0, &view, &mut out);
        assert_eq!(out.len(), 2, "cooldown elapsed");
    }

    #[test]
    fn out_of_range_and_dead_enemies_are_skipped() {
        let map = eastward_map();
        let mut manager = EnemyManager::new();
        let victim = manager.spawn(EnemyKind::Scout, &map);
        let _ = manager.apply_damage(victim, u32::MAX);

        let mut combat = TowerCombat::new(vec![
            TowerSpec::new(Position::new(0.0, 0.0), 100.0, 5, 1.0),
            TowerSpec::new(Position::new(1000.0, 1000.0), 10.0, 5, 1.0),
        ]);
        let mut out = Vec::new();
        combat.handle(0.0, &query::enemy_view(&manager), &mut out);

        assert!(out.is_empty(), "dead target and out-of-range tower both hold fire");
    }

    #[test]
    fn dot_towers_attach_their_payload() {
        let map = eastward_map();
        let mut manager = EnemyManager::new();
        let target = manager.spawn(EnemyKind::Grunt, &map);

        let dot = DotEffect::new(3, 4);
        let mut combat = TowerCombat::new(vec![TowerSpec::new(
            Position::new(0.0, 0.0),
            100.0,
            2,
            5.0,
        )
        .with_dot(dot)]);
        let mut out = Vec::new();
        combat.handle(0.0, &query::enemy_view(&manager), &mut out);

        assert_eq!(
            out,
            vec![AttackCommand {
                target,
                damage: 2,
                dot: Some(dot),
            }],
        );
    }

    #[test]
    fn negative_delta_does_not_rewind_cooldowns() {
        let map = eastward_map();
        let mut manager = EnemyManager::new();
        let _ = manager.spawn(EnemyKind::Grunt, &map);
        let view = query::enemy_view(&manager);

        let mut combat = TowerCombat::new(vec![TowerSpec::new(
            Position::new(0.0, 0.0),
            100.0,
            5,
            2.0,
        )]);
        let mut out = Vec::new();

        combat.handle(0.0, &view, &mut out);
        combat.handle(-10.0, &view, &mut out);
        assert_eq!(out.len(), 1);

        combat.handle(2.0, &view, &mut out);
        assert_eq!(out.len(), 2);
    }
}
