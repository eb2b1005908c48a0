//! Live enemy entity: continuous movement, discrete path progress, damage.

use path_defence_core::{
    DamageOutcome, Direction, DotEffect, EnemyId, EnemyKind, Health, Position,
};

use crate::path::PathMap;

/// Mutable simulation entity owned exclusively by the manager.
///
/// The path map is passed explicitly to every method that reads it; enemies
/// never look the map up ambiently.
#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) kind: EnemyKind,
    pub(crate) health: Health,
    pub(crate) position: Position,
    pub(crate) path_index: usize,
    pub(crate) direction: Direction,
    pub(crate) needs_direction_update: bool,
    pub(crate) dot_damage_per_tick: u32,
    pub(crate) dot_ticks_remaining: u32,
    pub(crate) alive: bool,
}

impl Enemy {
    /// Creates an enemy at the spawn waypoint with full health and no
    /// damage-over-time state.
    pub(crate) fn spawned(id: EnemyId, kind: EnemyKind, map: &PathMap) -> Self {
        Self {
            id,
            kind,
            health: kind.base_health(),
            position: map.spawn_position(),
            path_index: 0,
            direction: map.initial_direction(),
            needs_direction_update: true,
            dot_damage_per_tick: 0,
            dot_ticks_remaining: 0,
            alive: true,
        }
    }

    /// Creates a child released by a split death at the parent's position
    /// with the parent's path progress.
    pub(crate) fn split_child(
        id: EnemyId,
        kind: EnemyKind,
        position: Position,
        path_index: usize,
        direction: Direction,
    ) -> Self {
        Self {
            id,
            kind,
            health: kind.base_health(),
            position,
            path_index,
            direction,
            needs_direction_update: true,
            dot_damage_per_tick: 0,
            dot_ticks_remaining: 0,
            alive: true,
        }
    }

    /// Recomputes the travel direction from the current path segment and
    /// clears the pending-update flag.
    ///
    /// The final waypoint has no outgoing segment; the previous direction is
    /// kept there, and the enemy is removed as arrived in the same tick.
    pub(crate) fn resolve_direction(&mut self, map: &PathMap) {
        if let Some(direction) = map.segment_direction(self.path_index) {
            self.direction = direction;
        }
        self.needs_direction_update = false;
    }

    /// Advances the position by `speed * delta_ticks` along the direction's
    /// own `(dx, dy)` unit vector.
    pub(crate) fn step(&mut self, delta_ticks: f32, map: &PathMap) {
        if self.needs_direction_update {
            self.resolve_direction(map);
        }
        if map.segment_direction(self.path_index).is_none() {
            // Standing on the final waypoint; arrival removal is imminent.
            return;
        }
        let (dx, dy) = self.direction.unit_vector();
        let distance = self.kind.base_speed() * delta_ticks;
        self.position = self.position.translated(distance * dx, distance * dy);
    }

    /// Discrete crossing detection: when the current tile no longer maps to
    /// the departed waypoint and matches the next one, path progress
    /// advances and the direction is flagged for recomputation.
    pub(crate) fn update_path_progress(&mut self, map: &PathMap) {
        let Some(tile) = map.tile_at(self.position) else {
            // Out of bounds mid-transit; the offscreen cleanup owns this.
            return;
        };
        if map.waypoint(self.path_index) == Some(tile) {
            return;
        }
        if map.waypoint(self.path_index + 1) == Some(tile) {
            self.path_index += 1;
            self.needs_direction_update = true;
        }
    }

    /// Applies one tick of damage-over-time, if any remains.
    pub(crate) fn apply_damage_over_time(&mut self) {
        if self.dot_ticks_remaining == 0 {
            return;
        }
        self.dot_ticks_remaining -= 1;
        let _ = self.damage(self.dot_damage_per_tick);
        if self.dot_ticks_remaining == 0 {
            self.dot_damage_per_tick = 0;
        }
    }

    /// Subtracts `amount` from health, clamped at zero.
    ///
    /// Damage to a dead enemy is a silent no-op; `Killed` is returned exactly
    /// once per enemy.
    pub(crate) fn damage(&mut self, amount: u32) -> DamageOutcome {
        if !self.alive {
            return DamageOutcome::AlreadyDead;
        }
        self.health = self.health.reduced_by(amount);
        if self.health.is_depleted() {
            self.alive = false;
            DamageOutcome::Killed
        } else {
            DamageOutcome::Survived
        }
    }

    /// Installs or refreshes a damage-over-time effect.
    pub(crate) fn apply_dot(&mut self, effect: DotEffect) {
        if !self.alive {
            return;
        }
        self.dot_damage_per_tick = effect.damage_per_tick;
        self.dot_ticks_remaining = effect.ticks;
    }

    /// Reports whether the current tile is in bounds and classified as the
    /// destination.
    pub(crate) fn is_at_destination(&self, map: &PathMap) -> bool {
        map.tile_at(self.position)
            .is_some_and(|tile| map.is_destination(tile))
    }

    /// Conservative fully-off check: true only when the tile-sized bounding
    /// box lies entirely outside the map, so partially visible enemies are
    /// never despawned.
    pub(crate) fn is_offscreen(&self, map: &PathMap) -> bool {
        let tile = map.tile_size();
        self.position.x() < -tile
            || self.position.x() > map.pixel_width()
            || self.position.y() < -tile
            || self.position.y() > map.pixel_height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use path_defence_core::TileCoord;

    const TILE: f32 = 32.0;

    fn eastward_map() -> PathMap {
        PathMap::new(
            4,
            3,
            TILE,
            vec![
                TileCoord::new(0, 0),
                TileCoord::new(1, 0),
                TileCoord::new(2, 0),
            ],
        )
        .expect("valid path")
    }

    fn spawn(map: &PathMap, kind: EnemyKind) -> Enemy {
        Enemy::spawned(EnemyId::new(0), kind, map)
    }

    #[test]
    fn spawn_state_matches_contract() {
        let map = eastward_map();
        let enemy = spawn(&map, EnemyKind::Grunt);

        assert!(enemy.alive);
        assert_eq!(enemy.path_index, 0);
        assert_eq!(enemy.position, map.spawn_position());
        assert_eq!(enemy.health, EnemyKind::Grunt.base_health());
        assert_eq!(enemy.dot_damage_per_tick, 0);
        assert_eq!(enemy.dot_ticks_remaining, 0);
        assert!(enemy.needs_direction_update);
    }

    #[test]
    fn step_displaces_along_the_direction_axis_only() {
        let map = eastward_map();
        let mut enemy = spawn(&map, EnemyKind::Grunt);

        enemy.step(1.0, &map);

        assert_eq!(enemy.direction, Direction::Right);
        assert_eq!(enemy.position.x(), EnemyKind::Grunt.base_speed());
        assert_eq!(enemy.position.y(), 0.0);
    }

    #[test]
    fn step_follows_vertical_segments_downward() {
        let map = PathMap::new(
            3,
            4,
            TILE,
            vec![TileCoord::new(1, 0), TileCoord::new(1, 1), TileCoord::new(1, 2)],
        )
        .expect("valid path");
        let mut enemy = spawn(&map, EnemyKind::Scout);

        enemy.step(1.0, &map);

        assert_eq!(enemy.direction, Direction::Down);
        assert_eq!(enemy.position.x(), TILE);
        assert_eq!(enemy.position.y(), EnemyKind::Scout.base_speed());
    }

    #[test]
    fn crossing_a_tile_boundary_advances_path_index_once() {
        let map = eastward_map();
        let mut enemy = spawn(&map, EnemyKind::Grunt);
        let speed = EnemyKind::Grunt.base_speed();
        let ticks_to_cross = (TILE / speed).ceil() as usize;

        for tick in 1..=ticks_to_cross {
            enemy.step(1.0, &map);
            enemy.update_path_progress(&map);
            if tick < ticks_to_cross {
                assert_eq!(enemy.path_index, 0, "crossed early at tick {tick}");
                assert!(!enemy.needs_direction_update);
            }
        }

        assert_eq!(enemy.path_index, 1);
        assert!(enemy.needs_direction_update);

        enemy.step(1.0, &map);
        enemy.update_path_progress(&map);
        assert_eq!(enemy.path_index, 1);
        assert!(!enemy.needs_direction_update);
    }

    #[test]
    fn path_index_never_decreases_in_transit() {
        let map = eastward_map();
        let mut enemy = spawn(&map, EnemyKind::Scout);
        let mut highest = 0;

        for _ in 0..40 {
            enemy.step(1.0, &map);
            enemy.update_path_progress(&map);
            assert!(enemy.path_index >= highest);
            highest = enemy.path_index;
        }
    }

    #[test]
    fn damage_clamps_health_and_kills_exactly_once() {
        let map = eastward_map();
        let mut enemy = spawn(&map, EnemyKind::Grunt);

        assert_eq!(enemy.damage(30), DamageOutcome::Survived);
        assert_eq!(enemy.health, Health::new(70));
        assert_eq!(enemy.damage(500), DamageOutcome::Killed);
        assert_eq!(enemy.health, Health::new(0));
        assert!(!enemy.alive);
        assert_eq!(enemy.damage(10), DamageOutcome::AlreadyDead);
        assert_eq!(enemy.health, Health::new(0));
        assert!(!enemy.alive);
    }

    #[test]
    fn zero_damage_is_absorbed_without_effect() {
        let map = eastward_map();
        let mut enemy = spawn(&map, EnemyKind::Scout);
        assert_eq!(enemy.damage(0), DamageOutcome::Survived);
        assert_eq!(enemy.health, EnemyKind::Scout.base_health());
    }

    #[test]
    fn damage_over_time_burns_down_and_clears() {
        let map = eastward_map();
        let mut enemy = spawn(&map, EnemyKind::Grunt);
        enemy.apply_dot(DotEffect::new(10, 3));

        for expected_remaining in [2, 1, 0] {
            enemy.apply_damage_over_time();
            assert_eq!(enemy.dot_ticks_remaining, expected_remaining);
        }
        assert_eq!(enemy.health, Health::new(70));
        assert_eq!(enemy.dot_damage_per_tick, 0);

        // Expired effect is inert.
        enemy.apply_damage_over_time();
        assert_eq!(enemy.health, Health::new(70));
    }

    #[test]
    fn damage_over_time_can_kill() {
        let map = eastward_map();
        let mut enemy = spawn(&map, EnemyKind::Scout);
        enemy.apply_dot(DotEffect::new(40, 5));

        enemy.apply_damage_over_time();

        assert!(!enemy.alive);
        assert_eq!(enemy.dot_ticks_remaining, 4);
    }

    #[test]
    fn dead_enemies_reject_new_dot_effects() {
        let map = eastward_map();
        let mut enemy = spawn(&map, EnemyKind::Scout);
        let _ = enemy.damage(u32::MAX);
        enemy.apply_dot(DotEffect::new(5, 5));
        assert_eq!(enemy.dot_ticks_remaining, 0);
    }

    #[test]
    fn destination_detection_requires_the_classified_tile() {
        let map = eastward_map();
        let mut enemy = spawn(&map, EnemyKind::Grunt);
        assert!(!enemy.is_at_destination(&map));

        enemy.position = map.tile_origin(TileCoord::new(2, 0));
        assert!(enemy.is_at_destination(&map));

        enemy.position = Position::new(-5.0, 0.0);
        assert!(!enemy.is_at_destination(&map));
    }

    #[test]
    fn offscreen_requires_the_full_box_outside() {
        let map = eastward_map();
        let mut enemy = spawn(&map, EnemyKind::Grunt);

        enemy.position = Position::new(-10.0, 0.0);
        assert!(!enemy.is_offscreen(&map), "partially visible on the left");

        enemy.position = Position::new(-TILE - 1.0, 0.0);
        assert!(enemy.is_offscreen(&map));

        enemy.position = Position::new(0.0, map.pixel_height() + 0.5);
        assert!(enemy.is_offscreen(&map));

        enemy.position = Position::new(map.pixel_width() - 1.0, 0.0);
        assert!(!enemy.is_offscreen(&map), "still overlapping the right edge");
    }
}
