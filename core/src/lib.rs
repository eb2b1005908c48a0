#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Path Defence simulation.
//!
//! This crate defines the value types that connect the authoritative world,
//! the pure systems, and the adapters: tile and pixel coordinates, enemy
//! archetypes, damage-over-time descriptors, and the per-tick outcome that
//! the game loop consumes. Everything here is plain data; all mutation lives
//! in the world crate.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Path Defence.";

/// Cardinal travel directions available to enemies on the waypoint path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Maps an orthogonal tile delta to a direction via an exact table lookup.
    ///
    /// Only the four unit deltas `(0,-1)`, `(0,1)`, `(-1,0)` and `(1,0)` are
    /// accepted; any other delta returns `None` and marks a malformed path.
    #[must_use]
    pub const fn from_tile_delta(delta_column: i64, delta_row: i64) -> Option<Self> {
        match (delta_column, delta_row) {
            (0, -1) => Some(Self::Up),
            (0, 1) => Some(Self::Down),
            (-1, 0) => Some(Self::Left),
            (1, 0) => Some(Self::Right),
            _ => None,
        }
    }

    /// Unit displacement vector for the direction, `(dx, dy)` in pixel axes.
    #[must_use]
    pub const fn unit_vector(self) -> (f32, f32) {
        match self {
            Self::Up => (0.0, -1.0),
            Self::Down => (0.0, 1.0),
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
        }
    }
}

/// Location of a single map tile expressed as column and row indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    column: u32,
    row: u32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Continuous pixel-space position of a simulation entity.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Position {
    x: f32,
    y: f32,
}

impl Position {
    /// Creates a new pixel-space position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal pixel coordinate.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical pixel coordinate.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Returns the position displaced by the provided pixel offsets.
    #[must_use]
    pub fn translated(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Euclidean distance to another position in pixels.
    #[must_use]
    pub fn distance_to(self, other: Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Unique identifier assigned to an enemy by the manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Hit-point total clamped at zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Health(u32);

impl Health {
    /// Creates a new health value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the remaining hit points.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the health reduced by `amount`, saturating at zero.
    #[must_use]
    pub const fn reduced_by(self, amount: u32) -> Self {
        Self(self.0.saturating_sub(amount))
    }

    /// Reports whether no hit points remain.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.0 == 0
    }
}

/// Classification of a single map tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Ordinary traversable tile.
    Ground,
    /// The player's base; an enemy reaching it costs one life.
    Destination,
}

/// Static enemy archetypes available to the spawner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Fast, fragile runner.
    Scout,
    /// Baseline walker.
    Grunt,
    /// Slow transport that releases scouts when destroyed.
    Carrier,
}

impl EnemyKind {
    /// Every archetype in spawn-table order.
    pub const ALL: [Self; 3] = [Self::Scout, Self::Grunt, Self::Carrier];

    /// Base movement speed measured in pixels per tick.
    #[must_use]
    pub const fn base_speed(self) -> f32 {
        match self {
            Self::Scout => 6.0,
            Self::Grunt => 4.0,
            Self::Carrier => 2.0,
        }
    }

    /// Hit points the enemy spawns with.
    #[must_use]
    pub const fn base_health(self) -> Health {
        match self {
            Self::Scout => Health::new(40),
            Self::Grunt => Health::new(100),
            Self::Carrier => Health::new(220),
        }
    }

    /// Resources granted to the player when the enemy is destroyed.
    #[must_use]
    pub const fn reward(self) -> u32 {
        match self {
            Self::Scout => 4,
            Self::Grunt => 10,
            Self::Carrier => 25,
        }
    }

    /// Behaviour executed exactly once when the enemy dies.
    #[must_use]
    pub const fn death_behavior(self) -> DeathBehavior {
        match self {
            Self::Scout | Self::Grunt => DeathBehavior::Vanish,
            Self::Carrier => DeathBehavior::Split {
                child: Self::Scout,
                count: 2,
            },
        }
    }
}

/// Per-kind consequence of an enemy's death.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeathBehavior {
    /// The corpse is removed with no further effect.
    Vanish,
    /// Child enemies emerge at the death position with the parent's
    /// path progress.
    Split {
        /// Archetype of the released children.
        child: EnemyKind,
        /// Number of children released.
        count: u32,
    },
}

/// Damage-over-time effect installed on an enemy by a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DotEffect {
    /// Damage applied at the start of each affected tick.
    pub damage_per_tick: u32,
    /// Number of future ticks the effect persists.
    pub ticks: u32,
}

impl DotEffect {
    /// Creates a new damage-over-time descriptor.
    #[must_use]
    pub const fn new(damage_per_tick: u32, ticks: u32) -> Self {
        Self {
            damage_per_tick,
            ticks,
        }
    }
}

/// Result of applying damage to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DamageOutcome {
    /// The target was already dead; the call was a silent no-op.
    AlreadyDead,
    /// The target absorbed the damage and remains alive.
    Survived,
    /// The damage depleted the target's health. Returned exactly once per
    /// enemy; it is the death hook.
    Killed,
}

/// Why an enemy left the live set during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemovalReason {
    /// The enemy reached a destination tile; the player loses a life.
    ReachedDestination,
    /// The enemy was destroyed; the player gains its reward.
    Killed,
    /// Defensive cleanup of an enemy whose bounding box left the map.
    Offscreen,
}

/// Record of a single enemy removal within one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Removal {
    /// Identifier of the removed enemy.
    pub enemy: EnemyId,
    /// Classification of the removal.
    pub reason: RemovalReason,
}

/// Aggregated results of one `EnemyManager` update, consumed exactly once
/// per tick by the game loop.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Lives the player loses this tick.
    pub lives_lost: u32,
    /// Resources the player gains from destroyed enemies this tick.
    pub resources_gained: u32,
    /// Every removal that occurred, in processing order.
    pub removals: Vec<Removal>,
}

impl TickOutcome {
    /// Records that an enemy reached the destination.
    pub fn record_arrival(&mut self, enemy: EnemyId) {
        self.lives_lost = self.lives_lost.saturating_add(1);
        self.removals.push(Removal {
            enemy,
            reason: RemovalReason::ReachedDestination,
        });
    }

    /// Records that an enemy was destroyed and credits its bounty.
    pub fn record_kill(&mut self, enemy: EnemyId, reward: u32) {
        self.resources_gained = self.resources_gained.saturating_add(reward);
        self.removals.push(Removal {
            enemy,
            reason: RemovalReason::Killed,
        });
    }

    /// Records a silent offscreen cleanup.
    pub fn record_offscreen(&mut self, enemy: EnemyId) {
        self.removals.push(Removal {
            enemy,
            reason: RemovalReason::Offscreen,
        });
    }
}
