#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Path Defence adapters.
//!
//! The simulation never draws. Each frame an adapter composes a [`Scene`]
//! from read-only enemy snapshots and hands it to a [`RenderingBackend`];
//! backends own windowing, sprites, and timing.

use anyhow::Result as AnyResult;
use glam::Vec2;
use path_defence_core::{Direction, EnemyId, EnemyKind, TileCoord};
use path_defence_world::{query::EnemyView, PathMap};
use std::time::Duration;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Stable lookup key naming one sprite image per archetype and facing.
///
/// Backends resolve keys to textures however they like; the key format is
/// `{kind}_{direction}`, all lowercase.
#[must_use]
pub fn sprite_key(kind: EnemyKind, direction: Direction) -> String {
    let kind = match kind {
        EnemyKind::Scout => "scout",
        EnemyKind::Grunt => "grunt",
        EnemyKind::Carrier => "carrier",
    };
    let direction = match direction {
        Direction::Up => "up",
        Direction::Down => "down",
        Direction::Left => "left",
        Direction::Right => "right",
    };
    format!("{kind}_{direction}")
}

/// Describes the square tile grid a backend should draw behind enemies.
#[derive(Clone, Debug, PartialEq)]
pub struct TileGridPresentation {
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Number of rows contained in the grid.
    pub rows: u32,
    /// Side length of a single tile expressed in pixels.
    pub tile_length: f32,
    /// Waypoint tiles composing the enemy route, in travel order.
    pub route: Vec<TileCoord>,
    /// Tile classified as the defended destination.
    pub destination: TileCoord,
    /// Color used when drawing grid lines.
    pub line_color: Color,
}

impl TileGridPresentation {
    /// Builds the grid presentation for a validated map.
    #[must_use]
    pub fn from_map(map: &PathMap, line_color: Color) -> Self {
        let route = map.waypoints().to_vec();
        let destination = route[route.len() - 1];
        Self {
            columns: map.columns(),
            rows: map.rows(),
            tile_length: map.tile_size(),
            route,
            destination,
            line_color,
        }
    }

    /// Total grid width in pixels.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Total grid height in pixels.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.rows as f32 * self.tile_length
    }
}

/// Single enemy drawn at its continuous pixel position.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyVisual {
    /// Identifier assigned by the simulation; stable across frames.
    pub id: EnemyId,
    /// Top-left pixel position of the sprite.
    pub position: Vec2,
    /// Sprite lookup key derived from archetype and facing.
    pub sprite: String,
    /// Remaining health as a fraction of full, for health bars.
    pub health_fraction: f32,
    /// Whether a damage-over-time effect is currently burning.
    pub burning: bool,
}

/// Match summary shown alongside the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudPresentation {
    /// Lives remaining before defeat.
    pub lives: u32,
    /// Resources earned from kills.
    pub resources: u32,
    /// Enemies currently on the map.
    pub enemy_count: usize,
}

/// Scene description combining the tile grid, enemies, and HUD.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Tile grid that composes the play area.
    pub tile_grid: TileGridPresentation,
    /// Enemies visible this frame, in identifier order.
    pub enemies: Vec<EnemyVisual>,
    /// Player-facing match summary.
    pub hud: HudPresentation,
}

/// Composes a frame's scene from read-only simulation state.
///
/// Dead enemies awaiting removal are skipped; only living enemies are drawn.
#[must_use]
pub fn compose_scene(
    map: &PathMap,
    enemies: &EnemyView,
    lives: u32,
    resources: u32,
    line_color: Color,
) -> Scene {
    let visuals: Vec<EnemyVisual> = enemies
        .iter()
        .filter(|snapshot| snapshot.alive)
        .map(|snapshot| EnemyVisual {
            id: snapshot.id,
            position: Vec2::new(snapshot.position.x(), snapshot.position.y()),
            sprite: sprite_key(snapshot.kind, snapshot.direction),
            health_fraction: health_fraction(snapshot.health.get(), snapshot.max_health.get()),
            burning: snapshot.dot_ticks_remaining > 0,
        })
        .collect();
    let enemy_count = visuals.len();

    Scene {
        tile_grid: TileGridPresentation::from_map(map, line_color),
        enemies: visuals,
        hud: HudPresentation {
            lives,
            resources,
            enemy_count,
        },
    }
}

fn health_fraction(health: u32, max_health: u32) -> f32 {
    if max_health == 0 {
        return 0.0;
    }
    (health as f32 / max_health as f32).clamp(0.0, 1.0)
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Path Defence scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame
    /// delta and may replace the scene before it is rendered, allowing
    /// adapters to re-compose world snapshots each frame.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, &mut Scene) + 'static;
}
