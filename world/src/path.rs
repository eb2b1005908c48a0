//! Immutable per-level route definition and tile classification.

use path_defence_core::{Direction, Position, TileCoord, TileKind};
use thiserror::Error;

/// Errors raised while validating a path map definition.
///
/// Every variant is fatal at load time: the level must refuse to start
/// rather than produce undefined per-tick direction lookups.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PathMapError {
    /// A route needs a spawn and a destination at minimum.
    #[error("path requires at least 2 waypoints (received {count})")]
    TooFewWaypoints {
        /// Number of waypoints provided.
        count: usize,
    },
    /// The tile grid has no area.
    #[error("map grid must have positive dimensions (received {columns}x{rows})")]
    EmptyGrid {
        /// Provided column count.
        columns: u32,
        /// Provided row count.
        rows: u32,
    },
    /// Tiles must have positive pixel extent.
    #[error("tile size must be positive (received {tile_size})")]
    NonPositiveTileSize {
        /// Provided tile side length in pixels.
        tile_size: f32,
    },
    /// A waypoint lies outside the tile grid.
    #[error("waypoint {index} at ({column}, {row}) lies outside the {columns}x{rows} grid")]
    WaypointOutOfBounds {
        /// Index of the offending waypoint.
        index: usize,
        /// Column of the offending waypoint.
        column: u32,
        /// Row of the offending waypoint.
        row: u32,
        /// Grid column count.
        columns: u32,
        /// Grid row count.
        rows: u32,
    },
    /// Consecutive waypoints must differ by exactly one orthogonal tile step.
    #[error("segment {index} is not a single orthogonal tile step")]
    NonOrthogonalSegment {
        /// Index of the segment's starting waypoint.
        index: usize,
    },
}

/// Immutable route enemies follow across the tile map.
///
/// Waypoint insertion order is the travel order; it is never reordered.
/// Segment directions are resolved once at load via the exact delta table in
/// [`Direction::from_tile_delta`], so per-tick direction lookups cannot fail.
#[derive(Clone, Debug)]
pub struct PathMap {
    columns: u32,
    rows: u32,
    tile_size: f32,
    waypoints: Vec<TileCoord>,
    segments: Vec<Direction>,
    tiles: Vec<TileKind>,
}

impl PathMap {
    /// Builds a validated path map.
    ///
    /// The final waypoint's tile is classified [`TileKind::Destination`];
    /// every other tile is [`TileKind::Ground`].
    pub fn new(
        columns: u32,
        rows: u32,
        tile_size: f32,
        waypoints: Vec<TileCoord>,
    ) -> Result<Self, PathMapError> {
        if columns == 0 || rows == 0 {
            return Err(PathMapError::EmptyGrid { columns, rows });
        }
        if !(tile_size > 0.0) {
            return Err(PathMapError::NonPositiveTileSize { tile_size });
        }
        if waypoints.len() < 2 {
            return Err(PathMapError::TooFewWaypoints {
                count: waypoints.len(),
            });
        }

        for (index, waypoint) in waypoints.iter().enumerate() {
            if waypoint.column() >= columns || waypoint.row() >= rows {
                return Err(PathMapError::WaypointOutOfBounds {
                    index,
                    column: waypoint.column(),
                    row: waypoint.row(),
                    columns,
                    rows,
                });
            }
        }

        let mut segments = Vec::with_capacity(waypoints.len() - 1);
        for (index, pair) in waypoints.windows(2).enumerate() {
            let delta_column = i64::from(pair[1].column()) - i64::from(pair[0].column());
            let delta_row = i64::from(pair[1].row()) - i64::from(pair[0].row());
            match Direction::from_tile_delta(delta_column, delta_row) {
                Some(direction) => segments.push(direction),
                None => return Err(PathMapError::NonOrthogonalSegment { index }),
            }
        }

        let cell_count = usize::try_from(u64::from(columns) * u64::from(rows)).unwrap_or(0);
        let mut tiles = vec![TileKind::Ground; cell_count];
        let destination = waypoints[waypoints.len() - 1];
        if let Some(index) = tile_index(destination, columns, rows) {
            tiles[index] = TileKind::Destination;
        }

        Ok(Self {
            columns,
            rows,
            tile_size,
            waypoints,
            segments,
            tiles,
        })
    }

    /// Number of tile columns in the map.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows in the map.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a square tile in pixels.
    #[must_use]
    pub const fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Total map width in pixels.
    #[must_use]
    pub const fn pixel_width(&self) -> f32 {
        self.columns as f32 * self.tile_size
    }

    /// Total map height in pixels.
    #[must_use]
    pub const fn pixel_height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    /// Ordered waypoints from spawn to destination.
    #[must_use]
    pub fn waypoints(&self) -> &[TileCoord] {
        &self.waypoints
    }

    /// Waypoint at the provided path index, if it exists.
    #[must_use]
    pub fn waypoint(&self, index: usize) -> Option<TileCoord> {
        self.waypoints.get(index).copied()
    }

    /// Index of the final waypoint.
    #[must_use]
    pub fn final_index(&self) -> usize {
        self.waypoints.len() - 1
    }

    /// Travel direction of the segment departing `waypoints[index]`.
    ///
    /// Returns `None` for the final waypoint, which has no outgoing segment.
    #[must_use]
    pub fn segment_direction(&self, index: usize) -> Option<Direction> {
        self.segments.get(index).copied()
    }

    /// Direction of the first path segment. Validation guarantees at least
    /// one segment exists.
    #[must_use]
    pub fn initial_direction(&self) -> Direction {
        self.segments[0]
    }

    /// Pixel position of the spawn point, the top-left corner of the first
    /// waypoint's tile.
    #[must_use]
    pub fn spawn_position(&self) -> Position {
        self.tile_origin(self.waypoints[0])
    }

    /// Top-left pixel corner of the provided tile.
    #[must_use]
    pub fn tile_origin(&self, tile: TileCoord) -> Position {
        Position::new(
            tile.column() as f32 * self.tile_size,
            tile.row() as f32 * self.tile_size,
        )
    }

    /// Converts a pixel position to the tile containing it.
    ///
    /// Returns `None` for positions outside the map bounds; callers resolve
    /// those through the defensive offscreen cleanup.
    #[must_use]
    pub fn tile_at(&self, position: Position) -> Option<TileCoord> {
        if position.x() < 0.0 || position.y() < 0.0 {
            return None;
        }
        let column = (position.x() / self.tile_size) as u32;
        let row = (position.y() / self.tile_size) as u32;
        if column < self.columns && row < self.rows {
            Some(TileCoord::new(column, row))
        } else {
            None
        }
    }

    /// Classification of the provided tile.
    #[must_use]
    pub fn kind_at(&self, tile: TileCoord) -> TileKind {
        tile_index(tile, self.columns, self.rows)
            .and_then(|index| self.tiles.get(index).copied())
            .unwrap_or(TileKind::Ground)
    }

    /// Reports whether the tile is the player's base.
    #[must_use]
    pub fn is_destination(&self, tile: TileCoord) -> bool {
        self.kind_at(tile) == TileKind::Destination
    }
}

fn tile_index(tile: TileCoord, columns: u32, rows: u32) -> Option<usize> {
    if tile.column() < columns && tile.row() < rows {
        let row = usize::try_from(tile.row()).ok()?;
        let column = usize::try_from(tile.column()).ok()?;
        let width = usize::try_from(columns).ok()?;
        Some(row * width + column)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_path() -> PathMap {
        PathMap::new(
            4,
            3,
            32.0,
            vec![
                TileCoord::new(0, 0),
                TileCoord::new(1, 0),
                TileCoord::new(2, 0),
            ],
        )
        .expect("valid path")
    }

    #[test]
    fn rejects_fewer_than_two_waypoints() {
        let error = PathMap::new(4, 4, 32.0, vec![TileCoord::new(0, 0)])
            .expect_err("single waypoint must be rejected");
        assert_eq!(error, PathMapError::TooFewWaypoints { count: 1 });
    }

    #[test]
    fn rejects_empty_grid_and_degenerate_tile_size() {
        assert!(matches!(
            PathMap::new(0, 4, 32.0, vec![]),
            Err(PathMapError::EmptyGrid { .. })
        ));
        assert!(matches!(
            PathMap::new(4, 4, 0.0, vec![TileCoord::new(0, 0), TileCoord::new(1, 0)]),
            Err(PathMapError::NonPositiveTileSize { .. })
        ));
    }

    #[test]
    fn rejects_waypoints_outside_the_grid() {
        let error = PathMap::new(
            2,
            2,
            32.0,
            vec![TileCoord::new(0, 0), TileCoord::new(0, 1), TileCoord::new(0, 2)],
        )
        .expect_err("out-of-bounds waypoint must be rejected");
        assert!(matches!(
            error,
            PathMapError::WaypointOutOfBounds { index: 2, .. }
        ));
    }

    #[test]
    fn rejects_diagonal_and_non_adjacent_segments() {
        let diagonal = PathMap::new(
            4,
            4,
            32.0,
            vec![TileCoord::new(0, 0), TileCoord::new(1, 1)],
        )
        .expect_err("diagonal segment must be rejected");
        assert_eq!(diagonal, PathMapError::NonOrthogonalSegment { index: 0 });

        let skip = PathMap::new(
            4,
            4,
            32.0,
            vec![TileCoord::new(0, 0), TileCoord::new(2, 0)],
        )
        .expect_err("two-tile jump must be rejected");
        assert_eq!(skip, PathMapError::NonOrthogonalSegment { index: 0 });
    }

    #[test]
    fn resolves_segment_directions_at_load() {
        let map = PathMap::new(
            3,
            3,
            32.0,
            vec![
                TileCoord::new(0, 1),
                TileCoord::new(1, 1),
                TileCoord::new(1, 0),
                TileCoord::new(0, 0),
                TileCoord::new(0, 1),
            ],
        )
        .expect("valid loop");

        assert_eq!(map.segment_direction(0), Some(Direction::Right));
        assert_eq!(map.segment_direction(1), Some(Direction::Up));
        assert_eq!(map.segment_direction(2), Some(Direction::Left));
        assert_eq!(map.segment_direction(3), Some(Direction::Down));
        assert_eq!(map.segment_direction(4), None);
        assert_eq!(map.initial_direction(), Direction::Right);
    }

    #[test]
    fn classifies_only_the_final_waypoint_as_destination() {
        let map = straight_path();
        assert_eq!(map.kind_at(TileCoord::new(2, 0)), TileKind::Destination);
        assert_eq!(map.kind_at(TileCoord::new(1, 0)), TileKind::Ground);
        assert!(map.is_destination(TileCoord::new(2, 0)));
        assert!(!map.is_destination(TileCoord::new(0, 0)));
    }

    #[test]
    fn converts_pixel_positions_to_tiles() {
        let map = straight_path();
        assert_eq!(
            map.tile_at(Position::new(0.0, 0.0)),
            Some(TileCoord::new(0, 0))
        );
        assert_eq!(
            map.tile_at(Position::new(33.5, 64.1)),
            Some(TileCoord::new(1, 2))
        );
        assert_eq!(map.tile_at(Position::new(-0.1, 0.0)), None);
        assert_eq!(map.tile_at(Position::new(0.0, 96.0)), None);
        assert_eq!(map.tile_at(Position::new(128.0, 0.0)), None);
    }

    #[test]
    fn exposes_pixel_dimensions_and_spawn_position() {
        let map = straight_path();
        assert_eq!(map.pixel_width(), 128.0);
        assert_eq!(map.pixel_height(), 96.0);
        assert_eq!(map.spawn_position(), Position::new(0.0, 0.0));
        assert_eq!(map.final_index(), 2);
    }
}
