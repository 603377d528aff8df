//! Text map format parsing and validation.
//!
//! Format: a header line `width height`, then `height` rows of exactly
//! `width` cells. Cell characters: `.` empty, `#` brick, `X` steel,
//! `~` water, `*` forest, `P` player spawn, `E` enemy spawn candidate.

use std::fmt;

use serde::{Deserialize, Serialize};

use panzer_core::enums::ObstacleKind;
use panzer_core::types::Point;

/// Terrain code for one map cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileCode {
    #[default]
    Empty,
    Brick,
    Steel,
    Water,
    Forest,
}

impl TileCode {
    /// Obstacle kind to instantiate for this tile, if any.
    pub fn obstacle_kind(self) -> Option<ObstacleKind> {
        match self {
            TileCode::Empty => None,
            TileCode::Brick => Some(ObstacleKind::Brick),
            TileCode::Steel => Some(ObstacleKind::Steel),
            TileCode::Water => Some(ObstacleKind::Water),
            TileCode::Forest => Some(ObstacleKind::Forest),
        }
    }
}

/// Why a map failed to load. All variants are fatal: the world is
/// never constructed from a rejected map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// First line is not `width height` with both at least 3.
    BadHeader(String),
    /// Fewer or more rows than the header promised.
    RowCount { expected: u32, found: u32 },
    /// A row's length does not match the header width.
    RowWidth { row: u32, expected: u32, found: u32 },
    /// An unrecognized cell character.
    UnknownTile { ch: char, x: i32, y: i32 },
    /// No `P` cell present.
    MissingPlayerSpawn,
    /// More than one `P` cell present.
    DuplicatePlayerSpawn { first: Point, second: Point },
    /// No `E` cells present.
    NoEnemySpawns,
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::BadHeader(line) => write!(f, "bad map header line: {line:?}"),
            MapError::RowCount { expected, found } => {
                write!(f, "expected {expected} map rows, found {found}")
            }
            MapError::RowWidth {
                row,
                expected,
                found,
            } => write!(f, "row {row}: expected width {expected}, found {found}"),
            MapError::UnknownTile { ch, x, y } => {
                write!(f, "unknown tile {ch:?} at ({x}, {y})")
            }
            MapError::MissingPlayerSpawn => write!(f, "map has no player spawn (P)"),
            MapError::DuplicatePlayerSpawn { first, second } => write!(
                f,
                "map has more than one player spawn: ({}, {}) and ({}, {})",
                first.x, first.y, second.x, second.y
            ),
            MapError::NoEnemySpawns => write!(f, "map has no enemy spawn candidates (E)"),
        }
    }
}

impl std::error::Error for MapError {}

/// A parsed, validated map: terrain grid plus spawn points.
/// Invariant: exactly one player spawn, at least one enemy spawn, and
/// `tiles.len() == width * height`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDescriptor {
    pub width: i32,
    pub height: i32,
    /// Row-major terrain codes.
    tiles: Vec<TileCode>,
    pub player_spawn: Point,
    pub enemy_spawns: Vec<Point>,
}

impl MapDescriptor {
    /// Parse and validate the text map format.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());

        let header = lines.next().unwrap_or("").trim().to_string();
        let mut parts = header.split_whitespace();
        let width: i32 = parts
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| MapError::BadHeader(header.clone()))?;
        let height: i32 = parts
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| MapError::BadHeader(header.clone()))?;
        if width < 3 || height < 3 || parts.next().is_some() {
            return Err(MapError::BadHeader(header));
        }

        let mut tiles = Vec::with_capacity((width * height) as usize);
        let mut player_spawn: Option<Point> = None;
        let mut enemy_spawns: Vec<Point> = Vec::new();

        let mut rows = 0u32;
        for (y, line) in lines.enumerate() {
            let y = y as i32;
            rows += 1;
            if rows > height as u32 {
                // Keep counting for the error message.
                continue;
            }
            let row: Vec<char> = line.trim_end().chars().collect();
            if row.len() != width as usize {
                return Err(MapError::RowWidth {
                    row: y as u32,
                    expected: width as u32,
                    found: row.len() as u32,
                });
            }
            for (x, ch) in row.into_iter().enumerate() {
                let pos = Point::new(x as i32, y);
                let tile = match ch {
                    '.' | ' ' => TileCode::Empty,
                    '#' => TileCode::Brick,
                    'X' => TileCode::Steel,
                    '~' => TileCode::Water,
                    '*' => TileCode::Forest,
                    'P' => {
                        if let Some(first) = player_spawn {
                            return Err(MapError::DuplicatePlayerSpawn { first, second: pos });
                        }
                        player_spawn = Some(pos);
                        TileCode::Empty
                    }
                    'E' => {
                        enemy_spawns.push(pos);
                        TileCode::Empty
                    }
                    other => {
                        return Err(MapError::UnknownTile {
                            ch: other,
                            x: pos.x,
                            y: pos.y,
                        })
                    }
                };
                tiles.push(tile);
            }
        }

        if rows != height as u32 {
            return Err(MapError::RowCount {
                expected: height as u32,
                found: rows,
            });
        }

        let player_spawn = player_spawn.ok_or(MapError::MissingPlayerSpawn)?;
        if enemy_spawns.is_empty() {
            return Err(MapError::NoEnemySpawns);
        }

        Ok(Self {
            width,
            height,
            tiles,
            player_spawn,
            enemy_spawns,
        })
    }

    /// Terrain code at a position. Out of bounds reads as empty; bounds
    /// enforcement belongs to the engine's accessibility checks.
    pub fn tile_at(&self, p: Point) -> TileCode {
        if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height {
            return TileCode::Empty;
        }
        self.tiles[(p.y * self.width + p.x) as usize]
    }

    /// Iterate all cells with their positions, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Point, TileCode)> + '_ {
        let width = self.width;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, &tile)| (Point::new(i as i32 % width, i as i32 / width), tile))
    }
}
