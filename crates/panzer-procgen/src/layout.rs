//! Layout generation: cluster growth, spawn clearances, lane carving.
//!
//! Obstacles are grown as organic clusters from random seed cells,
//! with per-type budgets scaled by the level. A grid of patrol lanes
//! is carved clear of everything but steel afterwards, so every layout
//! stays traversable. Rendering goes through the text map format and
//! its validator rather than constructing a descriptor directly.

use rand::Rng;

use panzer_core::types::Point;
use panzer_map::{MapDescriptor, MapError};

/// Smallest field the generator accepts.
pub const MIN_WIDTH: i32 = 12;
pub const MIN_HEIGHT: i32 = 10;

/// Attempts to find a free cluster seed cell before giving up.
const CENTER_ATTEMPTS: u32 = 16;
/// Growth acceptance at a cluster's center; falls off linearly with
/// distance until it reaches zero at the cluster radius.
const GROWTH_CHANCE: f64 = 0.7;
/// Per-cell chance for the sheltering wall, leaving it cracked.
const WALL_CHANCE: f64 = 0.8;
/// Per-cell chance during the loose-scatter pass.
const SCATTER_CHANCE: f64 = 0.3;

/// Growth neighborhood, diagonals included for rounder shapes.
const NEIGHBORS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Per-type cluster budgets and lane geometry for one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutParams {
    pub brick_clusters: u32,
    pub brick_cluster_size: u32,
    pub brick_radius: i32,
    /// Zero below level 3: early fields have no indestructible cover.
    pub steel_clusters: u32,
    pub steel_cluster_size: u32,
    pub water_clusters: u32,
    pub water_cluster_size: u32,
    pub forest_clusters: u32,
    pub forest_cluster_size: u32,
    /// Brick wall sheltering the player spawn, from level 2.
    pub defensive_wall: bool,
    pub lane_x_step: i32,
    pub lane_y_step: i32,
    /// Jitter lane nodes on later levels for more winding paths.
    pub lane_jitter: bool,
}

impl LayoutParams {
    pub fn for_level(level: u32) -> Self {
        let level = level.max(1);
        Self {
            brick_clusters: 2 + level / 2,
            brick_cluster_size: 8 + level,
            brick_radius: (4 + level as i32 / 2).min(6),
            steel_clusters: if level >= 3 { 1 + level / 4 } else { 0 },
            steel_cluster_size: 5 + level / 2,
            water_clusters: 1 + level / 4,
            water_cluster_size: 8 + level,
            forest_clusters: 2,
            forest_cluster_size: 10 + level,
            defensive_wall: level >= 2,
            lane_x_step: if level <= 3 {
                6
            } else {
                (4 + level as i32 / 2).min(8)
            },
            lane_y_step: if level <= 3 { 2 } else { 3 },
            lane_jitter: level > 3,
        }
    }
}

/// Generate one battlefield layout. Deterministic for a given RNG
/// state: the same seed and params reproduce the same field.
pub fn generate(
    width: i32,
    height: i32,
    params: &LayoutParams,
    rng: &mut impl Rng,
) -> Result<MapDescriptor, MapError> {
    assert!(width >= MIN_WIDTH && height >= MIN_HEIGHT);
    let mut field = Field::new(width, height);

    let clusters = [
        ('#', params.brick_clusters, params.brick_cluster_size, params.brick_radius),
        ('X', params.steel_clusters, params.steel_cluster_size, 3),
        ('*', params.forest_clusters, params.forest_cluster_size, 5),
        ('~', params.water_clusters, params.water_cluster_size, 4),
    ];
    for (tile, count, size, radius) in clusters {
        for _ in 0..count {
            grow_cluster(&mut field, rng, tile, radius, size);
        }
    }

    // Loose singles so fields are not purely cluster shaped.
    scatter(&mut field, rng, '#', params.brick_clusters + 2);
    scatter(&mut field, rng, '*', params.forest_clusters + 1);

    if params.defensive_wall {
        build_defensive_wall(&mut field, rng);
    }

    carve_lanes(&mut field, rng, params);

    MapDescriptor::parse(&field.render())
}

/// The field under construction, as terrain characters.
struct Field {
    width: i32,
    height: i32,
    cells: Vec<char>,
    player_spawn: Point,
    enemy_spawns: Vec<Point>,
}

impl Field {
    fn new(width: i32, height: i32) -> Self {
        let mut field = Self {
            width,
            height,
            cells: vec!['.'; (width * height) as usize],
            player_spawn: Point::new(width / 2, height - 3),
            enemy_spawns: vec![
                Point::new(2, 1),
                Point::new(width / 2, 1),
                Point::new(width - 3, 1),
            ],
        };
        for x in 0..width {
            field.set(Point::new(x, 0), 'X');
            field.set(Point::new(x, height - 1), 'X');
        }
        for y in 1..height - 1 {
            field.set(Point::new(0, y), 'X');
            field.set(Point::new(width - 1, y), 'X');
        }
        field
    }

    fn index(&self, p: Point) -> usize {
        (p.y * self.width + p.x) as usize
    }

    fn get(&self, p: Point) -> char {
        self.cells[self.index(p)]
    }

    fn set(&mut self, p: Point, tile: char) {
        let index = self.index(p);
        self.cells[index] = tile;
    }

    /// May an obstacle go on `p`? Keeps a margin from the walls, a
    /// clearance square around the player spawn, and a free ring
    /// around every enemy spawn.
    fn placeable(&self, p: Point, player_clearance: i32) -> bool {
        if p.x < 2 || p.y < 2 || p.x > self.width - 3 || p.y > self.height - 3 {
            return false;
        }
        if self.get(p) != '.' {
            return false;
        }
        if (p.x - self.player_spawn.x).abs() < player_clearance
            && (p.y - self.player_spawn.y).abs() < player_clearance
        {
            return false;
        }
        for &spawn in &self.enemy_spawns {
            if (p.x - spawn.x).abs() <= 1 && (p.y - spawn.y).abs() <= 1 {
                return false;
            }
        }
        true
    }

    /// Header plus rows with spawn markers, ready for the parser.
    fn render(&self) -> String {
        let mut text = format!("{} {}\n", self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let p = Point::new(x, y);
                let tile = if p == self.player_spawn {
                    'P'
                } else if self.enemy_spawns.contains(&p) {
                    'E'
                } else {
                    self.get(p)
                };
                text.push(tile);
            }
            text.push('\n');
        }
        text
    }
}

fn distance(a: Point, b: Point) -> f64 {
    let dx = (a.x - b.x) as f64;
    let dy = (a.y - b.y) as f64;
    (dx * dx + dy * dy).sqrt()
}

fn pick_center(field: &Field, rng: &mut impl Rng) -> Option<Point> {
    for _ in 0..CENTER_ATTEMPTS {
        let p = Point::new(
            rng.gen_range(2..=field.width - 3),
            rng.gen_range(2..=field.height - 3),
        );
        if field.placeable(p, 3) {
            return Some(p);
        }
    }
    None
}

/// Grow one cluster from a seed cell. Growth spreads from active
/// frontier cells with a chance that decays toward the radius, which
/// rounds the shape without making it a disc.
fn grow_cluster(field: &mut Field, rng: &mut impl Rng, tile: char, radius: i32, target: u32) {
    let Some(center) = pick_center(field, rng) else {
        return;
    };
    field.set(center, tile);
    let mut cluster = vec![center];
    let mut active = vec![center];

    let max_iterations = target * 5;
    let mut iterations = 0;
    while !active.is_empty() && (cluster.len() as u32) < target && iterations < max_iterations {
        iterations += 1;
        let index = rng.gen_range(0..active.len());
        let base = active[index];
        let mut grew = false;

        for (dx, dy) in NEIGHBORS {
            let p = Point::new(base.x + dx, base.y + dy);
            let dist = distance(p, center);
            if dist > radius as f64 || !field.placeable(p, 3) {
                continue;
            }
            let chance = GROWTH_CHANCE * (1.0 - dist / radius as f64);
            if rng.gen_bool(chance) {
                field.set(p, tile);
                cluster.push(p);
                active.push(p);
                grew = true;
                if cluster.len() as u32 >= target {
                    break;
                }
            }
        }

        if !grew {
            active.swap_remove(index);
        }
    }
}

fn scatter(field: &mut Field, rng: &mut impl Rng, tile: char, count: u32) {
    let mut placed = 0;
    for _ in 0..count * 3 {
        let p = Point::new(
            rng.gen_range(2..=field.width - 3),
            rng.gen_range(2..=field.height - 3),
        );
        if field.placeable(p, 3) && rng.gen_bool(SCATTER_CHANCE) {
            field.set(p, tile);
            placed += 1;
            if placed >= count {
                break;
            }
        }
    }
}

/// Cracked brick wall two rows above the player spawn.
fn build_defensive_wall(field: &mut Field, rng: &mut impl Rng) {
    let spawn = field.player_spawn;
    let y = spawn.y - 2;
    for x in spawn.x - 4..=spawn.x + 4 {
        let p = Point::new(x, y);
        if field.placeable(p, 2) && rng.gen_bool(WALL_CHANCE) {
            field.set(p, '#');
        }
    }
}

/// Clear everything but steel in a ring around each lane node so no
/// layout seals tanks in.
fn carve_lanes(field: &mut Field, rng: &mut impl Rng, params: &LayoutParams) {
    let mut nodes: Vec<Point> = Vec::new();
    let mut x = 3;
    while x < field.width - 3 {
        let mut y = 3;
        while y < field.height - 3 {
            let node = if params.lane_jitter {
                Point::new(x + rng.gen_range(-1..=1), y + rng.gen_range(-1..=1))
            } else {
                Point::new(x, y)
            };
            nodes.push(node);
            y += params.lane_y_step;
        }
        x += params.lane_x_step;
    }

    for node in nodes {
        for dy in -1..=1 {
            for dx in -1..=1 {
                let p = Point::new(node.x + dx, node.y + dy);
                let interior =
                    p.x >= 1 && p.x <= field.width - 2 && p.y >= 1 && p.y <= field.height - 2;
                if interior && field.get(p) != 'X' {
                    field.set(p, '.');
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panzer_map::TileCode;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn gen(seed: u64, level: u32) -> MapDescriptor {
        let mut rng = StdRng::seed_from_u64(seed);
        generate(24, 14, &LayoutParams::for_level(level), &mut rng).unwrap()
    }

    fn interior_count(map: &MapDescriptor, tile: TileCode) -> usize {
        map.cells()
            .filter(|(p, t)| {
                *t == tile && p.x > 0 && p.y > 0 && p.x < map.width - 1 && p.y < map.height - 1
            })
            .count()
    }

    #[test]
    fn test_generated_map_passes_validation() {
        let map = gen(1, 1);
        assert_eq!(map.width, 24);
        assert_eq!(map.height, 14);
        assert_eq!(map.player_spawn, Point::new(12, 11));
        assert_eq!(map.enemy_spawns.len(), 3);
    }

    #[test]
    fn test_border_is_steel() {
        let map = gen(2, 4);
        for x in 0..map.width {
            assert_eq!(map.tile_at(Point::new(x, 0)), TileCode::Steel);
            assert_eq!(map.tile_at(Point::new(x, map.height - 1)), TileCode::Steel);
        }
        for y in 0..map.height {
            assert_eq!(map.tile_at(Point::new(0, y)), TileCode::Steel);
            assert_eq!(map.tile_at(Point::new(map.width - 1, y)), TileCode::Steel);
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        assert_eq!(gen(9, 3), gen(9, 3));
    }

    #[test]
    fn test_different_seeds_differ() {
        assert_ne!(gen(1, 3), gen(2, 3));
    }

    #[test]
    fn test_levels_reshape_the_field() {
        assert_ne!(gen(5, 1), gen(5, 6));
    }

    #[test]
    fn test_no_interior_steel_before_level_three() {
        assert_eq!(LayoutParams::for_level(1).steel_clusters, 0);
        assert_eq!(LayoutParams::for_level(2).steel_clusters, 0);
        for seed in 0..4 {
            assert_eq!(interior_count(&gen(seed, 1), TileCode::Steel), 0);
        }
    }

    #[test]
    fn test_spawn_cells_stay_clear() {
        for seed in 0..8 {
            let map = gen(seed, 5);
            assert_eq!(map.tile_at(map.player_spawn), TileCode::Empty);
            for &spawn in &map.enemy_spawns {
                assert_eq!(map.tile_at(spawn), TileCode::Empty);
                // Exits exist: the cell below the spawn is free.
                let below = Point::new(spawn.x, spawn.y + 1);
                assert_eq!(map.tile_at(below), TileCode::Empty);
            }
        }
    }

    #[test]
    fn test_budgets_scale_with_level() {
        let low = LayoutParams::for_level(1);
        let high = LayoutParams::for_level(8);
        assert!(high.brick_clusters > low.brick_clusters);
        assert!(high.brick_cluster_size > low.brick_cluster_size);
        assert!(high.steel_clusters > 0);
        assert!(high.defensive_wall && !low.defensive_wall);
    }
}
