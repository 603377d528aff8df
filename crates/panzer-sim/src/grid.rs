//! ObstacleGrid: fixed-size grid of obstacle entity references.
//!
//! The grid is the authoritative existence check for obstacles: a cell
//! holds `Some(entity)` exactly while that obstacle is alive, and the
//! sweep clears the cell when the obstacle is destroyed. Out-of-bounds
//! queries answer "nothing there" rather than failing.

use hecs::Entity;

use panzer_core::types::Point;

/// Grid of optional obstacle references, row-major.
#[derive(Debug, Clone)]
pub struct ObstacleGrid {
    width: i32,
    height: i32,
    cells: Vec<Option<Entity>>,
}

impl ObstacleGrid {
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Self {
            width,
            height,
            cells: vec![None; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// Obstacle entity occupying `p`, if any. Out of bounds is `None`.
    pub fn obstacle_at(&self, p: Point) -> Option<Entity> {
        if !self.in_bounds(p) {
            return None;
        }
        self.cells[self.index(p)]
    }

    /// Record an obstacle at `p`. The cell must be empty.
    pub fn set(&mut self, p: Point, entity: Entity) {
        debug_assert!(self.in_bounds(p));
        let idx = self.index(p);
        debug_assert!(self.cells[idx].is_none(), "obstacle cell already occupied");
        self.cells[idx] = Some(entity);
    }

    /// Clear the cell at `p` (obstacle destroyed).
    pub fn clear(&mut self, p: Point) {
        if self.in_bounds(p) {
            let idx = self.index(p);
            self.cells[idx] = None;
        }
    }

    fn index(&self, p: Point) -> usize {
        (p.y * self.width + p.x) as usize
    }
}
