//! Spatial grid of entity handles.
//!
//! Cells hold unordered multisets of handles into the registry; the grid
//! never stores entity data itself, so registry and grid cannot disagree
//! about anything except membership, and `SimulationWorld` funnels every
//! membership change through a single code path.

use hecs::Entity;

/// The four cardinal neighbor offsets, in the scan order used for adjacency
/// checks (wander and `find_empty_adjacent` shuffle a copy).
pub const CARDINALS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Width x height array of cells indexed by integer coordinates.
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Vec<Entity>>,
}

impl Grid {
    /// Create an empty grid. Dimensions must be positive.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Self {
            width,
            height,
            cells: vec![Vec::new(); (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Insert a handle at (x, y). Caller has already bounds-checked.
    pub fn insert(&mut self, x: i32, y: i32, entity: Entity) {
        let index = self.index(x, y);
        self.cells[index].push(entity);
    }

    /// Remove one occurrence of `entity` from (x, y). Absence (stale state)
    /// and out-of-bounds coordinates are tolerated as no-ops.
    pub fn remove(&mut self, x: i32, y: i32, entity: Entity) {
        if !self.in_bounds(x, y) {
            return;
        }
        let index = self.index(x, y);
        let cell = &mut self.cells[index];
        if let Some(found) = cell.iter().position(|&e| e == entity) {
            // Vec::remove keeps the remaining occupants in arrival order,
            // which "first one found" scans rely on.
            cell.remove(found);
        }
    }

    /// Occupants of (x, y), or an empty slice when out of bounds.
    pub fn occupants(&self, x: i32, y: i32) -> &[Entity] {
        if !self.in_bounds(x, y) {
            return &[];
        }
        &self.cells[self.index(x, y)]
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handles(n: u32) -> Vec<Entity> {
        let mut world = hecs::World::new();
        (0..n).map(|i| world.spawn((i,))).collect()
    }

    #[test]
    fn test_insert_and_remove() {
        let entities = handles(2);
        let mut grid = Grid::new(4, 4);

        grid.insert(1, 2, entities[0]);
        grid.insert(1, 2, entities[1]);
        assert_eq!(grid.occupants(1, 2), &entities[..]);

        grid.remove(1, 2, entities[0]);
        assert_eq!(grid.occupants(1, 2), &entities[1..]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let entities = handles(2);
        let mut grid = Grid::new(4, 4);
        grid.insert(0, 0, entities[0]);

        grid.remove(0, 0, entities[1]); // never inserted
        grid.remove(3, 3, entities[0]); // wrong cell
        grid.remove(-1, 9, entities[0]); // out of bounds
        assert_eq!(grid.occupants(0, 0), &entities[..1]);
    }

    #[test]
    fn test_out_of_bounds_occupants_empty() {
        let grid = Grid::new(3, 3);
        assert!(grid.occupants(-1, 0).is_empty());
        assert!(grid.occupants(0, 3).is_empty());
        assert!(!grid.in_bounds(3, 0));
        assert!(grid.in_bounds(2, 2));
    }

    #[test]
    fn test_duplicate_handle_removed_once() {
        let entities = handles(1);
        let mut grid = Grid::new(2, 2);
        grid.insert(0, 0, entities[0]);
        grid.insert(0, 0, entities[0]);

        grid.remove(0, 0, entities[0]);
        assert_eq!(grid.occupants(0, 0).len(), 1);
    }
}
