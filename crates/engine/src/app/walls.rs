use std::collections::HashSet;

use super::grid::{step, CellPx, Direction};

/// Mutable set of occupied grid cells. One logical occupant per cell:
/// re-adding an occupied cell and removing a vacant one are both no-ops,
/// so registration is idempotent by construction.
#[derive(Debug, Clone, Default)]
pub struct WallMap {
    occupied: HashSet<CellPx>,
}

impl WallMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: impl IntoIterator<Item = CellPx>) -> Self {
        Self {
            occupied: cells.into_iter().collect(),
        }
    }

    pub fn add(&mut self, cell: CellPx) {
        self.occupied.insert(cell);
    }

    pub fn remove(&mut self, cell: CellPx) {
        self.occupied.remove(&cell);
    }

    /// Moves an occupant one tile: clears `from` and claims the cell one
    /// step in `direction`. Used whenever an actor's logical cell changes.
    pub fn shift(&mut self, from: CellPx, direction: Direction) {
        self.remove(from);
        self.add(step(from, direction));
    }

    pub fn contains(&self, cell: CellPx) -> bool {
        self.occupied.contains(&cell)
    }

    /// Whether a step from `from` in `direction` would land on an
    /// occupied cell. Occupancy gates movement intent only; trigger
    /// lookups never consult this.
    pub fn is_blocked(&self, from: CellPx, direction: Direction) -> bool {
        self.contains(step(from, direction))
    }

    pub fn len(&self) -> usize {
        self.occupied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = CellPx> + '_ {
        self.occupied.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_blocks_and_remove_unblocks_regardless_of_unrelated_cells() {
        let mut walls = WallMap::new();
        walls.add(CellPx::new(16, 16));
        walls.add(CellPx::new(64, 0));
        walls.remove(CellPx::new(64, 0));
        walls.add(CellPx::new(-32, 48));

        assert!(walls.contains(CellPx::new(16, 16)));
        walls.remove(CellPx::new(16, 16));
        assert!(!walls.contains(CellPx::new(16, 16)));
        assert!(walls.contains(CellPx::new(-32, 48)));
    }

    #[test]
    fn is_blocked_looks_one_step_ahead() {
        let mut walls = WallMap::new();
        walls.add(CellPx::new(16, 16));

        assert!(walls.is_blocked(CellPx::new(0, 16), Direction::Right));
        assert!(!walls.is_blocked(CellPx::new(0, 0), Direction::Right));
        assert!(walls.is_blocked(CellPx::new(16, 32), Direction::Up));
        assert!(!walls.is_blocked(CellPx::new(16, 16), Direction::Up));
    }

    #[test]
    fn shift_equals_remove_then_add_of_the_stepped_cell() {
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            let from = CellPx::new(48, 80);

            let mut shifted = WallMap::new();
            shifted.add(from);
            shifted.shift(from, direction);

            let mut manual = WallMap::new();
            manual.add(from);
            manual.remove(from);
            manual.add(step(from, direction));

            assert!(!shifted.contains(from));
            assert!(shifted.contains(step(from, direction)));
            assert_eq!(shifted.len(), manual.len());
            for cell in manual.cells() {
                assert!(shifted.contains(cell));
            }
        }
    }

    #[test]
    fn double_add_and_stray_remove_are_idempotent() {
        let mut walls = WallMap::new();
        walls.add(CellPx::new(0, 0));
        walls.add(CellPx::new(0, 0));
        assert_eq!(walls.len(), 1);

        walls.remove(CellPx::new(160, 160));
        assert_eq!(walls.len(), 1);
        assert!(walls.contains(CellPx::new(0, 0)));
    }
}
