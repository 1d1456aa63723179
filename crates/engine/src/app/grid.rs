use serde::{Deserialize, Serialize};

/// Side length of one grid cell in world pixels. Every resting position,
/// wall cell, and trigger cell is a multiple of this.
pub const TILE_SIZE_PX: i32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// One-tile displacement in world pixels.
    pub const fn delta_px(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -TILE_SIZE_PX),
            Direction::Down => (0, TILE_SIZE_PX),
            Direction::Left => (-TILE_SIZE_PX, 0),
            Direction::Right => (TILE_SIZE_PX, 0),
        }
    }

    pub const fn invert(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// A grid cell addressed by its raw pixel coordinate. Wall and trigger
/// tables are keyed by this exact value, so setup-time registration and
/// runtime lookups quantize identically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellPx {
    pub x: i32,
    pub y: i32,
}

impl CellPx {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Scales a logical tile count to world pixels.
pub const fn with_grid(tiles: i32) -> i32 {
    tiles * TILE_SIZE_PX
}

/// The cell one tile away from `from` in `direction`.
pub const fn step(from: CellPx, direction: Direction) -> CellPx {
    let (dx, dy) = direction.delta_px();
    CellPx {
        x: from.x + dx,
        y: from.y + dy,
    }
}

pub const fn is_tile_aligned(cell: CellPx) -> bool {
    cell.x % TILE_SIZE_PX == 0 && cell.y % TILE_SIZE_PX == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_moves_exactly_one_tile_in_each_direction() {
        let origin = CellPx::new(with_grid(3), with_grid(5));
        assert_eq!(step(origin, Direction::Up), CellPx::new(48, 64));
        assert_eq!(step(origin, Direction::Down), CellPx::new(48, 96));
        assert_eq!(step(origin, Direction::Left), CellPx::new(32, 80));
        assert_eq!(step(origin, Direction::Right), CellPx::new(64, 80));
    }

    #[test]
    fn invert_is_an_involution() {
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            assert_eq!(direction.invert().invert(), direction);
        }
    }

    #[test]
    fn step_then_inverted_step_returns_home() {
        let origin = CellPx::new(0, 0);
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            assert_eq!(step(step(origin, direction), direction.invert()), origin);
        }
    }

    #[test]
    fn tile_alignment_tracks_the_tile_size() {
        assert!(is_tile_aligned(CellPx::new(with_grid(-2), with_grid(7))));
        assert!(!is_tile_aligned(CellPx::new(with_grid(1) + 1, 0)));
        assert!(!is_tile_aligned(CellPx::new(0, 9)));
    }
}
