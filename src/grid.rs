use crate::config::{GridSize, WrapMode};

/// Grid position in logical cell coordinates.
///
/// Coordinates are signed so that a head stepping off the board can be
/// represented before the collision is resolved.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this position shifted by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The fixed-size playing field.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Grid {
    size: GridSize,
}

impl Grid {
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        debug_assert!(size.width > 0 && size.height > 0);
        Self { size }
    }

    #[must_use]
    pub fn size(self) -> GridSize {
        self.size
    }

    #[must_use]
    pub fn width(self) -> i32 {
        i32::from(self.size.width)
    }

    #[must_use]
    pub fn height(self) -> i32 {
        i32::from(self.size.height)
    }

    #[must_use]
    pub fn total_cells(self) -> usize {
        self.size.total_cells()
    }

    /// Returns true when the position lies inside the grid.
    #[must_use]
    pub fn is_in_bounds(self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width()
            && position.y < self.height()
    }

    /// Wraps `position` onto the grid when wrap mode is on.
    ///
    /// With wrap off the position is returned untouched: an out-of-bounds
    /// cell is a collision signal, not something to repair.
    #[must_use]
    pub fn normalize(self, position: Position, wrap: WrapMode) -> Position {
        match wrap {
            WrapMode::On => Position {
                x: position.x.rem_euclid(self.width()),
                y: position.y.rem_euclid(self.height()),
            },
            WrapMode::Off => position,
        }
    }

    /// The grid centre, biased towards the bottom-right on even sizes.
    #[must_use]
    pub fn center(self) -> Position {
        Position {
            x: self.width() / 2,
            y: self.height() / 2,
        }
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Position> {
        let width = self.width();
        (0..self.height()).flat_map(move |y| (0..width).map(move |x| Position { x, y }))
    }
}
