//! The playing grid.
//!
//! Cells are stored row-major in a flat `Vec` and hold an optional
//! [`UnitId`]. The owning copy of every unit lives in `Board::units`; a cell
//! only names which unit stands on it.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::unit::UnitId;

/// A grid coordinate. `y` is the row, `x` the column.
///
/// Signed so that stepping off the edge yields a representable value that
/// bounds checks can reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// Returns the coordinate `dy` rows away in the same column.
    pub const fn step_rows(self, dy: i32) -> Self {
        Coord {
            x: self.x,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Fixed-size grid of optional unit ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Option<UnitId>>,
}

impl Grid {
    /// Creates an empty grid.
    pub fn new(width: usize, height: usize) -> Self {
        Grid {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns true if the coordinate lies on the grid.
    pub fn contains(&self, at: Coord) -> bool {
        self.index(at).is_some()
    }

    fn index(&self, at: Coord) -> Option<usize> {
        if at.x < 0 || at.y < 0 {
            return None;
        }
        let (x, y) = (at.x as usize, at.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Returns the occupant of a cell, or `None` if empty or off-grid.
    pub fn get(&self, at: Coord) -> Option<UnitId> {
        self.index(at).and_then(|i| self.cells[i])
    }

    /// Writes a cell. Returns false if the coordinate is off-grid.
    pub fn set(&mut self, at: Coord, unit: Option<UnitId>) -> bool {
        match self.index(at) {
            Some(i) => {
                self.cells[i] = unit;
                true
            }
            None => false,
        }
    }

    /// Empties a cell, returning the previous occupant.
    pub fn clear(&mut self, at: Coord) -> Option<UnitId> {
        self.index(at).and_then(|i| self.cells[i].take())
    }

    /// Iterates over all occupied cells as `(coord, id)`.
    pub fn occupied(&self) -> impl Iterator<Item = (Coord, UnitId)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.map(|id| (Coord::new((i % width) as i32, (i / width) as i32), id))
        })
    }
}
