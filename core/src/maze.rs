//! Read-only maze capability shared by the grid, the search engine and movers.

use crate::{CellCoord, Marker};

/// Orthogonal offsets in enumeration order: up, right, down, left.
const ORTHOGONAL_OFFSETS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Leap offsets in enumeration order: N2, E2, S2, W2, NE, SE, SW, NW.
const LEAP_OFFSETS: [(i32, i32); 8] = [
    (0, -2),
    (2, 0),
    (0, 2),
    (-2, 0),
    (1, -1),
    (1, 1),
    (-1, 1),
    (-1, -1),
];

/// Queries a search needs from a maze: bounds, passability and markers.
///
/// Implementors provide the four required methods; the three adjacency
/// models are derived from them so every maze enumerates candidates in the
/// same fixed order. That order is what makes shortest paths reproducible.
pub trait MazeQuery {
    /// Number of columns in the maze.
    fn columns(&self) -> u32;

    /// Number of rows in the maze.
    fn rows(&self) -> u32;

    /// Reports whether the cell can be entered.
    ///
    /// Must return `false` for cells outside the maze.
    fn is_open(&self, cell: CellCoord) -> bool;

    /// Location registered for the marker, if any.
    fn marker(&self, marker: Marker) -> Option<CellCoord>;

    /// Reports whether the cell lies within the maze extent.
    fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns() && cell.row() < self.rows()
    }

    /// Reports whether the cell is a wall or lies outside the maze.
    fn is_blocked(&self, cell: CellCoord) -> bool {
        !self.is_open(cell)
    }

    /// Reports whether the cell is the goal marker.
    fn is_goal(&self, cell: CellCoord) -> bool {
        self.marker(Marker::Goal) == Some(cell)
    }

    /// Open orthogonal neighbours in up, right, down, left order.
    fn neighbors4(&self, cell: CellCoord) -> Neighbors {
        let mut neighbors = Neighbors::default();
        for (columns, rows) in ORTHOGONAL_OFFSETS {
            if let Some(candidate) = cell.offset(columns, rows) {
                if self.is_open(candidate) {
                    neighbors.push(candidate);
                }
            }
        }
        neighbors
    }

    /// In-bounds orthogonal neighbours in up, right, down, left order,
    /// regardless of walls.
    fn all_neighbors4(&self, cell: CellCoord) -> Neighbors {
        let mut neighbors = Neighbors::default();
        for (columns, rows) in ORTHOGONAL_OFFSETS {
            if let Some(candidate) = cell.offset(columns, rows) {
                if self.contains(candidate) {
                    neighbors.push(candidate);
                }
            }
        }
        neighbors
    }

    /// Cells reachable by a single leap in N2, E2, S2, W2, NE, SE, SW, NW
    /// order.
    ///
    /// A leap is valid when both the destination and its midpoint are open.
    /// Two-cell orthogonal leaps use the cell in between as the midpoint;
    /// diagonal leaps are their own midpoint.
    fn leap_neighbors(&self, cell: CellCoord) -> Neighbors {
        let mut neighbors = Neighbors::default();
        for (columns, rows) in LEAP_OFFSETS {
            let Some(destination) = cell.offset(columns, rows) else {
                continue;
            };

            let midpoint = if columns.abs() == 2 || rows.abs() == 2 {
                cell.offset(columns / 2, rows / 2)
            } else {
                Some(destination)
            };
            let Some(midpoint) = midpoint else {
                continue;
            };

            if self.is_open(destination) && self.is_open(midpoint) {
                neighbors.push(destination);
            }
        }
        neighbors
    }
}

/// Fixed-capacity, ordered collection of candidate cells produced by an
/// adjacency model.
#[derive(Clone, Copy, Debug, Default)]
pub struct Neighbors {
    cells: [Option<CellCoord>; 8],
    len: usize,
    cursor: usize,
}

impl Neighbors {
    fn push(&mut self, cell: CellCoord) {
        if let Some(slot) = self.cells.get_mut(self.len) {
            *slot = Some(cell);
            self.len += 1;
        }
    }
}

impl Iterator for Neighbors {
    type Item = CellCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.len {
            return None;
        }
        let cell = self.cells[self.cursor];
        self.cursor += 1;
        cell
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.cursor;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Neighbors {}
