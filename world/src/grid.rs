//! Immutable passability grid and the markers recorded on it.

use std::collections::BTreeMap;

use maze_chase_core::{CellCoord, DoorId, Marker, MazeQuery, PursuerKind};
use serde::Deserialize;
use thiserror::Error;

const BLOCKED: u8 = 0;
const OPEN: u8 = 1;

/// Structured maze data handed over by the presentation layer.
///
/// `cells` is row-major with `1` for open cells and `0` for walls.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MazeDefinition {
    /// Passability rows, top to bottom.
    pub cells: Vec<Vec<u8>>,
    /// Pursuer spawn doors keyed by their letter.
    #[serde(default)]
    pub doors: BTreeMap<DoorId, CellCoord>,
    /// Cell the player must reach.
    pub goal: CellCoord,
    /// Cell the player starts on.
    pub start: CellCoord,
    /// Pursuers that take part in every session, in pursuer order.
    #[serde(default)]
    pub pursuers: Vec<PursuerKind>,
}

/// Reasons a maze cannot be built or queried.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// The maze has no rows or no columns.
    #[error("maze has no cells")]
    EmptyGrid,
    /// A row differs in width from the first row.
    #[error("row {row} has {found} cells but the maze is {expected} cells wide")]
    MalformedGrid {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A cell holds a value other than `0` or `1`.
    #[error("cell ({column}, {row}) holds {value}; expected 0 or 1")]
    InvalidCell {
        /// Column of the offending cell.
        column: usize,
        /// Row of the offending cell.
        row: usize,
        /// Value found in the cell.
        value: u8,
    },
    /// The maze is wider or taller than a cell coordinate can address.
    #[error("maze of {columns}x{rows} cells is too large")]
    TooLarge {
        /// Number of columns supplied.
        columns: usize,
        /// Number of rows supplied.
        rows: usize,
    },
    /// A marker was registered outside the maze.
    #[error("{marker} at {cell} lies outside the maze")]
    OutOfBounds {
        /// Marker that was misplaced.
        marker: Marker,
        /// Cell the marker was registered on.
        cell: CellCoord,
    },
    /// A marker was looked up that was never registered.
    #[error("no {0} is registered on the maze")]
    UnknownMarker(Marker),
}

/// Passability of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellState {
    /// The cell can be entered.
    Open,
    /// The cell is a wall.
    Blocked,
}

/// Rectangular maze that never changes after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    states: Vec<CellState>,
    doors: BTreeMap<DoorId, CellCoord>,
    goal: CellCoord,
    start: CellCoord,
}

impl Grid {
    /// Validates the definition and builds the grid it describes.
    pub fn from_definition(definition: &MazeDefinition) -> Result<Self, GridError> {
        Self::new(
            &definition.cells,
            definition.doors.clone(),
            definition.goal,
            definition.start,
        )
    }

    /// Builds a grid from row-major `0`/`1` rows and its markers.
    pub fn new(
        cells: &[Vec<u8>],
        doors: BTreeMap<DoorId, CellCoord>,
        goal: CellCoord,
        start: CellCoord,
    ) -> Result<Self, GridError> {
        let width = cells.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(GridError::EmptyGrid);
        }

        let mut states = Vec::with_capacity(width * cells.len());
        for (row, values) in cells.iter().enumerate() {
            if values.len() != width {
                return Err(GridError::MalformedGrid {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }

            for (column, &value) in values.iter().enumerate() {
                let state = match value {
                    OPEN => CellState::Open,
                    BLOCKED => CellState::Blocked,
                    value => return Err(GridError::InvalidCell { column, row, value }),
                };
                states.push(state);
            }
        }

        let too_large = || GridError::TooLarge {
            columns: width,
            rows: cells.len(),
        };
        let columns = u32::try_from(width).map_err(|_| too_large())?;
        let rows = u32::try_from(cells.len()).map_err(|_| too_large())?;

        let grid = Self {
            columns,
            rows,
            states,
            doors,
            goal,
            start,
        };
        grid.check_markers()?;
        Ok(grid)
    }

    fn check_markers(&self) -> Result<(), GridError> {
        let doors = self
            .doors
            .iter()
            .map(|(&door, &cell)| (Marker::Door(door), cell));
        let fixed = [(Marker::Goal, self.goal), (Marker::Start, self.start)];

        for (marker, cell) in fixed.into_iter().chain(doors) {
            if !self.contains(cell) {
                return Err(GridError::OutOfBounds { marker, cell });
            }
        }
        Ok(())
    }

    /// Passability of the cell, or `None` outside the grid.
    #[must_use]
    pub fn state(&self, cell: CellCoord) -> Option<CellState> {
        self.index(cell)
            .and_then(|index| self.states.get(index).copied())
    }

    /// Location of a registered marker.
    pub fn marker_location(&self, marker: Marker) -> Result<CellCoord, GridError> {
        self.marker(marker).ok_or(GridError::UnknownMarker(marker))
    }

    /// Registered doors in letter order.
    pub fn doors(&self) -> impl Iterator<Item = (DoorId, CellCoord)> + '_ {
        self.doors.iter().map(|(&door, &cell)| (door, cell))
    }

    /// Cell the player must reach.
    #[must_use]
    pub const fn goal(&self) -> CellCoord {
        self.goal
    }

    /// Cell the player starts on.
    #[must_use]
    pub const fn start(&self) -> CellCoord {
        self.start
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let column = usize::try_from(cell.column()).ok()?;
        let row = usize::try_from(cell.row()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

impl MazeQuery for Grid {
    fn columns(&self) -> u32 {
        self.columns
    }

    fn rows(&self) -> u32 {
        self.rows
    }

    fn is_open(&self, cell: CellCoord) -> bool {
        self.state(cell) == Some(CellState::Open)
    }

    fn marker(&self, marker: Marker) -> Option<CellCoord> {
        match marker {
            Marker::Door(door) => self.doors.get(&door).copied(),
            Marker::Goal => Some(self.goal),
            Marker::Start => Some(self.start),
        }
    }
}
