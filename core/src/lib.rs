#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Chase engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query the
//! read-only maze through [`MazeQuery`], and respond exclusively with new
//! command batches.

use std::{error::Error, fmt};

use serde::{Deserialize, Serialize};

mod maze;

pub use maze::{MazeQuery, Neighbors};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Chase.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Starts a fresh session with the chosen hero on the start marker.
    StartSession {
        /// Hero controlled by the player for the session.
        hero: Hero,
    },
    /// Places the roster's pursuers on the provided cells in roster order.
    PlacePursuers {
        /// Spawn cells; surplus pursuers without a cell stay off the board.
        cells: Vec<CellCoord>,
    },
    /// Requests that the player step one cell in the given direction.
    MovePlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Explicit no-op input for a tick in which the player does nothing.
    Wait,
    /// Advances every pursuer one step along its freshly planned route.
    AdvancePursuers {
        /// Planned routes in pursuer order.
        steps: Vec<PursuerStep>,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that a new session began.
    SessionStarted {
        /// Hero controlled by the player.
        hero: Hero,
        /// Cell the player starts on.
        start: CellCoord,
        /// Lives available at the start of the session.
        lives: Lives,
    },
    /// Confirms that pursuers were put on the board.
    PursuersPlaced {
        /// Pursuers that received a spawn cell.
        placements: Vec<PursuerSnapshot>,
    },
    /// Confirms that the player moved between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after the move.
        to: CellCoord,
    },
    /// Reports that a player step would leave the open maze.
    PlayerMoveRejected {
        /// Cell the player remains on.
        from: CellCoord,
        /// Direction that was refused.
        direction: Direction,
    },
    /// Announces that the player stepped onto the goal.
    GoalReached {
        /// The goal cell.
        cell: CellCoord,
    },
    /// Confirms that a pursuer advanced along its route.
    PursuerAdvanced {
        /// Identifier of the pursuer that moved.
        pursuer: PursuerId,
        /// Cell the pursuer occupied before moving.
        from: CellCoord,
        /// Cell the pursuer occupies after moving.
        to: CellCoord,
        /// Steps left on the planned route after this move.
        distance: usize,
    },
    /// Reports that a pursuer stayed put this turn.
    PursuerHeld {
        /// Identifier of the pursuer that did not move.
        pursuer: PursuerId,
        /// Cell the pursuer remains on.
        cell: CellCoord,
    },
    /// Announces that a pursuer shares the player's cell.
    PlayerCaught {
        /// First pursuer, in pursuer order, found on the player's cell.
        pursuer: PursuerId,
        /// Cell where the catch happened.
        cell: CellCoord,
        /// Lives left after the catch was charged.
        lives_remaining: Lives,
    },
    /// Announces that the player was returned to the start marker.
    PlayerRespawned {
        /// Cell the player now occupies.
        cell: CellCoord,
    },
    /// Announces that the player ran out of lives.
    SessionLost,
}

/// Lifecycle of a single play session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    /// No session has been started yet.
    #[default]
    Idle,
    /// The player is moving and pursuers are chasing.
    Active,
    /// The player reached the goal.
    Won,
    /// The player ran out of lives.
    Lost,
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Column and row deltas for a single step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Cell reached by stepping once from `cell`, if it is representable.
    #[must_use]
    pub fn step_from(self, cell: CellCoord) -> Option<CellCoord> {
        let (columns, rows) = self.delta();
        cell.offset(columns, rows)
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Shifts the cell by signed deltas, returning `None` below zero or on
    /// overflow.
    #[must_use]
    pub fn offset(self, columns: i32, rows: i32) -> Option<CellCoord> {
        let column = self.column.checked_add_signed(columns)?;
        let row = self.row.checked_add_signed(rows)?;
        Some(Self::new(column, row))
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Single-letter identifier of a door in the maze perimeter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DoorId(char);

impl DoorId {
    /// Creates a door identifier from an ASCII letter.
    pub fn new(letter: char) -> Result<Self, DoorIdError> {
        if letter.is_ascii_alphabetic() {
            Ok(Self(letter.to_ascii_uppercase()))
        } else {
            Err(DoorIdError(letter.to_string()))
        }
    }

    /// Letter that names the door.
    #[must_use]
    pub const fn letter(&self) -> char {
        self.0
    }
}

impl TryFrom<String> for DoorId {
    type Error = DoorIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let mut letters = value.chars();
        match (letters.next(), letters.next()) {
            (Some(letter), None) => Self::new(letter),
            _ => Err(DoorIdError(value)),
        }
    }
}

impl From<DoorId> for String {
    fn from(door: DoorId) -> Self {
        door.0.to_string()
    }
}

impl fmt::Display for DoorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a door identifier is not a single letter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DoorIdError(String);

impl fmt::Display for DoorIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "door identifier '{}' must be a single letter", self.0)
    }
}

impl Error for DoorIdError {}

/// Named cell of interest recorded on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    /// A pursuer spawn door.
    Door(DoorId),
    /// The cell the player must reach.
    Goal,
    /// The cell the player starts on.
    Start,
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Door(door) => write!(f, "door {door}"),
            Self::Goal => write!(f, "goal"),
            Self::Start => write!(f, "start"),
        }
    }
}

/// Ordered, non-empty sequence of cells from a search start to its target.
///
/// Consecutive cells are one step apart under the movement model that
/// produced the path. A single-cell path means start and target coincide.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Path {
    cells: Vec<CellCoord>,
}

impl Path {
    /// Creates the trivial path that starts and ends on `cell`.
    #[must_use]
    pub fn single(cell: CellCoord) -> Self {
        Self { cells: vec![cell] }
    }

    /// Creates a path from its cells, returning `None` when empty.
    #[must_use]
    pub fn from_cells(cells: Vec<CellCoord>) -> Option<Self> {
        if cells.is_empty() {
            None
        } else {
            Some(Self { cells })
        }
    }

    /// Cells visited by the path in travel order.
    #[must_use]
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    /// First cell of the path.
    #[must_use]
    pub fn start(&self) -> CellCoord {
        self.cells[0]
    }

    /// Last cell of the path.
    #[must_use]
    pub fn target(&self) -> CellCoord {
        self.cells[self.cells.len() - 1]
    }

    /// Number of cells in the path, always at least one.
    #[allow(clippy::len_without_is_empty)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Number of moves required to walk the path.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.cells.len() - 1
    }

    /// Cell reached by the first move, if the path has one.
    #[must_use]
    pub fn next_step(&self) -> Option<CellCoord> {
        self.cells.get(1).copied()
    }
}

/// Outcome of a shortest-path search.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// A shortest path from the start to the target.
    Found(Path),
    /// The target cannot be reached under the movement model.
    Unreachable,
}

impl Route {
    /// The path, if one was found.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Found(path) => Some(path),
            Self::Unreachable => None,
        }
    }

    /// Reports whether a path was found.
    #[must_use]
    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Cell a mover should enter this turn, if it should move at all.
    #[must_use]
    pub fn next_step(&self) -> Option<CellCoord> {
        self.path().and_then(Path::next_step)
    }
}

/// Adjacency rule a searching mover follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementModel {
    /// Single orthogonal steps into open cells.
    Walled,
    /// Single orthogonal steps anywhere inside the maze.
    IgnoreWalls,
    /// Leaps over one open cell or diagonally, with ordinary steps as
    /// fallback.
    DoubleStep,
}

/// Kinds of pursuer that chase the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PursuerKind {
    /// Follows corridors like the player does.
    Patrol,
    /// Walks straight through walls.
    Phasing,
    /// Leaps two cells at a time where the way is clear.
    Leaping,
}

impl PursuerKind {
    /// Movement model the pursuer plans with.
    #[must_use]
    pub const fn movement_model(self) -> MovementModel {
        match self {
            Self::Patrol => MovementModel::Walled,
            Self::Phasing => MovementModel::IgnoreWalls,
            Self::Leaping => MovementModel::DoubleStep,
        }
    }
}

/// Playable characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hero {
    /// Loses a whole life per catch.
    Knight,
    /// Loses half a life per catch.
    Sage,
}

impl Hero {
    /// Lives available when a session starts.
    #[must_use]
    pub const fn starting_lives(self) -> Lives {
        Lives::whole(3)
    }

    /// Lives charged each time a pursuer catches the hero.
    #[must_use]
    pub const fn catch_cost(self) -> Lives {
        match self {
            Self::Knight => Lives::from_halves(2),
            Self::Sage => Lives::from_halves(1),
        }
    }
}

/// Life counter tracked in half-life units so fractional values stay exact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lives {
    halves: u32,
}

impl Lives {
    /// Creates a counter holding a whole number of lives.
    #[must_use]
    pub const fn whole(lives: u32) -> Self {
        Self { halves: lives * 2 }
    }

    /// Creates a counter from half-life units.
    #[must_use]
    pub const fn from_halves(halves: u32) -> Self {
        Self { halves }
    }

    /// Numeric value of the counter, possibly fractional.
    #[must_use]
    pub fn get(self) -> f32 {
        self.halves as f32 / 2.0
    }

    /// Subtracts `cost`, stopping at zero.
    #[must_use]
    pub const fn saturating_sub(self, cost: Lives) -> Self {
        Self {
            halves: self.halves.saturating_sub(cost.halves),
        }
    }

    /// Reports whether no lives remain.
    #[must_use]
    pub const fn is_depleted(self) -> bool {
        self.halves == 0
    }
}

impl fmt::Display for Lives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Every entity that occupies a cell and moves once per turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoverKind {
    /// A searching pursuer.
    Pursuer(PursuerKind),
    /// The player, driven by directional commands only.
    Player(Hero),
}

impl MoverKind {
    /// Movement model used to plan routes; the player never searches.
    #[must_use]
    pub const fn movement_model(self) -> Option<MovementModel> {
        match self {
            Self::Pursuer(kind) => Some(kind.movement_model()),
            Self::Player(_) => None,
        }
    }
}

/// Unique identifier assigned to a pursuer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PursuerId(u32);

impl PursuerId {
    /// Creates a new pursuer identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Immutable representation of a single pursuer's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PursuerSnapshot {
    /// Unique identifier assigned to the pursuer.
    pub id: PursuerId,
    /// Kind of pursuer.
    pub kind: PursuerKind,
    /// Grid cell currently occupied by the pursuer.
    pub cell: CellCoord,
}

/// Immutable representation of the player's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlayerSnapshot {
    /// Hero controlled by the player.
    pub hero: Hero,
    /// Grid cell currently occupied by the player.
    pub cell: CellCoord,
    /// Lives left in the session.
    pub lives: Lives,
}

/// Read-only snapshot describing all pursuers on the board.
#[derive(Clone, Debug, Default)]
pub struct PursuerView {
    snapshots: Vec<PursuerSnapshot>,
}

impl PursuerView {
    /// Creates a new pursuer view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<PursuerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured pursuer snapshots in pursuer order.
    pub fn iter(&self) -> impl Iterator<Item = &PursuerSnapshot> {
        self.snapshots.iter()
    }

    /// Number of pursuers on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no pursuer is on the board.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<PursuerSnapshot> {
        self.snapshots
    }
}

/// Route planned for one pursuer during turn resolution.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PursuerStep {
    /// Pursuer the route belongs to.
    pub pursuer: PursuerId,
    /// Freshly computed route toward the player.
    pub route: Route,
}
