//! Plain-text presentation of the board and of world events.

use std::fmt::Write as _;

use maze_chase_core::{CellCoord, Event, MazeQuery, PursuerKind, PursuerStep};
use maze_chase_world::{query, World};

const WALL: char = '#';
const OPEN: char = '.';
const PLAYER: char = '@';
const GOAL: char = '*';

fn pursuer_glyph(kind: PursuerKind) -> char {
    match kind {
        PursuerKind::Patrol => 'P',
        PursuerKind::Phasing => 'F',
        PursuerKind::Leaping => 'L',
    }
}

/// Draws the maze with doors, goal, pursuers and the player layered on top.
pub(crate) fn render(world: &World) -> String {
    let grid = query::grid(world);
    let player = query::player(world).cell;
    let pursuers = query::pursuer_view(world);
    let doors = query::doors(world);

    let mut out = String::new();
    for row in 0..grid.rows() {
        for column in 0..grid.columns() {
            let cell = CellCoord::new(column, row);
            let pursuer = pursuers.iter().find(|pursuer| pursuer.cell == cell);
            let door = doors.iter().find(|(_, door_cell)| *door_cell == cell);

            let glyph = if cell == player {
                PLAYER
            } else if let Some(pursuer) = pursuer {
                pursuer_glyph(pursuer.kind)
            } else if grid.is_goal(cell) {
                GOAL
            } else if let Some((door, _)) = door {
                door.letter()
            } else if grid.is_open(cell) {
                OPEN
            } else {
                WALL
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

/// Lists each planned route as its remaining length and cells.
pub(crate) fn describe_routes(steps: &[PursuerStep]) -> String {
    let mut out = String::new();
    for step in steps {
        let _ = match step.route.path() {
            Some(path) => {
                let cells: Vec<String> = path.cells().iter().map(ToString::to_string).collect();
                writeln!(
                    out,
                    "  pursuer {} route ({} steps): {}",
                    step.pursuer.get(),
                    path.steps(),
                    cells.join(" ")
                )
            }
            None => writeln!(out, "  pursuer {} cannot reach the player", step.pursuer.get()),
        };
    }
    out
}

/// One human-readable line per event.
pub(crate) fn describe(event: &Event) -> String {
    match event {
        Event::SessionStarted { hero, start, lives } => {
            format!("{hero:?} enters the maze at {start} with {lives} lives")
        }
        Event::PursuersPlaced { placements } => {
            let placed: Vec<String> = placements
                .iter()
                .map(|pursuer| format!("{:?} at {}", pursuer.kind, pursuer.cell))
                .collect();
            format!("pursuers placed: {}", placed.join(", "))
        }
        Event::PlayerMoved { from, to } => format!("player moves {from} -> {to}"),
        Event::PlayerMoveRejected { from, direction } => {
            format!("player cannot move {direction:?} from {from}")
        }
        Event::GoalReached { cell } => format!("goal reached at {cell}; victory"),
        Event::PursuerAdvanced {
            pursuer,
            from,
            to,
            distance,
        } => format!(
            "pursuer {} moves {from} -> {to}, {distance} steps from the player",
            pursuer.get()
        ),
        Event::PursuerHeld { pursuer, cell } => {
            format!("pursuer {} holds at {cell}", pursuer.get())
        }
        Event::PlayerCaught {
            pursuer,
            cell,
            lives_remaining,
        } => format!(
            "caught by pursuer {} at {cell}; {lives_remaining} lives left",
            pursuer.get()
        ),
        Event::PlayerRespawned { cell } => format!("player returns to {cell}"),
        Event::SessionLost => String::from("no lives left; game over"),
    }
}
