#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn resolution system that sends every pursuer after the player.

use log::debug;
use maze_chase_core::{CellCoord, Command, Event, MazeQuery, PursuerStep, PursuerView};
use maze_chase_system_pathfinding::shortest_path;

/// Pure system that answers each player move with one step per pursuer.
#[derive(Debug, Default)]
pub struct Pursuit {
    last_steps: Vec<PursuerStep>,
}

impl Pursuit {
    /// Consumes world events and immutable views to emit pursuer commands.
    ///
    /// Only a successful player move starts a turn. A move onto the goal ends
    /// the session, so it does not.
    pub fn handle<M>(
        &mut self,
        events: &[Event],
        maze: &M,
        pursuers: &PursuerView,
        out: &mut Vec<Command>,
    ) where
        M: MazeQuery + ?Sized,
    {
        if events
            .iter()
            .any(|event| matches!(event, Event::GoalReached { .. }))
        {
            return;
        }

        let Some(player) = events.iter().rev().find_map(|event| match event {
            Event::PlayerMoved { to, .. } => Some(*to),
            _ => None,
        }) else {
            return;
        };

        self.last_steps = plan_turn(maze, pursuers, player);
        out.push(Command::AdvancePursuers {
            steps: self.last_steps.clone(),
        });
    }

    /// Routes planned during the most recent turn, in pursuer order.
    #[must_use]
    pub fn last_steps(&self) -> &[PursuerStep] {
        &self.last_steps
    }
}

/// Plans a fresh shortest route from every pursuer to the player's cell.
///
/// Each search only reads the maze, and the result keeps pursuer order so the
/// world can apply steps and check for a catch deterministically.
#[must_use]
pub fn plan_turn<M>(maze: &M, pursuers: &PursuerView, player: CellCoord) -> Vec<PursuerStep>
where
    M: MazeQuery + ?Sized,
{
    pursuers
        .iter()
        .map(|pursuer| {
            let model = pursuer.kind.movement_model();
            let route = shortest_path(maze, model, pursuer.cell, player);
            debug!(
                "pursuer {} ({:?}) at {} plans {:?} toward {player}",
                pursuer.id.get(),
                pursuer.kind,
                pursuer.cell,
                route.next_step()
            );
            PursuerStep {
                pursuer: pursuer.id,
                route,
            }
        })
        .collect()
}
