#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Chase.

use log::{debug, info, warn};
use maze_chase_core::{
    CellCoord, Command, Direction, Event, Hero, Lives, MazeQuery, PursuerId, PursuerKind,
    PursuerSnapshot, PursuerStep, SessionStatus, WELCOME_BANNER,
};

mod grid;

pub use grid::{CellState, Grid, GridError, MazeDefinition};

/// Represents the authoritative Maze Chase world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: Grid,
    roster: Vec<PursuerKind>,
    player: Player,
    pursuers: Vec<Pursuer>,
    status: SessionStatus,
}

impl World {
    /// Creates an idle world around the provided maze and pursuer roster.
    #[must_use]
    pub fn new(grid: Grid, roster: Vec<PursuerKind>) -> Self {
        let player = Player::new(Hero::Knight, grid.start());
        Self {
            banner: WELCOME_BANNER,
            grid,
            roster,
            player,
            pursuers: Vec::new(),
            status: SessionStatus::Idle,
        }
    }

    /// Validates the definition and creates an idle world from it.
    pub fn from_definition(definition: &MazeDefinition) -> Result<Self, GridError> {
        let grid = Grid::from_definition(definition)?;
        Ok(Self::new(grid, definition.pursuers.clone()))
    }

    fn place_pursuers(&mut self, cells: Vec<CellCoord>, out_events: &mut Vec<Event>) {
        self.pursuers = self
            .roster
            .iter()
            .zip(cells)
            .enumerate()
            .map(|(index, (&kind, cell))| Pursuer {
                id: PursuerId::new(index as u32),
                kind,
                cell,
            })
            .collect();

        if self.pursuers.len() < self.roster.len() {
            debug!(
                "placed {} of {} pursuers; not enough spawn cells",
                self.pursuers.len(),
                self.roster.len()
            );
        }

        out_events.push(Event::PursuersPlaced {
            placements: self.pursuers.iter().map(Pursuer::snapshot).collect(),
        });
    }

    fn move_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        let from = self.player.cell;
        let Some(to) = direction
            .step_from(from)
            .filter(|cell| self.grid.is_open(*cell))
        else {
            debug!("player step {direction:?} from {from} rejected");
            out_events.push(Event::PlayerMoveRejected { from, direction });
            return;
        };

        self.player.cell = to;
        out_events.push(Event::PlayerMoved { from, to });

        if self.grid.is_goal(to) {
            info!("player reached the goal at {to}");
            self.status = SessionStatus::Won;
            out_events.push(Event::GoalReached { cell: to });
        }
    }

    fn advance_pursuers(&mut self, steps: &[PursuerStep], out_events: &mut Vec<Event>) {
        for pursuer in &mut self.pursuers {
            let Some(step) = steps.iter().find(|step| step.pursuer == pursuer.id) else {
                continue;
            };

            let planned = step
                .route
                .path()
                .filter(|path| path.start() == pursuer.cell);
            if step.route.is_reachable() && planned.is_none() {
                warn!(
                    "ignoring stale route for pursuer {} at {}",
                    pursuer.id.get(),
                    pursuer.cell
                );
            }

            match planned.and_then(|path| path.next_step().map(|next| (next, path.steps()))) {
                Some((to, remaining)) => {
                    let from = pursuer.cell;
                    pursuer.cell = to;
                    out_events.push(Event::PursuerAdvanced {
                        pursuer: pursuer.id,
                        from,
                        to,
                        distance: remaining - 1,
                    });
                }
                None => out_events.push(Event::PursuerHeld {
                    pursuer: pursuer.id,
                    cell: pursuer.cell,
                }),
            }
        }

        self.resolve_catch(out_events);
    }

    fn resolve_catch(&mut self, out_events: &mut Vec<Event>) {
        let Some(catcher) = self.caught_by() else {
            return;
        };

        let cell = self.player.cell;
        self.player.lives = self
            .player
            .lives
            .saturating_sub(self.player.hero.catch_cost());
        info!(
            "pursuer {} caught the player at {cell}; {} lives left",
            catcher.get(),
            self.player.lives
        );
        out_events.push(Event::PlayerCaught {
            pursuer: catcher,
            cell,
            lives_remaining: self.player.lives,
        });

        if self.player.lives.is_depleted() {
            self.status = SessionStatus::Lost;
            out_events.push(Event::SessionLost);
            return;
        }

        self.player.cell = self.grid.start();
        self.pursuers.clear();
        out_events.push(Event::PlayerRespawned {
            cell: self.player.cell,
        });
    }

    fn caught_by(&self) -> Option<PursuerId> {
        self.pursuers
            .iter()
            .find(|pursuer| pursuer.cell == self.player.cell)
            .map(|pursuer| pursuer.id)
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartSession { hero } => {
            world.player = Player::new(hero, world.grid.start());
            world.pursuers.clear();
            world.status = SessionStatus::Active;
            info!("session started as {hero:?} at {}", world.player.cell);
            out_events.push(Event::SessionStarted {
                hero,
                start: world.player.cell,
                lives: world.player.lives,
            });
        }
        Command::PlacePursuers { cells } => {
            if world.status != SessionStatus::Active {
                warn!("ignoring pursuer placement outside an active session");
                return;
            }
            world.place_pursuers(cells, out_events);
        }
        Command::MovePlayer { direction } => {
            if world.status != SessionStatus::Active {
                debug!("ignoring player move while {:?}", world.status);
                return;
            }
            world.move_player(direction, out_events);
        }
        Command::Wait => {}
        Command::AdvancePursuers { steps } => {
            if world.status != SessionStatus::Active {
                debug!("ignoring pursuer steps while {:?}", world.status);
                return;
            }
            world.advance_pursuers(&steps, out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use maze_chase_core::{
        CellCoord, DoorId, PlayerSnapshot, PursuerKind, PursuerView, SessionStatus,
    };

    use super::{Grid, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the maze.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Pursuers taking part in every session, in pursuer order.
    #[must_use]
    pub fn roster(world: &World) -> &[PursuerKind] {
        &world.roster
    }

    /// Doors available for spawning pursuers, in letter order.
    #[must_use]
    pub fn doors(world: &World) -> Vec<(DoorId, CellCoord)> {
        world.grid.doors().collect()
    }

    /// Current lifecycle stage of the session.
    #[must_use]
    pub fn status(world: &World) -> SessionStatus {
        world.status
    }

    /// Captures the player's current state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        PlayerSnapshot {
            hero: world.player.hero,
            cell: world.player.cell,
            lives: world.player.lives,
        }
    }

    /// Captures a read-only view of the pursuers on the board.
    #[must_use]
    pub fn pursuer_view(world: &World) -> PursuerView {
        PursuerView::from_snapshots(world.pursuers.iter().map(super::Pursuer::snapshot).collect())
    }

    /// Reports whether any pursuer shares the player's cell.
    #[must_use]
    pub fn is_player_caught(world: &World) -> bool {
        world.caught_by().is_some()
    }
}

#[derive(Clone, Copy, Debug)]
struct Player {
    hero: Hero,
    cell: CellCoord,
    lives: Lives,
}

impl Player {
    fn new(hero: Hero, cell: CellCoord) -> Self {
        Self {
            hero,
            cell,
            lives: hero.starting_lives(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Pursuer {
    id: PursuerId,
    kind: PursuerKind,
    cell: CellCoord,
}

impl Pursuer {
    fn snapshot(&self) -> PursuerSnapshot {
        PursuerSnapshot {
            id: self.id,
            kind: self.kind,
            cell: self.cell,
        }
    }
}
