//! Drives the world and its systems until a submitted command settles.

use maze_chase_core::{Command, Event, PursuerStep};
use maze_chase_system_pursuit::Pursuit;
use maze_chase_system_spawning::{Config, Spawning};
use maze_chase_world::{self as world, query, World};

/// A running game: the authoritative world plus the systems reacting to it.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    pursuit: Pursuit,
    spawning: Spawning,
}

impl Session {
    /// Wraps the world with freshly configured systems.
    pub(crate) fn new(world: World, rng_seed: u64) -> Self {
        Self {
            world,
            pursuit: Pursuit::default(),
            spawning: Spawning::new(Config::new(rng_seed)),
        }
    }

    /// Read-only access to the world for presentation.
    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// Routes the pursuers planned on the latest turn.
    pub(crate) fn last_routes(&self) -> &[PursuerStep] {
        self.pursuit.last_steps()
    }

    /// Applies `command` and every command the systems emit in response,
    /// returning all resulting events in order.
    pub(crate) fn submit(&mut self, command: Command) -> Vec<Event> {
        let mut log = Vec::new();
        let mut commands = vec![command];

        while !commands.is_empty() {
            let mut events = Vec::new();
            for command in commands.drain(..) {
                world::apply(&mut self.world, command, &mut events);
            }

            self.spawning.handle(
                &events,
                &query::doors(&self.world),
                query::roster(&self.world).len(),
                &mut commands,
            );
            self.pursuit.handle(
                &events,
                query::grid(&self.world),
                &query::pursuer_view(&self.world),
                &mut commands,
            );
            log.extend(events);
        }

        log
    }
}
