#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system that assigns pursuers to random doors.

use log::debug;
use maze_chase_core::{CellCoord, Command, DoorId, Event};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Pure system that places pursuers whenever the board is reset.
#[derive(Debug)]
pub struct Spawning {
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Emits a placement command for every session start or respawn event.
    pub fn handle(
        &mut self,
        events: &[Event],
        doors: &[(DoorId, CellCoord)],
        roster_len: usize,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            if matches!(
                event,
                Event::SessionStarted { .. } | Event::PlayerRespawned { .. }
            ) {
                let cells = assign_spawn_points(doors, roster_len, &mut self.rng);
                out.push(Command::PlacePursuers { cells });
            }
        }
    }
}

/// Picks a distinct door for each of `count` pursuers.
///
/// Doors are drawn uniformly without replacement; once every door is taken
/// the remaining pursuers receive no spawn point.
pub fn assign_spawn_points<R>(
    doors: &[(DoorId, CellCoord)],
    count: usize,
    rng: &mut R,
) -> Vec<CellCoord>
where
    R: Rng + ?Sized,
{
    let mut available = doors.to_vec();
    let mut cells = Vec::with_capacity(count.min(available.len()));

    for _ in 0..count {
        if available.is_empty() {
            break;
        }
        let (door, cell) = available.remove(rng.gen_range(0..available.len()));
        debug!("spawning pursuer {} at door {door}", cells.len());
        cells.push(cell);
    }

    cells
}
