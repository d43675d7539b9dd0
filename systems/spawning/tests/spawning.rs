use std::collections::BTreeMap;

use maze_chase_core::{CellCoord, Command, DoorId, Event, Hero, PursuerKind};
use maze_chase_system_spawning::{Config, Spawning};
use maze_chase_world::{self as world, query, Grid, World};

fn world_with_doors(roster: Vec<PursuerKind>) -> World {
    let cells = vec![vec![1; 5]; 5];
    let mut doors = BTreeMap::new();
    for (letter, cell) in [
        ('A', CellCoord::new(0, 2)),
        ('B', CellCoord::new(2, 0)),
        ('C', CellCoord::new(4, 2)),
    ] {
        let _ = doors.insert(DoorId::new(letter).expect("letter"), cell);
    }
    let grid = Grid::new(&cells, doors, CellCoord::new(2, 4), CellCoord::new(2, 2))
        .expect("valid grid");
    World::new(grid, roster)
}

#[test]
fn session_start_places_every_pursuer_on_a_door() {
    let mut world = world_with_doors(vec![PursuerKind::Patrol, PursuerKind::Leaping]);
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::StartSession { hero: Hero::Knight },
        &mut events,
    );

    let mut spawning = Spawning::new(Config::new(0x5eed));
    let mut commands = Vec::new();
    let doors = query::doors(&world);
    spawning.handle(&events, &doors, query::roster(&world).len(), &mut commands);
    assert_eq!(commands.len(), 1);

    let mut placed = Vec::new();
    for command in commands {
        world::apply(&mut world, command, &mut placed);
    }

    let view = query::pursuer_view(&world);
    assert_eq!(view.len(), 2);
    let door_cells: Vec<_> = doors.iter().map(|(_, cell)| *cell).collect();
    for pursuer in view.iter() {
        assert!(door_cells.contains(&pursuer.cell));
    }
    let snapshots = view.into_vec();
    assert_ne!(snapshots[0].cell, snapshots[1].cell);
}

#[test]
fn unrelated_events_emit_nothing() {
    let mut spawning = Spawning::new(Config::new(1));
    let mut commands = Vec::new();
    spawning.handle(
        &[Event::PlayerMoved {
            from: CellCoord::new(0, 0),
            to: CellCoord::new(1, 0),
        }],
        &[],
        3,
        &mut commands,
    );
    assert!(commands.is_empty());
}

#[test]
fn identical_seeds_replay_identical_placements() {
    let run = || {
        let world = world_with_doors(vec![PursuerKind::Phasing; 3]);
        let mut spawning = Spawning::new(Config::new(99));
        let mut commands = Vec::new();
        let respawns = [
            Event::PlayerRespawned {
                cell: CellCoord::new(2, 2),
            },
            Event::PlayerRespawned {
                cell: CellCoord::new(2, 2),
            },
        ];
        spawning.handle(&respawns, &query::doors(&world), 3, &mut commands);
        commands
    };

    let first = run();
    assert_eq!(first.len(), 2);
    assert_eq!(first, run());
}
