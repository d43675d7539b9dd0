use std::collections::BTreeMap;

use maze_chase_core::{
    CellCoord, Command, Direction, DoorId, Event, Hero, Lives, PursuerId, PursuerKind,
    PursuerSnapshot, SessionStatus,
};
use maze_chase_system_pursuit::Pursuit;
use maze_chase_system_spawning::{Config, Spawning};
use maze_chase_world::{self as world, query, Grid, World};

struct Game {
    world: World,
    pursuit: Pursuit,
    spawning: Spawning,
}

impl Game {
    fn new(world: World, seed: u64) -> Self {
        Self {
            world,
            pursuit: Pursuit::default(),
            spawning: Spawning::new(Config::new(seed)),
        }
    }

    fn submit(&mut self, command: Command) -> Vec<Event> {
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

    fn step(&mut self, direction: Direction) -> Vec<Event> {
        self.submit(Command::MovePlayer { direction })
    }
}

fn build_world(
    rows: &[&str],
    doors: &[(char, (u32, u32))],
    goal: (u32, u32),
    roster: Vec<PursuerKind>,
) -> World {
    let cells: Vec<Vec<u8>> = rows
        .iter()
        .map(|row| row.chars().map(|tile| u8::from(tile == '.')).collect())
        .collect();
    let doors: BTreeMap<_, _> = doors
        .iter()
        .map(|&(letter, (column, row))| {
            (
                DoorId::new(letter).expect("letter"),
                CellCoord::new(column, row),
            )
        })
        .collect();
    let grid = Grid::new(
        &cells,
        doors,
        CellCoord::new(goal.0, goal.1),
        CellCoord::new(0, 0),
    )
    .expect("valid grid");
    World::new(grid, roster)
}

const LOOP: [&str; 3] = [".....", ".###.", "....."];

#[test]
fn patrol_catches_player_and_board_resets() {
    let world = build_world(&LOOP, &[('A', (4, 2))], (2, 2), vec![PursuerKind::Patrol]);
    let mut game = Game::new(world, 1);

    let started = game.submit(Command::StartSession { hero: Hero::Knight });
    assert_eq!(
        started.last(),
        Some(&Event::PursuersPlaced {
            placements: vec![PursuerSnapshot {
                id: PursuerId::new(0),
                kind: PursuerKind::Patrol,
                cell: CellCoord::new(4, 2),
            }],
        })
    );

    let first = game.step(Direction::East);
    assert!(first.contains(&Event::PursuerAdvanced {
        pursuer: PursuerId::new(0),
        from: CellCoord::new(4, 2),
        to: CellCoord::new(4, 1),
        distance: 4,
    }));
    let _ = game.step(Direction::East);
    let caught = game.step(Direction::East);

    assert_eq!(
        caught,
        vec![
            Event::PlayerMoved {
                from: CellCoord::new(2, 0),
                to: CellCoord::new(3, 0),
            },
            Event::PursuerAdvanced {
                pursuer: PursuerId::new(0),
                from: CellCoord::new(4, 0),
                to: CellCoord::new(3, 0),
                distance: 0,
            },
            Event::PlayerCaught {
                pursuer: PursuerId::new(0),
                cell: CellCoord::new(3, 0),
                lives_remaining: Lives::whole(2),
            },
            Event::PlayerRespawned {
                cell: CellCoord::new(0, 0),
            },
            Event::PursuersPlaced {
                placements: vec![PursuerSnapshot {
                    id: PursuerId::new(0),
                    kind: PursuerKind::Patrol,
                    cell: CellCoord::new(4, 2),
                }],
            },
        ]
    );
    assert_eq!(query::status(&game.world), SessionStatus::Active);
    assert!(!query::is_player_caught(&game.world));
}

#[test]
fn sage_keeps_fractional_lives() {
    let world = build_world(&LOOP, &[('A', (4, 2))], (2, 2), vec![PursuerKind::Patrol]);
    let mut game = Game::new(world, 1);
    let _ = game.submit(Command::StartSession { hero: Hero::Sage });

    for _ in 0..3 {
        let _ = game.step(Direction::East);
    }

    let lives = query::player(&game.world).lives;
    assert!((lives.get() - 2.5).abs() < f32::EPSILON);
}

#[test]
fn reaching_the_goal_freezes_pursuers() {
    let world = build_world(&LOOP, &[('A', (4, 2))], (1, 0), vec![PursuerKind::Patrol]);
    let mut game = Game::new(world, 1);
    let _ = game.submit(Command::StartSession { hero: Hero::Knight });

    let events = game.step(Direction::East);
    assert_eq!(
        events,
        vec![
            Event::PlayerMoved {
                from: CellCoord::new(0, 0),
                to: CellCoord::new(1, 0),
            },
            Event::GoalReached {
                cell: CellCoord::new(1, 0),
            },
        ]
    );
    assert_eq!(query::status(&game.world), SessionStatus::Won);
    assert!(game.step(Direction::East).is_empty());
}

#[test]
fn rejected_moves_do_not_start_a_turn() {
    let world = build_world(&LOOP, &[('A', (4, 2))], (2, 2), vec![PursuerKind::Patrol]);
    let mut game = Game::new(world, 1);
    let _ = game.submit(Command::StartSession { hero: Hero::Knight });

    let events = game.step(Direction::North);
    assert_eq!(
        events,
        vec![Event::PlayerMoveRejected {
            from: CellCoord::new(0, 0),
            direction: Direction::North,
        }]
    );
    assert!(game.submit(Command::Wait).is_empty());
}

#[test]
fn only_phasing_pursuer_crosses_a_solid_wall() {
    let split = ["..#..", "..#..", "..#.."];
    let world = build_world(
        &split,
        &[('A', (4, 0)), ('B', (4, 2))],
        (1, 2),
        vec![PursuerKind::Patrol, PursuerKind::Phasing],
    );
    let mut game = Game::new(world, 3);
    let _ = game.submit(Command::StartSession { hero: Hero::Knight });

    let events = game.step(Direction::South);
    let advanced: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            Event::PursuerAdvanced {
                pursuer, distance, ..
            } => Some((*pursuer, *distance)),
            _ => None,
        })
        .collect();
    let held: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            Event::PursuerHeld { pursuer, .. } => Some(*pursuer),
            _ => None,
        })
        .collect();

    assert_eq!(advanced, vec![(PursuerId::new(1), 4)]);
    assert_eq!(held, vec![PursuerId::new(0)]);
}

#[test]
fn replays_are_deterministic() {
    let script = [
        Direction::South,
        Direction::South,
        Direction::East,
        Direction::North,
        Direction::East,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
    let run = || {
        let world = build_world(
            &LOOP,
            &[('A', (4, 2)), ('B', (4, 0)), ('C', (2, 0))],
            (2, 2),
            vec![
                PursuerKind::Leaping,
                PursuerKind::Phasing,
                PursuerKind::Patrol,
            ],
        );
        let mut game = Game::new(world, 0xdead_beef);
        let mut log = game.submit(Command::StartSession { hero: Hero::Sage });
        for direction in script {
            log.extend(game.step(direction));
        }
        log
    };

    assert_eq!(run(), run());
}
