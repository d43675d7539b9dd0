#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that replays a scripted Maze Chase session.

mod board;
mod session;

use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use maze_chase_core::{Command, Direction, Event, Hero, SessionStatus};
use maze_chase_world::{query, MazeDefinition, World};

use crate::session::Session;

const DEFAULT_MAZE: &str = include_str!("../mazes/default.toml");

/// Replays a move script against a maze and prints what happens.
#[derive(Debug, Parser)]
#[command(name = "maze-chase", version, about)]
struct Args {
    /// TOML maze definition; the built-in maze is used when omitted.
    #[arg(long)]
    maze: Option<PathBuf>,
    /// Hero controlled by the player.
    #[arg(long, value_enum, default_value_t = HeroArg::Knight)]
    hero: HeroArg,
    /// Seed for pursuer spawn placement.
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,
    /// Moves to play: U/R/D/L (or N/E/S/W), `.` to wait.
    #[arg(long, default_value = "")]
    moves: String,
    /// Print every pursuer's planned route after each turn.
    #[arg(long)]
    routes: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum HeroArg {
    Knight,
    Sage,
}

impl From<HeroArg> for Hero {
    fn from(hero: HeroArg) -> Self {
        match hero {
            HeroArg::Knight => Hero::Knight,
            HeroArg::Sage => Hero::Sage,
        }
    }
}

/// Entry point for the Maze Chase command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let definition = load_definition(args.maze.as_ref())?;
    let world = World::from_definition(&definition).context("maze definition is invalid")?;
    let moves = parse_moves(&args.moves)?;

    println!("{}", query::welcome_banner(&world));
    let mut session = Session::new(world, args.seed);
    report(&session.submit(Command::StartSession {
        hero: args.hero.into(),
    }));
    print!("{}", board::render(session.world()));

    for command in moves {
        if query::status(session.world()) != SessionStatus::Active {
            break;
        }
        let moved = matches!(command, Command::MovePlayer { .. });
        let events = session.submit(command);
        report(&events);
        if moved && args.routes {
            print!("{}", board::describe_routes(session.last_routes()));
        }
    }

    print!("{}", board::render(session.world()));
    info!("session ended as {:?}", query::status(session.world()));
    Ok(())
}

fn report(events: &[Event]) {
    for event in events {
        println!("{}", board::describe(event));
    }
}

fn load_definition(path: Option<&PathBuf>) -> Result<MazeDefinition> {
    let contents = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read maze definition at {}", path.display()))?,
        None => DEFAULT_MAZE.to_owned(),
    };
    toml::from_str(&contents).context("failed to parse maze definition toml contents")
}

fn parse_moves(script: &str) -> Result<Vec<Command>> {
    let mut commands = Vec::new();
    for symbol in script.chars().filter(|symbol| !symbol.is_whitespace()) {
        let direction = match symbol.to_ascii_uppercase() {
            'U' | 'N' => Direction::North,
            'R' | 'E' => Direction::East,
            'D' | 'S' => Direction::South,
            'L' | 'W' => Direction::West,
            '.' => {
                commands.push(Command::Wait);
                continue;
            }
            other => bail!("unknown move `{other}`; expected U, R, D, L or ."),
        };
        commands.push(Command::MovePlayer { direction });
    }
    Ok(commands)
}
