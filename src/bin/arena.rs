//! Arena CLI — batch self-play statistics.
//!
//! Plays many independent games with the always-buy/greedy-build policy and
//! reports win counts and game lengths. Each game gets its own seed so runs
//! are reproducible.
//!
//! Usage:
//!   cargo run --release --bin arena -- --games 1000 --seats 3 --seed 7

use clap::Parser;
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

use monopoly_engine::engine::GameEngine;

#[derive(Parser)]
#[command(name = "arena", about = "Run batch self-play games and report statistics")]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value = "100")]
    games: usize,

    /// Base random seed; game g uses seed + g
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Number of seats (2-4)
    #[arg(long, default_value = "2")]
    seats: usize,

    /// Per-game turn cap
    #[arg(long, default_value = "500")]
    max_turns: usize,
}

struct GameOutcome {
    winner: Option<usize>,
    turns: usize,
}

fn play_one(seed: u64, seats: usize, max_turns: usize) -> GameOutcome {
    let names: Vec<String> = (1..=seats).map(|i| format!("P{}", i)).collect();
    let mut engine = GameEngine::new_seeded(&names, seed);

    let mut turns = 0;
    while !engine.is_game_over() && turns < max_turns {
        turns += 1;
        engine.roll_dice();
        if engine.is_waiting_for_property_decision() {
            engine.buy_property();
        }
        let positions: Vec<usize> = engine.board().properties().map(|(i, _)| i).collect();
        for pos in positions {
            if engine.can_build_hotel(pos) {
                engine.build_hotel(pos);
            } else if engine.can_build_house(pos) {
                engine.build_house(pos);
            }
        }
    }

    GameOutcome {
        winner: engine.winner_index(),
        turns,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .init();

    let cli = Cli::parse();
    if !(2..=4).contains(&cli.seats) {
        return Err(format!("need 2-4 seats, got {}", cli.seats).into());
    }

    let outcomes: Vec<GameOutcome> = (0..cli.games)
        .into_par_iter()
        .map(|g| play_one(cli.seed + g as u64, cli.seats, cli.max_turns))
        .collect();

    let mut wins = vec![0usize; cli.seats];
    let mut unfinished = 0usize;
    let mut total_turns = 0usize;
    for outcome in &outcomes {
        total_turns += outcome.turns;
        match outcome.winner {
            Some(seat) => wins[seat] += 1,
            None => unfinished += 1,
        }
    }

    println!("games:      {}", cli.games);
    println!("seats:      {}", cli.seats);
    for (seat, count) in wins.iter().enumerate() {
        println!(
            "seat {} wins: {} ({:.1}%)",
            seat + 1,
            count,
            100.0 * *count as f64 / cli.games as f64
        );
    }
    println!("unfinished: {}", unfinished);
    println!(
        "mean turns: {:.1}",
        total_turns as f64 / cli.games as f64
    );

    Ok(())
}
