//! Terminal driver: plays a game to completion with a simple always-buy,
//! greedy-build policy, printing the engine's narration turn by turn.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use monopoly_engine::board::Property;
use monopoly_engine::engine::GameEngine;
use monopoly_engine::player::Player;
use monopoly_engine::rng::SeededRandom;
use monopoly_engine::rules::{load_rules_config, Rules};

#[derive(Parser)]
#[command(name = "play", about = "Play an automated game of the property trading game")]
struct Cli {
    /// Comma-separated player names (2-4); blank entries are auto-named
    #[arg(long, value_delimiter = ',', default_value = "Alice,Bob")]
    players: Vec<String>,

    /// Dice seed (default: OS entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many turns even if nobody has won
    #[arg(long, default_value = "200")]
    max_turns: usize,

    /// Path to a rules TOML overriding the money/limit knobs
    #[arg(long, env = "MONOPOLY_RULES")]
    rules: Option<PathBuf>,

    /// Load this save (from savedata/) before playing
    #[arg(long)]
    load: Option<String>,

    /// Save under this name (into savedata/) when the run ends
    #[arg(long)]
    save: Option<String>,

    /// Print a JSON snapshot of the final state
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    current_player_index: usize,
    players: &'a [Player],
    properties: Vec<(usize, &'a Property)>,
    winner: Option<&'a str>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    if !(2..=4).contains(&cli.players.len()) {
        return Err(format!("need 2-4 players, got {}", cli.players.len()).into());
    }

    let rules = match &cli.rules {
        Some(path) => Rules::with_config(&load_rules_config(path)?),
        None => Rules::standard(),
    };
    let rng = match cli.seed {
        Some(seed) => SeededRandom::from_seed(seed),
        None => SeededRandom::from_entropy(),
    };
    let mut engine = GameEngine::new(rules, &cli.players, Box::new(rng));

    if let Some(name) = &cli.load {
        engine.load(name)?;
        println!("Loaded save '{}'.", name);
    }

    let mut turns = 0;
    while !engine.is_game_over() && turns < cli.max_turns {
        turns += 1;
        engine.roll_dice();

        if engine.is_waiting_for_property_decision() {
            // always buy when offered
            engine.buy_property();
        }

        // greedy build for whoever can
        let positions: Vec<usize> = engine.board().properties().map(|(i, _)| i).collect();
        for pos in positions {
            if engine.can_build_hotel(pos) {
                engine.build_hotel(pos);
            } else if engine.can_build_house(pos) {
                engine.build_house(pos);
            }
        }

        println!("--- turn {} ---", turns);
        println!("{}", engine.last_message());
    }

    match engine.winner() {
        Some(winner) => println!("\n{} wins after {} turns!", winner.name, turns),
        None => println!("\nNo winner after {} turns.", turns),
    }

    if let Some(name) = &cli.save {
        engine.save(name)?;
        println!("Saved as '{}'.", name);
    }

    if cli.json {
        let snapshot = Snapshot {
            current_player_index: engine.current_player_index(),
            players: engine.players(),
            properties: engine.board().properties().collect(),
            winner: engine.winner().map(|p| p.name.as_str()),
        };
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }

    Ok(())
}
