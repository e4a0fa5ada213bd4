//! Textual save format.
//!
//! ```text
//! line 1    current player index
//! line 2    player count
//! line 3..  name|cash|position|in_jail|consecutive_doubles|is_bankrupt
//! last line index:owner,index:owner,...   (-1 = unowned, ascending index)
//! ```
//!
//! House/hotel state is not part of the format; loading rebuilds a fresh
//! board and overlays ownership only. A load either applies completely or
//! not at all.

use std::path::{Path, PathBuf};

use crate::board::Board;
use crate::player::Player;
use crate::rules::Rules;

/// Directory save files live in, as `<name>.txt`.
pub const SAVE_DIR: &str = "savedata";

/// A fully reconstructed session as read back from a save.
#[derive(Debug)]
pub struct LoadedGame {
    pub rules: Rules,
    pub board: Board,
    pub players: Vec<Player>,
    pub current_player_index: usize,
}

/// Render a session in the save format.
pub fn encode(board: &Board, players: &[Player], current_player_index: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", current_player_index));
    out.push_str(&format!("{}\n", players.len()));

    for p in players {
        out.push_str(&format!(
            "{}|{}|{}|{}|{}|{}\n",
            p.name, p.cash, p.position, p.in_jail, p.consecutive_doubles, p.is_bankrupt
        ));
    }

    let pairs: Vec<String> = board
        .properties()
        .map(|(i, p)| {
            let owner = p.owner.map_or(-1, |o| o as i64);
            format!("{}:{}", i, owner)
        })
        .collect();
    out.push_str(&pairs.join(","));
    out.push('\n');
    out
}

/// Parse a save back into a session built on the given rules.
///
/// Any missing line or malformed number/boolean fails the whole load.
/// An out-of-range current player index clamps to 0; ownership entries
/// pointing at unknown or non-property indices are ignored.
pub fn decode(text: &str, rules: Rules) -> Result<LoadedGame, String> {
    let mut lines = text.lines();

    let current_raw: i64 = parse_int(
        next_line(&mut lines, "current player index")?,
        "current player index",
    )?;
    let player_count: usize = parse_int(next_line(&mut lines, "player count")?, "player count")?;

    let mut players = Vec::with_capacity(player_count);
    for i in 0..player_count {
        let line = next_line(&mut lines, "player line")?;
        let parts: Vec<&str> = line.split('|').collect();
        if parts.len() < 6 {
            return Err(format!("malformed player line {}: {:?}", i + 1, line));
        }
        let mut player = Player::new(
            parts[0],
            parse_int(parts[1], "cash")?,
            parse_int(parts[2], "position")?,
        );
        player.in_jail = parse_bool(parts[3], "in_jail")?;
        player.consecutive_doubles = parse_int(parts[4], "consecutive doubles")?;
        player.is_bankrupt = parse_bool(parts[5], "is_bankrupt")?;
        players.push(player);
    }

    let mut board = Board::new(&rules);
    let ownership_line = next_line(&mut lines, "ownership line")?.trim();
    if !ownership_line.is_empty() {
        for entry in ownership_line.split(',') {
            let (index_str, owner_str) = entry
                .split_once(':')
                .ok_or_else(|| format!("malformed ownership entry: {:?}", entry))?;
            let index: usize = parse_int(index_str, "property index")?;
            let owner: i64 = parse_int(owner_str, "owner index")?;
            // Entries that don't match a property on the fresh board are
            // skipped rather than rejected.
            if let Some(property) = board.property_mut(index) {
                if owner >= 0 && (owner as usize) < players.len() {
                    property.set_owner(owner as usize);
                }
            }
        }
    }

    let current_player_index = if current_raw < 0 || current_raw as usize >= players.len() {
        0
    } else {
        current_raw as usize
    };

    Ok(LoadedGame {
        rules,
        board,
        players,
        current_player_index,
    })
}

fn next_line<'a>(lines: &mut std::str::Lines<'a>, what: &str) -> Result<&'a str, String> {
    lines
        .next()
        .ok_or_else(|| format!("unexpected end of save file (missing {})", what))
}

fn parse_int<T: std::str::FromStr>(s: &str, what: &str) -> Result<T, String> {
    s.trim()
        .parse()
        .map_err(|_| format!("malformed {}: {:?}", what, s))
}

fn parse_bool(s: &str, what: &str) -> Result<bool, String> {
    s.trim()
        .parse()
        .map_err(|_| format!("malformed {}: {:?}", what, s))
}

fn save_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.txt", name))
}

/// Write a save under `dir` as `<name>.txt`, creating the directory if
/// needed.
pub fn save_game_in(
    dir: &Path,
    name: &str,
    board: &Board,
    players: &[Player],
    current_player_index: usize,
) -> Result<(), String> {
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create {}: {}", dir.display(), e))?;
    let path = save_path(dir, name);
    std::fs::write(&path, encode(board, players, current_player_index))
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
    tracing::info!(path = %path.display(), "game saved");
    Ok(())
}

/// Read a save from `dir`, rebuilding the session on the standard rules.
pub fn load_game_in(dir: &Path, name: &str) -> Result<LoadedGame, String> {
    let path = save_path(dir, name);
    let content = std::fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let loaded = decode(&content, Rules::standard())?;
    tracing::info!(path = %path.display(), players = loaded.players.len(), "game loaded");
    Ok(loaded)
}

pub fn save_game(
    name: &str,
    board: &Board,
    players: &[Player],
    current_player_index: usize,
) -> Result<(), String> {
    save_game_in(Path::new(SAVE_DIR), name, board, players, current_player_index)
}

pub fn load_game(name: &str) -> Result<LoadedGame, String> {
    load_game_in(Path::new(SAVE_DIR), name)
}
