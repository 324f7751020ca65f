pub mod act;
pub mod dawn;
pub mod new;
pub mod night;
pub mod roles;
pub mod status;
pub mod vote;

use std::fs;
use std::path::Path;

use colored::{ColoredString, Colorize};
use lupus_core::{GameState, PlayerId, Team};
use lupus_engine::{Engine, Winner};

/// Load the saved game.
fn load(path: &Path) -> Result<GameState, String> {
    let json = fs::read_to_string(path)
        .map_err(|e| format!("cannot read game file '{}': {e}", path.display()))?;
    GameState::from_json(&json).map_err(|e| format!("invalid game file: {e}"))
}

/// Write the game back.
fn save(path: &Path, state: &GameState) -> Result<(), String> {
    let json = state.to_json().map_err(|e| e.to_string())?;
    fs::write(path, json).map_err(|e| format!("cannot write game file: {e}"))
}

fn engine() -> Engine {
    Engine::default()
}

/// Resolve a player by numeric id or case-insensitive name.
fn find_player(state: &GameState, key: &str) -> Result<PlayerId, String> {
    let key = key.trim();
    if let Ok(n) = key.parse::<u32>() {
        let id = PlayerId(n);
        return state
            .player(id)
            .map(|p| p.id)
            .ok_or_else(|| format!("no player with id {n}"));
    }
    state
        .find_by_name(key)
        .map(|p| p.id)
        .ok_or_else(|| format!("no player named '{key}'"))
}

fn player_label(state: &GameState, id: PlayerId) -> String {
    state
        .player(id)
        .map_or_else(|| format!("#{id}"), |p| format!("{} (#{id})", p.name))
}

fn team_label(team: Team) -> ColoredString {
    let label = team.to_string();
    match team {
        Team::Villaggio => label.green(),
        Team::Lupi => label.red(),
        Team::Criceti => label.yellow(),
        Team::Parassita => label.magenta(),
        Team::Solitario => label.cyan(),
    }
}

fn print_winner(winner: &Winner) {
    if !winner.ended {
        return;
    }
    let teams: Vec<String> = winner
        .teams
        .iter()
        .map(|t| team_label(*t).to_string())
        .collect();
    println!();
    println!("  {} Winners: {}", "Game over.".bold(), teams.join(", "));
}
