use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use lupus_core::{GameState, Phase};

pub fn run(path: &Path, history: bool) -> Result<(), String> {
    let engine = super::engine();
    let state = super::load(path)?;

    println!(
        "  {} {} {}",
        "Game".bold(),
        state.id,
        format!("(night {}, {})", state.night, state.phase).dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Name", "Role", "Team", "Status"]);
    for player in state.players() {
        table.add_row(vec![
            player.id.to_string(),
            player.name.clone(),
            player.role_id.to_string(),
            player.team().to_string(),
            if player.alive { "alive" } else { "dead" }.to_string(),
        ]);
    }
    println!("{table}");
    println!();
    println!(
        "  {} alive of {}",
        state.alive_players().len(),
        state.players().len()
    );

    if state.phase == Phase::Night {
        println!();
        super::night::print_pending(&engine, &state);
    }
    if history {
        println!();
        print_history(&state);
    }
    if state.is_over() {
        super::print_winner(&engine.get_winner(&state));
    }
    Ok(())
}

fn print_history(state: &GameState) {
    let results = state.history().results();
    if results.is_empty() {
        println!("  {}", "(no history)".dimmed());
        return;
    }
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Night", "Role", "Kind", "Target", "Data"]);
    for result in results {
        let target = result
            .target_id
            .map(|id| super::player_label(state, id))
            .unwrap_or_default();
        let data = if result.data.is_empty() {
            String::new()
        } else {
            serde_json::Value::Object(result.data.clone()).to_string()
        };
        table.add_row(vec![
            result.night_number.to_string(),
            result.role_id.to_string(),
            result.kind.to_string(),
            target,
            data,
        ]);
    }
    println!("{table}");
}
