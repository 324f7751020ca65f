use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use lupus_core::GameState;
use lupus_engine::Engine;

pub fn run(path: &Path) -> Result<(), String> {
    let engine = super::engine();
    let mut state = super::load(path)?;
    let night = engine.begin_night(&mut state).map_err(|e| e.to_string())?;
    super::save(path, &state)?;

    println!("  {} {night}", "Night".bold().blue());
    println!();
    print_pending(&engine, &state);
    Ok(())
}

/// Print the roles still waiting for input tonight.
pub(super) fn print_pending(engine: &Engine, state: &GameState) {
    let pending = engine.list_eligible_roles(state);
    if pending.is_empty() {
        println!("  No roles left to act. Run `lupus dawn` to resolve the night.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Role", "Name", "Players", "Required"]);
    for role in &pending {
        let players: Vec<String> = role
            .players
            .iter()
            .map(|id| super::player_label(state, *id))
            .collect();
        table.add_row(vec![
            role.role_id.to_string(),
            role.name.to_string(),
            players.join(", "),
            if role.requires_action { "yes" } else { "no" }.to_string(),
        ]);
    }
    println!("{table}");
}
