use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use lupus_core::{GameSettings, RoleId};

pub fn run(
    path: &Path,
    players: &[String],
    roles: &[String],
    seed: u64,
    shuffle: bool,
    force: bool,
) -> Result<(), String> {
    if path.exists() && !force {
        return Err(format!(
            "game file '{}' already exists (use --force to overwrite)",
            path.display()
        ));
    }

    let names: Vec<&str> = players.iter().map(|p| p.trim()).collect();
    let roles: Vec<RoleId> = roles.iter().map(|r| RoleId::new(r.trim())).collect();
    let settings = GameSettings::default()
        .with_seed(seed)
        .with_shuffle_roles(shuffle);

    let engine = super::engine();
    let state = engine
        .new_game(&names, &roles, settings)
        .map_err(|e| e.to_string())?;
    super::save(path, &state)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Name", "Role", "Team"]);
    for player in state.players() {
        table.add_row(vec![
            player.id.to_string(),
            player.name.clone(),
            player.role_id.to_string(),
            player.team().to_string(),
        ]);
    }

    println!(
        "  {} game {} {}",
        "Created".green().bold(),
        state.id,
        format!("({} players, seed={seed})", state.players().len()).dimmed()
    );
    println!();
    println!("{table}");
    println!();
    println!("  Saved to {}. Run `lupus night` to begin.", path.display());
    Ok(())
}
