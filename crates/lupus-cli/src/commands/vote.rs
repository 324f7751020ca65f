use std::path::Path;

use colored::Colorize;

pub fn run(path: &Path, player: &str) -> Result<(), String> {
    let engine = super::engine();
    let mut state = super::load(path)?;
    let target = super::find_player(&state, player)?;
    let outcome = engine
        .execute_vote(&mut state, target)
        .map_err(|e| e.to_string())?;
    super::save(path, &state)?;

    println!(
        "  {} {} (#{}) by vote",
        "Eliminated".red().bold(),
        outcome.eliminated.name,
        outcome.eliminated.id
    );
    super::print_winner(&outcome.winner);
    Ok(())
}
