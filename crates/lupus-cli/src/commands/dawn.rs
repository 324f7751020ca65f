use std::path::Path;

use colored::Colorize;

pub fn run(path: &Path) -> Result<(), String> {
    let engine = super::engine();
    let mut state = super::load(path)?;
    let report = engine.resolve_night(&mut state).map_err(|e| e.to_string())?;
    super::save(path, &state)?;

    println!("  {} after night {}", "Dawn".bold().yellow(), report.night);
    println!();
    if report.deaths.is_empty() {
        println!("  Nobody died.");
    }
    for player in &report.deaths {
        println!("  {} {} (#{})", "dead".red(), player.name, player.id);
    }
    for player in &report.revived {
        println!("  {} {} (#{})", "revived".green(), player.name, player.id);
    }
    println!(
        "  {}",
        format!("{} results recorded tonight", report.history.len()).dimmed()
    );

    super::print_winner(&report.winner);
    Ok(())
}
