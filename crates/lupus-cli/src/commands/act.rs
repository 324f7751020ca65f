use std::path::Path;

use colored::Colorize;
use lupus_core::{Action, GameState, NightResult, PlayerId};
use serde_json::Value;

/// Raw action input as typed by the moderator.
pub struct ActArgs {
    pub player: String,
    pub targets: Vec<String>,
    pub declare: Option<String>,
    pub potion: Option<String>,
    pub skip: bool,
}

pub fn run(path: &Path, role: &str, args: &ActArgs) -> Result<(), String> {
    let engine = super::engine();
    let mut state = super::load(path)?;
    let actor = super::find_player(&state, &args.player)?;

    let may_act = engine
        .list_eligible_roles(&state)
        .iter()
        .any(|r| r.role_id == role && r.players.contains(&actor));
    if !may_act {
        return Err(format!(
            "{} cannot act as {role} right now",
            super::player_label(&state, actor)
        ));
    }

    let action = build_action(&state, actor, args)?;
    let result = engine
        .submit_action(&mut state, role, action)
        .map_err(|e| e.to_string())?;
    super::save(path, &state)?;

    match result {
        Some(result) => print_result(&state, &result),
        None => println!("  {} {role}: no effect", "-".dimmed()),
    }
    Ok(())
}

fn build_action(state: &GameState, actor: PlayerId, args: &ActArgs) -> Result<Action, String> {
    if args.skip {
        return Ok(Action::skip(actor));
    }
    let targets = args
        .targets
        .iter()
        .map(|t| super::find_player(state, t))
        .collect::<Result<Vec<_>, _>>()?;

    let mut action = Action::new(actor);
    action = match targets.as_slice() {
        [] => action,
        [one] => action.with_target(*one),
        many => action.with_targets(many),
    };
    if let Some(role) = &args.declare {
        action = action.with_role(role.trim());
    }
    if let Some(potion) = &args.potion {
        action = action.with_data("potion", Value::from(potion.trim()));
    }
    Ok(action)
}

fn print_result(state: &GameState, result: &NightResult) {
    let target = result
        .target_id
        .map(|id| format!(" -> {}", super::player_label(state, id)))
        .unwrap_or_default();
    println!(
        "  {} {}{target}",
        result.role_id.to_string().bold(),
        result.kind.to_string().yellow()
    );
    for (key, value) in &result.data {
        println!("    {key}: {value}");
    }
}
