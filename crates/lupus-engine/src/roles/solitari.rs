use lupus_core::{Action, ActsAtNight, NightResult, PlayerId, ResultKind, Team};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{any_holder_alive, kill, lupi_wins, villaggio_wins};
use super::{CRICETO, LUPO, LUPO_SOLITARIO, PARASSITA};
use crate::access::{RoleAccess, RoleView};
use crate::role::{RoleDefinition, RoleTrait};

pub(super) fn lupo_solitario() -> RoleDefinition {
    RoleDefinition::new(LUPO_SOLITARIO, "Lupo solitario", Team::Solitario)
        .with_description("Hunts alone, immune to the pack. Dies if the seer finds them.")
        .with_visible_as(Team::Lupi)
        .acting(ActsAtNight::Alive, 12)
        .with_traits(&[RoleTrait::DiesWhenInvestigated])
        .with_passive(shrug_off_pack)
        .with_resolve(kill)
        .with_check_win(last_one_standing)
        .with_win_constraint(any_holder_alive)
}

pub(super) fn criceto() -> RoleDefinition {
    RoleDefinition::new(CRICETO, "Criceto mannaro", Team::Criceti)
        .with_description("Cannot be killed at night but dies if seen. Steals any finished game.")
        .with_visible_as(Team::Villaggio)
        .with_count_as(Team::Villaggio)
        .with_traits(&[RoleTrait::DiesWhenInvestigated])
        .with_passive(shrug_off_hunters)
        .with_check_win(steal_the_win)
        .with_win_constraint(any_holder_alive)
}

pub(super) fn parassita() -> RoleDefinition {
    RoleDefinition::new(PARASSITA, "Parassita", Team::Parassita)
        .with_description("Infects players each night. Wins once every survivor is infected.")
        .acting(ActsAtNight::Alive, 50)
        .with_resolve(infect)
        .with_check_win(all_infected)
}

fn shrug_off_pack(access: &mut RoleAccess<'_>, player: PlayerId) {
    access.remove_kills(player, LUPO);
}

fn shrug_off_hunters(access: &mut RoleAccess<'_>, player: PlayerId) {
    access.remove_kills(player, LUPO);
    access.remove_kills(player, LUPO_SOLITARIO);
}

fn last_one_standing(view: &RoleView<'_>) -> bool {
    view.any_holder_alive() && view.alive_players().len() <= 2
}

fn steal_the_win(view: &RoleView<'_>) -> bool {
    view.any_holder_alive() && (villaggio_wins(view) || lupi_wins(view))
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct Infection {
    infetti: Vec<PlayerId>,
}

fn infect(access: &mut RoleAccess<'_>, action: &Action) -> Option<NightResult> {
    let max = access.view().settings().max_infections_per_night as usize;
    let mut infection: Infection = access.data().unwrap_or_default();

    let mut fresh: Vec<PlayerId> = Vec::new();
    for target in action.target_ids().into_iter().chain(action.target_id()) {
        if fresh.len() >= max {
            break;
        }
        let eligible = access
            .player(target)
            .is_some_and(|p| p.alive && !p.has_role(PARASSITA));
        if eligible && !infection.infetti.contains(&target) && !fresh.contains(&target) {
            fresh.push(target);
        }
    }
    if fresh.is_empty() {
        return None;
    }

    infection.infetti.extend(fresh.iter().copied());
    access.set_data(&infection);
    let infected: Vec<Value> = fresh.iter().map(|id| Value::from(id.0)).collect();
    Some(
        access
            .result(ResultKind::Infection, action)
            .with_target(fresh[0])
            .with_field("infected", infected),
    )
}

fn all_infected(view: &RoleView<'_>) -> bool {
    if !view.any_holder_alive() {
        return false;
    }
    let infection: Infection = view.data().unwrap_or_default();
    view.alive_players()
        .iter()
        .filter(|p| !p.has_role(PARASSITA))
        .all(|p| infection.infetti.contains(&p.id))
}
