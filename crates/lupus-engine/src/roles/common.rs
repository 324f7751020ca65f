use lupus_core::{Action, NightResult, PlayerId, ResultKind, Team};

use crate::access::{RoleAccess, RoleView};
use crate::role::RoleDefinition;

/// Every living player counts as village.
pub fn villaggio_wins(view: &RoleView<'_>) -> bool {
    let alive = view.alive_players();
    !alive.is_empty()
        && alive
            .iter()
            .all(|p| p.role_state.count_as == Team::Villaggio)
}

/// Living wolves are at least as many as everyone else alive.
pub fn lupi_wins(view: &RoleView<'_>) -> bool {
    let alive = view.alive_players();
    let lupi = alive
        .iter()
        .filter(|p| p.role_state.count_as == Team::Lupi)
        .count();
    lupi > 0 && lupi >= alive.len() - lupi
}

pub(super) fn any_holder_alive(view: &RoleView<'_>) -> bool {
    view.any_holder_alive()
}

pub(super) fn village(id: &'static str, name: &'static str) -> RoleDefinition {
    RoleDefinition::new(id, name, Team::Villaggio).with_check_win(villaggio_wins)
}

pub(super) fn wolf(id: &'static str, name: &'static str) -> RoleDefinition {
    RoleDefinition::new(id, name, Team::Lupi).with_check_win(lupi_wins)
}

/// The action's target if it is alive and not the actor.
pub(super) fn living_target(access: &RoleAccess<'_>, action: &Action) -> Option<PlayerId> {
    let target = action.target_id()?;
    (target != action.player_id && access.is_alive(target)).then_some(target)
}

/// Queue a kill tagged `tag` on a living target.
pub(super) fn kill_as(
    access: &mut RoleAccess<'_>,
    action: &Action,
    tag: &str,
) -> Option<NightResult> {
    let target = living_target(access, action)?;
    if !access.add_kill_as(target, tag, None) {
        return None;
    }
    Some(access.result(ResultKind::Kill, action).with_target(target))
}

/// Queue a kill tagged with the acting role on a living target.
pub(super) fn kill(access: &mut RoleAccess<'_>, action: &Action) -> Option<NightResult> {
    let tag = access.role_id();
    kill_as(access, action, tag)
}
