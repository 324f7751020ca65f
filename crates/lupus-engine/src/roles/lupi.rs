use lupus_core::{Action, ActsAtNight, NightResult, PlayerId, ResultKind, Team, UsageLimit};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{kill, kill_as, living_target, wolf};
use super::{
    BOIA, BURATTINAIO, CUCCIOLO, ILLUSIONISTA, INCANTATRICE, INDEMONIATO, LUPO, LUPO_VEGGENTE,
};
use crate::access::RoleAccess;
use crate::role::RoleDefinition;

pub(super) fn lupo() -> RoleDefinition {
    wolf(LUPO, "Lupo")
        .with_description("The pack chooses one victim every night.")
        .acting(ActsAtNight::Alive, 10)
        .required()
        .with_resolve(kill)
}

pub(super) fn indemoniato() -> RoleDefinition {
    wolf(INDEMONIATO, "Indemoniato")
        .with_description("Plays for the wolves but looks and counts as village.")
        .with_visible_as(Team::Villaggio)
        .with_count_as(Team::Villaggio)
        .with_requires(&[LUPO])
}

pub(super) fn cucciolo() -> RoleDefinition {
    wolf(CUCCIOLO, "Cucciolo di lupo")
        .with_description("Starts hunting for the pack once every wolf is dead.")
        .acting(ActsAtNight::Never, 11)
        .with_requires(&[LUPO])
        .with_passive(grow_up)
        .with_resolve(hunt)
}

pub(super) fn lupo_veggente() -> RoleDefinition {
    wolf(LUPO_VEGGENTE, "Lupo veggente")
        .with_description("Learns the exact role of a player.")
        .acting(ActsAtNight::Alive, 15)
        .with_requires(&[LUPO])
        .with_resolve(sniff)
}

pub(super) fn incantatrice() -> RoleDefinition {
    wolf(INCANTATRICE, "Incantatrice")
        .with_description("Stops a player from acting tonight.")
        .acting(ActsAtNight::Alive, 5)
        .with_resolve(enchant)
        .with_restore(lift_enchantments)
}

pub(super) fn illusionista() -> RoleDefinition {
    wolf(ILLUSIONISTA, "Illusionista")
        .with_description("Makes a player look like village for one night.")
        .acting(ActsAtNight::Alive, 6)
        .with_resolve(disguise)
        .with_restore(lift_disguises)
}

pub(super) fn boia() -> RoleDefinition {
    wolf(BOIA, "Boia")
        .with_description("Once per game, names a player's role. If right, the player dies.")
        .acting(ActsAtNight::Alive, 20)
        .with_usage(UsageLimit::Times(1))
        .with_resolve(declare)
}

pub(super) fn burattinaio() -> RoleDefinition {
    wolf(BURATTINAIO, "Burattinaio")
        .with_description("Once per game, moves the pack's victim onto someone else.")
        .acting(ActsAtNight::Alive, 90)
        .with_usage(UsageLimit::Times(1))
        .with_resolve(redirect)
}

fn grow_up(access: &mut RoleAccess<'_>, player: PlayerId) {
    let pack_alive = access
        .view()
        .players_with_role(LUPO)
        .iter()
        .any(|p| p.alive);
    let waiting = access
        .player(player)
        .is_some_and(|p| p.role_state.acts_at_night == ActsAtNight::Never);
    if !pack_alive && waiting {
        access.set_acts_at_night(player, ActsAtNight::Alive);
    }
}

fn hunt(access: &mut RoleAccess<'_>, action: &Action) -> Option<NightResult> {
    kill_as(access, action, LUPO)
}

fn sniff(access: &mut RoleAccess<'_>, action: &Action) -> Option<NightResult> {
    let target = living_target(access, action)?;
    let role = access.player(target)?.role_id.clone();
    access.add_check(action.player_id, target, Value::from(role.as_str()));
    Some(
        access
            .result(ResultKind::Investigation, action)
            .with_target(target)
            .with_field("discoveredRole", role.as_str()),
    )
}

/// Players touched tonight, undone by the restore hook.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct Touched {
    players: Vec<PlayerId>,
}

fn remember(access: &mut RoleAccess<'_>, target: PlayerId) {
    let mut touched: Touched = access.data().unwrap_or_default();
    if !touched.players.contains(&target) {
        touched.players.push(target);
    }
    access.set_data(&touched);
}

fn enchant(access: &mut RoleAccess<'_>, action: &Action) -> Option<NightResult> {
    let target = living_target(access, action)?;
    if !access.block_player(target) {
        return None;
    }
    remember(access, target);
    Some(access.result(ResultKind::Block, action).with_target(target))
}

fn lift_enchantments(access: &mut RoleAccess<'_>) {
    let touched: Touched = access.data().unwrap_or_default();
    for id in touched.players {
        access.unblock_player(id);
    }
    access.clear_custom_data();
}

fn disguise(access: &mut RoleAccess<'_>, action: &Action) -> Option<NightResult> {
    let target = living_target(access, action)?;
    if !access.disguise_player(target, Team::Villaggio) {
        return None;
    }
    remember(access, target);
    Some(
        access
            .result(ResultKind::Disguise, action)
            .with_target(target)
            .with_field("visibleAs", Team::Villaggio.to_string()),
    )
}

fn lift_disguises(access: &mut RoleAccess<'_>) {
    let touched: Touched = access.data().unwrap_or_default();
    for id in touched.players {
        access.clear_disguise(id);
    }
    access.clear_custom_data();
}

fn declare(access: &mut RoleAccess<'_>, action: &Action) -> Option<NightResult> {
    let target = living_target(access, action)?;
    let declared = action.declared_role()?;
    let correct = access.player(target)?.role_id == declared;
    if correct && !access.add_kill(target, None) {
        return None;
    }
    Some(
        access
            .result(ResultKind::Declaration, action)
            .with_target(target)
            .with_field("declaredRole", declared.as_str())
            .with_field("correct", correct),
    )
}

fn redirect(access: &mut RoleAccess<'_>, action: &Action) -> Option<NightResult> {
    let targets = action.target_ids();
    let &[from, to] = targets.as_slice() else {
        return None;
    };
    if from == to || access.player(from).is_none() || !access.is_alive(to) {
        return None;
    }
    let moved = access.move_kills(from, to, LUPO);
    Some(
        access
            .result(ResultKind::Redirection, action)
            .with_target(to)
            .with_field("from", from.0)
            .with_field("moved", moved),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::roles::{VEGGENTE, VILLICO, testing};
    use lupus_core::KillEntry;

    #[test]
    fn boia_wrong_declaration_leaves_ledger_untouched() {
        let registry = Registry::standard();
        let mut state = testing::table(&registry, &[BOIA, LUPO, VEGGENTE]);
        let action = Action::new(PlayerId(1))
            .with_target(PlayerId(3))
            .with_role(VILLICO);
        let result = testing::resolve(&mut state, &registry, BOIA, &action).unwrap();
        assert_eq!(result.kind, ResultKind::Declaration);
        assert_eq!(result.field("correct"), Some(&Value::from(false)));
        assert!(state.night_context().unwrap().is_empty());
    }

    #[test]
    fn boia_right_declaration_adds_one_entry() {
        let registry = Registry::standard();
        let mut state = testing::table(&registry, &[BOIA, LUPO, VEGGENTE]);
        let action = Action::new(PlayerId(1))
            .with_target(PlayerId(3))
            .with_role(VEGGENTE);
        let result = testing::resolve(&mut state, &registry, BOIA, &action).unwrap();
        assert_eq!(result.field("correct"), Some(&Value::from(true)));
        assert_eq!(result.field("declaredRole"), Some(&Value::from(VEGGENTE)));
        assert_eq!(testing::tags(&state, 3), vec![BOIA]);
    }

    #[test]
    fn boia_without_declared_role_is_noop() {
        let registry = Registry::standard();
        let mut state = testing::table(&registry, &[BOIA, VEGGENTE]);
        let action = Action::new(PlayerId(1)).with_target(PlayerId(2));
        assert!(testing::resolve(&mut state, &registry, BOIA, &action).is_none());
    }

    #[test]
    fn cucciolo_waits_for_the_pack() {
        let registry = Registry::standard();
        let mut state = testing::table(&registry, &[LUPO, CUCCIOLO, VILLICO]);
        let passive = registry.get(CUCCIOLO).unwrap().passive.unwrap();

        passive(&mut RoleAccess::new(&mut state, &registry, CUCCIOLO), PlayerId(2));
        let cub = state.player(PlayerId(2)).unwrap();
        assert_eq!(cub.role_state.acts_at_night, ActsAtNight::Never);

        state.player_mut(PlayerId(1)).unwrap().alive = false;
        passive(&mut RoleAccess::new(&mut state, &registry, CUCCIOLO), PlayerId(2));
        passive(&mut RoleAccess::new(&mut state, &registry, CUCCIOLO), PlayerId(2));
        let cub = state.player(PlayerId(2)).unwrap();
        assert_eq!(cub.role_state.acts_at_night, ActsAtNight::Alive);

        let action = Action::new(PlayerId(2)).with_target(PlayerId(3));
        testing::resolve(&mut state, &registry, CUCCIOLO, &action).unwrap();
        assert_eq!(testing::tags(&state, 3), vec![LUPO]);
    }

    #[test]
    fn lupo_veggente_learns_exact_role() {
        let registry = Registry::standard();
        let mut state = testing::table(&registry, &[LUPO_VEGGENTE, LUPO, VEGGENTE]);
        let action = Action::new(PlayerId(1)).with_target(PlayerId(3));
        let result = testing::resolve(&mut state, &registry, LUPO_VEGGENTE, &action).unwrap();
        assert_eq!(result.field("discoveredRole"), Some(&Value::from(VEGGENTE)));
    }

    #[test]
    fn incantatrice_block_is_lifted_by_restore() {
        let registry = Registry::standard();
        let mut state = testing::table(&registry, &[INCANTATRICE, LUPO, VEGGENTE]);
        let action = Action::new(PlayerId(1)).with_target(PlayerId(3));
        testing::resolve(&mut state, &registry, INCANTATRICE, &action).unwrap();
        let seer = state.player(PlayerId(3)).unwrap();
        assert!(!registry.get(VEGGENTE).unwrap().is_eligible(&state, seer));

        let restore = registry.get(INCANTATRICE).unwrap().restore.unwrap();
        restore(&mut RoleAccess::new(&mut state, &registry, INCANTATRICE));
        let seer = state.player(PlayerId(3)).unwrap();
        assert!(!seer.role_state.blocked);
        assert_eq!(seer.role_state.acts_at_night, ActsAtNight::Alive);
        assert!(state.custom_data().get(INCANTATRICE).is_none());
    }

    #[test]
    fn illusionista_disguise_is_lifted_by_restore() {
        let registry = Registry::standard();
        let mut state = testing::table(&registry, &[ILLUSIONISTA, LUPO, VEGGENTE]);
        let action = Action::new(PlayerId(1)).with_target(PlayerId(2));
        testing::resolve(&mut state, &registry, ILLUSIONISTA, &action).unwrap();
        let wolf = state.player(PlayerId(2)).unwrap();
        assert_eq!(wolf.role_state.apparent_team(), Team::Villaggio);

        let restore = registry.get(ILLUSIONISTA).unwrap().restore.unwrap();
        restore(&mut RoleAccess::new(&mut state, &registry, ILLUSIONISTA));
        let wolf = state.player(PlayerId(2)).unwrap();
        assert_eq!(wolf.role_state.apparent_team(), Team::Lupi);
    }

    #[test]
    fn burattinaio_moves_only_pack_kills() {
        let registry = Registry::standard();
        let mut state = testing::table(&registry, &[BURATTINAIO, LUPO, VILLICO, VILLICO]);
        let ctx = state.night_context_mut().unwrap();
        ctx.add_kill(PlayerId(3), KillEntry::new(LUPO));
        ctx.add_kill(PlayerId(3), KillEntry::new(VEGGENTE));

        let action = Action::new(PlayerId(1)).with_targets(&[PlayerId(3), PlayerId(4)]);
        let result = testing::resolve(&mut state, &registry, BURATTINAIO, &action).unwrap();
        assert_eq!(result.kind, ResultKind::Redirection);
        assert_eq!(result.field("moved"), Some(&Value::from(1)));
        assert_eq!(testing::tags(&state, 3), vec![VEGGENTE]);
        assert_eq!(testing::tags(&state, 4), vec![LUPO]);
    }

    #[test]
    fn burattinaio_needs_two_distinct_targets() {
        let registry = Registry::standard();
        let mut state = testing::table(&registry, &[BURATTINAIO, VILLICO]);
        for targets in [vec![PlayerId(2)], vec![PlayerId(2), PlayerId(2)], vec![]] {
            let action = Action::new(PlayerId(1)).with_targets(&targets);
            assert!(testing::resolve(&mut state, &registry, BURATTINAIO, &action).is_none());
        }
    }
}
