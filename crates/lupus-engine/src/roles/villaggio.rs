use lupus_core::{Action, ActsAtNight, NightResult, PlayerId, ResultKind, UsageLimit};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{kill, living_target, village};
use super::{
    ANGELO, BOIA, CACCIATORE, GIUSTIZIERE, GUARDIA, INVESTIGATED, INVESTIGATORE, LUPO,
    LUPO_SOLITARIO, MASSONE, MEDIUM, SINDACO, STREGA, VEGGENTE, VILLICO,
};
use crate::access::RoleAccess;
use crate::role::{RoleDefinition, RoleTrait};

/// Kill tags the bodyguard shields against.
const GUARDIA_SAVES: &[&str] = &[LUPO, LUPO_SOLITARIO];
/// Kill tags the life potion cancels. Deaths caused by the seer are not among them.
const STREGA_SAVES: &[&str] = &[LUPO, LUPO_SOLITARIO, GIUSTIZIERE, CACCIATORE, BOIA];

const POTION: &str = "potion";
const LIFE: &str = "life";
const DEATH: &str = "death";

pub(super) fn villico() -> RoleDefinition {
    village(VILLICO, "Villico").with_description("No night action.")
}

pub(super) fn massone() -> RoleDefinition {
    village(MASSONE, "Massone")
        .with_description("Masons know each other. Always dealt in pairs or more.")
        .with_count(2, None)
}

pub(super) fn sindaco() -> RoleDefinition {
    village(SINDACO, "Sindaco")
        .with_description("Breaks ties in the day vote.")
        .with_count(1, Some(1))
}

pub(super) fn veggente() -> RoleDefinition {
    village(VEGGENTE, "Veggente")
        .with_description("Learns the faction a player appears to belong to.")
        .acting(ActsAtNight::Alive, 30)
        .with_resolve(investigate)
}

pub(super) fn investigatore() -> RoleDefinition {
    village(INVESTIGATORE, "Investigatore")
        .with_description("Learns whether a player has a night power.")
        .acting(ActsAtNight::Alive, 31)
        .with_resolve(inspect_power)
}

pub(super) fn medium() -> RoleDefinition {
    village(MEDIUM, "Medium")
        .with_description("Learns the faction of a dead player.")
        .acting(ActsAtNight::Alive, 32)
        .with_start_night(2)
        .with_resolve(read_the_dead)
}

pub(super) fn guardia() -> RoleDefinition {
    village(GUARDIA, "Guardia del corpo")
        .with_description("Protects another player from the wolves.")
        .acting(ActsAtNight::Alive, 25)
        .with_resolve(protect)
}

pub(super) fn strega() -> RoleDefinition {
    village(STREGA, "Strega")
        .with_description("One potion of life and one of death for the whole game.")
        .acting(ActsAtNight::Alive, 26)
        .with_resolve(brew)
}

pub(super) fn giustiziere() -> RoleDefinition {
    village(GIUSTIZIERE, "Giustiziere")
        .with_description("Kills one player, once, from the second night.")
        .acting(ActsAtNight::Alive, 40)
        .with_usage(UsageLimit::Times(1))
        .with_start_night(2)
        .with_resolve(kill)
}

pub(super) fn cacciatore() -> RoleDefinition {
    village(CACCIATORE, "Cacciatore")
        .with_description("Once dead, takes one player down with them.")
        .acting(ActsAtNight::Dead, 41)
        .with_usage(UsageLimit::Times(1))
        .with_resolve(kill)
}

pub(super) fn angelo() -> RoleDefinition {
    village(ANGELO, "Angelo")
        .with_description("Brings one dead player back, once.")
        .acting(ActsAtNight::Alive, 95)
        .with_usage(UsageLimit::Times(1))
        .with_resolve(revive)
}

fn investigate(access: &mut RoleAccess<'_>, action: &Action) -> Option<NightResult> {
    let target = living_target(access, action)?;
    let player = access.player(target)?;
    let faction = player.role_state.apparent_team();
    let fragile = access
        .definition(player.role_id.as_str())
        .is_some_and(|def| def.has_trait(RoleTrait::DiesWhenInvestigated));

    access.add_check(action.player_id, target, Value::from(faction.to_string()));
    if fragile {
        access.add_kill(target, Some(INVESTIGATED));
    }
    Some(
        access
            .result(ResultKind::Investigation, action)
            .with_target(target)
            .with_field("discoveredFaction", faction.to_string()),
    )
}

fn inspect_power(access: &mut RoleAccess<'_>, action: &Action) -> Option<NightResult> {
    let target = living_target(access, action)?;
    let has_power = access
        .view()
        .definition_of(target)
        .is_some_and(|def| def.has_night_action());
    access.add_check(action.player_id, target, Value::from(has_power));
    Some(
        access
            .result(ResultKind::Investigation, action)
            .with_target(target)
            .with_field("hasNightPower", has_power),
    )
}

fn read_the_dead(access: &mut RoleAccess<'_>, action: &Action) -> Option<NightResult> {
    let target = action.target_id()?;
    let player = access.player(target)?;
    if player.alive {
        return None;
    }
    let faction = player.role_state.visible_as_team;
    access.add_check(action.player_id, target, Value::from(faction.to_string()));
    Some(
        access
            .result(ResultKind::Investigation, action)
            .with_target(target)
            .with_field("discoveredFaction", faction.to_string()),
    )
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GuardiaMemory {
    last_target: Option<PlayerId>,
    #[serde(default)]
    last_night: u32,
}

fn protect(access: &mut RoleAccess<'_>, action: &Action) -> Option<NightResult> {
    let target = living_target(access, action)?;
    let night = access.night();
    let memory: GuardiaMemory = access.data().unwrap_or_default();
    let repeated = memory.last_target == Some(target) && memory.last_night + 1 == night;
    if repeated && !access.view().settings().guardia_can_repeat_target {
        return None;
    }
    if !access.add_save(target, GUARDIA_SAVES) {
        return None;
    }
    access.set_data(&GuardiaMemory {
        last_target: Some(target),
        last_night: night,
    });
    Some(
        access
            .result(ResultKind::Protection, action)
            .with_target(target),
    )
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Potions {
    life_used: bool,
    death_used: bool,
}

fn brew(access: &mut RoleAccess<'_>, action: &Action) -> Option<NightResult> {
    let potion = action.str_field(POTION)?;
    let target = action.target_id().filter(|t| access.is_alive(*t))?;
    let mut potions: Potions = access.data().unwrap_or_default();

    let result = match potion {
        LIFE if !potions.life_used => {
            if !access.add_save(target, STREGA_SAVES) {
                return None;
            }
            potions.life_used = true;
            access.result(ResultKind::Protection, action)
        }
        DEATH if !potions.death_used && target != action.player_id => {
            if !access.add_kill(target, None) {
                return None;
            }
            potions.death_used = true;
            access.result(ResultKind::Kill, action)
        }
        _ => return None,
    };

    access.set_data(&potions);
    if potions.life_used && potions.death_used {
        access.set_acts_at_night(action.player_id, ActsAtNight::Never);
    }
    Some(result.with_target(target).with_field(POTION, potion))
}

fn revive(access: &mut RoleAccess<'_>, action: &Action) -> Option<NightResult> {
    let target = action.target_id()?;
    if !access.add_revival(target) {
        return None;
    }
    Some(access.result(ResultKind::Revival, action).with_target(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::roles::{self, testing};
    use lupus_core::Team;

    #[test]
    fn seer_reports_apparent_faction() {
        let registry = Registry::standard();
        let mut state = testing::table(&registry, &[VEGGENTE, roles::LUPO, VILLICO]);
        let action = Action::new(PlayerId(1)).with_target(PlayerId(2));
        let result = testing::resolve(&mut state, &registry, VEGGENTE, &action).unwrap();
        assert_eq!(result.kind, ResultKind::Investigation);
        assert_eq!(result.field("discoveredFaction"), Some(&Value::from("lupi")));
        assert_eq!(state.night_context().unwrap().checks().len(), 1);
        assert!(testing::tags(&state, 2).is_empty());
    }

    #[test]
    fn seer_sees_disguise() {
        let registry = Registry::standard();
        let mut state = testing::table(&registry, &[VEGGENTE, roles::LUPO]);
        state.player_mut(PlayerId(2)).unwrap().role_state.disguised_as = Some(Team::Villaggio);
        let action = Action::new(PlayerId(1)).with_target(PlayerId(2));
        let result = testing::resolve(&mut state, &registry, VEGGENTE, &action).unwrap();
        assert_eq!(
            result.field("discoveredFaction"),
            Some(&Value::from("villaggio"))
        );
    }

    #[test]
    fn seer_kills_fragile_target() {
        let registry = Registry::standard();
        let mut state = testing::table(&registry, &[VEGGENTE, roles::CRICETO]);
        let action = Action::new(PlayerId(1)).with_target(PlayerId(2));
        testing::resolve(&mut state, &registry, VEGGENTE, &action).unwrap();
        let kills = state.night_context().unwrap().kills_for(PlayerId(2));
        assert_eq!(kills.len(), 1);
        assert_eq!(kills[0].role, VEGGENTE);
        assert_eq!(kills[0].reason.as_deref(), Some(INVESTIGATED));
    }

    #[test]
    fn investigatore_reports_night_power() {
        let registry = Registry::standard();
        let mut state = testing::table(&registry, &[INVESTIGATORE, roles::LUPO, VILLICO]);
        let wolf = Action::new(PlayerId(1)).with_target(PlayerId(2));
        let result = testing::resolve(&mut state, &registry, INVESTIGATORE, &wolf).unwrap();
        assert_eq!(result.field("hasNightPower"), Some(&Value::from(true)));
        let villager = Action::new(PlayerId(1)).with_target(PlayerId(3));
        let result = testing::resolve(&mut state, &registry, INVESTIGATORE, &villager).unwrap();
        assert_eq!(result.field("hasNightPower"), Some(&Value::from(false)));
    }

    #[test]
    fn medium_only_reads_dead_players() {
        let registry = Registry::standard();
        let mut state = testing::table(&registry, &[MEDIUM, roles::LUPO]);
        let action = Action::new(PlayerId(1)).with_target(PlayerId(2));
        assert!(testing::resolve(&mut state, &registry, MEDIUM, &action).is_none());
        state.player_mut(PlayerId(2)).unwrap().alive = false;
        let result = testing::resolve(&mut state, &registry, MEDIUM, &action).unwrap();
        assert_eq!(result.field("discoveredFaction"), Some(&Value::from("lupi")));
    }

    #[test]
    fn guardia_cannot_repeat_target_on_consecutive_nights() {
        let registry = Registry::standard();
        let mut state = testing::table(&registry, &[GUARDIA, VILLICO, VILLICO]);
        let action = Action::new(PlayerId(1)).with_target(PlayerId(2));
        assert!(testing::resolve(&mut state, &registry, GUARDIA, &action).is_some());

        state.night = 2;
        state.open_night_context();
        assert!(testing::resolve(&mut state, &registry, GUARDIA, &action).is_none());
        let other = Action::new(PlayerId(1)).with_target(PlayerId(3));
        assert!(testing::resolve(&mut state, &registry, GUARDIA, &other).is_some());

        state.settings.guardia_can_repeat_target = true;
        state.night = 3;
        state.open_night_context();
        let back = Action::new(PlayerId(1)).with_target(PlayerId(3));
        assert!(testing::resolve(&mut state, &registry, GUARDIA, &back).is_some());
    }

    #[test]
    fn guardia_cannot_protect_self() {
        let registry = Registry::standard();
        let mut state = testing::table(&registry, &[GUARDIA, VILLICO]);
        let action = Action::new(PlayerId(1)).with_target(PlayerId(1));
        assert!(testing::resolve(&mut state, &registry, GUARDIA, &action).is_none());
    }

    #[test]
    fn strega_uses_each_potion_once() {
        let registry = Registry::standard();
        let mut state = testing::table(&registry, &[STREGA, VILLICO, VILLICO]);
        let life = Action::new(PlayerId(1))
            .with_target(PlayerId(2))
            .with_data(POTION, Value::from(LIFE));
        let result = testing::resolve(&mut state, &registry, STREGA, &life).unwrap();
        assert_eq!(result.kind, ResultKind::Protection);
        assert!(testing::resolve(&mut state, &registry, STREGA, &life).is_none());

        let death = Action::new(PlayerId(1))
            .with_target(PlayerId(3))
            .with_data(POTION, Value::from(DEATH));
        let result = testing::resolve(&mut state, &registry, STREGA, &death).unwrap();
        assert_eq!(result.kind, ResultKind::Kill);
        assert_eq!(testing::tags(&state, 3), vec![STREGA]);

        let witch = state.player(PlayerId(1)).unwrap();
        assert_eq!(witch.role_state.acts_at_night, ActsAtNight::Never);
    }

    #[test]
    fn strega_life_does_not_cancel_seer_kill() {
        let registry = Registry::standard();
        let mut state = testing::table(&registry, &[STREGA, roles::CRICETO]);
        let ctx = state.night_context_mut().unwrap();
        ctx.add_kill(PlayerId(2), lupus_core::KillEntry::new(VEGGENTE));
        ctx.add_kill(PlayerId(2), lupus_core::KillEntry::new(LUPO));
        let life = Action::new(PlayerId(1))
            .with_target(PlayerId(2))
            .with_data(POTION, Value::from(LIFE));
        testing::resolve(&mut state, &registry, STREGA, &life).unwrap();
        state.night_context_mut().unwrap().apply_saves();
        assert_eq!(testing::tags(&state, 2), vec![VEGGENTE]);
    }

    #[test]
    fn unknown_potion_is_noop() {
        let registry = Registry::standard();
        let mut state = testing::table(&registry, &[STREGA, VILLICO]);
        let action = Action::new(PlayerId(1))
            .with_target(PlayerId(2))
            .with_data(POTION, Value::from("love"));
        assert!(testing::resolve(&mut state, &registry, STREGA, &action).is_none());
        assert!(state.custom_data().get(STREGA).is_none());
    }

    #[test]
    fn angelo_revives_dead_only() {
        let registry = Registry::standard();
        let mut state = testing::table(&registry, &[ANGELO, VILLICO]);
        let action = Action::new(PlayerId(1)).with_target(PlayerId(2));
        assert!(testing::resolve(&mut state, &registry, ANGELO, &action).is_none());
        state.player_mut(PlayerId(2)).unwrap().alive = false;
        let result = testing::resolve(&mut state, &registry, ANGELO, &action).unwrap();
        assert_eq!(result.kind, ResultKind::Revival);
        assert_eq!(state.night_context().unwrap().revivals(), &[PlayerId(2)]);
    }
}
