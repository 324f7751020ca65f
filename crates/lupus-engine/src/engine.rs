use std::collections::BTreeMap;

use lupus_core::{
    Action, GameSettings, GameState, NightContext, NightResult, Phase, Player, PlayerId,
    ResultKind, RoleId,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::access::RoleAccess;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::registry::Registry;
use crate::role::EffectType;
use crate::roles;
use crate::setup::{has_errors, validate_setup};
use crate::win::{Winner, evaluate};

/// Role id attached to day-vote eliminations in the history.
pub const VOTE: &str = "voto";

/// A role waiting for input tonight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibleRole {
    /// The role to prompt for.
    pub role_id: RoleId,
    /// Display name.
    pub name: &'static str,
    /// Players who may submit the action.
    pub players: Vec<PlayerId>,
    /// Whether the role must act.
    pub requires_action: bool,
}

/// What happened when a night was resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NightReport {
    /// The night that was resolved.
    pub night: u32,
    /// Players who died, as they are now.
    pub deaths: Vec<Player>,
    /// Players who came back.
    pub revived: Vec<Player>,
    /// Every result recorded during the night.
    pub history: Vec<NightResult>,
    /// Win evaluation after the commit.
    pub winner: Winner,
}

/// What happened when the day vote eliminated a player.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteOutcome {
    /// The eliminated player.
    pub eliminated: Player,
    /// Win evaluation after the elimination.
    pub winner: Winner,
}

/// The night phase scheduler.
///
/// Owns the role registry and drives a [`GameState`] through setup, nights,
/// and day votes. All game data lives in the state; the engine itself holds
/// nothing that changes between calls.
#[derive(Debug, Clone)]
pub struct Engine {
    registry: Registry,
    config: EngineConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Registry::standard(), EngineConfig::default())
    }
}

impl Engine {
    /// Create an engine over a registry.
    pub fn new(registry: Registry, config: EngineConfig) -> Self {
        Self { registry, config }
    }

    /// The roles this engine knows.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Engine behaviour switches.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Setup
    // -----------------------------------------------------------------------

    /// Seat players and deal roles.
    ///
    /// Seats are numbered from 1 in the order of `names`. Roles are shuffled
    /// with the settings' seed unless shuffling is disabled.
    pub fn new_game<S: AsRef<str>>(
        &self,
        names: &[S],
        roles: &[RoleId],
        settings: GameSettings,
    ) -> EngineResult<GameState> {
        if names.len() != roles.len() {
            return Err(EngineError::PlayerCountMismatch {
                players: names.len(),
                roles: roles.len(),
            });
        }

        let issues = validate_setup(&self.registry, roles);
        let fatal = if self.config.strict_setup {
            !issues.is_empty()
        } else {
            has_errors(&issues)
        };
        if fatal {
            return Err(EngineError::InvalidSetup(issues));
        }
        for issue in &issues {
            warn!(%issue, "setup warning");
        }

        let mut deck = roles.to_vec();
        if settings.shuffle_roles {
            let mut rng = StdRng::seed_from_u64(settings.seed);
            deck.shuffle(&mut rng);
        }

        let mut state = GameState::new(settings);
        for (i, (name, role)) in names.iter().zip(deck).enumerate() {
            let def = self
                .registry
                .get(role.as_str())
                .ok_or_else(|| EngineError::UnknownRole(role.to_string()))?;
            let id = PlayerId(i as u32 + 1);
            state.add_player(Player::new(id, name.as_ref(), def.id, def.initial_state()))?;
        }
        state.set_groupings(roles::default_groupings());

        info!(game = %state.id, players = state.players().len(), "game created");
        Ok(state)
    }

    // -----------------------------------------------------------------------
    // Night
    // -----------------------------------------------------------------------

    /// Open the next night. Passive effects run once for every holder.
    pub fn begin_night(&self, state: &mut GameState) -> EngineResult<u32> {
        match state.phase {
            Phase::Ended => return Err(EngineError::GameOver),
            Phase::Night => return Err(EngineError::NightInProgress(state.night)),
            Phase::Setup | Phase::Day => {}
        }
        state.night += 1;
        state.phase = Phase::Night;
        state.open_night_context();
        state.touch();
        self.run_passives(state, None);

        info!(night = state.night, "night begins");
        Ok(state.night)
    }

    /// Roles still waiting for input tonight, in night order.
    ///
    /// A role is listed when it has an action, has not acted yet, and at least
    /// one holder is eligible.
    pub fn list_eligible_roles(&self, state: &GameState) -> Vec<EligibleRole> {
        let Some(ctx) = state.night_context() else {
            return Vec::new();
        };
        if state.phase != Phase::Night {
            return Vec::new();
        }
        self.registry
            .ordered()
            .into_iter()
            .filter(|def| def.resolve.is_some() && !ctx.has_acted(def.id))
            .filter_map(|def| {
                let players: Vec<PlayerId> = state
                    .players_with_role(def.id)
                    .into_iter()
                    .filter(|p| def.is_eligible(state, p))
                    .map(|p| p.id)
                    .collect();
                (!players.is_empty()).then(|| EligibleRole {
                    role_id: RoleId::from(def.id),
                    name: def.name,
                    players,
                    requires_action: def.effect_type == EffectType::Required,
                })
            })
            .collect()
    }

    /// Submit a role's action for tonight.
    ///
    /// Passive effects of every role up to this one in night order run first.
    /// Returns the recorded result, or `None` when the action had no effect.
    /// A no-effect attempt is still recorded in the history and uses up the
    /// role's turn; actions for unknown or ineligible roles are ignored.
    pub fn submit_action(
        &self,
        state: &mut GameState,
        role_id: &str,
        action: Action,
    ) -> EngineResult<Option<NightResult>> {
        self.ensure_night(state)?;
        let Some(def) = self.registry.get(role_id) else {
            warn!(role = role_id, "action for unknown role ignored");
            return Ok(None);
        };
        let acted = state
            .night_context()
            .is_some_and(|ctx| ctx.has_acted(def.id));
        let eligible = state
            .player(action.player_id)
            .is_some_and(|p| def.is_eligible(state, p));
        if acted || !eligible {
            warn!(
                role = def.id,
                player = %action.player_id,
                acted,
                "action ignored, role cannot act"
            );
            return Ok(None);
        }

        self.run_passives(state, Some(def.id));

        let night = state.night;
        let outcome = if action.used {
            def.resolve.and_then(|resolve| {
                resolve(&mut RoleAccess::new(state, &self.registry, def.id), &action)
            })
        } else {
            Some(NightResult::new(ResultKind::Skipped, night, def.id).with_players(action.actors()))
        };
        let recorded = outcome.clone().unwrap_or_else(|| {
            NightResult::new(ResultKind::NoEffect, night, def.id).with_players(action.actors())
        });

        if recorded.is_effective() {
            state
                .used_powers_mut()
                .record(RoleId::from(def.id), action.player_id);
        }
        if let Some(ctx) = state.night_context_mut() {
            ctx.mark_acted(RoleId::from(def.id));
        }
        debug!(
            role = def.id,
            player = %action.player_id,
            kind = %recorded.kind,
            "action resolved"
        );
        state.push_result(recorded);
        state.touch();
        Ok(outcome)
    }

    /// Close the night: settle passives, apply saves, commit kills, apply
    /// revivals, run restore hooks, then evaluate the win.
    pub fn resolve_night(&self, state: &mut GameState) -> EngineResult<NightReport> {
        self.ensure_night(state)?;
        let night = state.night;

        self.run_passives(state, None);
        if self.config.enforce_required_actions {
            self.record_missing_actions(state);
        }

        let cancelled = state
            .night_context_mut()
            .map_or(0, NightContext::apply_saves);
        let commit = state.commit_pending_kills();
        for id in &commit.dropped {
            warn!(player = %id, "kill queued on unknown player dropped");
        }
        let revived = state.apply_revivals();

        self.run_restores(state);
        state.take_night_context();
        state.phase = Phase::Day;
        state.touch();

        info!(
            night,
            deaths = commit.deaths.len(),
            revived = revived.len(),
            cancelled,
            "night resolved"
        );
        let winner = self.settle(state);

        Ok(NightReport {
            night,
            deaths: snapshot(state, &commit.deaths),
            revived: snapshot(state, &revived),
            history: state
                .history()
                .results_for_night(night)
                .into_iter()
                .cloned()
                .collect(),
            winner,
        })
    }

    /// Play a whole night: begin, submit every given action in night order,
    /// resolve.
    pub fn run_night(
        &self,
        state: &mut GameState,
        actions: &BTreeMap<RoleId, Action>,
    ) -> EngineResult<NightReport> {
        self.begin_night(state)?;
        for def in self.registry.ordered() {
            if let Some(action) = actions.get(def.id) {
                self.submit_action(state, def.id, action.clone())?;
            }
        }
        self.resolve_night(state)
    }

    // -----------------------------------------------------------------------
    // Day
    // -----------------------------------------------------------------------

    /// Eliminate a player by day vote and evaluate the win.
    pub fn execute_vote(&self, state: &mut GameState, target: PlayerId) -> EngineResult<VoteOutcome> {
        match state.phase {
            Phase::Ended => return Err(EngineError::GameOver),
            Phase::Night => return Err(EngineError::NightInProgress(state.night)),
            Phase::Setup | Phase::Day => {}
        }
        let night = state.night;
        let player = state
            .player_mut(target)
            .ok_or(EngineError::PlayerNotFound(target))?;
        if !player.alive {
            return Err(EngineError::PlayerDead(target));
        }
        player.alive = false;
        let eliminated = player.clone();

        state.push_result(NightResult::new(ResultKind::Elimination, night, VOTE).with_target(target));
        state.phase = Phase::Day;
        state.touch();
        info!(player = %target, "eliminated by vote");

        let winner = self.settle(state);
        Ok(VoteOutcome { eliminated, winner })
    }

    /// The declared winner, or a fresh evaluation while the game is running.
    pub fn get_winner(&self, state: &GameState) -> Winner {
        match state.winners() {
            Some(teams) => Winner {
                ended: true,
                teams: teams.to_vec(),
            },
            None => evaluate(state, &self.registry),
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn ensure_night(&self, state: &GameState) -> EngineResult<()> {
        if state.phase == Phase::Ended {
            return Err(EngineError::GameOver);
        }
        if state.phase != Phase::Night || state.night_context().is_none() {
            return Err(EngineError::NoNightInProgress);
        }
        Ok(())
    }

    /// Run passive effects in night order for every holder, alive or dead,
    /// stopping after `until` when given.
    fn run_passives(&self, state: &mut GameState, until: Option<&str>) {
        for def in self.registry.ordered() {
            if let Some(passive) = def.passive {
                let holders: Vec<PlayerId> = state
                    .players_with_role(def.id)
                    .iter()
                    .map(|p| p.id)
                    .collect();
                let mut access = RoleAccess::new(state, &self.registry, def.id);
                for &id in &holders {
                    passive(&mut access, id);
                }
                if !holders.is_empty() {
                    debug!(role = def.id, holders = holders.len(), "passive effect ran");
                }
            }
            if until == Some(def.id) {
                break;
            }
        }
    }

    fn run_restores(&self, state: &mut GameState) {
        for def in self.registry.ordered() {
            let Some(restore) = def.restore else {
                continue;
            };
            if state.is_role_enabled(def.id) {
                restore(&mut RoleAccess::new(state, &self.registry, def.id));
            }
        }
    }

    /// Record a no-effect result for every required role that had eligible
    /// holders but never acted.
    fn record_missing_actions(&self, state: &mut GameState) {
        let missing: Vec<EligibleRole> = self
            .list_eligible_roles(state)
            .into_iter()
            .filter(|role| role.requires_action)
            .collect();
        for role in missing {
            warn!(role = %role.role_id, "required action missing");
            let result = NightResult::new(ResultKind::NoEffect, state.night, role.role_id)
                .with_players(role.players)
                .with_field("reason", "missingAction");
            state.push_result(result);
        }
    }

    /// Evaluate the win and end the game if someone has won.
    fn settle(&self, state: &mut GameState) -> Winner {
        let winner = evaluate(state, &self.registry);
        if winner.ended {
            info!(teams = ?winner.teams, "game over");
            state.declare_winners(winner.teams.clone());
        }
        winner
    }
}

fn snapshot(state: &GameState, ids: &[PlayerId]) -> Vec<Player> {
    ids.iter()
        .filter_map(|id| state.player(*id).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::{LUPO, LUPO_SOLITARIO, VEGGENTE, VILLICO};
    use lupus_core::{KillEntry, Team};

    fn started(engine: &Engine, roles: &[&str]) -> GameState {
        let names: Vec<String> = (1..=roles.len()).map(|i| format!("p{i}")).collect();
        let roles: Vec<RoleId> = roles.iter().map(|r| RoleId::from(*r)).collect();
        let mut state = engine
            .new_game(&names, &roles, GameSettings::default().with_shuffle_roles(false))
            .unwrap();
        engine.begin_night(&mut state).unwrap();
        state
    }

    #[test]
    fn seats_are_numbered_in_order() {
        let engine = Engine::default();
        let state = started(&engine, &[VEGGENTE, LUPO, VILLICO]);
        let ids: Vec<u32> = state.players().iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(state.player(PlayerId(2)).unwrap().has_role(LUPO));
        assert_eq!(state.groupings(), &roles::default_groupings());
    }

    #[test]
    fn unknown_role_is_ignored() {
        let engine = Engine::default();
        let mut state = started(&engine, &[VEGGENTE, LUPO, VILLICO]);
        let result = engine
            .submit_action(&mut state, "drago", Action::new(PlayerId(1)))
            .unwrap();
        assert!(result.is_none());
        assert!(state.history().is_empty());
    }

    #[test]
    fn no_effect_is_recorded_and_ends_the_turn() {
        let engine = Engine::default();
        let mut state = started(&engine, &[VEGGENTE, LUPO, VILLICO]);
        let own_seat = Action::new(PlayerId(2)).with_target(PlayerId(2));
        assert!(engine.submit_action(&mut state, LUPO, own_seat).unwrap().is_none());

        let recorded = &state.history().results()[0];
        assert_eq!(recorded.kind, ResultKind::NoEffect);
        assert_eq!(recorded.role_id, LUPO);
        assert!(
            engine
                .list_eligible_roles(&state)
                .iter()
                .all(|r| r.role_id != LUPO)
        );
        let again = Action::new(PlayerId(2)).with_target(PlayerId(3));
        assert!(engine.submit_action(&mut state, LUPO, again).unwrap().is_none());
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn passives_stop_at_the_submitting_role() {
        let engine = Engine::default();
        let mut state = started(&engine, &[LUPO_SOLITARIO, LUPO, VILLICO, VILLICO]);
        state
            .night_context_mut()
            .unwrap()
            .add_kill(PlayerId(1), KillEntry::new(LUPO));

        engine.run_passives(&mut state, Some(LUPO));
        assert!(state.night_context().unwrap().has_kills(PlayerId(1)));

        engine.run_passives(&mut state, None);
        assert!(!state.night_context().unwrap().has_kills(PlayerId(1)));
    }

    #[test]
    fn nothing_to_list_outside_the_night() {
        let engine = Engine::default();
        let mut state = started(&engine, &[VEGGENTE, LUPO, VILLICO]);
        engine.resolve_night(&mut state).unwrap();
        assert_eq!(state.phase, Phase::Day);
        assert!(state.night_context().is_none());
        assert!(engine.list_eligible_roles(&state).is_empty());
    }

    #[test]
    fn declared_winners_are_sticky() {
        let engine = Engine::default();
        let mut state = started(&engine, &[VEGGENTE, LUPO, VILLICO]);
        let kill = Action::new(PlayerId(2)).with_target(PlayerId(3));
        engine.submit_action(&mut state, LUPO, kill).unwrap();
        let report = engine.resolve_night(&mut state).unwrap();
        assert_eq!(report.winner.teams, vec![Team::Lupi]);
        assert!(state.is_over());

        state.player_mut(PlayerId(2)).unwrap().alive = false;
        assert_eq!(engine.get_winner(&state).teams, vec![Team::Lupi]);
    }
}
