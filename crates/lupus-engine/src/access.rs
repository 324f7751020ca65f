//! The role access facade.
//!
//! Role hooks never see `GameState` directly. They get a [`RoleAccess`] (or a
//! read-only [`RoleView`]) bound to one role id; custom data and usage
//! accounting are always scoped to that id, so a role cannot touch another
//! role's memory. A role that runs someone else's action does so through
//! [`RoleAccess::borrowing`], which tags ledger entries with the borrowed role
//! but keeps custom data in a namespace of its own. Every operation is total: unknown players or a missing night
//! context turn the call into a no-op reported through the return value.

use lupus_core::{
    Action, ActsAtNight, Check, GameSettings, GameState, GroupingTable, KillEntry, NightResult,
    Player, PlayerId, PlayerQuery, ResultKind, RoleId, Save, Team,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::registry::Registry;
use crate::role::RoleDefinition;

/// Read-only access to the game on behalf of one role.
#[derive(Clone, Copy)]
pub struct RoleView<'a> {
    state: &'a GameState,
    registry: &'a Registry,
    role: &'static str,
    scope: &'a str,
}

impl<'a> RoleView<'a> {
    /// A view on behalf of `role`.
    pub fn new(state: &'a GameState, registry: &'a Registry, role: &'static str) -> Self {
        Self {
            state,
            registry,
            role,
            scope: role,
        }
    }

    /// The role this view is scoped to.
    pub fn role_id(&self) -> &'static str {
        self.role
    }

    /// The current night number.
    pub fn night(&self) -> u32 {
        self.state.night
    }

    /// House rules for this game.
    pub fn settings(&self) -> &'a GameSettings {
        &self.state.settings
    }

    // -- players --------------------------------------------------------------

    /// A seated player, dead or alive.
    pub fn player(&self, id: PlayerId) -> Option<&'a Player> {
        self.state.player(id)
    }

    /// Whether `id` is seated and alive.
    pub fn is_alive(&self, id: PlayerId) -> bool {
        self.player(id).is_some_and(|p| p.alive)
    }

    /// Every seated player in seat order.
    pub fn players(&self) -> &'a [Player] {
        self.state.players()
    }

    /// Players still alive.
    pub fn alive_players(&self) -> Vec<&'a Player> {
        self.state.alive_players()
    }

    /// Players currently holding `role`.
    pub fn players_with_role(&self, role: &str) -> Vec<&'a Player> {
        self.state.players_with_role(role)
    }

    /// Players holding the role this view is scoped to.
    pub fn holders(&self) -> Vec<&'a Player> {
        self.state.players_with_role(self.role)
    }

    /// Whether any holder of this role is alive.
    pub fn any_holder_alive(&self) -> bool {
        self.holders().iter().any(|p| p.alive)
    }

    /// Start a player query.
    pub fn query(&self) -> PlayerQuery<'a> {
        self.state.query()
    }

    // -- roles ----------------------------------------------------------------

    /// Look up any role definition.
    pub fn definition(&self, role: &str) -> Option<&'a RoleDefinition> {
        self.registry.get(role)
    }

    /// The definition of the role a player currently holds.
    pub fn definition_of(&self, id: PlayerId) -> Option<&'a RoleDefinition> {
        self.player(id).and_then(|p| self.registry.get(p.role_id.as_str()))
    }

    /// Whether `player` could use `role`'s action tonight.
    pub fn is_role_eligible(&self, role: &str, player: PlayerId) -> bool {
        match (self.definition(role), self.player(player)) {
            (Some(def), Some(p)) => def.is_eligible(self.state, p),
            _ => false,
        }
    }

    /// The capability groupings for this game.
    pub fn groupings(&self) -> &'a GroupingTable {
        self.state.groupings()
    }

    // -- ledgers --------------------------------------------------------------

    /// Kill entries currently queued on `target`.
    pub fn kills_for(&self, target: PlayerId) -> &'a [KillEntry] {
        match self.state.night_context() {
            Some(ctx) => ctx.kills_for(target),
            None => &[],
        }
    }

    /// Investigations made so far tonight.
    pub fn checks(&self) -> &'a [Check] {
        match self.state.night_context() {
            Some(ctx) => ctx.checks(),
            None => &[],
        }
    }

    // -- custom data ----------------------------------------------------------

    /// This role's raw custom data.
    pub fn custom_data(&self) -> Option<&'a Value> {
        self.state.custom_data().get(self.scope)
    }

    /// This role's custom data decoded as `T`. Missing or malformed data is `None`.
    pub fn data<T: DeserializeOwned>(&self) -> Option<T> {
        let value = self.custom_data()?;
        serde_json::from_value(value.clone()).ok()
    }

    // -- usage ----------------------------------------------------------------

    /// Successful uses of this role by `player`.
    pub fn power_usage_count(&self, player: PlayerId) -> usize {
        self.state.used_powers().count_for(self.role, player)
    }

    /// Whether `player` has uses of this role left.
    pub fn can_use_power(&self, player: PlayerId) -> bool {
        let limit = match (self.player(player), self.definition(self.role)) {
            (Some(p), _) if p.has_role(self.role) => p.role_state.number_of_usage,
            (_, Some(def)) => def.number_of_usage,
            _ => return false,
        };
        self.state.used_powers().can_use(self.role, player, limit)
    }
}

/// Mutating access to the game on behalf of one role.
pub struct RoleAccess<'a> {
    state: &'a mut GameState,
    registry: &'a Registry,
    role: &'static str,
    scope: String,
}

impl<'a> RoleAccess<'a> {
    /// Mutating access on behalf of `role`.
    pub fn new(state: &'a mut GameState, registry: &'a Registry, role: &'static str) -> Self {
        Self {
            state,
            registry,
            role,
            scope: role.to_string(),
        }
    }

    /// Reborrow this access to run `role`'s action on this role's behalf.
    ///
    /// Results and ledger entries carry `role`. Custom data lives under
    /// `"<this scope>:<role>"`, so the borrowed role's own memory is never
    /// read or written.
    pub(crate) fn borrowing(&mut self, role: &'static str) -> RoleAccess<'_> {
        RoleAccess {
            state: &mut *self.state,
            registry: self.registry,
            role,
            scope: format!("{}:{role}", self.scope),
        }
    }

    /// Read-only view with the same scope.
    pub fn view(&self) -> RoleView<'_> {
        RoleView {
            state: &*self.state,
            registry: self.registry,
            role: self.role,
            scope: &self.scope,
        }
    }

    /// The role results and ledger entries are tagged with.
    pub fn role_id(&self) -> &'static str {
        self.role
    }

    /// The current night number.
    pub fn night(&self) -> u32 {
        self.state.night
    }

    /// A seated player, dead or alive.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.state.player(id)
    }

    /// Whether `id` is seated and alive.
    pub fn is_alive(&self, id: PlayerId) -> bool {
        self.state.player(id).is_some_and(|p| p.alive)
    }

    /// Look up a role definition. The reference outlives this access.
    pub fn definition(&self, role: &str) -> Option<&'a RoleDefinition> {
        self.registry.get(role)
    }

    /// Start a result for this role attributed to the action's actors.
    pub fn result(&self, kind: ResultKind, action: &Action) -> NightResult {
        NightResult::new(kind, self.state.night, self.role).with_players(action.actors())
    }

    // -- kill ledger ----------------------------------------------------------

    /// Queue a kill on `target` tagged with this role.
    pub fn add_kill(&mut self, target: PlayerId, reason: Option<&str>) -> bool {
        let tag = self.role;
        self.add_kill_as(target, tag, reason)
    }

    /// Queue a kill tagged with another role, for roles that hunt on a
    /// faction's behalf.
    pub fn add_kill_as(&mut self, target: PlayerId, tag: &str, reason: Option<&str>) -> bool {
        if self.state.player(target).is_none() {
            return false;
        }
        let Some(ctx) = self.state.night_context_mut() else {
            return false;
        };
        let mut entry = KillEntry::new(tag);
        if let Some(reason) = reason {
            entry = entry.with_reason(reason);
        }
        ctx.add_kill(target, entry);
        debug!(role = self.role, tag, target = %target, "kill queued");
        true
    }

    /// Remove every kill on `target` tagged `role`.
    pub fn remove_kills(&mut self, target: PlayerId, role: &str) -> usize {
        self.state
            .night_context_mut()
            .map_or(0, |ctx| ctx.remove_kills(target, role))
    }

    /// Move every kill tagged `tag` from one player onto another. Returns the
    /// number of entries moved.
    pub fn move_kills(&mut self, from: PlayerId, to: PlayerId, tag: &str) -> usize {
        if self.state.player(to).is_none() {
            return 0;
        }
        let Some(ctx) = self.state.night_context_mut() else {
            return 0;
        };
        let moved = ctx.drain_kills(from, tag);
        let count = moved.len();
        for entry in moved {
            ctx.add_kill(to, entry);
        }
        count
    }

    /// Kill entries currently queued on `target`.
    pub fn kills_for(&self, target: PlayerId) -> Vec<KillEntry> {
        self.view().kills_for(target).to_vec()
    }

    // -- saves, checks, revivals ----------------------------------------------

    /// Protect `target` from kills tagged with any of `from_roles` (all kills
    /// when empty).
    pub fn add_save(&mut self, target: PlayerId, from_roles: &[&str]) -> bool {
        if self.state.player(target).is_none() {
            return false;
        }
        let role = self.role;
        let Some(ctx) = self.state.night_context_mut() else {
            return false;
        };
        ctx.add_save(Save {
            role: RoleId::from(role),
            target,
            from_roles: from_roles.iter().map(|r| RoleId::from(*r)).collect(),
        });
        true
    }

    /// Record an investigation of `target` by `actor`.
    pub fn add_check(&mut self, actor: PlayerId, target: PlayerId, outcome: Value) -> bool {
        if self.state.player(target).is_none() {
            return false;
        }
        let role = self.role;
        let Some(ctx) = self.state.night_context_mut() else {
            return false;
        };
        ctx.add_check(Check {
            role: RoleId::from(role),
            actor,
            target,
            outcome,
        });
        true
    }

    /// Queue a dead player to return after the kill commit.
    pub fn add_revival(&mut self, target: PlayerId) -> bool {
        if self.is_alive(target) || self.state.player(target).is_none() {
            return false;
        }
        let Some(ctx) = self.state.night_context_mut() else {
            return false;
        };
        ctx.add_revival(target);
        true
    }

    // -- player overlays ------------------------------------------------------

    /// Stop `id` from acting until unblocked.
    pub fn block_player(&mut self, id: PlayerId) -> bool {
        self.update_player(id, |p| p.role_state.blocked = true)
    }

    /// Lift a block.
    pub fn unblock_player(&mut self, id: PlayerId) -> bool {
        self.update_player(id, |p| p.role_state.blocked = false)
    }

    /// Make investigations report `team` for `id`.
    pub fn disguise_player(&mut self, id: PlayerId, team: Team) -> bool {
        self.update_player(id, |p| p.role_state.disguised_as = Some(team))
    }

    /// Show `id`'s real team again.
    pub fn clear_disguise(&mut self, id: PlayerId) -> bool {
        self.update_player(id, |p| p.role_state.disguised_as = None)
    }

    /// Change the base night activity of `id`.
    pub fn set_acts_at_night(&mut self, id: PlayerId, acts: ActsAtNight) -> bool {
        self.update_player(id, |p| p.role_state.acts_at_night = acts)
    }

    /// Give `id` a new role. Capability state is re-derived from the new role
    /// and its action becomes available from the following night.
    pub fn change_role(&mut self, id: PlayerId, role: &str) -> bool {
        let Some(def) = self.registry.get(role) else {
            return false;
        };
        let next_night = self.state.night + 1;
        let changed = self.update_player(id, |p| {
            let mut role_state = def.initial_state();
            role_state.start_night = Some(
                role_state
                    .start_night
                    .map_or(next_night, |n| n.max(next_night)),
            );
            p.role_id = RoleId::from(def.id);
            p.role_state = role_state;
        });
        if changed {
            self.state.enable_role(RoleId::from(def.id));
            debug!(player = %id, role = def.id, "role changed");
        }
        changed
    }

    fn update_player(&mut self, id: PlayerId, f: impl FnOnce(&mut Player)) -> bool {
        match self.state.player_mut(id) {
            Some(player) => {
                f(player);
                true
            }
            None => false,
        }
    }

    // -- custom data ----------------------------------------------------------

    /// This role's custom data decoded as `T`.
    pub fn data<T: DeserializeOwned>(&self) -> Option<T> {
        self.view().data()
    }

    /// Replace this role's custom data.
    pub fn set_custom_data(&mut self, value: Value) {
        self.state
            .custom_data_mut()
            .set(RoleId::from(self.scope.as_str()), value);
    }

    /// Encode and store `value` as this role's custom data.
    pub fn set_data<T: Serialize>(&mut self, value: &T) {
        match serde_json::to_value(value) {
            Ok(value) => self.set_custom_data(value),
            Err(e) => warn!(role = self.role, error = %e, "custom data not stored"),
        }
    }

    /// Drop this role's custom data.
    pub fn clear_custom_data(&mut self) {
        self.state.custom_data_mut().clear(&self.scope);
    }

    // -- usage ----------------------------------------------------------------

    /// Record a successful use of this role by `player`.
    pub fn record_power_usage(&mut self, player: PlayerId) {
        self.state
            .used_powers_mut()
            .record(RoleId::from(self.role), player);
    }

    /// Successful uses of this role by `player`.
    pub fn power_usage_count(&self, player: PlayerId) -> usize {
        self.view().power_usage_count(player)
    }

    /// Whether `player` has uses of this role left.
    pub fn can_use_power(&self, player: PlayerId) -> bool {
        self.view().can_use_power(player)
    }
}
