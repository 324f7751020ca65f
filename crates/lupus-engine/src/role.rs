//! Role definitions.
//!
//! A role is a plain record: capability fields plus optional behaviour hooks.
//! Roles never call each other; every hook receives the game through a
//! [`RoleAccess`] or [`RoleView`] scoped to the role being run.

use std::fmt;

use lupus_core::{
    Action, ActsAtNight, GameState, NightResult, Player, PlayerId, RoleState, Team, UsageLimit,
};

use crate::access::{RoleAccess, RoleView};

/// Resolves a submitted action. `None` means the input had no effect.
pub type ResolveFn = fn(&mut RoleAccess<'_>, &Action) -> Option<NightResult>;
/// Runs for every holder of a role before its turn and again before commit.
pub type PassiveFn = fn(&mut RoleAccess<'_>, PlayerId);
/// A win predicate or win constraint.
pub type WinFn = fn(&RoleView<'_>) -> bool;
/// End-of-night cleanup.
pub type RestoreFn = fn(&mut RoleAccess<'_>);

/// Whether the moderator must collect an action for the role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectType {
    /// The role must act every night it is eligible.
    Required,
    /// The role may pass.
    Optional,
}

/// Position of a role in the night.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseOrder {
    /// Runs at this slot; lower slots run first.
    At(i32),
    /// No ordering dependency. The role keeps its registration position.
    Any,
}

impl PhaseOrder {
    /// The numbered slot, or `None` for [`PhaseOrder::Any`].
    pub fn slot(self) -> Option<i32> {
        match self {
            Self::At(n) => Some(n),
            Self::Any => None,
        }
    }
}

impl fmt::Display for PhaseOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(n) => write!(f, "{n}"),
            Self::Any => write!(f, "any"),
        }
    }
}

/// Static traits other roles may react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleTrait {
    /// The holder dies when a seer investigates them.
    DiesWhenInvestigated,
}

/// An immutable role record.
#[derive(Clone)]
pub struct RoleDefinition {
    /// Registry key.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// One-line rules summary.
    pub description: &'static str,
    /// The faction the role plays for.
    pub team: Team,
    /// The faction investigations report.
    pub visible_as_team: Team,
    /// The faction used for win accounting.
    pub count_as: Team,
    /// When holders may act.
    pub acts_at_night: ActsAtNight,
    /// Whether an action is mandatory.
    pub effect_type: EffectType,
    /// How often each holder may use the power.
    pub number_of_usage: UsageLimit,
    /// Position in the night.
    pub phase_order: PhaseOrder,
    /// First night the role may act.
    pub start_night: Option<u32>,
    /// Minimum number of copies when the role is in play.
    pub min_count: usize,
    /// Maximum number of copies, if bounded.
    pub max_count: Option<usize>,
    /// Roles that must also be in play.
    pub requires: &'static [&'static str],
    /// Smallest table the role may be used at.
    pub min_players: usize,
    /// Static traits.
    pub traits: &'static [RoleTrait],
    /// Action resolution.
    pub resolve: Option<ResolveFn>,
    /// Passive effect.
    pub passive: Option<PassiveFn>,
    /// Win predicate.
    pub check_win: Option<WinFn>,
    /// Veto over the generic win conditions.
    pub check_win_constraint: Option<WinFn>,
    /// End-of-night cleanup.
    pub restore: Option<RestoreFn>,
}

impl fmt::Debug for RoleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoleDefinition")
            .field("id", &self.id)
            .field("team", &self.team)
            .field("acts_at_night", &self.acts_at_night)
            .field("phase_order", &self.phase_order)
            .field("resolve", &self.resolve.is_some())
            .field("passive", &self.passive.is_some())
            .field("check_win", &self.check_win.is_some())
            .field("check_win_constraint", &self.check_win_constraint.is_some())
            .field("restore", &self.restore.is_some())
            .finish()
    }
}

impl RoleDefinition {
    /// A role that never acts, looks like its team, and has no hooks.
    pub fn new(id: &'static str, name: &'static str, team: Team) -> Self {
        Self {
            id,
            name,
            description: "",
            team,
            visible_as_team: team,
            count_as: team,
            acts_at_night: ActsAtNight::Never,
            effect_type: EffectType::Optional,
            number_of_usage: UsageLimit::Unlimited,
            phase_order: PhaseOrder::Any,
            start_night: None,
            min_count: 1,
            max_count: None,
            requires: &[],
            min_players: 0,
            traits: &[],
            resolve: None,
            passive: None,
            check_win: None,
            check_win_constraint: None,
            restore: None,
        }
    }

    /// Set the rules summary.
    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Set the team investigations report.
    pub fn with_visible_as(mut self, team: Team) -> Self {
        self.visible_as_team = team;
        self
    }

    /// Set the team used for win accounting.
    pub fn with_count_as(mut self, team: Team) -> Self {
        self.count_as = team;
        self
    }

    /// Set when the role acts and where it sits in the night.
    pub fn acting(mut self, acts_at_night: ActsAtNight, order: i32) -> Self {
        self.acts_at_night = acts_at_night;
        self.phase_order = PhaseOrder::At(order);
        self
    }

    /// Set when the role acts, keeping its phase order.
    pub fn with_acts_at_night(mut self, acts_at_night: ActsAtNight) -> Self {
        self.acts_at_night = acts_at_night;
        self
    }

    /// Set the position in the night.
    pub fn with_phase_order(mut self, order: PhaseOrder) -> Self {
        self.phase_order = order;
        self
    }

    /// Make the action mandatory.
    pub fn required(mut self) -> Self {
        self.effect_type = EffectType::Required;
        self
    }

    /// Limit uses per holder.
    pub fn with_usage(mut self, limit: UsageLimit) -> Self {
        self.number_of_usage = limit;
        self
    }

    /// First night the role may act.
    pub fn with_start_night(mut self, night: u32) -> Self {
        self.start_night = Some(night);
        self
    }

    /// Bound the number of copies in a setup.
    pub fn with_count(mut self, min: usize, max: Option<usize>) -> Self {
        self.min_count = min;
        self.max_count = max;
        self
    }

    /// Roles that must be in play alongside this one.
    pub fn with_requires(mut self, roles: &'static [&'static str]) -> Self {
        self.requires = roles;
        self
    }

    /// Smallest table size.
    pub fn with_min_players(mut self, n: usize) -> Self {
        self.min_players = n;
        self
    }

    /// Attach static traits.
    pub fn with_traits(mut self, traits: &'static [RoleTrait]) -> Self {
        self.traits = traits;
        self
    }

    /// Attach the action hook.
    pub fn with_resolve(mut self, f: ResolveFn) -> Self {
        self.resolve = Some(f);
        self
    }

    /// Attach a passive effect.
    pub fn with_passive(mut self, f: PassiveFn) -> Self {
        self.passive = Some(f);
        self
    }

    /// Attach a win predicate.
    pub fn with_check_win(mut self, f: WinFn) -> Self {
        self.check_win = Some(f);
        self
    }

    /// Attach a win veto.
    pub fn with_win_constraint(mut self, f: WinFn) -> Self {
        self.check_win_constraint = Some(f);
        self
    }

    /// Attach end-of-night cleanup.
    pub fn with_restore(mut self, f: RestoreFn) -> Self {
        self.restore = Some(f);
        self
    }

    /// Whether the role carries a trait.
    pub fn has_trait(&self, t: RoleTrait) -> bool {
        self.traits.contains(&t)
    }

    /// Whether the role ever prompts for an action.
    pub fn has_night_action(&self) -> bool {
        self.resolve.is_some() && self.acts_at_night != ActsAtNight::Never
    }

    /// The capability state copied onto a player assigned this role.
    pub fn initial_state(&self) -> RoleState {
        RoleState {
            acts_at_night: self.acts_at_night,
            blocked: false,
            start_night: self.start_night,
            number_of_usage: self.number_of_usage,
            real_team: self.team,
            visible_as_team: self.visible_as_team,
            disguised_as: None,
            count_as: self.count_as,
        }
    }

    /// Whether `player` may use this role's action tonight.
    ///
    /// The role must be enabled and held by the player; the player's own
    /// capability state decides the rest (alive/dead status, block overlay,
    /// start night, remaining uses).
    pub fn is_eligible(&self, state: &GameState, player: &Player) -> bool {
        let role_state = &player.role_state;
        state.is_role_enabled(self.id)
            && player.has_role(self.id)
            && role_state.effective_acts_at_night().permits(player.alive)
            && role_state.start_night.is_none_or(|n| state.night >= n)
            && state
                .used_powers()
                .can_use(self.id, player.id, role_state.number_of_usage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lupus_core::{GameSettings, RoleId};

    fn seer() -> RoleDefinition {
        RoleDefinition::new("veggente", "Veggente", Team::Villaggio)
            .acting(ActsAtNight::Alive, 30)
            .with_usage(UsageLimit::Times(1))
            .with_start_night(2)
    }

    fn state_with(def: &RoleDefinition) -> GameState {
        let mut state = GameState::new(GameSettings::default());
        state
            .add_player(Player::new(PlayerId(1), "Anna", def.id, def.initial_state()))
            .unwrap();
        state.night = 2;
        state
    }

    #[test]
    fn any_has_no_slot() {
        assert_eq!(PhaseOrder::At(-1).slot(), Some(-1));
        assert_eq!(PhaseOrder::Any.slot(), None);
        assert_eq!(PhaseOrder::Any.to_string(), "any");
    }

    #[test]
    fn initial_state_copies_capabilities() {
        let def = RoleDefinition::new("indemoniato", "Indemoniato", Team::Lupi)
            .with_visible_as(Team::Villaggio)
            .with_count_as(Team::Villaggio);
        let state = def.initial_state();
        assert_eq!(state.real_team, Team::Lupi);
        assert_eq!(state.visible_as_team, Team::Villaggio);
        assert_eq!(state.count_as, Team::Villaggio);
        assert_eq!(state.acts_at_night, ActsAtNight::Never);
        assert!(!state.blocked);
    }

    #[test]
    fn eligibility_checks_each_gate() {
        let def = seer();
        let mut state = state_with(&def);
        let player = state.player(PlayerId(1)).unwrap().clone();
        assert!(def.is_eligible(&state, &player));

        state.night = 1;
        assert!(!def.is_eligible(&state, &player), "before start night");
        state.night = 2;

        let mut blocked = player.clone();
        blocked.role_state.blocked = true;
        assert!(!def.is_eligible(&state, &blocked), "blocked");

        let mut dead = player.clone();
        dead.alive = false;
        assert!(!def.is_eligible(&state, &dead), "dead");

        state
            .used_powers_mut()
            .record(RoleId::from("veggente"), PlayerId(1));
        assert!(!def.is_eligible(&state, &player), "usage exhausted");
    }

    #[test]
    fn debug_shows_hook_presence() {
        let debug = format!("{:?}", seer());
        assert!(debug.contains("veggente"));
        assert!(debug.contains("resolve: false"));
    }
}
