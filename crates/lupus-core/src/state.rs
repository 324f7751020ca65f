use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::custom_data::CustomData;
use crate::error::{CoreError, CoreResult};
use crate::grouping::GroupingTable;
use crate::history::History;
use crate::ledger::NightContext;
use crate::player::{Player, PlayerId, RoleId};
use crate::query::PlayerQuery;
use crate::result::NightResult;
use crate::settings::GameSettings;
use crate::team::Team;
use crate::usage::UsageLedger;

/// Unique identifier for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(pub Uuid);

impl GameId {
    /// Generate a new random game ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Where the game currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Players seated, no night played yet.
    Setup,
    /// A night is in progress and the night context is open.
    Night,
    /// Between nights.
    Day,
    /// A winner has been declared.
    Ended,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup => write!(f, "setup"),
            Self::Night => write!(f, "night"),
            Self::Day => write!(f, "day"),
            Self::Ended => write!(f, "ended"),
        }
    }
}

/// Outcome of committing the kill ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Commit {
    /// Players who were alive and died.
    pub deaths: Vec<PlayerId>,
    /// Ledger targets that do not exist at the table.
    pub dropped: Vec<PlayerId>,
}

/// The shared game state. Owns players, per-game stores, and the open night.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Unique game identifier.
    pub id: GameId,
    /// When the game was created.
    pub created_at: DateTime<Utc>,
    /// When the game was last modified.
    pub updated_at: DateTime<Utc>,
    /// Current night number (0 before the first night).
    pub night: u32,
    /// Current phase.
    pub phase: Phase,
    /// House rules.
    pub settings: GameSettings,
    players: Vec<Player>,
    #[serde(default)]
    enabled_roles: BTreeSet<RoleId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    night_context: Option<NightContext>,
    #[serde(default)]
    custom_data: CustomData,
    #[serde(default)]
    used_powers: UsageLedger,
    #[serde(default)]
    groupings: GroupingTable,
    #[serde(default)]
    history: History,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    winners: Option<Vec<Team>>,
}

impl GameState {
    /// An empty game in the setup phase.
    pub fn new(settings: GameSettings) -> Self {
        let now = Utc::now();
        let history = History::new(settings.max_history);
        Self {
            id: GameId::new(),
            created_at: now,
            updated_at: now,
            night: 0,
            phase: Phase::Setup,
            settings,
            players: Vec::new(),
            enabled_roles: BTreeSet::new(),
            night_context: None,
            custom_data: CustomData::new(),
            used_powers: UsageLedger::new(),
            groupings: GroupingTable::default(),
            history,
            winners: None,
        }
    }

    /// Mark the state as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    // -----------------------------------------------------------------------
    // Players
    // -----------------------------------------------------------------------

    /// Seat a player. Names are unique case-insensitively.
    pub fn add_player(&mut self, player: Player) -> CoreResult<PlayerId> {
        if self.players.iter().any(|p| p.id == player.id) {
            return Err(CoreError::DuplicatePlayerId(player.id));
        }
        let name_lower = player.name.to_lowercase();
        if self
            .players
            .iter()
            .any(|p| p.name.to_lowercase() == name_lower)
        {
            return Err(CoreError::DuplicateName(player.name));
        }
        let id = player.id;
        self.enabled_roles.insert(player.role_id.clone());
        self.players.push(player);
        Ok(id)
    }

    /// Get a player by ID.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Get a mutable player by ID.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Get a mutable player by ID, or an error if the seat is empty.
    pub fn require_player_mut(&mut self, id: PlayerId) -> CoreResult<&mut Player> {
        self.player_mut(id).ok_or(CoreError::PlayerNotFound(id))
    }

    /// Find a player by name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Player> {
        let lower = name.to_lowercase();
        self.players.iter().find(|p| p.name.to_lowercase() == lower)
    }

    /// All players in seat order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// All players, mutably.
    pub fn players_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    /// Living players in seat order.
    pub fn alive_players(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| p.alive).collect()
    }

    /// Players currently holding `role`, alive or dead.
    pub fn players_with_role(&self, role: &str) -> Vec<&Player> {
        self.players.iter().filter(|p| p.has_role(role)).collect()
    }

    /// Start building a player query.
    pub fn query(&self) -> PlayerQuery<'_> {
        PlayerQuery::new(self)
    }

    // -----------------------------------------------------------------------
    // Roles in play
    // -----------------------------------------------------------------------

    /// Enable a role for this game.
    pub fn enable_role(&mut self, role: RoleId) {
        self.enabled_roles.insert(role);
    }

    /// Whether a role was enabled for this game.
    pub fn is_role_enabled(&self, role: &str) -> bool {
        self.enabled_roles.contains(role)
    }

    /// All roles enabled for this game.
    pub fn enabled_roles(&self) -> impl Iterator<Item = &RoleId> {
        self.enabled_roles.iter()
    }

    // -----------------------------------------------------------------------
    // Night context
    // -----------------------------------------------------------------------

    /// The open night context, if a night is in progress.
    pub fn night_context(&self) -> Option<&NightContext> {
        self.night_context.as_ref()
    }

    /// The open night context, mutably.
    pub fn night_context_mut(&mut self) -> Option<&mut NightContext> {
        self.night_context.as_mut()
    }

    /// Open a fresh night context, replacing any previous one.
    pub fn open_night_context(&mut self) {
        self.night_context = Some(NightContext::new());
    }

    /// Close the night context and return it.
    pub fn take_night_context(&mut self) -> Option<NightContext> {
        self.night_context.take()
    }

    /// Commit the kill ledger: every living player with at least one queued
    /// kill dies. Ledger entries for unknown players are reported in
    /// [`Commit::dropped`] and otherwise ignored. The ledger is left in place.
    pub fn commit_pending_kills(&mut self) -> Commit {
        let mut commit = Commit::default();
        let Some(ctx) = self.night_context.as_ref() else {
            return commit;
        };
        for target in ctx.pending_targets() {
            match self.players.iter_mut().find(|p| p.id == target) {
                Some(player) if player.alive => {
                    player.alive = false;
                    commit.deaths.push(target);
                }
                Some(_) => {}
                None => commit.dropped.push(target),
            }
        }
        commit
    }

    /// Bring back every dead player queued for revival. Returns those revived.
    pub fn apply_revivals(&mut self) -> Vec<PlayerId> {
        let Some(ctx) = self.night_context.as_ref() else {
            return Vec::new();
        };
        let queued = ctx.revivals().to_vec();
        let mut revived = Vec::new();
        for target in queued {
            let Some(player) = self.players.iter_mut().find(|p| p.id == target) else {
                continue;
            };
            if !player.alive {
                player.alive = true;
                revived.push(target);
            }
        }
        revived
    }

    // -----------------------------------------------------------------------
    // Per-game stores
    // -----------------------------------------------------------------------

    /// Per-role scratch storage.
    pub fn custom_data(&self) -> &CustomData {
        &self.custom_data
    }

    /// Per-role scratch storage, mutably.
    pub fn custom_data_mut(&mut self) -> &mut CustomData {
        &mut self.custom_data
    }

    /// The power usage ledger.
    pub fn used_powers(&self) -> &UsageLedger {
        &self.used_powers
    }

    /// The power usage ledger, mutably.
    pub fn used_powers_mut(&mut self) -> &mut UsageLedger {
        &mut self.used_powers
    }

    /// The grouping table.
    pub fn groupings(&self) -> &GroupingTable {
        &self.groupings
    }

    /// Replace the grouping table.
    pub fn set_groupings(&mut self, groupings: GroupingTable) {
        self.groupings = groupings;
    }

    /// The result history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Append a result to the history.
    pub fn push_result(&mut self, result: NightResult) {
        self.history.push(result);
    }

    // -----------------------------------------------------------------------
    // Game end
    // -----------------------------------------------------------------------

    /// Declare the winning teams and end the game.
    pub fn declare_winners(&mut self, teams: Vec<Team>) {
        self.winners = Some(teams);
        self.phase = Phase::Ended;
    }

    /// The declared winners, once the game has ended.
    pub fn winners(&self) -> Option<&[Team]> {
        self.winners.as_deref()
    }

    /// Whether a winner has been declared.
    pub fn is_over(&self) -> bool {
        self.phase == Phase::Ended
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Encode the whole state as pretty-printed JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode a state previously produced by [`GameState::to_json`].
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
