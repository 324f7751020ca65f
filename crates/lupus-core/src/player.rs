use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::team::Team;

/// Seat identifier for a player at the table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PlayerId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Identifier of a role definition, e.g. `"lupo"` or `"veggente"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(String);

impl RoleId {
    /// Create a role identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RoleId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for RoleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for RoleId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RoleId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// When a role may act during the night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActsAtNight {
    /// Acts whether alive or dead.
    Always,
    /// Acts only while alive.
    Alive,
    /// Acts only once dead.
    Dead,
    /// Never acts at night.
    Never,
    /// Temporarily prevented from acting. Only ever reported by
    /// [`RoleState::effective_acts_at_night`]; never stored as the base value.
    Blocked,
}

impl ActsAtNight {
    /// Whether a holder with the given alive status may act.
    pub fn permits(self, alive: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Alive => alive,
            Self::Dead => !alive,
            Self::Never | Self::Blocked => false,
        }
    }
}

impl fmt::Display for ActsAtNight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => write!(f, "always"),
            Self::Alive => write!(f, "alive"),
            Self::Dead => write!(f, "dead"),
            Self::Never => write!(f, "never"),
            Self::Blocked => write!(f, "blocked"),
        }
    }
}

/// How many times a role's power may be used per player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageLimit {
    /// No limit.
    Unlimited,
    /// At most this many successful uses.
    Times(u32),
}

impl UsageLimit {
    /// Whether another use is allowed after `used` successful uses.
    pub fn allows(self, used: usize) -> bool {
        match self {
            Self::Unlimited => true,
            Self::Times(n) => used < n as usize,
        }
    }
}

impl fmt::Display for UsageLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlimited => write!(f, "unlimited"),
            Self::Times(n) => write!(f, "{n}"),
        }
    }
}

/// Per-player copy of the capability fields of the assigned role.
///
/// Blocking and disguise are overlays: the base `acts_at_night` and
/// `visible_as_team` are never overwritten by a one-night effect, so a
/// skipped restore cannot lose the original value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleState {
    /// Base night activity inherited from the role.
    pub acts_at_night: ActsAtNight,
    /// Set for the current night by a blocking effect.
    #[serde(default)]
    pub blocked: bool,
    /// First night on which the role may act.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_night: Option<u32>,
    /// Usage limit for the role's power.
    pub number_of_usage: UsageLimit,
    /// The faction this player actually plays for.
    pub real_team: Team,
    /// The faction investigations report by default.
    pub visible_as_team: Team,
    /// One-night disguise overriding `visible_as_team`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disguised_as: Option<Team>,
    /// The faction used for win accounting.
    pub count_as: Team,
}

impl RoleState {
    /// A plain state for a team that never acts and looks like itself.
    pub fn inert(team: Team) -> Self {
        Self {
            acts_at_night: ActsAtNight::Never,
            blocked: false,
            start_night: None,
            number_of_usage: UsageLimit::Unlimited,
            real_team: team,
            visible_as_team: team,
            disguised_as: None,
            count_as: team,
        }
    }

    /// Night activity after applying the block overlay.
    pub fn effective_acts_at_night(&self) -> ActsAtNight {
        if self.blocked {
            ActsAtNight::Blocked
        } else {
            self.acts_at_night
        }
    }

    /// The team an investigation reports tonight.
    pub fn apparent_team(&self) -> Team {
        self.disguised_as.unwrap_or(self.visible_as_team)
    }
}

/// A seat at the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Unique seat identifier.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Currently assigned role. Impersonation roles may change it.
    pub role_id: RoleId,
    /// Whether the player is still in the game.
    pub alive: bool,
    /// Capability state derived from the role.
    pub role_state: RoleState,
}

impl Player {
    /// Create a living player holding `role_id` with the given capability state.
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        role_id: impl Into<RoleId>,
        role_state: RoleState,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            role_id: role_id.into(),
            alive: true,
            role_state,
        }
    }

    /// Whether this player currently holds the given role.
    pub fn has_role(&self, role: &str) -> bool {
        self.role_id == role
    }

    /// The faction this player plays for.
    pub fn team(&self) -> Team {
        self.role_state.real_team
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_id_serializes_as_number() {
        let json = serde_json::to_string(&PlayerId(7)).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn role_id_compares_with_str() {
        let id = RoleId::from("lupo");
        assert_eq!(id, "lupo");
        assert_eq!(id.as_str(), "lupo");
        assert_eq!(id.to_string(), "lupo");
    }

    #[test]
    fn acts_at_night_permits() {
        assert!(ActsAtNight::Always.permits(true));
        assert!(ActsAtNight::Always.permits(false));
        assert!(ActsAtNight::Alive.permits(true));
        assert!(!ActsAtNight::Alive.permits(false));
        assert!(ActsAtNight::Dead.permits(false));
        assert!(!ActsAtNight::Dead.permits(true));
        assert!(!ActsAtNight::Never.permits(true));
        assert!(!ActsAtNight::Blocked.permits(true));
    }

    #[test]
    fn usage_limit_allows() {
        assert!(UsageLimit::Unlimited.allows(1000));
        assert!(UsageLimit::Times(1).allows(0));
        assert!(!UsageLimit::Times(1).allows(1));
        assert!(!UsageLimit::Times(0).allows(0));
    }

    #[test]
    fn block_overlay_keeps_base_value() {
        let mut state = RoleState::inert(Team::Villaggio);
        state.acts_at_night = ActsAtNight::Alive;
        state.blocked = true;
        assert_eq!(state.effective_acts_at_night(), ActsAtNight::Blocked);
        state.blocked = false;
        assert_eq!(state.effective_acts_at_night(), ActsAtNight::Alive);
    }

    #[test]
    fn disguise_overrides_visible_team() {
        let mut state = RoleState::inert(Team::Lupi);
        assert_eq!(state.apparent_team(), Team::Lupi);
        state.disguised_as = Some(Team::Villaggio);
        assert_eq!(state.apparent_team(), Team::Villaggio);
    }

    #[test]
    fn role_state_round_trips_camel_case() {
        let mut state = RoleState::inert(Team::Lupi);
        state.start_night = Some(2);
        state.number_of_usage = UsageLimit::Times(1);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["actsAtNight"], "never");
        assert_eq!(json["startNight"], 2);
        assert_eq!(json["numberOfUsage"]["times"], 1);
        assert!(json.get("disguisedAs").is_none());
        let back: RoleState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
