//! Human input for a night action.
//!
//! The UI collects a decision and hands it over verbatim. `data` is
//! role-specific and untrusted: the typed accessors below turn malformed or
//! missing values into `None` so role code can treat them as a no-op.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::player::{PlayerId, RoleId};

/// Key holding a single target.
pub const TARGET_ID: &str = "targetId";
/// Key holding a list of targets.
pub const TARGET_IDS: &str = "targetIds";
/// Key holding a declared role.
pub const ROLE_ID: &str = "roleId";

/// A night decision submitted for a role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// The player who made the decision.
    pub player_id: PlayerId,
    /// Every player acting together (e.g. the whole pack).
    #[serde(default)]
    pub player_ids: Vec<PlayerId>,
    /// Role-specific payload.
    #[serde(default)]
    pub data: Map<String, Value>,
    /// `false` when the player chose not to use the power tonight.
    #[serde(default = "default_used")]
    pub used: bool,
}

fn default_used() -> bool {
    true
}

impl Action {
    /// An action by `player_id` with an empty payload.
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            player_ids: vec![player_id],
            data: Map::new(),
            used: true,
        }
    }

    /// A declined action: the player passes this night.
    pub fn skip(player_id: PlayerId) -> Self {
        Self {
            used: false,
            ..Self::new(player_id)
        }
    }

    /// Set the single target.
    pub fn with_target(self, target: PlayerId) -> Self {
        self.with_data(TARGET_ID, Value::from(target.0))
    }

    /// Set a list of targets.
    pub fn with_targets(self, targets: &[PlayerId]) -> Self {
        let ids: Vec<Value> = targets.iter().map(|t| Value::from(t.0)).collect();
        self.with_data(TARGET_IDS, Value::Array(ids))
    }

    /// Set the declared role.
    pub fn with_role(self, role: &str) -> Self {
        self.with_data(ROLE_ID, Value::from(role))
    }

    /// Set the players acting together.
    pub fn with_players(mut self, players: &[PlayerId]) -> Self {
        self.player_ids = players.to_vec();
        self
    }

    /// Set an arbitrary payload entry.
    pub fn with_data(mut self, key: &str, value: Value) -> Self {
        self.data.insert(key.to_string(), value);
        self
    }

    /// The single target, if present and well-formed.
    pub fn target_id(&self) -> Option<PlayerId> {
        self.data.get(TARGET_ID).and_then(parse_player_id)
    }

    /// All well-formed targets, in submission order. Malformed entries are dropped.
    pub fn target_ids(&self) -> Vec<PlayerId> {
        match self.data.get(TARGET_IDS) {
            Some(Value::Array(items)) => items.iter().filter_map(parse_player_id).collect(),
            _ => Vec::new(),
        }
    }

    /// The declared role, if present and non-empty.
    pub fn declared_role(&self) -> Option<RoleId> {
        self.str_field(ROLE_ID).map(RoleId::from)
    }

    /// A non-empty string payload entry.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.data
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Every player acting, always including `player_id`.
    pub fn actors(&self) -> Vec<PlayerId> {
        let mut actors = self.player_ids.clone();
        if !actors.contains(&self.player_id) {
            actors.insert(0, self.player_id);
        }
        actors
    }
}

/// Parse a player id from a JSON value.
///
/// Accepts non-negative integers, integral finite floats, and numeric strings.
/// Anything else (negative, fractional, non-finite, null) is rejected.
pub fn parse_player_id(value: &Value) -> Option<PlayerId> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !n.is_finite() || n < 0.0 || n.fract() != 0.0 || n > f64::from(u32::MAX) {
        return None;
    }
    Some(PlayerId(n as u32))
}
