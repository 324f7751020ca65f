use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::player::{PlayerId, RoleId};

/// What kind of outcome a night result records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    /// A kill was queued.
    Kill,
    /// A player's faction or role was revealed to the actor.
    Investigation,
    /// A player was shielded from some kills.
    Protection,
    /// A player was prevented from acting tonight.
    Block,
    /// A player's visible faction was changed for one night.
    Disguise,
    /// Players were added to an infection set.
    Infection,
    /// A role was declared for a target.
    Declaration,
    /// Another role's action was borrowed.
    Impersonation,
    /// The actor took on a different role.
    Transformation,
    /// Pending kills were moved onto another player.
    Redirection,
    /// A dead player was queued to return.
    Revival,
    /// A player was eliminated by the day vote.
    Elimination,
    /// The player chose not to act.
    Skipped,
    /// The role attempted to act but nothing happened (bad input, ineligible).
    NoEffect,
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Kill => "kill",
            Self::Investigation => "investigation",
            Self::Protection => "protection",
            Self::Block => "block",
            Self::Disguise => "disguise",
            Self::Infection => "infection",
            Self::Declaration => "declaration",
            Self::Impersonation => "impersonation",
            Self::Transformation => "transformation",
            Self::Redirection => "redirection",
            Self::Revival => "revival",
            Self::Elimination => "elimination",
            Self::Skipped => "skipped",
            Self::NoEffect => "no_effect",
        };
        f.write_str(s)
    }
}

/// An immutable record of what a role did during a night.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NightResult {
    /// Outcome category.
    #[serde(rename = "type")]
    pub kind: ResultKind,
    /// Night on which the result was produced.
    pub night_number: u32,
    /// Role whose action produced the result.
    pub role_id: RoleId,
    /// Players who acted.
    pub player_ids: Vec<PlayerId>,
    /// Primary target, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<PlayerId>,
    /// Role-specific details (e.g. `discoveredFaction`, `correct`).
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl NightResult {
    /// Create a result with no actors, target, or data.
    pub fn new(kind: ResultKind, night_number: u32, role_id: impl Into<RoleId>) -> Self {
        Self {
            kind,
            night_number,
            role_id: role_id.into(),
            player_ids: Vec::new(),
            target_id: None,
            data: Map::new(),
        }
    }

    /// Set the acting players.
    pub fn with_players(mut self, players: Vec<PlayerId>) -> Self {
        self.player_ids = players;
        self
    }

    /// Set the primary target.
    pub fn with_target(mut self, target: PlayerId) -> Self {
        self.target_id = Some(target);
        self
    }

    /// Add a data field.
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    /// Look up a data field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Whether this result records an actual use of the power.
    pub fn is_effective(&self) -> bool {
        !matches!(self.kind, ResultKind::Skipped | ResultKind::NoEffect)
    }

    /// Whether a player acted in or was targeted by this result.
    pub fn involves(&self, id: PlayerId) -> bool {
        self.target_id == Some(id) || self.player_ids.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_and_field_lookup() {
        let result = NightResult::new(ResultKind::Investigation, 2, "veggente")
            .with_players(vec![PlayerId(1)])
            .with_target(PlayerId(4))
            .with_field("discoveredFaction", "lupi");
        assert_eq!(result.field("discoveredFaction"), Some(&Value::from("lupi")));
        assert!(result.involves(PlayerId(1)));
        assert!(result.involves(PlayerId(4)));
        assert!(!result.involves(PlayerId(2)));
        assert!(result.is_effective());
    }

    #[test]
    fn skipped_and_no_effect_are_not_effective() {
        assert!(!NightResult::new(ResultKind::Skipped, 1, "lupo").is_effective());
        assert!(!NightResult::new(ResultKind::NoEffect, 1, "lupo").is_effective());
    }

    #[test]
    fn serializes_kind_as_type() {
        let result = NightResult::new(ResultKind::NoEffect, 1, "lupo");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["type"], "no_effect");
        assert_eq!(json["nightNumber"], 1);
        assert!(json.get("targetId").is_none());
    }
}
