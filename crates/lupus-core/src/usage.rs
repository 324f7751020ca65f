use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::player::{PlayerId, RoleId, UsageLimit};

/// Records every successful use of a role's power: `role -> [player, ...]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageLedger(BTreeMap<RoleId, Vec<PlayerId>>);

impl UsageLedger {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one use of `role` by `player`.
    pub fn record(&mut self, role: RoleId, player: PlayerId) {
        self.0.entry(role).or_default().push(player);
    }

    /// Uses of `role` by `player`.
    pub fn count_for(&self, role: &str, player: PlayerId) -> usize {
        self.0
            .get(role)
            .map(|uses| uses.iter().filter(|p| **p == player).count())
            .unwrap_or(0)
    }

    /// Uses of `role` by anyone.
    pub fn count(&self, role: &str) -> usize {
        self.0.get(role).map(Vec::len).unwrap_or(0)
    }

    /// Whether `player` may use `role` again under `limit`.
    pub fn can_use(&self, role: &str, player: PlayerId, limit: UsageLimit) -> bool {
        limit.allows(self.count_for(role, player))
    }

    /// Every use of `role`, in order.
    pub fn uses(&self, role: &str) -> &[PlayerId] {
        self.0.get(role).map(Vec::as_slice).unwrap_or_default()
    }
}
