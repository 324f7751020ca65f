//! Per-night accumulators.
//!
//! A [`NightContext`] is opened when a night begins and dropped once the
//! scheduler has committed it. Pending kills are a set of tagged reasons per
//! target, not a counter: two wolves attacking the same player still kill once,
//! and an immunity can strip one tag while leaving the others in place.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::player::{PlayerId, RoleId};

/// One reason a player is due to die tonight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KillEntry {
    /// Role the kill is attributed to.
    pub role: RoleId,
    /// Optional free-form reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl KillEntry {
    /// A kill attributed to `role` with no reason.
    pub fn new(role: impl Into<RoleId>) -> Self {
        Self {
            role: role.into(),
            reason: None,
        }
    }

    /// Attach a reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// An investigation performed tonight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Check {
    /// Investigating role.
    pub role: RoleId,
    /// Investigating player.
    pub actor: PlayerId,
    /// Investigated player.
    pub target: PlayerId,
    /// What the investigation revealed.
    pub outcome: Value,
}

/// A protection placed on a player tonight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Save {
    /// Protecting role.
    pub role: RoleId,
    /// Protected player.
    pub target: PlayerId,
    /// Kill tags this save cancels. Empty cancels every tag.
    #[serde(default)]
    pub from_roles: Vec<RoleId>,
}

impl Save {
    /// Whether the save cancels kills carrying the given tag.
    pub fn covers(&self, role: &RoleId) -> bool {
        self.from_roles.is_empty() || self.from_roles.contains(role)
    }
}

/// The per-night scratch structure owned by the scheduler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NightContext {
    #[serde(default)]
    pending_kills: BTreeMap<PlayerId, Vec<KillEntry>>,
    #[serde(default)]
    checks: Vec<Check>,
    #[serde(default)]
    saves: Vec<Save>,
    #[serde(default)]
    revivals: Vec<PlayerId>,
    #[serde(default)]
    acted_roles: BTreeSet<RoleId>,
}

impl NightContext {
    /// An empty context.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Pending kills
    // -----------------------------------------------------------------------

    /// Queue a kill on `target`.
    pub fn add_kill(&mut self, target: PlayerId, entry: KillEntry) {
        self.pending_kills.entry(target).or_default().push(entry);
    }

    /// Remove every entry on `target` tagged with `role`. Other entries keep
    /// their order. Returns the number of entries removed.
    pub fn remove_kills(&mut self, target: PlayerId, role: &str) -> usize {
        self.drain_kills(target, role).len()
    }

    /// Remove and return every entry on `target` tagged with `role`, in the
    /// order they were queued.
    pub fn drain_kills(&mut self, target: PlayerId, role: &str) -> Vec<KillEntry> {
        let Some(entries) = self.pending_kills.get_mut(&target) else {
            return Vec::new();
        };
        let (drained, kept): (Vec<_>, Vec<_>) =
            entries.drain(..).partition(|e| e.role == role);
        *entries = kept;
        if entries.is_empty() {
            self.pending_kills.remove(&target);
        }
        drained
    }

    /// Remove and return every entry on `target`.
    pub fn take_kills(&mut self, target: PlayerId) -> Vec<KillEntry> {
        self.pending_kills.remove(&target).unwrap_or_default()
    }

    /// The entries currently queued on `target`.
    pub fn kills_for(&self, target: PlayerId) -> &[KillEntry] {
        self.pending_kills
            .get(&target)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether `target` has at least one queued kill.
    pub fn has_kills(&self, target: PlayerId) -> bool {
        !self.kills_for(target).is_empty()
    }

    /// All targets with queued kills, in id order.
    pub fn pending_targets(&self) -> Vec<PlayerId> {
        self.pending_kills
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(id, _)| *id)
            .collect()
    }

    /// The full kill ledger.
    pub fn pending_kills(&self) -> &BTreeMap<PlayerId, Vec<KillEntry>> {
        &self.pending_kills
    }

    // -----------------------------------------------------------------------
    // Checks, saves, revivals
    // -----------------------------------------------------------------------

    /// Record an investigation.
    pub fn add_check(&mut self, check: Check) {
        self.checks.push(check);
    }

    /// All investigations so far tonight.
    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// Record a protection.
    pub fn add_save(&mut self, save: Save) {
        self.saves.push(save);
    }

    /// All protections so far tonight.
    pub fn saves(&self) -> &[Save] {
        &self.saves
    }

    /// Apply every recorded save to the kill ledger. Returns the number of
    /// kill entries cancelled.
    pub fn apply_saves(&mut self) -> usize {
        let mut cancelled = 0;
        for save in &self.saves {
            let Some(entries) = self.pending_kills.get_mut(&save.target) else {
                continue;
            };
            let before = entries.len();
            entries.retain(|e| !save.covers(&e.role));
            cancelled += before - entries.len();
        }
        self.pending_kills.retain(|_, entries| !entries.is_empty());
        cancelled
    }

    /// Queue a dead player to return. Duplicates are ignored.
    pub fn add_revival(&mut self, target: PlayerId) {
        if !self.revivals.contains(&target) {
            self.revivals.push(target);
        }
    }

    /// Players queued to return.
    pub fn revivals(&self) -> &[PlayerId] {
        &self.revivals
    }

    // -----------------------------------------------------------------------
    // Scheduler bookkeeping
    // -----------------------------------------------------------------------

    /// Mark a role as having taken its turn.
    pub fn mark_acted(&mut self, role: RoleId) {
        self.acted_roles.insert(role);
    }

    /// Whether a role already took its turn tonight.
    pub fn has_acted(&self, role: &str) -> bool {
        self.acted_roles.contains(role)
    }

    /// Whether nothing has been queued tonight.
    pub fn is_empty(&self) -> bool {
        self.pending_kills.is_empty()
            && self.checks.is_empty()
            && self.saves.is_empty()
            && self.revivals.is_empty()
    }
}
