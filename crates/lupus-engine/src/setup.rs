//! Setup validation.
//!
//! Checks a proposed role list before any player is seated. Problems that
//! make the game unplayable are errors; odd but legal tables are warnings.

use std::collections::BTreeMap;

use lupus_core::{RoleId, Team};

use crate::registry::Registry;

/// Smallest table the engine will run.
pub const MIN_PLAYERS: usize = 3;

/// A warning or error found while validating a setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupIssue {
    /// The role the issue concerns, or `"setup"` for table-wide issues.
    pub role: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl SetupIssue {
    fn error(role: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            message: message.into(),
            is_error: true,
        }
    }

    fn warning(role: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            message: message.into(),
            is_error: false,
        }
    }
}

impl std::fmt::Display for SetupIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.role, self.message)
    }
}

/// Validate a role list, one entry per seat.
pub fn validate_setup(registry: &Registry, roles: &[RoleId]) -> Vec<SetupIssue> {
    let mut issues = Vec::new();
    let players = roles.len();

    if players < MIN_PLAYERS {
        issues.push(SetupIssue::error(
            "setup",
            format!("at least {MIN_PLAYERS} players are needed, got {players}"),
        ));
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for role in roles {
        *counts.entry(role.as_str()).or_default() += 1;
    }

    for (&role, &count) in &counts {
        let Some(def) = registry.get(role) else {
            issues.push(SetupIssue::error(role, "unknown role"));
            continue;
        };
        if count < def.min_count {
            issues.push(SetupIssue::error(
                role,
                format!("needs at least {} copies, got {count}", def.min_count),
            ));
        }
        if let Some(max) = def.max_count.filter(|&max| count > max) {
            issues.push(SetupIssue::error(
                role,
                format!("allows at most {max} copies, got {count}"),
            ));
        }
        for required in def.requires {
            if !counts.contains_key(required) {
                issues.push(SetupIssue::error(
                    role,
                    format!("cannot be played without {required}"),
                ));
            }
        }
        if players < def.min_players {
            issues.push(SetupIssue::error(
                role,
                format!("needs a table of at least {}", def.min_players),
            ));
        }
    }

    let hostile = roles
        .iter()
        .filter_map(|r| registry.get(r.as_str()))
        .any(|def| def.team != Team::Villaggio);
    if !hostile && players > 0 {
        issues.push(SetupIssue::warning(
            "setup",
            "no role plays against the village; the game ends immediately",
        ));
    }

    issues
}

/// Whether any issue is an error.
pub fn has_errors(issues: &[SetupIssue]) -> bool {
    issues.iter().any(|i| i.is_error)
}
