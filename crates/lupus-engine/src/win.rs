//! Win condition evaluation.

use std::collections::BTreeSet;

use lupus_core::{GameState, Team};
use serde::{Deserialize, Serialize};

use crate::access::RoleView;
use crate::registry::Registry;
use crate::role::RoleDefinition;

/// Whether the game has ended and who won. Several teams means a tie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    /// The game is over.
    pub ended: bool,
    /// Winning teams in declaration order.
    pub teams: Vec<Team>,
}

impl Winner {
    fn from_teams(teams: BTreeSet<Team>) -> Self {
        Self {
            ended: !teams.is_empty(),
            teams: teams.into_iter().collect(),
        }
    }
}

/// Evaluate every represented role's win predicate.
///
/// A role is represented when at least one player holds it, alive or dead.
/// If any represented role's constraint holds, only the constraining roles'
/// predicates are consulted; the generic faction wins are suspended for this
/// evaluation.
pub fn evaluate(state: &GameState, registry: &Registry) -> Winner {
    let represented: Vec<&RoleDefinition> = registry
        .iter()
        .filter(|def| !state.players_with_role(def.id).is_empty())
        .collect();

    let constraining: Vec<&RoleDefinition> = represented
        .iter()
        .copied()
        .filter(|def| {
            def.check_win_constraint
                .is_some_and(|constraint| constraint(&RoleView::new(state, registry, def.id)))
        })
        .collect();

    let candidates = if constraining.is_empty() {
        represented
    } else {
        constraining
    };

    let teams: BTreeSet<Team> = candidates
        .into_iter()
        .filter(|def| {
            def.check_win
                .is_some_and(|check| check(&RoleView::new(state, registry, def.id)))
        })
        .map(|def| def.team)
        .collect();

    Winner::from_teams(teams)
}
