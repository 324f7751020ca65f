use std::fmt;

use serde::{Deserialize, Serialize};

/// A faction a role plays for, appears as, or is counted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    /// The village: wins when every living player counts as village.
    Villaggio,
    /// The wolf pack: wins on parity with everyone else.
    Lupi,
    /// The werehamster: survives to steal an otherwise finished game.
    Criceti,
    /// The parasite: wins once every living player is infected.
    Parassita,
    /// The lone wolf: wins when only one other player is left alive.
    Solitario,
}

impl Team {
    /// All teams in declaration order.
    pub const ALL: [Team; 5] = [
        Team::Villaggio,
        Team::Lupi,
        Team::Criceti,
        Team::Parassita,
        Team::Solitario,
    ];

    /// Parse a team from its snake_case name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "villaggio" => Some(Self::Villaggio),
            "lupi" => Some(Self::Lupi),
            "criceti" => Some(Self::Criceti),
            "parassita" => Some(Self::Parassita),
            "solitario" => Some(Self::Solitario),
            _ => None,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Villaggio => write!(f, "villaggio"),
            Self::Lupi => write!(f, "lupi"),
            Self::Criceti => write!(f, "criceti"),
            Self::Parassita => write!(f, "parassita"),
            Self::Solitario => write!(f, "solitario"),
        }
    }
}
