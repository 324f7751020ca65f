//! House rules persisted with the game.

use serde::{Deserialize, Serialize};

/// Settings that travel with a saved game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSettings {
    /// RNG seed for reproducible role assignment.
    pub seed: u64,
    /// Shuffle roles before assigning them to seats.
    pub shuffle_roles: bool,
    /// Maximum history length (oldest results dropped when exceeded). 0 = unlimited.
    pub max_history: usize,
    /// How many players the parasite may infect in one night.
    pub max_infections_per_night: u32,
    /// Whether the bodyguard may protect the same player two nights running.
    pub guardia_can_repeat_target: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            seed: 42,
            shuffle_roles: true,
            max_history: 0,
            max_infections_per_night: 2,
            guardia_can_repeat_target: false,
        }
    }
}

impl GameSettings {
    /// Set the RNG seed for role assignment.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enable or disable role shuffling.
    pub fn with_shuffle_roles(mut self, shuffle: bool) -> Self {
        self.shuffle_roles = shuffle;
        self
    }

    /// Set the maximum history length (0 = unlimited).
    pub fn with_max_history(mut self, max: usize) -> Self {
        self.max_history = max;
        self
    }

    /// Set how many players the parasite may infect per night (at least 1).
    pub fn with_max_infections_per_night(mut self, max: u32) -> Self {
        self.max_infections_per_night = max.max(1);
        self
    }

    /// Allow the bodyguard to repeat a target on consecutive nights.
    pub fn with_guardia_can_repeat_target(mut self, allowed: bool) -> Self {
        self.guardia_can_repeat_target = allowed;
        self
    }
}
