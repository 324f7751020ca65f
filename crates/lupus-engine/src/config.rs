/// Per-engine behaviour switches. Unlike `GameSettings` these are not saved
/// with the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Treat setup warnings as errors.
    pub strict_setup: bool,
    /// Record a no-effect result for required roles that never acted.
    pub enforce_required_actions: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strict_setup: false,
            enforce_required_actions: true,
        }
    }
}

impl EngineConfig {
    /// Treat setup warnings as errors.
    pub fn with_strict_setup(mut self, strict: bool) -> Self {
        self.strict_setup = strict;
        self
    }

    /// Record missing required actions in the history.
    pub fn with_enforce_required_actions(mut self, enforce: bool) -> Self {
        self.enforce_required_actions = enforce;
        self
    }
}
