use lupus_core::{CoreError, PlayerId};

use crate::setup::SetupIssue;

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors returned by the night engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A role id that is not registered.
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// The role deck failed validation.
    #[error("invalid setup: {}", format_issues(.0))]
    InvalidSetup(Vec<SetupIssue>),

    /// Names and roles differ in length.
    #[error("{players} players but {roles} roles")]
    PlayerCountMismatch {
        /// Players seated.
        players: usize,
        /// Roles dealt.
        roles: usize,
    },

    /// A night operation was called outside the night.
    #[error("no night in progress")]
    NoNightInProgress,

    /// A night is already open.
    #[error("night {0} is still in progress")]
    NightInProgress(u32),

    /// A winner has been declared.
    #[error("the game is over")]
    GameOver,

    /// No player with this id.
    #[error("player not found: {0}")]
    PlayerNotFound(PlayerId),

    /// The player is already dead.
    #[error("player {0} is already dead")]
    PlayerDead(PlayerId),

    /// An error from the game state.
    #[error(transparent)]
    Core(#[from] CoreError),
}

fn format_issues(issues: &[SetupIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
