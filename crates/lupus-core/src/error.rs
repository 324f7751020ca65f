use crate::player::PlayerId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when building or loading a game state.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested player ID does not exist in the game.
    #[error("player not found: {0}")]
    PlayerNotFound(PlayerId),

    /// A player with the same name already sits at the table.
    #[error("player already exists: \"{0}\"")]
    DuplicateName(String),

    /// A player with the same ID already sits at the table.
    #[error("duplicate player id: {0}")]
    DuplicatePlayerId(PlayerId),

    /// The game state could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
