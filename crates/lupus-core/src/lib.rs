//! Core types for Lupus: players, teams, night ledgers, and the game state.
//!
//! This crate defines the serializable data model the night engine operates
//! on. It knows nothing about individual roles: `lupus-engine` owns the role
//! definitions and is the only crate that drives a night. Everything here can
//! be round-tripped through JSON so a game can be closed and resumed mid-night.

/// Human input collected for a role's night action.
pub mod action;
/// Per-role scratch storage that lives for the whole game.
pub mod custom_data;
/// Error types used throughout the crate.
pub mod error;
/// Static capability mappings used by impersonation roles.
pub mod grouping;
/// Append-only log of resolved night results.
pub mod history;
/// Per-night accumulators: pending kills, checks, saves, revivals.
pub mod ledger;
/// Player identity, role assignment, and per-player capability state.
pub mod player;
/// Query builder for filtering players.
pub mod query;
/// Immutable records of what a role did.
pub mod result;
/// House rules persisted with the game.
pub mod settings;
/// The shared game state threaded through every engine call.
pub mod state;
/// Factions and their display names.
pub mod team;
/// Ledger of successful power uses.
pub mod usage;

/// Re-export action types.
pub use action::Action;
/// Re-export custom data store.
pub use custom_data::CustomData;
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export grouping types.
pub use grouping::{Grouping, GroupingTable};
/// Re-export history log.
pub use history::History;
/// Re-export ledger types.
pub use ledger::{Check, KillEntry, NightContext, Save};
/// Re-export player types.
pub use player::{ActsAtNight, Player, PlayerId, RoleId, RoleState, UsageLimit};
/// Re-export the player query builder.
pub use query::PlayerQuery;
/// Re-export result types.
pub use result::{NightResult, ResultKind};
/// Re-export settings.
pub use settings::GameSettings;
/// Re-export the game state.
pub use state::{Commit, GameId, GameState, Phase};
/// Re-export team type.
pub use team::Team;
/// Re-export usage ledger.
pub use usage::UsageLedger;
