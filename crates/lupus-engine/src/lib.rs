//! Night resolution engine for Lupus.
//!
//! Roles are plain data: a [`RoleDefinition`] carries identity, scheduling
//! metadata, and optional hook functions. The [`Engine`] orders roles by
//! phase, collects actions, runs passive immunities, commits the night's
//! kills, and evaluates every represented role's win predicate. Role hooks
//! only ever see the game through [`RoleAccess`] and [`RoleView`].

/// The capability facade handed to role hooks.
pub mod access;
/// Engine options.
pub mod config;
/// The night phase scheduler.
pub mod engine;
/// Error types for the engine.
pub mod error;
/// Lookup and ordering of role definitions.
pub mod registry;
/// The role definition record and its hook signatures.
pub mod role;
/// The standard Lupus role set.
pub mod roles;
/// Validation of a role deck before dealing.
pub mod setup;
/// Win condition evaluation.
pub mod win;

/// Re-export the role facade.
pub use access::{RoleAccess, RoleView};
/// Re-export engine options.
pub use config::EngineConfig;
/// Re-export the scheduler and its reports.
pub use engine::{EligibleRole, Engine, NightReport, VOTE, VoteOutcome};
/// Re-export error types.
pub use error::{EngineError, EngineResult};
/// Re-export the registry.
pub use registry::Registry;
/// Re-export role definition types.
pub use role::{
    EffectType, PassiveFn, PhaseOrder, ResolveFn, RestoreFn, RoleDefinition, RoleTrait, WinFn,
};
/// Re-export setup validation.
pub use setup::{MIN_PLAYERS, SetupIssue, has_errors, validate_setup};
/// Re-export win evaluation.
pub use win::{Winner, evaluate};
