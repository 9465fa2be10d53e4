//! Core engine types: identifiers, RNG, configuration, errors, turns,
//! counters, the session aggregate and its actions.
//!
//! Everything here is plain data plus pure transitions. The companion UI
//! owns the current `Session` and swaps it for the one each transition
//! returns.

pub mod action;
pub mod config;
pub mod counters;
pub mod entity;
pub mod error;
pub mod rng;
pub mod state;
pub mod turn;

pub use action::SessionAction;
pub use config::EngineConfig;
pub use counters::{CounterKind, Counters};
pub use entity::{CardId, CommunityId, PinId};
pub use error::{CatalogError, ConfigError, RosterError, SnapshotError};
pub use rng::{GameRng, GameRngState};
pub use state::Session;
pub use turn::{TurnOrder, TurnSlot};
