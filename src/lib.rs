//! # society-deck
//!
//! Rules engine for a digital companion to a card-driven survival and
//! society board game.
//!
//! ## Design Principles
//!
//! 1. **State by Replacement**: Every transition borrows the current state
//!    and returns a new one. Nothing is global and nothing is mutated in
//!    place, so the UI can keep, compare or discard states freely.
//!
//! 2. **Physical Copies Are Conserved**: A deck always accounts for every
//!    copy of every card. Copies move between the pool, the revealed row,
//!    the discard pile, the drawn display and the pin registry; they are
//!    never created or lost.
//!
//! 3. **Closed Vocabularies**: Decks, trait effects and turn slots are
//!    enums. Trait names in deck files are resolved once at load time.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im` for pools,
//!   rosters and ledgers.
//!
//! - **Caller-Owned Randomness**: Every random choice draws from a
//!   `GameRng` passed by `&mut`, so a seed replays a whole game.
//!
//! ## Modules
//!
//! - `core`: Identifiers, RNG, configuration, errors, turns, session
//! - `cards`: Card definitions, pooled and pinned copies, catalog
//! - `decks`: Draw and reveal deck state machines
//! - `pins`: Pinned cards and their assignments
//! - `effects`: Trait-derived costs, waivers and dice
//! - `ledger`: Player and community resources
//! - `snapshot`: Versioned export and import

pub mod cards;
pub mod core;
pub mod decks;
pub mod effects;
pub mod ledger;
pub mod pins;
pub mod snapshot;

// Re-export commonly used types
pub use crate::core::{
    CardId, CommunityId, PinId,
    GameRng, GameRngState,
    EngineConfig,
    CounterKind, Counters,
    TurnOrder, TurnSlot,
    Session, SessionAction,
    CatalogError, ConfigError, RosterError, SnapshotError,
};

pub use crate::cards::{
    CardCatalog, CardDefinition, CardPool, CardTone, PinnedCard, PooledCard, TraitEffect,
};

pub use crate::decks::{DeckId, DeckKind, DeckState, DrawDeck, RevealDeck};

pub use crate::pins::{AssignmentLedger, PinRegistry};

pub use crate::effects::{roll_die, DiceRoll, RollKind, RollModifiers, TraitEffectResolver};

pub use crate::ledger::{Community, JoinTerms, Player, ResourceLedger, UpkeepOutcome};

pub use crate::snapshot::SessionSnapshot;
