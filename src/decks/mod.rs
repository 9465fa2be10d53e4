//! Deck system: identity, piles, and the two deck state machines.
//!
//! ## Key Types
//!
//! - `DeckId`: Closed set of the game's decks
//! - `DeckState`: The piles of one deck (available, revealed, discarded, drawn)
//! - `DrawDeck`: Single-draw transitions
//! - `RevealDeck`: Reveal-and-choose transitions
//!
//! All transitions take a `&DeckState` and return a new one; the caller
//! decides which state to keep.

pub mod deck_id;
pub mod draw;
pub mod reveal;
pub mod state;

pub use deck_id::{DeckId, DeckKind};
pub use draw::{DrawDeck, DrawPhase};
pub use reveal::{RevealDeck, RevealPhase};
pub use state::{DeckState, RevealedCards};
