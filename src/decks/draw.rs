//! Draw decks: one card at a time.
//!
//! ```text
//! Idle ──draw──▶ Drawn ──draw──▶ Drawn
//!   ▲                              │
//!   └──────────── shuffle ─────────┘
//! ```
//!
//! Drawing from an empty pool is not an error; the deck is returned as is
//! and the UI simply disables the button.

use super::state::DeckState;
use crate::cards::{CardDefinition, CardPool};
use crate::core::rng::GameRng;

/// Where a draw deck is in its cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawPhase {
    /// No card on display.
    Idle,
    /// A card is on display.
    Drawn,
}

/// Draw-deck transitions.
pub struct DrawDeck;

impl DrawDeck {
    /// Current phase.
    #[must_use]
    pub fn phase(state: &DeckState) -> DrawPhase {
        if state.drawn_card.is_some() {
            DrawPhase::Drawn
        } else {
            DrawPhase::Idle
        }
    }

    /// Draw one random card onto the display.
    ///
    /// The previously displayed card has already been played; it moves to
    /// the discard pile so the deck still accounts for every copy.
    #[must_use]
    pub fn draw(state: &DeckState, rng: &mut GameRng) -> DeckState {
        if state.available_cards.is_empty() {
            return state.clone();
        }

        let sample = CardPool::sample_without_replacement(&state.available_cards, 1, rng);
        let mut next = state.clone();
        if let Some(previous) = next.drawn_card.take() {
            next.discarded_cards.push_back(previous);
        }
        next.drawn_card = sample.selected.head().cloned();
        next.available_cards = sample.remaining;

        tracing::trace!(
            target: "society_deck::decks",
            card = ?next.drawn_card.as_ref().map(|card| card.id().clone()),
            remaining = next.available_cards.len(),
            "draw_deck.draw"
        );
        next
    }

    /// Hard reset: every copy back in the pool, display and piles cleared.
    #[must_use]
    pub fn shuffle(definitions: &[CardDefinition]) -> DeckState {
        DeckState::new(definitions)
    }
}
