//! Deck state: the piles a deck's cards can sit in.
//!
//! Every copy of a deck's cards is in exactly one place:
//! - `available_cards`: the pool, face down
//! - `revealed_cards`: face up, waiting to be chosen (reveal decks)
//! - `discarded_cards`: used this cycle, back in on the next shuffle
//! - `drawn_card`: the card on display (draw decks)
//! - pinned: outside the deck, tracked by the pin registry
//!
//! For every definition `d`, the copies in those places add up to
//! `d.quantity`. `circulating_copies` computes the deck-side part of that
//! sum so callers and tests can check it.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardDefinition, CardPool, PooledCard};
use crate::core::entity::CardId;

/// Face-up cards of a reveal deck; three slots in the standard game.
pub type RevealedCards = SmallVec<[PooledCard; 3]>;

/// The piles of one deck.
///
/// Cloning is cheap: the two large piles are persistent vectors.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckState {
    pub available_cards: Vector<PooledCard>,
    pub revealed_cards: RevealedCards,
    pub discarded_cards: Vector<PooledCard>,
    pub drawn_card: Option<PooledCard>,
}

impl DeckState {
    /// A freshly filled deck with every copy available.
    #[must_use]
    pub fn new(definitions: &[CardDefinition]) -> Self {
        Self {
            available_cards: CardPool::initialize(definitions),
            ..Self::default()
        }
    }

    /// Copies of `id` held by the deck in any pile.
    #[must_use]
    pub fn copies_of(&self, id: &CardId) -> usize {
        CardPool::count(&self.available_cards, id)
            + CardPool::count(&self.revealed_cards, id)
            + CardPool::count(&self.discarded_cards, id)
            + usize::from(self.drawn_card.as_ref().is_some_and(|card| card.id() == id))
    }

    /// Copies of `id` in circulation, counting `pinned` copies held outside
    /// the deck. Equals the definition's quantity when the deck is sound.
    #[must_use]
    pub fn circulating_copies(&self, id: &CardId, pinned: usize) -> usize {
        self.copies_of(id) + pinned
    }

    /// Cards held by the deck across all piles.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.available_cards.len()
            + self.revealed_cards.len()
            + self.discarded_cards.len()
            + usize::from(self.drawn_card.is_some())
    }

    /// Cards left to draw or reveal.
    #[must_use]
    pub fn available_len(&self) -> usize {
        self.available_cards.len()
    }

    /// Whether any card is face up.
    #[must_use]
    pub fn has_revealed(&self) -> bool {
        !self.revealed_cards.is_empty()
    }
}
