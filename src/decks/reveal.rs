//! Reveal decks: reveal up to three cards, then choose among them.
//!
//! ```text
//!            reveal                       select / pin (refills one slot)
//!   Empty ───────────▶ Active (1..=3) ◀──────────────────────────────┐
//!     ▲                  │  │                                        │
//!     │                  │  └────────────────────────────────────────┘
//!     │   reveal: discard all revealed, reveal fresh
//!     └────────────── shuffle ─────────────────┘
//! ```
//!
//! Consuming a revealed card (selecting or pinning it) pulls one
//! replacement from the pool whenever the pool has cards left. When it is
//! empty the revealed row simply shrinks; consumption is never blocked.
//!
//! Stale references (a card id that is no longer revealed) leave the deck
//! unchanged.

use super::state::DeckState;
use crate::cards::{CardDefinition, CardPool, PinnedCard, PooledCard};
use crate::core::entity::CardId;
use crate::core::rng::GameRng;

/// Where a reveal deck is in its cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealPhase {
    /// Nothing face up.
    Empty,
    /// At least one card face up.
    Active,
}

/// Reveal-deck transitions.
///
/// ## Example
///
/// ```
/// use society_deck::cards::CardDefinition;
/// use society_deck::core::GameRng;
/// use society_deck::decks::{DeckState, RevealDeck, RevealPhase};
///
/// let defs = vec![CardDefinition::new("a", "Alpha", 3)];
/// let deck = RevealDeck::default();
/// let mut rng = GameRng::new(1);
///
/// let state = deck.reveal(&DeckState::new(&defs), &mut rng);
/// assert_eq!(RevealDeck::phase(&state), RevealPhase::Active);
/// assert_eq!(state.revealed_cards.len(), 3);
///
/// let state = deck.select_card(&state, &"a".into(), &mut rng);
/// assert_eq!(state.revealed_cards.len(), 2);
/// assert_eq!(state.discarded_cards.len(), 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealDeck {
    slots: usize,
}

impl Default for RevealDeck {
    fn default() -> Self {
        Self { slots: 3 }
    }
}

impl RevealDeck {
    /// A reveal deck with `slots` face-up positions.
    #[must_use]
    pub fn new(slots: usize) -> Self {
        Self { slots }
    }

    /// Number of face-up positions.
    #[must_use]
    pub fn slots(&self) -> usize {
        self.slots
    }

    /// Current phase.
    #[must_use]
    pub fn phase(state: &DeckState) -> RevealPhase {
        if state.has_revealed() {
            RevealPhase::Active
        } else {
            RevealPhase::Empty
        }
    }

    /// Reveal a fresh row.
    ///
    /// If cards are already face up they are discarded first. Revealed
    /// cards left the pool when they were revealed, so the pool is not
    /// touched by the discard.
    #[must_use]
    pub fn reveal(&self, state: &DeckState, rng: &mut GameRng) -> DeckState {
        let cleared = Self::discard_revealed(state);
        let sample = CardPool::sample_without_replacement(&cleared.available_cards, self.slots, rng);

        let mut next = cleared;
        next.revealed_cards = sample.selected.into_iter().collect();
        next.available_cards = sample.remaining;

        tracing::trace!(
            target: "society_deck::decks",
            revealed = next.revealed_cards.len(),
            remaining = next.available_cards.len(),
            "reveal_deck.reveal"
        );
        next
    }

    /// Move every face-up card to the discard pile.
    #[must_use]
    pub fn discard_revealed(state: &DeckState) -> DeckState {
        let mut next = state.clone();
        next.discarded_cards.extend(next.revealed_cards.drain(..));
        next
    }

    /// Choose a revealed card: it goes to the discard pile and one slot is
    /// refilled.
    #[must_use]
    pub fn select_card(&self, state: &DeckState, card: &CardId, rng: &mut GameRng) -> DeckState {
        match self.take_revealed(state, card, rng) {
            Some((mut next, taken)) => {
                next.discarded_cards.push_back(taken);
                next
            }
            None => state.clone(),
        }
    }

    /// Pin a revealed card: it leaves the deck and one slot is refilled.
    ///
    /// The returned card is registered with the pin registry by the
    /// caller. It is not added to the discard pile.
    #[must_use]
    pub fn pin_card(
        &self,
        state: &DeckState,
        card: &CardId,
        rng: &mut GameRng,
    ) -> (DeckState, Option<PooledCard>) {
        match self.take_revealed(state, card, rng) {
            Some((next, taken)) => (next, Some(taken)),
            None => (state.clone(), None),
        }
    }

    /// Return a pinned card to the discard pile. It re-enters the pool on
    /// the next shuffle.
    #[must_use]
    pub fn unpin(state: &DeckState, pinned: &PinnedCard) -> DeckState {
        let mut next = state.clone();
        next.discarded_cards.push_back(pinned.card.clone());
        next
    }

    /// Rebuild the pool from definitions, leaving out pinned copies and
    /// reusing discarded ones. Face-up, discarded and drawn cards are
    /// cleared.
    #[must_use]
    pub fn shuffle<'a>(
        state: &DeckState,
        definitions: &[CardDefinition],
        pinned: impl IntoIterator<Item = &'a PinnedCard>,
    ) -> DeckState {
        let available = CardPool::rebuild_excluding(
            definitions,
            pinned.into_iter().map(|pin| &pin.card),
            &state.discarded_cards,
        );

        tracing::debug!(
            target: "society_deck::decks",
            available = available.len(),
            "reveal_deck.shuffle"
        );
        DeckState {
            available_cards: available,
            ..DeckState::default()
        }
    }

    /// Remove the first revealed copy of `card` and refill one slot.
    fn take_revealed(
        &self,
        state: &DeckState,
        card: &CardId,
        rng: &mut GameRng,
    ) -> Option<(DeckState, PooledCard)> {
        let index = state.revealed_cards.iter().position(|c| c.id() == card)?;

        let mut next = state.clone();
        let taken = next.revealed_cards.remove(index);

        if next.revealed_cards.len() < self.slots && !next.available_cards.is_empty() {
            let sample = CardPool::sample_without_replacement(&next.available_cards, 1, rng);
            next.revealed_cards.extend(sample.selected);
            next.available_cards = sample.remaining;
        }

        Some((next, taken))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::PinId;
    use crate::decks::DeckId;

    fn defs() -> Vec<CardDefinition> {
        vec![
            CardDefinition::new("a", "Alpha", 3),
            CardDefinition::new("b", "Beta", 2),
            CardDefinition::new("c", "Gamma", 2),
        ]
    }

    fn pin(card: PooledCard, serial: u64) -> PinnedCard {
        PinnedCard {
            card,
            deck: DeckId::IndividualTraits,
            pin_id: PinId::new(serial),
        }
    }

    #[test]
    fn test_reveal_from_empty() {
        let mut rng = GameRng::new(5);
        let deck = RevealDeck::default();
        let state = deck.reveal(&DeckState::new(&defs()), &mut rng);

        assert_eq!(state.revealed_cards.len(), 3);
        assert_eq!(state.available_len(), 4);
        assert!(state.discarded_cards.is_empty());
    }

    #[test]
    fn test_reveal_when_active_discards_first() {
        let mut rng = GameRng::new(5);
        let deck = RevealDeck::default();
        let first = deck.reveal(&DeckState::new(&defs()), &mut rng);
        let second = deck.reveal(&first, &mut rng);

        assert_eq!(second.discarded_cards.len(), 3);
        assert_eq!(second.revealed_cards.len(), 3);
        assert_eq!(second.available_len(), 1);
        for def in defs() {
            assert_eq!(second.copies_of(&def.id), def.quantity as usize);
        }
    }

    #[test]
    fn test_reveal_with_short_pool() {
        let mut rng = GameRng::new(5);
        let deck = RevealDeck::default();
        let state = deck.reveal(&DeckState::new(&[CardDefinition::new("a", "Alpha", 2)]), &mut rng);
        assert_eq!(state.revealed_cards.len(), 2);
        assert_eq!(state.available_len(), 0);

        let empty = deck.reveal(&DeckState::default(), &mut rng);
        assert_eq!(RevealDeck::phase(&empty), RevealPhase::Empty);
    }

    #[test]
    fn test_select_refills() {
        let mut rng = GameRng::new(5);
        let deck = RevealDeck::default();
        let state = deck.reveal(&DeckState::new(&defs()), &mut rng);
        let chosen = state.revealed_cards[0].id().clone();

        let next = deck.select_card(&state, &chosen, &mut rng);
        assert_eq!(next.revealed_cards.len(), 3);
        assert_eq!(next.discarded_cards.len(), 1);
        assert_eq!(next.discarded_cards[0].id(), &chosen);
        assert_eq!(next.available_len(), 3);
    }

    #[test]
    fn test_select_single_definition_scenario() {
        let mut rng = GameRng::new(5);
        let deck = RevealDeck::default();
        let state = deck.reveal(&DeckState::new(&[CardDefinition::new("a", "Alpha", 3)]), &mut rng);
        assert_eq!(state.revealed_cards.len(), 3);
        assert!(state.available_cards.is_empty());

        let next = deck.select_card(&state, &CardId::new("a"), &mut rng);
        assert_eq!(next.revealed_cards.len(), 2);
        assert_eq!(next.discarded_cards.len(), 1);
        assert!(next.available_cards.is_empty());
    }

    #[test]
    fn test_select_stale_card_is_noop() {
        let mut rng = GameRng::new(5);
        let deck = RevealDeck::default();
        let state = deck.reveal(&DeckState::new(&defs()), &mut rng);

        let next = deck.select_card(&state, &CardId::new("missing"), &mut rng);
        assert_eq!(next, state);
    }

    #[test]
    fn test_pin_refills_without_discarding() {
        let mut rng = GameRng::new(5);
        let deck = RevealDeck::default();
        let state = deck.reveal(&DeckState::new(&defs()), &mut rng);
        let chosen = state.revealed_cards[1].id().clone();

        let (next, pinned) = deck.pin_card(&state, &chosen, &mut rng);
        let pinned = pinned.unwrap();
        assert_eq!(pinned.id(), &chosen);
        assert_eq!(next.revealed_cards.len(), 3);
        assert!(next.discarded_cards.is_empty());
        assert_eq!(next.total_cards(), 6);

        let (same, none) = deck.pin_card(&next, &CardId::new("missing"), &mut rng);
        assert!(none.is_none());
        assert_eq!(same, next);
    }

    #[test]
    fn test_unpin_goes_to_discard() {
        let card = PooledCard::from(&defs()[0]);
        let state = RevealDeck::unpin(&DeckState::default(), &pin(card.clone(), 1));
        assert_eq!(state.discarded_cards.len(), 1);
        assert_eq!(state.discarded_cards[0], card);
        assert!(state.available_cards.is_empty());
    }

    #[test]
    fn test_shuffle_excludes_pinned_and_clears() {
        let mut rng = GameRng::new(5);
        let definitions = defs();
        let deck = RevealDeck::default();
        let state = deck.reveal(&DeckState::new(&definitions), &mut rng);
        let chosen = state.revealed_cards[0].id().clone();
        let (state, pinned) = deck.pin_card(&state, &chosen, &mut rng);
        let pins = vec![pin(pinned.unwrap(), 1)];
        let state = deck.reveal(&state, &mut rng);

        let shuffled = RevealDeck::shuffle(&state, &definitions, &pins);
        assert_eq!(RevealDeck::phase(&shuffled), RevealPhase::Empty);
        assert!(shuffled.discarded_cards.is_empty());
        assert!(shuffled.drawn_card.is_none());
        for def in &definitions {
            let pinned = usize::from(def.id == chosen);
            assert_eq!(
                CardPool::count(&shuffled.available_cards, &def.id),
                def.quantity as usize - pinned
            );
        }
    }

    #[test]
    fn test_custom_slot_count() {
        let mut rng = GameRng::new(5);
        let deck = RevealDeck::new(5);
        let state = deck.reveal(&DeckState::new(&defs()), &mut rng);
        assert_eq!(deck.slots(), 5);
        assert_eq!(state.revealed_cards.len(), 5);
    }
}
