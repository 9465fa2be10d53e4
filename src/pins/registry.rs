//! Pin registry: cards taken out of circulation.
//!
//! Pinned cards live outside every deck until they are unpinned. The
//! registry hands out a fresh `PinId` for every pin event, so two copies of
//! the same definition pinned from the same deck are tracked separately.

use im::Vector;

use crate::cards::{PinnedCard, PooledCard};
use crate::core::entity::{CardId, PinId};
use crate::decks::DeckId;

/// Every currently pinned card, across all decks.
///
/// ## Example
///
/// ```
/// use society_deck::cards::{CardDefinition, PooledCard};
/// use society_deck::decks::DeckId;
/// use society_deck::pins::PinRegistry;
///
/// let card = PooledCard::new(CardDefinition::new("lucky", "Lucky", 2));
/// let registry = PinRegistry::new();
///
/// let (registry, first) = registry.add(card.clone(), DeckId::IndividualTraits);
/// let (registry, second) = registry.add(card, DeckId::IndividualTraits);
///
/// assert_ne!(first.pin_id, second.pin_id);
/// assert_eq!(registry.filter_by_deck(DeckId::IndividualTraits).count(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PinRegistry {
    pins: Vector<PinnedCard>,
    next_serial: u64,
}

impl PinRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a registry from persisted parts.
    ///
    /// The serial is bumped past every restored pin so new pins can never
    /// collide with old ones.
    #[must_use]
    pub fn from_parts(pins: Vector<PinnedCard>, next_serial: u64) -> Self {
        let floor = pins.iter().map(|pin| pin.pin_id.raw() + 1).max().unwrap_or(0);
        Self {
            pins,
            next_serial: next_serial.max(floor),
        }
    }

    /// Pin a card taken from `deck`.
    #[must_use]
    pub fn add(&self, card: PooledCard, deck: DeckId) -> (Self, PinnedCard) {
        let pinned = PinnedCard {
            card,
            deck,
            pin_id: PinId::new(self.next_serial),
        };

        let mut next = self.clone();
        next.next_serial += 1;
        next.pins.push_back(pinned.clone());

        tracing::debug!(
            target: "society_deck::pins",
            pin = %pinned.pin_id,
            card = %pinned.card_id(),
            deck = %deck,
            "pin_registry.add"
        );
        (next, pinned)
    }

    /// Unpin a card. Unknown ids leave the registry unchanged.
    #[must_use]
    pub fn remove(&self, pin_id: PinId) -> (Self, Option<PinnedCard>) {
        let Some(index) = self.pins.iter().position(|pin| pin.pin_id == pin_id) else {
            return (self.clone(), None);
        };

        let mut next = self.clone();
        let removed = next.pins.remove(index);
        (next, Some(removed))
    }

    /// Look up a pinned card.
    #[must_use]
    pub fn get(&self, pin_id: PinId) -> Option<&PinnedCard> {
        self.pins.iter().find(|pin| pin.pin_id == pin_id)
    }

    /// Pinned cards that came from `deck`.
    pub fn filter_by_deck(&self, deck: DeckId) -> impl Iterator<Item = &PinnedCard> {
        self.pins.iter().filter(move |pin| pin.deck == deck)
    }

    /// The cards pinned from `deck`, without their pin metadata.
    pub fn pooled_for_deck(&self, deck: DeckId) -> impl Iterator<Item = &PooledCard> {
        self.filter_by_deck(deck).map(|pin| &pin.card)
    }

    /// Pinned copies of one definition from one deck.
    #[must_use]
    pub fn count_for(&self, deck: DeckId, id: &CardId) -> usize {
        self.filter_by_deck(deck).filter(|pin| pin.card_id() == id).count()
    }

    /// Iterate over all pinned cards in pin order.
    pub fn iter(&self) -> impl Iterator<Item = &PinnedCard> {
        self.pins.iter()
    }

    /// All pinned cards.
    #[must_use]
    pub fn pins(&self) -> &Vector<PinnedCard> {
        &self.pins
    }

    /// Serial the next pin will receive.
    #[must_use]
    pub fn next_serial(&self) -> u64 {
        self.next_serial
    }

    /// Number of pinned cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    /// Whether nothing is pinned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardDefinition;

    fn card(id: &str) -> PooledCard {
        PooledCard::new(CardDefinition::new(id, id, 2))
    }

    #[test]
    fn test_add_allocates_unique_ids() {
        let registry = PinRegistry::new();
        let (registry, a) = registry.add(card("x"), DeckId::IndividualTraits);
        let (registry, b) = registry.add(card("x"), DeckId::IndividualTraits);

        assert_ne!(a.pin_id, b.pin_id);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.count_for(DeckId::IndividualTraits, &CardId::new("x")), 2);
        assert_eq!(registry.next_serial(), 2);
    }

    #[test]
    fn test_add_leaves_original_untouched() {
        let registry = PinRegistry::new();
        let (next, _) = registry.add(card("x"), DeckId::CommunityTraits);
        assert!(registry.is_empty());
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn test_remove() {
        let (registry, pinned) = PinRegistry::new().add(card("x"), DeckId::IndividualTraits);

        let (after, removed) = registry.remove(pinned.pin_id);
        assert_eq!(removed, Some(pinned.clone()));
        assert!(after.is_empty());
        // Serial keeps counting after removal.
        assert_eq!(after.next_serial(), 1);

        let (same, none) = after.remove(pinned.pin_id);
        assert!(none.is_none());
        assert_eq!(same, after);
    }

    #[test]
    fn test_filter_by_deck() {
        let registry = PinRegistry::new();
        let (registry, _) = registry.add(card("x"), DeckId::IndividualTraits);
        let (registry, _) = registry.add(card("y"), DeckId::CommunityTraits);
        let (registry, _) = registry.add(card("z"), DeckId::IndividualTraits);

        let individual: Vec<_> = registry
            .filter_by_deck(DeckId::IndividualTraits)
            .map(|pin| pin.card_id().clone())
            .collect();
        assert_eq!(individual, vec![CardId::new("x"), CardId::new("z")]);
        assert_eq!(registry.filter_by_deck(DeckId::Events).count(), 0);
    }

    #[test]
    fn test_from_parts_bumps_serial() {
        let (registry, _) = PinRegistry::new().add(card("x"), DeckId::IndividualTraits);
        let (registry, _) = registry.add(card("x"), DeckId::IndividualTraits);

        let restored = PinRegistry::from_parts(registry.pins().clone(), 0);
        assert_eq!(restored.next_serial(), 2);

        let (_, fresh) = restored.add(card("x"), DeckId::IndividualTraits);
        assert_eq!(fresh.pin_id, PinId::new(2));
    }
}
