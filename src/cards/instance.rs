//! Card instances - copies occupying pool slots.
//!
//! A `PooledCard` is one physical copy of a `CardDefinition`. Several
//! pooled cards may share a `CardId`; pools are multisets and every
//! operation preserves counts, not just presence.
//!
//! A `PinnedCard` is a pooled card taken out of circulation, tagged with
//! the deck it came from and a unique `PinId`.

use serde::{Deserialize, Serialize};

use super::definition::CardDefinition;
use super::traits::TraitEffect;
use crate::core::entity::{CardId, PinId};
use crate::decks::DeckId;

/// One copy of a card definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PooledCard(pub CardDefinition);

impl PooledCard {
    /// Create a copy of a definition.
    #[must_use]
    pub fn new(definition: CardDefinition) -> Self {
        Self(definition)
    }

    /// The definition's ID.
    #[must_use]
    pub fn id(&self) -> &CardId {
        &self.0.id
    }

    /// The underlying definition.
    #[must_use]
    pub fn definition(&self) -> &CardDefinition {
        &self.0
    }

    /// Display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.0.display_name
    }

    /// Trait effect carried by the card.
    #[must_use]
    pub fn trait_effect(&self) -> Option<TraitEffect> {
        self.0.trait_effect
    }
}

impl From<&CardDefinition> for PooledCard {
    fn from(definition: &CardDefinition) -> Self {
        Self(definition.clone())
    }
}

/// A card removed from circulation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedCard {
    /// The pinned copy.
    pub card: PooledCard,

    /// Deck the card was pinned from.
    #[serde(rename = "deckTitle")]
    pub deck: DeckId,

    /// Unique identity while pinned.
    #[serde(rename = "pinnedId")]
    pub pin_id: PinId,
}

impl PinnedCard {
    /// The definition's ID.
    #[must_use]
    pub fn card_id(&self) -> &CardId {
        self.card.id()
    }

    /// Trait effect carried by the card.
    #[must_use]
    pub fn trait_effect(&self) -> Option<TraitEffect> {
        self.card.trait_effect()
    }
}
