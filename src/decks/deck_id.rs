//! Deck identity.
//!
//! The set of decks is fixed, so deck identity is a closed enum instead of
//! a title string. The title is only used for display and for the
//! `deckTitle` field of persisted pinned cards.

use serde::{Deserialize, Serialize};

/// How a deck is played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeckKind {
    /// One card at a time.
    Draw,
    /// Reveal several cards and choose among them.
    Reveal,
}

/// One of the game's decks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DeckId {
    #[serde(rename = "Individual Traits")]
    IndividualTraits,
    #[serde(rename = "Community Traits")]
    CommunityTraits,
    Events,
    Hazards,
}

impl DeckId {
    /// Every deck, in display order.
    pub const ALL: [DeckId; 4] = [
        DeckId::IndividualTraits,
        DeckId::CommunityTraits,
        DeckId::Events,
        DeckId::Hazards,
    ];

    /// How this deck is played.
    #[must_use]
    pub const fn kind(self) -> DeckKind {
        match self {
            DeckId::IndividualTraits | DeckId::CommunityTraits => DeckKind::Reveal,
            DeckId::Events | DeckId::Hazards => DeckKind::Draw,
        }
    }

    /// Whether pinned cards from this deck are assignable traits.
    #[must_use]
    pub const fn is_trait_deck(self) -> bool {
        matches!(self, DeckId::IndividualTraits | DeckId::CommunityTraits)
    }

    /// Display title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            DeckId::IndividualTraits => "Individual Traits",
            DeckId::CommunityTraits => "Community Traits",
            DeckId::Events => "Events",
            DeckId::Hazards => "Hazards",
        }
    }

    /// Look a deck up by its title.
    #[must_use]
    pub fn from_title(title: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|deck| deck.title() == title)
    }
}

impl std::fmt::Display for DeckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}
