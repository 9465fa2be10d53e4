//! Card catalog for definition lookup.
//!
//! The `CardCatalog` stores the definitions of every deck. Definitions are
//! loaded from JSON (one array per deck) by the host application; the
//! engine itself never touches the filesystem.

use rustc_hash::{FxHashMap, FxHashSet};

use super::definition::{CardDefinition, CardDefinitionFile};
use crate::core::entity::CardId;
use crate::core::error::CatalogError;
use crate::decks::DeckId;

/// Definitions for all decks.
///
/// ## Example
///
/// ```
/// use society_deck::cards::{CardCatalog, TraitEffect};
/// use society_deck::decks::DeckId;
///
/// let mut catalog = CardCatalog::new();
/// catalog
///     .load_deck(
///         DeckId::IndividualTraits,
///         r#"[{"id": "lucky", "displayName": "Lucky", "quantity": 2}]"#,
///     )
///     .unwrap();
///
/// let lucky = catalog.get(DeckId::IndividualTraits, &"lucky".into()).unwrap();
/// assert_eq!(lucky.trait_effect, Some(TraitEffect::Lucky));
/// assert_eq!(catalog.total_copies(DeckId::IndividualTraits), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    decks: FxHashMap<DeckId, Vec<CardDefinition>>,
}

impl CardCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and register one deck's definitions, replacing any previous ones.
    pub fn load_deck(&mut self, deck: DeckId, json: &str) -> Result<(), CatalogError> {
        let files: Vec<CardDefinitionFile> = serde_json::from_str(json)
            .map_err(|source| CatalogError::Parse { deck, source })?;

        let definitions: Vec<CardDefinition> = files
            .into_iter()
            .map(|file| file.resolve(deck.is_trait_deck()))
            .collect();

        self.set_deck(deck, definitions)
    }

    /// Register already-built definitions for a deck.
    pub fn set_deck(
        &mut self,
        deck: DeckId,
        definitions: Vec<CardDefinition>,
    ) -> Result<(), CatalogError> {
        if let Some(id) = first_duplicate(&definitions) {
            return Err(CatalogError::DuplicateId { deck, id });
        }

        tracing::debug!(
            target: "society_deck::cards",
            deck = %deck,
            definitions = definitions.len(),
            "card_catalog.deck_loaded"
        );
        self.decks.insert(deck, definitions);
        Ok(())
    }

    /// Builder form of `set_deck`.
    pub fn with_deck(
        mut self,
        deck: DeckId,
        definitions: Vec<CardDefinition>,
    ) -> Result<Self, CatalogError> {
        self.set_deck(deck, definitions)?;
        Ok(self)
    }

    /// Definitions for a deck (empty if the deck was never loaded).
    #[must_use]
    pub fn definitions(&self, deck: DeckId) -> &[CardDefinition] {
        self.decks.get(&deck).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Look up one definition.
    #[must_use]
    pub fn get(&self, deck: DeckId, id: &CardId) -> Option<&CardDefinition> {
        self.definitions(deck).iter().find(|def| &def.id == id)
    }

    /// Physical copies across all definitions of a deck.
    #[must_use]
    pub fn total_copies(&self, deck: DeckId) -> u32 {
        self.definitions(deck).iter().map(|def| def.quantity).sum()
    }

    /// Check whether a deck has been loaded.
    #[must_use]
    pub fn contains_deck(&self, deck: DeckId) -> bool {
        self.decks.contains_key(&deck)
    }
}

fn first_duplicate(definitions: &[CardDefinition]) -> Option<CardId> {
    let mut seen: FxHashSet<&CardId> = FxHashSet::default();
    definitions
        .iter()
        .find(|def| !seen.insert(&def.id))
        .map(|def| def.id.clone())
}
