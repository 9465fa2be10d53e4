//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of one card design.
//! `quantity` says how many physical copies of it the deck contains.
//!
//! Deck files are read through `CardDefinitionFile`, which accepts the
//! looser shape the deck JSON uses for `isTraitEffect` (a trait name or a
//! plain `true`) and resolves it into a `TraitEffect` exactly once.

use serde::{Deserialize, Serialize};

use super::traits::{CardTone, TraitEffect};
use crate::core::entity::CardId;

/// Static card definition.
///
/// ## Example
///
/// ```
/// use society_deck::cards::{CardDefinition, TraitEffect};
///
/// let lucky = CardDefinition::new("lucky", "Lucky", 2)
///     .with_trait(TraitEffect::Lucky)
///     .with_trait_cost(3);
///
/// assert_eq!(lucky.quantity, 2);
/// assert_eq!(lucky.trait_effect, Some(TraitEffect::Lucky));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDefinition {
    /// Unique identifier for this definition.
    pub id: CardId,

    /// Name shown on the card.
    pub display_name: String,

    /// Flavor text.
    #[serde(default)]
    pub flavor: String,

    /// Rules text.
    #[serde(default)]
    pub effect: String,

    /// Physical copies in the deck.
    pub quantity: u32,

    #[serde(default, rename = "type")]
    pub card_type: Option<CardTone>,

    /// Trait rule carried by this card, if any.
    #[serde(default, rename = "isTraitEffect")]
    pub trait_effect: Option<TraitEffect>,

    /// Resource cost of drawing this trait.
    #[serde(default)]
    pub trait_cost: Option<u32>,

    /// Free-form cost text printed on the card.
    #[serde(default)]
    pub cost: Option<String>,

    #[serde(default)]
    pub effect1: Option<String>,

    #[serde(default)]
    pub effect2: Option<String>,
}

impl CardDefinition {
    /// Create a definition with empty text.
    #[must_use]
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: CardId::new(id),
            display_name: display_name.into(),
            flavor: String::new(),
            effect: String::new(),
            quantity,
            card_type: None,
            trait_effect: None,
            trait_cost: None,
            cost: None,
            effect1: None,
            effect2: None,
        }
    }

    /// Attach a trait effect (builder pattern).
    #[must_use]
    pub fn with_trait(mut self, effect: TraitEffect) -> Self {
        self.trait_effect = Some(effect);
        self
    }

    /// Set the trait draw cost (builder pattern).
    #[must_use]
    pub fn with_trait_cost(mut self, cost: u32) -> Self {
        self.trait_cost = Some(cost);
        self
    }

    /// Set the tone (builder pattern).
    #[must_use]
    pub fn with_tone(mut self, tone: CardTone) -> Self {
        self.card_type = Some(tone);
        self
    }

    /// Set the rules text (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = effect.into();
        self
    }
}

/// The `isTraitEffect` field as it appears in deck files.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum TraitMarker {
    /// `true`: the display name is the trait name.
    Flag(bool),
    /// The trait name itself.
    Name(String),
}

/// A definition as written in a deck file.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDefinitionFile {
    pub id: CardId,
    pub display_name: String,
    #[serde(default)]
    pub flavor: String,
    #[serde(default)]
    pub effect: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default, rename = "type")]
    pub card_type: Option<CardTone>,
    #[serde(default)]
    pub is_trait_effect: Option<TraitMarker>,
    #[serde(default)]
    pub trait_cost: Option<u32>,
    #[serde(default)]
    pub cost: Option<String>,
    #[serde(default)]
    pub effect1: Option<String>,
    #[serde(default)]
    pub effect2: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

impl CardDefinitionFile {
    /// Resolve into a `CardDefinition`.
    ///
    /// When `trait_deck` is set, a card without an explicit marker still
    /// gets a trait effect if its display name names one.
    #[must_use]
    pub fn resolve(self, trait_deck: bool) -> CardDefinition {
        let trait_effect = match &self.is_trait_effect {
            Some(TraitMarker::Name(name)) => TraitEffect::from_name(name),
            Some(TraitMarker::Flag(true)) => TraitEffect::from_name(&self.display_name),
            Some(TraitMarker::Flag(false)) => None,
            None if trait_deck => TraitEffect::from_name(&self.display_name),
            None => None,
        };

        if trait_effect.is_none() {
            if let Some(TraitMarker::Name(name)) = &self.is_trait_effect {
                tracing::warn!(
                    target: "society_deck::cards",
                    card = %self.id,
                    trait_name = %name,
                    "card_definition.unknown_trait"
                );
            }
        }

        CardDefinition {
            id: self.id,
            display_name: self.display_name,
            flavor: self.flavor,
            effect: self.effect,
            quantity: self.quantity,
            card_type: self.card_type,
            trait_effect,
            trait_cost: self.trait_cost,
            cost: self.cost,
            effect1: self.effect1,
            effect2: self.effect2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let card = CardDefinition::new("efficient", "Efficient", 2)
            .with_trait(TraitEffect::Efficient)
            .with_trait_cost(4)
            .with_tone(CardTone::Good)
            .with_effect("Trait draws cost 2 less.");

        assert_eq!(card.id, CardId::new("efficient"));
        assert_eq!(card.trait_cost, Some(4));
        assert_eq!(card.card_type, Some(CardTone::Good));
        assert_eq!(card.effect, "Trait draws cost 2 less.");
    }

    #[test]
    fn test_file_resolves_named_marker() {
        let file: CardDefinitionFile = serde_json::from_str(
            r#"{"id":"t1","displayName":"Quick Learner","quantity":2,"isTraitEffect":"Efficient"}"#,
        )
        .unwrap();
        let card = file.resolve(false);
        assert_eq!(card.trait_effect, Some(TraitEffect::Efficient));
        assert_eq!(card.quantity, 2);
    }

    #[test]
    fn test_file_resolves_flag_marker_from_display_name() {
        let file: CardDefinitionFile = serde_json::from_str(
            r#"{"id":"t2","displayName":"Helpless","isTraitEffect":true}"#,
        )
        .unwrap();
        let card = file.resolve(false);
        assert_eq!(card.trait_effect, Some(TraitEffect::Helpless));
        assert_eq!(card.quantity, 1);
    }

    #[test]
    fn test_trait_deck_infers_from_display_name() {
        let file: CardDefinitionFile =
            serde_json::from_str(r#"{"id":"t3","displayName":"Paranoid","quantity":1}"#).unwrap();
        assert_eq!(file.clone().resolve(true).trait_effect, Some(TraitEffect::Paranoid));
        assert_eq!(file.resolve(false).trait_effect, None);
    }

    #[test]
    fn test_unknown_trait_name_has_no_effect() {
        let file: CardDefinitionFile = serde_json::from_str(
            r#"{"id":"t4","displayName":"Tall","isTraitEffect":"Tall"}"#,
        )
        .unwrap();
        assert_eq!(file.resolve(true).trait_effect, None);
    }

    #[test]
    fn test_definition_serialization() {
        let card = CardDefinition::new("a", "Alpha", 3).with_trait(TraitEffect::Lucky);

        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("\"displayName\":\"Alpha\""));
        assert!(json.contains("\"isTraitEffect\":\"Lucky\""));

        let deserialized: CardDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
