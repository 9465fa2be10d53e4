//! Closed enumerations attached to card definitions.
//!
//! ## TraitEffect
//!
//! Trait cards carry a named rule that other parts of the engine act on.
//! The name printed on the card is resolved into a `TraitEffect` once,
//! when the deck is loaded, so a typo shows up as "no effect" at load time
//! instead of silently failing a string comparison later.
//!
//! ## CardTone
//!
//! Whether a card is good, bad or mixed news for the table.

use serde::{Deserialize, Serialize};

/// A named rule carried by a pinned trait card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraitEffect {
    /// Counts as one fewer member for upkeep.
    #[serde(rename = "Self-Sufficient")]
    SelfSufficient,
    /// Counts as one extra member for upkeep.
    Helpless,
    /// Reduces trait-draw costs for the community.
    Efficient,
    /// May reroll a die, keeping the better result.
    Lucky,
    /// Adds one to survival rolls.
    Survivalist,
    /// May keep their resources when joining a community.
    Paranoid,
    /// Joins communities without paying the join cost.
    Charismatic,
}

impl TraitEffect {
    /// Every known trait effect.
    pub const ALL: [TraitEffect; 7] = [
        TraitEffect::SelfSufficient,
        TraitEffect::Helpless,
        TraitEffect::Efficient,
        TraitEffect::Lucky,
        TraitEffect::Survivalist,
        TraitEffect::Paranoid,
        TraitEffect::Charismatic,
    ];

    /// Resolve a printed trait name.
    ///
    /// Matching ignores case, spaces and punctuation, so "Self-Sufficient",
    /// "self sufficient" and "SelfSufficient" all resolve.
    ///
    /// ```
    /// use society_deck::cards::TraitEffect;
    ///
    /// assert_eq!(TraitEffect::from_name("self sufficient"), Some(TraitEffect::SelfSufficient));
    /// assert_eq!(TraitEffect::from_name("Tall"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();

        Self::ALL.into_iter().find(|effect| {
            effect
                .name()
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .map(|c| c.to_ascii_lowercase())
                .eq(normalized.chars())
        })
    }

    /// The name as printed on the card.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TraitEffect::SelfSufficient => "Self-Sufficient",
            TraitEffect::Helpless => "Helpless",
            TraitEffect::Efficient => "Efficient",
            TraitEffect::Lucky => "Lucky",
            TraitEffect::Survivalist => "Survivalist",
            TraitEffect::Paranoid => "Paranoid",
            TraitEffect::Charismatic => "Charismatic",
        }
    }
}

impl std::fmt::Display for TraitEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Good, bad or mixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardTone {
    Good,
    Bad,
    Mixed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_round_trips_every_effect() {
        for effect in TraitEffect::ALL {
            assert_eq!(TraitEffect::from_name(effect.name()), Some(effect));
        }
    }

    #[test]
    fn test_from_name_is_lenient() {
        assert_eq!(TraitEffect::from_name("  LUCKY "), Some(TraitEffect::Lucky));
        assert_eq!(TraitEffect::from_name("Self Sufficient"), Some(TraitEffect::SelfSufficient));
        assert_eq!(TraitEffect::from_name("Lucky Charm"), None);
        assert_eq!(TraitEffect::from_name(""), None);
    }

    #[test]
    fn test_serde_uses_printed_names() {
        let json = serde_json::to_string(&TraitEffect::SelfSufficient).unwrap();
        assert_eq!(json, "\"Self-Sufficient\"");

        let tone: CardTone = serde_json::from_str("\"mixed\"").unwrap();
        assert_eq!(tone, CardTone::Mixed);
    }
}
