//! Identifier types.
//!
//! Cards, pins and communities each get their own identifier type so the
//! three can never be mixed up at a call site.
//!
//! ## Identity Rules
//!
//! - `CardId`: unique per *definition*, not per physical copy. Several
//!   pooled copies share one `CardId`.
//! - `PinId`: unique per *pin event*. Pinning two copies of the same
//!   definition from the same deck yields two distinct `PinId`s.
//! - `CommunityId`: assigned monotonically by the session, never reused.
//!
//! ```
//! use society_deck::core::{CardId, PinId, CommunityId};
//!
//! let card = CardId::new("forager");
//! assert_eq!(card.as_str(), "forager");
//!
//! assert_ne!(PinId::new(1), PinId::new(2));
//! assert_eq!(CommunityId::new(3).next(), CommunityId::new(4));
//! ```

use serde::{Deserialize, Serialize};

/// Identifier of a card definition (shared by all of its copies).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw ID string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of one pinned card, allocated by the pin registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinId(pub u64);

impl PinId {
    /// Create a pin ID from its serial.
    #[must_use]
    pub const fn new(serial: u64) -> Self {
        Self(serial)
    }

    /// Get the raw serial.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pin({})", self.0)
    }
}

/// Identifier of a community.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommunityId(pub u32);

impl CommunityId {
    /// Create a community ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The ID that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for CommunityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Community({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id_display() {
        let id = CardId::new("scavenger");
        assert_eq!(format!("{}", id), "scavenger");
        assert_eq!(CardId::from("scavenger"), id);
    }

    #[test]
    fn test_pin_id() {
        let id = PinId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(format!("{}", id), "Pin(7)");
    }

    #[test]
    fn test_community_id_next() {
        let id = CommunityId::new(1);
        assert_eq!(id.next().raw(), 2);
        assert_eq!(format!("{}", id), "Community(1)");
    }

    #[test]
    fn test_ids_serialize_transparently() {
        assert_eq!(serde_json::to_string(&CardId::new("a")).unwrap(), "\"a\"");
        assert_eq!(serde_json::to_string(&PinId::new(3)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&CommunityId::new(4)).unwrap(), "4");
    }
}
