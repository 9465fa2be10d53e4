//! Assignment ledger: who carries which pinned trait.
//!
//! Individual traits are assigned to players by name; community traits are
//! assigned to communities by id. Both maps are keyed by `PinId`, so two
//! pinned copies of the same trait can go to two different owners.
//!
//! Entries are removed when the pin is removed or when the owner ceases to
//! exist. The ledger does not check that owners exist; the session does.

use im::HashMap;

use crate::core::entity::{CommunityId, PinId};

/// Pin → owner mappings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssignmentLedger {
    players: HashMap<PinId, String>,
    communities: HashMap<PinId, CommunityId>,
}

impl AssignmentLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from `[key, value]` entry lists.
    #[must_use]
    pub fn from_entries(
        players: impl IntoIterator<Item = (PinId, String)>,
        communities: impl IntoIterator<Item = (PinId, CommunityId)>,
    ) -> Self {
        Self {
            players: players.into_iter().collect(),
            communities: communities.into_iter().collect(),
        }
    }

    /// Assign an individual trait to a player, replacing any previous owner.
    #[must_use]
    pub fn assign_player(&self, pin: PinId, player: impl Into<String>) -> Self {
        Self {
            players: self.players.update(pin, player.into()),
            communities: self.communities.without(&pin),
        }
    }

    /// Assign a community trait to a community, replacing any previous owner.
    #[must_use]
    pub fn assign_community(&self, pin: PinId, community: CommunityId) -> Self {
        Self {
            players: self.players.without(&pin),
            communities: self.communities.update(pin, community),
        }
    }

    /// Drop whatever assignment `pin` has.
    #[must_use]
    pub fn clear(&self, pin: PinId) -> Self {
        Self {
            players: self.players.without(&pin),
            communities: self.communities.without(&pin),
        }
    }

    /// Drop every assignment to `player`.
    #[must_use]
    pub fn remove_player(&self, player: &str) -> Self {
        Self {
            players: self
                .players
                .iter()
                .filter(|(_, name)| name.as_str() != player)
                .map(|(k, v)| (*k, v.clone()))
                .collect(),
            communities: self.communities.clone(),
        }
    }

    /// Drop every assignment to `community`.
    #[must_use]
    pub fn remove_community(&self, community: CommunityId) -> Self {
        Self {
            players: self.players.clone(),
            communities: self
                .communities
                .iter()
                .filter(|(_, id)| **id != community)
                .map(|(k, v)| (*k, *v))
                .collect(),
        }
    }

    /// Player holding `pin`, if any.
    #[must_use]
    pub fn player_for(&self, pin: PinId) -> Option<&str> {
        self.players.get(&pin).map(String::as_str)
    }

    /// Community holding `pin`, if any.
    #[must_use]
    pub fn community_for(&self, pin: PinId) -> Option<CommunityId> {
        self.communities.get(&pin).copied()
    }

    /// Pins assigned to `player`, in pin order.
    #[must_use]
    pub fn pins_for_player(&self, player: &str) -> Vec<PinId> {
        let mut pins: Vec<PinId> = self
            .players
            .iter()
            .filter(|(_, name)| name.as_str() == player)
            .map(|(pin, _)| *pin)
            .collect();
        pins.sort();
        pins
    }

    /// Pins assigned to `community`, in pin order.
    #[must_use]
    pub fn pins_for_community(&self, community: CommunityId) -> Vec<PinId> {
        let mut pins: Vec<PinId> = self
            .communities
            .iter()
            .filter(|(_, id)| **id == community)
            .map(|(pin, _)| *pin)
            .collect();
        pins.sort();
        pins
    }

    /// Individual-trait entries sorted by pin, for persistence.
    #[must_use]
    pub fn player_entries(&self) -> Vec<(PinId, String)> {
        let mut entries: Vec<_> = self.players.iter().map(|(k, v)| (*k, v.clone())).collect();
        entries.sort();
        entries
    }

    /// Community-trait entries sorted by pin, for persistence.
    #[must_use]
    pub fn community_entries(&self) -> Vec<(PinId, CommunityId)> {
        let mut entries: Vec<_> = self.communities.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort();
        entries
    }

    /// Whether nothing is assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty() && self.communities.is_empty()
    }
}
