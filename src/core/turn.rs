//! Turn order.
//!
//! A round starts with the creation phase, then each community takes a
//! turn (in id order), then each player who is not in a community (in
//! roster order). The order is rebuilt whenever communities form or
//! disband; the current slot is kept if it still exists.

use serde::{Deserialize, Serialize};

use super::entity::CommunityId;
use crate::ledger::{Community, Player};

/// One position in the turn order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnSlot {
    /// The creation phase marker.
    Creation,
    Community(CommunityId),
    Player(String),
}

/// The sequence of turns and whose turn it is.
///
/// ```
/// use society_deck::core::{TurnOrder, TurnSlot};
/// use society_deck::ledger::Player;
///
/// let players = vec![Player::new("Ada", 0), Player::new("Bo", 0)];
/// let mut order = TurnOrder::rebuild(&TurnOrder::default(), &players, &[]);
///
/// assert_eq!(order.current_slot(), Some(&TurnSlot::Creation));
/// order = order.advance();
/// assert_eq!(order.current_slot(), Some(&TurnSlot::Player("Ada".to_string())));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOrder {
    pub slots: Vec<TurnSlot>,
    pub current: usize,
}

impl TurnOrder {
    /// Build the order for the given roster, keeping `previous`'s current
    /// slot when it still exists and otherwise falling back to the slot at
    /// the same position (clamped).
    #[must_use]
    pub fn rebuild<'a>(
        previous: &TurnOrder,
        players: impl IntoIterator<Item = &'a Player>,
        communities: impl IntoIterator<Item = &'a Community>,
    ) -> Self {
        let mut communities: Vec<&Community> = communities.into_iter().collect();
        communities.sort_by_key(|c| c.id);

        let mut slots = vec![TurnSlot::Creation];
        slots.extend(communities.iter().map(|c| TurnSlot::Community(c.id)));
        slots.extend(
            players
                .into_iter()
                .filter(|p| !communities.iter().any(|c| c.has_member(&p.name)))
                .map(|p| TurnSlot::Player(p.name.clone())),
        );

        let current = previous
            .current_slot()
            .and_then(|slot| slots.iter().position(|s| s == slot))
            .unwrap_or_else(|| previous.current.min(slots.len() - 1));

        Self { slots, current }
    }

    /// Move to the next slot, wrapping to the creation phase.
    #[must_use]
    pub fn advance(&self) -> Self {
        let current = if self.slots.is_empty() {
            0
        } else {
            (self.current + 1) % self.slots.len()
        };
        Self {
            slots: self.slots.clone(),
            current,
        }
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_slot(&self) -> Option<&TurnSlot> {
        self.slots.get(self.current)
    }

    /// Whether it is `community`'s turn.
    #[must_use]
    pub fn is_turn_of_community(&self, community: CommunityId) -> bool {
        self.current_slot() == Some(&TurnSlot::Community(community))
    }

    /// Whether the creation phase is current.
    #[must_use]
    pub fn is_creation_phase(&self) -> bool {
        self.current_slot() == Some(&TurnSlot::Creation)
    }
}
