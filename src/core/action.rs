//! Session actions.
//!
//! Every change the companion UI can request is one `SessionAction`. The
//! UI builds an action from a click and hands it to `Session::apply`,
//! which returns the next session. Actions are plain data and serialize,
//! so a session can be replayed from its action log.

use serde::{Deserialize, Serialize};

use super::counters::CounterKind;
use super::entity::{CardId, CommunityId, PinId};
use crate::decks::DeckId;

/// A requested change to a session.
///
/// ## Example
///
/// ```
/// use society_deck::core::{CardId, SessionAction};
/// use society_deck::decks::DeckId;
///
/// let pin = SessionAction::PinCard {
///     deck: DeckId::IndividualTraits,
///     card: CardId::new("lucky"),
/// };
/// assert_eq!(pin.name(), "pin_card");
/// assert_eq!(pin.deck(), Some(DeckId::IndividualTraits));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionAction {
    // === Decks ===
    /// Draw one card from a draw deck.
    Draw { deck: DeckId },
    /// Reveal a fresh row in a reveal deck.
    Reveal { deck: DeckId },
    /// Choose a revealed card; it is discarded.
    SelectCard { deck: DeckId, card: CardId },
    /// Pin a revealed card.
    PinCard { deck: DeckId, card: CardId },
    /// Return a pinned card to its deck's discard pile.
    Unpin { pin: PinId },
    Shuffle { deck: DeckId },
    /// Discard every revealed card without revealing new ones.
    ClearRevealed { deck: DeckId },

    // === Assignments ===
    AssignToPlayer { pin: PinId, player: String },
    AssignToCommunity { pin: PinId, community: CommunityId },
    ClearAssignment { pin: PinId },

    // === Communities ===
    FormCommunity {
        name: String,
        members: Vec<String>,
        /// Members asking to keep their balance. Only honored for
        /// players who may opt out.
        opt_out: Vec<String>,
    },
    AddMembers {
        community: CommunityId,
        members: Vec<String>,
        opt_out: Vec<String>,
    },
    Disband { community: CommunityId },
    PayUpkeep { community: CommunityId },

    // === Balances and counters ===
    AdjustPlayerResources { player: String, delta: i64 },
    AdjustCommunityResources { community: CommunityId, delta: i64 },
    AdjustCounter { counter: CounterKind, delta: i64 },

    // === Turns and roster ===
    AdvanceTurn,
    AddPlayer { name: String },
    RemovePlayer { name: String },
}

impl SessionAction {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            SessionAction::Draw { .. } => "draw",
            SessionAction::Reveal { .. } => "reveal",
            SessionAction::SelectCard { .. } => "select_card",
            SessionAction::PinCard { .. } => "pin_card",
            SessionAction::Unpin { .. } => "unpin",
            SessionAction::Shuffle { .. } => "shuffle",
            SessionAction::ClearRevealed { .. } => "clear_revealed",
            SessionAction::AssignToPlayer { .. } => "assign_to_player",
            SessionAction::AssignToCommunity { .. } => "assign_to_community",
            SessionAction::ClearAssignment { .. } => "clear_assignment",
            SessionAction::FormCommunity { .. } => "form_community",
            SessionAction::AddMembers { .. } => "add_members",
            SessionAction::Disband { .. } => "disband",
            SessionAction::PayUpkeep { .. } => "pay_upkeep",
            SessionAction::AdjustPlayerResources { .. } => "adjust_player_resources",
            SessionAction::AdjustCommunityResources { .. } => "adjust_community_resources",
            SessionAction::AdjustCounter { .. } => "adjust_counter",
            SessionAction::AdvanceTurn => "advance_turn",
            SessionAction::AddPlayer { .. } => "add_player",
            SessionAction::RemovePlayer { .. } => "remove_player",
        }
    }

    /// The deck this action works on, if any.
    #[must_use]
    pub fn deck(&self) -> Option<DeckId> {
        match self {
            SessionAction::Draw { deck }
            | SessionAction::Reveal { deck }
            | SessionAction::SelectCard { deck, .. }
            | SessionAction::PinCard { deck, .. }
            | SessionAction::Shuffle { deck }
            | SessionAction::ClearRevealed { deck } => Some(*deck),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck() {
        assert_eq!(
            SessionAction::Shuffle { deck: DeckId::Events }.deck(),
            Some(DeckId::Events)
        );
        assert_eq!(SessionAction::Unpin { pin: PinId::new(1) }.deck(), None);
        assert_eq!(SessionAction::AdvanceTurn.deck(), None);
    }

    #[test]
    fn test_json_roundtrip() {
        let actions = vec![
            SessionAction::FormCommunity {
                name: "Camp".to_string(),
                members: vec!["Ada".to_string(), "Bo".to_string()],
                opt_out: Vec::new(),
            },
            SessionAction::AdjustCounter {
                counter: CounterKind::Extinction,
                delta: -2,
            },
            SessionAction::AdvanceTurn,
        ];

        let json = serde_json::to_string(&actions).unwrap();
        let back: Vec<SessionAction> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, actions);
    }
}
