//! Session export and import.
//!
//! A `SessionSnapshot` is the persisted form of a `Session`: plain vectors
//! and `[key, value]` pairs instead of persistent maps, plus a version and
//! a timestamp. JSON is what the companion app writes to storage and what
//! players paste when moving a game between devices. The binary form is a
//! compact bincode encoding of the same structure.
//!
//! ## Versioning
//!
//! Snapshots carry a `"major.minor"` version string. Imports accept any
//! minor version of the current major version and reject everything else.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::cards::PinnedCard;
use crate::core::counters::Counters;
use crate::core::entity::{CommunityId, PinId};
use crate::core::error::SnapshotError;
use crate::core::state::Session;
use crate::core::turn::TurnOrder;
use crate::decks::{DeckId, DeckState};
use crate::ledger::{Community, Player};
use crate::pins::{AssignmentLedger, PinRegistry};

/// Major version written by this crate.
pub const SNAPSHOT_MAJOR_VERSION: u32 = 1;

/// Full version string written by this crate.
pub const SNAPSHOT_VERSION: &str = "1.0";

/// Serializable image of a session.
///
/// ## Example
///
/// ```
/// use society_deck::cards::CardCatalog;
/// use society_deck::core::{EngineConfig, Session};
/// use society_deck::SessionSnapshot;
///
/// let session = Session::new_game(&CardCatalog::new(), &EngineConfig::default(), ["Ada", "Bo"]);
/// let json = SessionSnapshot::from_session(&session, 1_700_000_000_000).to_json().unwrap();
///
/// let restored = SessionSnapshot::from_json(&json).unwrap().into_session();
/// assert_eq!(restored, session);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub version: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub counters: Counters,
    pub player_resources: Vec<Player>,
    pub communities: Vec<Community>,
    pub next_community_id: CommunityId,
    pub next_pin_serial: u64,
    pub pinned_cards: Vec<PinnedCard>,
    pub card_player_assignments: Vec<(PinId, String)>,
    pub community_trait_assignments: Vec<(PinId, CommunityId)>,
    pub turn_order: TurnOrder,
    pub decks: Vec<(DeckId, DeckState)>,
}

impl SessionSnapshot {
    /// Capture `session` stamped with `timestamp` (ms since the epoch).
    #[must_use]
    pub fn from_session(session: &Session, timestamp: u64) -> Self {
        Self {
            version: SNAPSHOT_VERSION.to_string(),
            timestamp,
            counters: session.counters,
            player_resources: session.players.iter().cloned().collect(),
            communities: session.communities.iter().cloned().collect(),
            next_community_id: session.next_community_id,
            next_pin_serial: session.pins.next_serial(),
            pinned_cards: session.pins.iter().cloned().collect(),
            card_player_assignments: session.assignments.player_entries(),
            community_trait_assignments: session.assignments.community_entries(),
            turn_order: session.turn_order.clone(),
            decks: session.decks.iter().map(|(id, state)| (*id, state.clone())).collect(),
        }
    }

    /// Capture `session` stamped with the current time.
    #[must_use]
    pub fn capture(session: &Session) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0);
        Self::from_session(session, now)
    }

    /// Rebuild the session.
    #[must_use]
    pub fn into_session(self) -> Session {
        Session {
            counters: self.counters,
            players: self.player_resources.into_iter().collect(),
            communities: self.communities.into_iter().collect(),
            next_community_id: self.next_community_id,
            pins: PinRegistry::from_parts(self.pinned_cards.into_iter().collect(), self.next_pin_serial),
            assignments: AssignmentLedger::from_entries(
                self.card_player_assignments,
                self.community_trait_assignments,
            ),
            turn_order: self.turn_order,
            decks: self.decks.into_iter().collect::<BTreeMap<_, _>>(),
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a JSON snapshot, rejecting unknown major versions.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.check_version()?;
        tracing::debug!(
            target: "society_deck::snapshot",
            version = %snapshot.version,
            players = snapshot.player_resources.len(),
            pins = snapshot.pinned_cards.len(),
            "snapshot.imported"
        );
        Ok(snapshot)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a binary snapshot, rejecting unknown major versions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    fn check_version(&self) -> Result<(), SnapshotError> {
        let major = self
            .version
            .split('.')
            .next()
            .and_then(|major| major.trim().parse::<u32>().ok());

        if major == Some(SNAPSHOT_MAJOR_VERSION) {
            Ok(())
        } else {
            tracing::warn!(
                target: "society_deck::snapshot",
                found = %self.version,
                "snapshot.unsupported_version"
            );
            Err(SnapshotError::UnsupportedVersion {
                found: self.version.clone(),
                expected: SNAPSHOT_MAJOR_VERSION,
            })
        }
    }
}
