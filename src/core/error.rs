//! Error types for the fallible boundaries of the engine.
//!
//! Deck transitions and cost computations are total and never fail. Errors
//! only arise where outside data enters: deck files, configuration,
//! persisted snapshots, and roster edits requested by the UI.

use thiserror::Error;

use super::entity::{CardId, CommunityId};
use crate::decks::DeckId;

/// Failure while loading deck definitions.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse deck definitions for {deck}: {source}")]
    Parse {
        deck: DeckId,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate card id `{id}` in {deck}")]
    DuplicateId { deck: DeckId, id: CardId },
}

/// Failure while loading engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid engine config: `{field}` must be at least {min}")]
    OutOfRange { field: &'static str, min: u32 },
}

/// Failure while importing or exporting a session snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to parse snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to decode binary snapshot: {0}")]
    Binary(#[from] bincode::Error),
    #[error("unsupported snapshot version `{found}` (expected major version {expected})")]
    UnsupportedVersion { found: String, expected: u32 },
}

/// A roster change that would break community membership rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("a community needs at least 2 members, got {0}")]
    TooFewMembers(usize),
    #[error("unknown player `{0}`")]
    UnknownPlayer(String),
    #[error("player `{name}` already belongs to {community}")]
    AlreadyInCommunity { name: String, community: CommunityId },
    #[error("player `{0}` is listed more than once")]
    DuplicateMember(String),
    #[error("player `{0}` already exists")]
    DuplicatePlayer(String),
    #[error("unknown community {0}")]
    UnknownCommunity(CommunityId),
}
