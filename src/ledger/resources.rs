//! Resource ledger: player and community balances.
//!
//! ## Joining a Community
//!
//! Each joining player (unless waived) pays `cost_per_member`, clamped so
//! their balance never goes below zero. Then:
//! - players who did not opt out move their remaining balance into the
//!   community pool and drop to zero;
//! - players who opted out keep what is left.
//!
//! Existing members are never charged again when new members join.
//!
//! ## Validation
//!
//! Transitions here are total. The membership rules (at least two members,
//! one community per player) are checked separately by `validate_*` so the
//! caller can refuse a request before applying it.

use im::Vector;

use super::community::{Community, Player};
use crate::core::entity::CommunityId;
use crate::core::error::RosterError;
use crate::pins::AssignmentLedger;

/// Per-player terms for joining a community.
///
/// ```
/// use society_deck::ledger::JoinTerms;
///
/// let terms = JoinTerms::new(1).with_opt_out(["Ada"]).with_waived(["Bo"]);
/// assert!(terms.is_opted_out("Ada"));
/// assert!(terms.is_waived("Bo"));
/// assert!(!terms.is_waived("Ada"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JoinTerms {
    /// Cost each non-waived joiner pays.
    pub cost_per_member: u32,
    /// Players who keep their balance instead of pooling it.
    pub opt_out: Vec<String>,
    /// Players who join without paying.
    pub waived: Vec<String>,
}

impl JoinTerms {
    /// Terms with no opt-outs or waivers.
    #[must_use]
    pub fn new(cost_per_member: u32) -> Self {
        Self {
            cost_per_member,
            ..Self::default()
        }
    }

    /// Add players who opt out of pooling.
    #[must_use]
    pub fn with_opt_out<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.opt_out.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add players whose join cost is waived.
    #[must_use]
    pub fn with_waived<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.waived.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn is_opted_out(&self, name: &str) -> bool {
        self.opt_out.iter().any(|n| n == name)
    }

    #[must_use]
    pub fn is_waived(&self, name: &str) -> bool {
        self.waived.iter().any(|n| n == name)
    }
}

/// Result of charging a community its upkeep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpkeepOutcome {
    /// Amount actually taken from the pool.
    pub paid: u32,
    /// Amount the pool could not cover.
    pub shortfall: u32,
}

/// Balance transitions.
pub struct ResourceLedger;

impl ResourceLedger {
    /// Form a community from `joining`.
    ///
    /// Names that match no player are skipped, as are repeats. The
    /// community's starting pool is the sum of the transferred balances.
    #[must_use]
    pub fn form_community(
        players: &Vector<Player>,
        joining: &[String],
        terms: &JoinTerms,
        id: CommunityId,
        name: impl Into<String>,
    ) -> (Vector<Player>, Community) {
        let community = Community {
            id,
            name: name.into(),
            resources: 0,
            member_player_names: Vec::new(),
        };
        let (players, community) = Self::add_members(players, &community, joining, terms);

        tracing::info!(
            target: "society_deck::ledger",
            community = %community.id,
            members = community.member_count(),
            pooled = community.resources,
            "community.formed"
        );
        (players, community)
    }

    /// Add `new_names` to an existing community under `terms`.
    ///
    /// Players already in the community are left alone.
    #[must_use]
    pub fn add_members(
        players: &Vector<Player>,
        community: &Community,
        new_names: &[String],
        terms: &JoinTerms,
    ) -> (Vector<Player>, Community) {
        let mut players = players.clone();
        let mut community = community.clone();

        for name in new_names {
            if community.has_member(name) {
                continue;
            }
            let Some(index) = players.iter().position(|p| &p.name == name) else {
                tracing::debug!(target: "society_deck::ledger", player = %name, "community.join_unknown_player");
                continue;
            };

            let mut player = players[index].clone();
            if !terms.is_waived(name) {
                player.resources = player.resources.saturating_sub(terms.cost_per_member);
            }
            if !terms.is_opted_out(name) {
                community.resources = community.resources.saturating_add(player.resources);
                player.resources = 0;
            }

            players.set(index, player);
            community.member_player_names.push(name.clone());
        }

        (players, community)
    }

    /// Charge a community its upkeep, clamped at zero.
    #[must_use]
    pub fn pay_upkeep(community: &Community, upkeep: u32) -> (Community, UpkeepOutcome) {
        let paid = upkeep.min(community.resources);
        let outcome = UpkeepOutcome {
            paid,
            shortfall: upkeep - paid,
        };

        let mut next = community.clone();
        next.resources -= paid;

        if outcome.shortfall > 0 {
            tracing::warn!(
                target: "society_deck::ledger",
                community = %community.id,
                shortfall = outcome.shortfall,
                "community.upkeep_shortfall"
            );
        }
        (next, outcome)
    }

    /// Apply a signed change to one player's balance, clamped at zero.
    /// Unknown names leave the roster unchanged.
    #[must_use]
    pub fn adjust_player(players: &Vector<Player>, name: &str, delta: i64) -> Vector<Player> {
        let Some(index) = players.iter().position(|p| p.name == name) else {
            return players.clone();
        };
        let mut player = players[index].clone();
        player.resources = apply_delta(player.resources, delta);
        players.update(index, player)
    }

    /// Apply a signed change to a community's pool, clamped at zero.
    #[must_use]
    pub fn adjust_community(community: &Community, delta: i64) -> Community {
        let mut next = community.clone();
        next.resources = apply_delta(next.resources, delta);
        next
    }

    /// Disband a community. Its pool is lost and its community-trait
    /// assignments are dropped; members keep their own balances.
    #[must_use]
    pub fn disband(
        communities: &Vector<Community>,
        id: CommunityId,
        assignments: &AssignmentLedger,
    ) -> (Vector<Community>, AssignmentLedger, Option<Community>) {
        let Some(index) = communities.iter().position(|c| c.id == id) else {
            return (communities.clone(), assignments.clone(), None);
        };

        let mut communities = communities.clone();
        let removed = communities.remove(index);
        tracing::info!(
            target: "society_deck::ledger",
            community = %id,
            forfeited = removed.resources,
            "community.disbanded"
        );
        (communities, assignments.remove_community(id), Some(removed))
    }

    /// Remove a member. The community may be left with fewer than two
    /// members; the caller decides whether to disband it.
    #[must_use]
    pub fn remove_member(community: &Community, name: &str) -> Community {
        let mut next = community.clone();
        next.member_player_names.retain(|member| member != name);
        next
    }

    /// Community `player` belongs to, if any.
    #[must_use]
    pub fn community_of<'a>(communities: &'a Vector<Community>, player: &str) -> Option<&'a Community> {
        communities.iter().find(|c| c.has_member(player))
    }

    /// Check that `joining` may form a new community.
    pub fn validate_formation(
        players: &Vector<Player>,
        communities: &Vector<Community>,
        joining: &[String],
    ) -> Result<(), RosterError> {
        if joining.len() < 2 {
            return Err(RosterError::TooFewMembers(joining.len()));
        }
        Self::validate_joiners(players, communities, joining)
    }

    /// Check that `new_names` may join `community`.
    pub fn validate_new_members(
        players: &Vector<Player>,
        communities: &Vector<Community>,
        community: CommunityId,
        new_names: &[String],
    ) -> Result<(), RosterError> {
        if !communities.iter().any(|c| c.id == community) {
            return Err(RosterError::UnknownCommunity(community));
        }
        Self::validate_joiners(players, communities, new_names)
    }

    fn validate_joiners(
        players: &Vector<Player>,
        communities: &Vector<Community>,
        names: &[String],
    ) -> Result<(), RosterError> {
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(RosterError::DuplicateMember(name.clone()));
            }
            if !players.iter().any(|p| &p.name == name) {
                return Err(RosterError::UnknownPlayer(name.clone()));
            }
            if let Some(existing) = Self::community_of(communities, name) {
                return Err(RosterError::AlreadyInCommunity {
                    name: name.clone(),
                    community: existing.id,
                });
            }
        }
        Ok(())
    }
}

fn apply_delta(balance: u32, delta: i64) -> u32 {
    let next = i64::from(balance).saturating_add(delta);
    u32::try_from(next.max(0)).unwrap_or(u32::MAX)
}
