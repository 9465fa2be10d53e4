//! Card pools: multisets of pooled cards.
//!
//! Pools are `im::Vector`s so that a transition can return a new pool in
//! O(1) clone time while the caller keeps the old one. Order inside a pool
//! carries no meaning; only per-id counts do.

use im::Vector;
use rustc_hash::FxHashMap;

use super::definition::CardDefinition;
use super::instance::PooledCard;
use crate::core::entity::CardId;
use crate::core::rng::GameRng;

/// Result of sampling from a pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sample {
    /// Cards drawn, in draw order.
    pub selected: Vector<PooledCard>,
    /// Cards left behind.
    pub remaining: Vector<PooledCard>,
}

/// Pool operations.
///
/// ## Example
///
/// ```
/// use society_deck::cards::{CardDefinition, CardPool};
/// use society_deck::core::GameRng;
///
/// let defs = vec![CardDefinition::new("a", "Alpha", 3), CardDefinition::new("b", "Beta", 1)];
/// let pool = CardPool::initialize(&defs);
/// assert_eq!(pool.len(), 4);
///
/// let mut rng = GameRng::new(1);
/// let sample = CardPool::sample_without_replacement(&pool, 2, &mut rng);
/// assert_eq!(sample.selected.len(), 2);
/// assert_eq!(sample.remaining.len(), 2);
/// ```
pub struct CardPool;

impl CardPool {
    /// Expand each definition into `quantity` copies.
    #[must_use]
    pub fn initialize(definitions: &[CardDefinition]) -> Vector<PooledCard> {
        definitions
            .iter()
            .flat_map(|def| std::iter::repeat(PooledCard::from(def)).take(def.quantity as usize))
            .collect()
    }

    /// Draw `min(n, |pool|)` cards uniformly at random without replacement.
    ///
    /// `selected ∪ remaining` equals `pool` as a multiset.
    pub fn sample_without_replacement(
        pool: &Vector<PooledCard>,
        n: usize,
        rng: &mut GameRng,
    ) -> Sample {
        let mut cards: Vec<PooledCard> = pool.iter().cloned().collect();
        let take = n.min(cards.len());

        // Partial Fisher-Yates: the first `take` slots end up a uniform sample.
        for i in 0..take {
            let j = rng.gen_range_usize(i..cards.len());
            cards.swap(i, j);
        }

        let remaining = cards.split_off(take);
        Sample {
            selected: cards.into_iter().collect(),
            remaining: remaining.into_iter().collect(),
        }
    }

    /// Rebuild a pool from definitions, leaving out `excluded` copies and
    /// reusing `reincluded` ones.
    ///
    /// Each definition yields `quantity − count(excluded, id)` copies,
    /// clamped at zero. Reincluded copies of an id are kept first and the
    /// rest are topped up with fresh copies, so an id never appears more
    /// often than that cap. Fresh copies come first, followed by the
    /// reincluded ones. Reincluded cards with no matching definition are
    /// dropped.
    #[must_use]
    pub fn rebuild_excluding<'a>(
        definitions: &[CardDefinition],
        excluded: impl IntoIterator<Item = &'a PooledCard>,
        reincluded: &Vector<PooledCard>,
    ) -> Vector<PooledCard> {
        let excluded_counts = Self::counts(excluded);

        let mut reincluded_by_id: FxHashMap<&CardId, Vec<&PooledCard>> = FxHashMap::default();
        for card in reincluded {
            reincluded_by_id.entry(card.id()).or_default().push(card);
        }

        let mut fresh = Vector::new();
        let mut reused = Vector::new();
        for def in definitions {
            let excluded = excluded_counts.get(&def.id).copied().unwrap_or(0);
            let cap = (def.quantity as usize).saturating_sub(excluded);

            let kept = reincluded_by_id.remove(&def.id).unwrap_or_default();
            if kept.len() > cap {
                tracing::debug!(
                    target: "society_deck::pool",
                    card = %def.id,
                    dropped = kept.len() - cap,
                    "card_pool.reincluded_over_cap"
                );
            }
            let kept_count = kept.len().min(cap);
            reused.extend(kept.into_iter().take(cap).cloned());

            for _ in kept_count..cap {
                fresh.push_back(PooledCard::from(def));
            }
        }

        for id in reincluded_by_id.keys() {
            tracing::warn!(
                target: "society_deck::pool",
                card = %id,
                "card_pool.reincluded_unknown_card"
            );
        }

        fresh.append(reused);
        fresh
    }

    /// Count the copies of `id` in a collection of cards.
    #[must_use]
    pub fn count<'a>(cards: impl IntoIterator<Item = &'a PooledCard>, id: &CardId) -> usize {
        cards.into_iter().filter(|card| card.id() == id).count()
    }

    /// Per-id counts for a collection of cards.
    #[must_use]
    pub fn counts<'a>(cards: impl IntoIterator<Item = &'a PooledCard>) -> FxHashMap<CardId, usize> {
        let mut counts = FxHashMap::default();
        for card in cards {
            *counts.entry(card.id().clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Remove the first copy of `id`, returning it and the remaining cards.
    #[must_use]
    pub fn take_first(
        cards: &Vector<PooledCard>,
        id: &CardId,
    ) -> Option<(PooledCard, Vector<PooledCard>)> {
        let index = cards.iter().position(|card| card.id() == id)?;
        let mut remaining = cards.clone();
        let card = remaining.remove(index);
        Some((card, remaining))
    }
}
